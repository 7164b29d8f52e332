//! Side effect free management of internal window manager state
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod geometry;
pub mod model;
pub mod ring;
mod selection;
mod tree;

#[doc(inline)]
pub use model::{
    Display, Frame, FrameId, Installation, Protocols, Window, WindowId, Workspace, WorkspaceId,
};

/// A direction to walk a ring or the frame tree in
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Traversal {
    /// Follow `next` links, wrapping if needed
    Next,
    /// Follow `prev` links, wrapping if needed
    Prev,
}

impl Traversal {
    /// Invert this Traversal
    pub fn reverse(&self) -> Traversal {
        match self {
            Traversal::Next => Traversal::Prev,
            Traversal::Prev => Traversal::Next,
        }
    }
}

/// The axis along which a split frame divides its children.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Children are laid out left to right
    Horizontal,
    /// Children are laid out top to bottom
    Vertical,
}

/// The transient list overlay a workspace is currently showing.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Listing {
    /// No list is shown
    #[default]
    None,
    /// The windows of this workspace are listed inside the focused frame
    Windows,
    /// Every workspace and its windows are listed across the whole display
    Workspaces,
}

/// A single line of a list overlay.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ListEntry {
    /// A managed window
    Window(WindowId),
    /// A workspace header line
    Workspace(WorkspaceId),
}
