//! Data types for working with X window properties
use crate::Xid;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Known property types that should be returnable by XConn impls when they check
/// window properties.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum Prop {
    /// One or more X Atoms, by name
    Atom(Vec<String>),
    /// Latin-1 or UTF-8 string data, split on NUL
    UTF8String(Vec<String>),
    /// One or more X window IDs
    Window(Vec<Xid>),
}

/// The mapping states a window can be in
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MapState {
    /// The window is unmapped
    Unmapped,
    /// The window is mapped but an ancestor is not
    UnViewable,
    /// The window is currently viewable
    Viewable,
}

/// The subset of a client's window attributes that decide whether it gets managed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct WindowAttributes {
    /// Clients with override-redirect set position themselves
    pub override_redirect: bool,
    /// The current mapping state of the client
    pub map_state: MapState,
}

impl WindowAttributes {
    /// Whether or not an already existing client should be taken over at startup.
    pub fn should_manage(&self) -> bool {
        !self.override_redirect && self.map_state != MapState::Unmapped
    }
}
