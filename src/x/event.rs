//! Data types for working with X events
use crate::{
    core::bindings::ModMask,
    pure::geometry::{Point, Rect},
    x::Atom,
    Xid,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Wrapper around the low level X event types that the window manager responds to.
///
/// The variant names and data have developed with the x11rb implementation in mind but
/// should be applicable for all back ends.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XEvent {
    /// A mouse button was pressed over the desktop
    ButtonPress(PointerEvent),
    /// A mouse button was released
    ButtonRelease(u32),
    /// A client wants to change its geometry or stacking
    ConfigureRequest(ConfigureEvent),
    /// A client window has been destroyed
    Destroy(Xid),
    /// The mouse pointer has entered a client window
    Enter(PointerChange),
    /// A region of the desktop window needs to be redrawn
    Expose(ExposeEvent),
    /// A grabbed key was pressed
    KeyPress(KeyEvent),
    /// A grabbed key was released
    KeyRelease(u32),
    /// A client window is requesting to be rendered on the screen
    MapRequest(Xid),
    /// The mouse pointer has moved over the desktop
    Motion(PointerEvent),
    /// A client window has been unmapped
    UnmapNotify(Xid),
}

impl XEvent {
    /// The server timestamp carried by this event if there is one.
    pub fn time(&self) -> Option<u32> {
        match self {
            XEvent::ButtonPress(e) | XEvent::Motion(e) => Some(e.time),
            XEvent::ButtonRelease(t) | XEvent::KeyRelease(t) => Some(*t),
            XEvent::Enter(e) => Some(e.time),
            XEvent::KeyPress(e) => Some(e.time),
            _ => None,
        }
    }
}

/// A key press on one of our grabbed keys.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The hardware keycode that was pressed
    pub code: u8,
    /// The modifiers held at the time
    pub state: ModMask,
    /// The absolute position of the pointer
    pub root: Point,
    /// Server timestamp
    pub time: u32,
}

/// A button press or pointer motion reported on the root window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The button pressed (zero for motion)
    pub button: u8,
    /// The modifiers held at the time
    pub state: ModMask,
    /// The absolute position of the pointer
    pub root: Point,
    /// Server timestamp
    pub time: u32,
}

/// The pointer crossing into a client window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerChange {
    /// The window that was entered
    pub id: Xid,
    /// The absolute position of the pointer
    pub root: Point,
    /// Server timestamp
    pub time: u32,
}

/// A region of the desktop that was exposed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposeEvent {
    /// The exposed region in desktop coordinates
    pub r: Rect,
    /// The number of expose events still to follow for this window
    pub count: u16,
}

/// A request from a client to reconfigure itself.
///
/// Only the fields the client asked to change are set.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureEvent {
    /// The client making the request
    pub id: Xid,
    /// Requested x position
    pub x: Option<i32>,
    /// Requested y position
    pub y: Option<i32>,
    /// Requested width
    pub w: Option<u32>,
    /// Requested height
    pub h: Option<u32>,
    /// Requested border width
    pub border_width: Option<u32>,
    /// Requested sibling for stacking
    pub sibling: Option<Xid>,
    /// Requested raw stack mode
    pub stack_mode: Option<u8>,
}

/// A WM_PROTOCOLS client message sent from the window manager to a client.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientMessage {
    /// The client receiving the message
    pub id: Xid,
    /// The protocol being invoked
    pub protocol: Atom,
    /// Timestamp of the event that triggered the message
    pub time: u32,
}

impl ClientMessage {
    /// Create a new protocol message for a client.
    pub fn new(id: Xid, protocol: Atom, time: u32) -> Self {
        Self { id, protocol, time }
    }
}

/// Input to be injected into a client window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInput {
    /// A mouse button
    Button(u8),
    /// A keycode
    Key(u8),
}

/// A press and release of some input to be delivered directly to a client.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticEvent {
    /// The client receiving the input
    pub id: Xid,
    /// What to press
    pub input: RawInput,
    /// The modifiers to report as held
    pub state: ModMask,
    /// The absolute position of the pointer
    pub root: Point,
    /// The position of the pointer relative to the client
    pub pos: Point,
    /// Timestamp of the key press that triggered the injection
    pub time: u32,
}
