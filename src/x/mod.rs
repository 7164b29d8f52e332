//! Logic for interacting with the X server
use crate::{
    pure::{
        geometry::{Point, Rect},
        Protocols,
    },
    Color, Result, Xid,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

pub mod atom;
pub mod event;
pub mod keymap;
pub mod property;

#[cfg(test)]
pub(crate) mod mock;

pub use atom::Atom;
pub use event::{ClientMessage, ConfigureEvent, SyntheticEvent, XEvent};
pub use keymap::KeyMap;
pub use property::{MapState, Prop, WindowAttributes};

/// On screen configuration options for X clients
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ClientConfig {
    /// The border width in pixels
    BorderPx(u32),
    /// Absolute size and position on the screen as a [Rect]
    Position(Rect),
    /// Move the client without changing its size
    Move(Point),
}

/// Attributes for an X11 client window
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientAttr {
    /// Set the pre-defined client event mask: pointer entry and structure changes
    ClientEventMask,
}

/// A handle on a running X11 connection that we can use for issuing X requests.
///
/// XConn is intended as an abstraction layer to allow for communication with the
/// underlying display system using whatever mechanism the implementer wishes. All
/// drawing happens on a single desktop window that sits below every client.
pub trait XConn {
    /// The ID of the root window.
    fn root(&self) -> Xid;
    /// The ID of the desktop window that frame borders and lists are drawn on.
    fn desktop(&self) -> Xid;
    /// Ask the X server for the dimensions of each currently available screen.
    fn screen_details(&self) -> Result<Vec<Rect>>;
    /// Ask the X server for the current (x, y) coordinate of the mouse cursor.
    fn cursor_position(&self) -> Result<Point>;
    /// Move the mouse cursor to an absolute position.
    fn warp_pointer(&self, p: Point) -> Result<()>;

    /// Fetch the current keyboard mapping.
    fn keyboard_mapping(&self) -> Result<KeyMap>;
    /// Grab the given keycode with any modifiers, intercepting it and every key
    /// pressed while it is held.
    fn grab_key(&self, code: u8) -> Result<()>;
    /// Block and wait for the next event from the X server so it can be processed.
    fn next_event(&self) -> Result<XEvent>;
    /// Flush any pending requests to the X server.
    fn flush(&self);

    /// Ask the X server for the IDs of all top level client windows.
    fn existing_clients(&self) -> Result<Vec<Xid>>;
    /// Request the [WindowAttributes] for a given client window from the X server.
    fn get_window_attributes(&self, client: Xid) -> Result<WindowAttributes>;
    /// Look up a specific property on a given client window.
    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>>;

    /// Map the given client window to the screen, making it visible.
    fn map(&self, client: Xid) -> Result<()>;
    /// Set one or more [ClientAttr] for a given client window.
    fn set_client_attributes(&self, client: Xid, attrs: &[ClientAttr]) -> Result<()>;
    /// Set the [ClientConfig] for a given client window.
    fn set_client_config(&self, client: Xid, data: &[ClientConfig]) -> Result<()>;
    /// Apply a configure request from a client we are not managing exactly as asked.
    fn forward_configure_request(&self, req: &ConfigureEvent) -> Result<()>;
    /// Tell a client where it is without moving it.
    fn send_configure_notify(&self, client: Xid, r: Rect) -> Result<()>;
    /// Set X input focus to be held by the given window.
    fn set_input_focus(&self, id: Xid, time: u32) -> Result<()>;
    /// Send a [ClientMessage] to a given client.
    fn send_client_message(&self, msg: ClientMessage) -> Result<()>;
    /// Deliver a synthetic press and release directly to a client.
    fn send_synthetic(&self, ev: SyntheticEvent) -> Result<()>;

    /// Repaint a region of the desktop back to its background, generating expose events.
    fn clear_area(&self, r: Rect) -> Result<()>;
    /// Outline each rect in the given colour.
    fn draw_rects(&self, color: Color, rects: &[Rect]) -> Result<()>;
    /// Draw a single line of text with its baseline starting at `p`.
    fn draw_text(&self, color: Color, p: Point, text: &str) -> Result<()>;
    /// Restrict drawing to the given region, or lift the restriction.
    fn set_clip(&self, r: Option<Rect>) -> Result<()>;
}

/// Extended functionality for [XConn] impls in order to run the window manager.
pub trait XConnExt: XConn + Sized {
    /// The subset of WM_PROTOCOLS supported by a client that we know how to use.
    fn client_protocols(&self, id: Xid) -> Result<Protocols> {
        let mut protocols = Protocols::empty();
        if let Some(Prop::Atom(atoms)) = self.get_prop(id, Atom::WmProtocols.as_ref())? {
            for a in atoms {
                if a == Atom::WmDeleteWindow.as_ref() {
                    protocols |= Protocols::DELETE_WINDOW;
                } else if a == Atom::WmTakeFocus.as_ref() {
                    protocols |= Protocols::TAKE_FOCUS;
                }
            }
        }
        trace!(%id, ?protocols, "fetched client protocols");

        Ok(protocols)
    }

    /// The window a client has declared itself transient for.
    fn transient_for(&self, id: Xid) -> Result<Option<Xid>> {
        match self.get_prop(id, Atom::WmTransientFor.as_ref())? {
            Some(Prop::Window(ids)) => Ok(ids.first().copied()),
            _ => Ok(None),
        }
    }

    /// Request the title of a given client window, preferring WM_NAME over _NET_WM_NAME.
    ///
    /// Clients without a title are shown as "?".
    fn window_title(&self, id: Xid) -> Result<String> {
        for atom in [Atom::WmName, Atom::NetWmName] {
            if let Some(Prop::UTF8String(strs)) = self.get_prop(id, atom.as_ref())? {
                if let Some(s) = strs.into_iter().find(|s| !s.is_empty()) {
                    return Ok(s);
                }
            }
        }

        Ok("?".to_owned())
    }

    /// The instance name of a client: the first part of its WM_CLASS.
    fn window_class(&self, id: Xid) -> Result<Option<String>> {
        match self.get_prop(id, Atom::WmClass.as_ref())? {
            Some(Prop::UTF8String(mut strs)) if !strs.is_empty() => Ok(Some(strs.remove(0))),
            _ => Ok(None),
        }
    }

    /// Move the pointer to the centre of a region.
    fn warp_pointer_to(&self, r: Rect) -> Result<()> {
        self.warp_pointer(r.midpoint())
    }
}

// Auto impl XConnExt for all XConn impls
impl<T> XConnExt for T where T: XConn {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x::mock::MockXConn;
    use simple_test_case::test_case;
    use std::collections::HashMap;

    #[derive(Default)]
    struct PropConn {
        props: HashMap<&'static str, Prop>,
    }

    impl MockXConn for PropConn {
        fn mock_get_prop(&self, _: Xid, prop_name: &str) -> Result<Option<Prop>> {
            Ok(self.props.get(prop_name).cloned())
        }
    }

    fn strs(ss: &[&str]) -> Vec<String> {
        ss.iter().map(|s| s.to_string()).collect()
    }

    #[test_case(&[], Protocols::empty(); "none")]
    #[test_case(&["WM_DELETE_WINDOW"], Protocols::DELETE_WINDOW; "delete")]
    #[test_case(&["WM_TAKE_FOCUS", "WM_DELETE_WINDOW", "_NET_WM_PING"], Protocols::all(); "both")]
    #[test]
    fn client_protocols(atoms: &[&str], expected: Protocols) {
        let mut conn = PropConn::default();
        conn.props.insert("WM_PROTOCOLS", Prop::Atom(strs(atoms)));

        assert_eq!(conn.client_protocols(Xid(1)).unwrap(), expected);
    }

    #[test_case(None, None, "?"; "no title")]
    #[test_case(Some("wm"), Some("net"), "wm"; "wm name preferred")]
    #[test_case(Some(""), Some("net"), "net"; "empty wm name falls back")]
    #[test]
    fn window_title(wm_name: Option<&str>, net_name: Option<&str>, expected: &str) {
        let mut conn = PropConn::default();
        if let Some(s) = wm_name {
            conn.props.insert("WM_NAME", Prop::UTF8String(strs(&[s])));
        }
        if let Some(s) = net_name {
            conn.props.insert("_NET_WM_NAME", Prop::UTF8String(strs(&[s])));
        }

        assert_eq!(conn.window_title(Xid(1)).unwrap(), expected);
    }

    #[test]
    fn window_class_is_the_instance_name() {
        let mut conn = PropConn::default();
        conn.props.insert(
            "WM_CLASS",
            Prop::UTF8String(strs(&["google-chrome", "Google-chrome"])),
        );

        assert_eq!(
            conn.window_class(Xid(1)).unwrap(),
            Some("google-chrome".to_owned())
        );
    }

    #[test]
    fn transient_for_takes_the_first_window() {
        let mut conn = PropConn::default();
        conn.props
            .insert("WM_TRANSIENT_FOR", Prop::Window(vec![Xid(7), Xid(8)]));

        assert_eq!(conn.transient_for(Xid(1)).unwrap(), Some(Xid(7)));
    }
}
