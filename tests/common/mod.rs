//! A scripted XConn for driving a full WindowManager from integration tests.
#![allow(dead_code)]
use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};
use trellis::{
    core::bindings::ModMask,
    keysyms::XKeySym,
    pure::geometry::Point,
    x::{
        event::{KeyEvent, SyntheticEvent},
        ClientAttr, ClientConfig, ClientMessage, ConfigureEvent, KeyMap, MapState, Prop,
        WindowAttributes, XConn, XEvent,
    },
    Color, Error, KeySym, Rect, Result, Xid,
};

pub const TRIGGER_CODE: u8 = 133;
pub const ESCAPE_CODE: u8 = 9;
pub const T_CODE: u8 = 28;
pub const S_CODE: u8 = 39;
pub const W_CODE: u8 = 25;
pub const BACKTICK_CODE: u8 = 49;

/// Requests that change client state, in the order they were made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Configure(Xid, Vec<ClientConfig>),
    ClientMessage(ClientMessage),
    Focus(Xid),
    Grab(u8),
    Map(Xid),
    Warp(Point),
}

#[derive(Debug, Default)]
struct Inner {
    events: VecDeque<XEvent>,
    pointer: Point,
    props: Vec<(Xid, String, Prop)>,
    requests: Vec<Request>,
}

/// An XConn that plays back a fixed list of events and records what it was asked to do.
///
/// Clones share the same underlying state so a test can keep a handle after the
/// connection has been handed to the window manager.
#[derive(Debug, Clone)]
pub struct ScriptedConn {
    screens: Vec<Rect>,
    inner: Arc<Mutex<Inner>>,
}

impl ScriptedConn {
    pub fn new(screens: Vec<Rect>) -> Self {
        Self {
            screens,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn push_events(&self, events: impl IntoIterator<Item = XEvent>) {
        self.inner.lock().unwrap().events.extend(events);
    }

    pub fn set_pointer(&self, p: Point) {
        self.inner.lock().unwrap().pointer = p;
    }

    pub fn set_prop(&self, id: Xid, name: &str, prop: Prop) {
        self.inner
            .lock()
            .unwrap()
            .props
            .push((id, name.to_owned(), prop));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn last_position(&self, id: Xid) -> Option<Rect> {
        self.requests().into_iter().rev().find_map(|r| match r {
            Request::Configure(cid, data) if cid == id => data.iter().find_map(|c| match c {
                ClientConfig::Position(r) => Some(*r),
                ClientConfig::Move(p) => Some(Rect::new(p.x, p.y, 0, 0)),
                _ => None,
            }),
            _ => None,
        })
    }

    fn record(&self, r: Request) -> Result<()> {
        self.inner.lock().unwrap().requests.push(r);
        Ok(())
    }
}

/// A keyboard with the trigger on Super_L and the handful of keys the scenarios use.
pub fn keymap() -> KeyMap {
    let mut km = KeyMap::default();
    km.set(TRIGGER_CODE, XKeySym::XK_Super_L.into(), KeySym::NONE);
    km.set(ESCAPE_CODE, XKeySym::XK_Escape.into(), XKeySym::XK_Escape.into());
    km.set(T_CODE, 't'.into(), 'T'.into());
    km.set(S_CODE, 's'.into(), 'S'.into());
    km.set(W_CODE, 'w'.into(), 'W'.into());
    km.set(BACKTICK_CODE, '`'.into(), '~'.into());

    km
}

pub fn key(code: u8, state: ModMask, root: Point) -> XEvent {
    XEvent::KeyPress(KeyEvent {
        code,
        state,
        root,
        time: 1,
    })
}

impl XConn for ScriptedConn {
    fn root(&self) -> Xid {
        Xid(0)
    }

    fn desktop(&self) -> Xid {
        Xid(1)
    }

    fn screen_details(&self) -> Result<Vec<Rect>> {
        Ok(self.screens.clone())
    }

    fn cursor_position(&self) -> Result<Point> {
        Ok(self.inner.lock().unwrap().pointer)
    }

    fn warp_pointer(&self, p: Point) -> Result<()> {
        self.set_pointer(p);
        self.record(Request::Warp(p))
    }

    fn keyboard_mapping(&self) -> Result<KeyMap> {
        Ok(keymap())
    }

    fn grab_key(&self, code: u8) -> Result<()> {
        self.record(Request::Grab(code))
    }

    fn next_event(&self) -> Result<XEvent> {
        self.inner
            .lock()
            .unwrap()
            .events
            .pop_front()
            .ok_or_else(|| Error::Custom("no more events".to_owned()))
    }

    fn flush(&self) {}

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        Ok(vec![])
    }

    fn get_window_attributes(&self, _: Xid) -> Result<WindowAttributes> {
        Ok(WindowAttributes {
            override_redirect: false,
            map_state: MapState::Viewable,
        })
    }

    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .props
            .iter()
            .find(|(id, name, _)| *id == client && name == prop_name)
            .map(|(_, _, p)| p.clone()))
    }

    fn map(&self, client: Xid) -> Result<()> {
        self.record(Request::Map(client))
    }

    fn set_client_attributes(&self, _: Xid, _: &[ClientAttr]) -> Result<()> {
        Ok(())
    }

    fn set_client_config(&self, client: Xid, data: &[ClientConfig]) -> Result<()> {
        self.record(Request::Configure(client, data.to_vec()))
    }

    fn forward_configure_request(&self, _: &ConfigureEvent) -> Result<()> {
        Ok(())
    }

    fn send_configure_notify(&self, _: Xid, _: Rect) -> Result<()> {
        Ok(())
    }

    fn set_input_focus(&self, id: Xid, _: u32) -> Result<()> {
        self.record(Request::Focus(id))
    }

    fn send_client_message(&self, msg: ClientMessage) -> Result<()> {
        self.record(Request::ClientMessage(msg))
    }

    fn send_synthetic(&self, _: SyntheticEvent) -> Result<()> {
        Ok(())
    }

    fn clear_area(&self, _: Rect) -> Result<()> {
        Ok(())
    }

    fn draw_rects(&self, _: Color, _: &[Rect]) -> Result<()> {
        Ok(())
    }

    fn draw_text(&self, _: Color, _: Point, _: &str) -> Result<()> {
        Ok(())
    }

    fn set_clip(&self, _: Option<Rect>) -> Result<()> {
        Ok(())
    }
}
