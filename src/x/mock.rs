//! A mock implementation of XConn that is easier to implement for
//! use in tests.
//! This module and its contents are only available when testing.
use crate::{
    pure::geometry::{Point, Rect},
    x::{
        event::{ClientMessage, ConfigureEvent, SyntheticEvent, XEvent},
        property::{MapState, Prop, WindowAttributes},
        ClientAttr, ClientConfig, KeyMap, XConn,
    },
    Color, Error, Result, Xid,
};
use std::cell::{Cell, RefCell};

/// All methods on this trait that return a Result are unimplemented by
/// default unless an implementation is provided.
/// The `mock_root` and `mock_desktop` methods return fixed ids and `mock_flush` is a no-op.
///
/// Any implementation of `MockXConn` will automatically implement `XConn` by forwarding on
/// calls to `$method` to `mock_$method`.
#[allow(unused_variables)]
pub trait MockXConn {
    fn mock_root(&self) -> Xid {
        Xid(0)
    }

    fn mock_desktop(&self) -> Xid {
        Xid(1)
    }

    fn mock_screen_details(&self) -> Result<Vec<Rect>> {
        unimplemented!("mock_screen_details")
    }

    fn mock_cursor_position(&self) -> Result<Point> {
        unimplemented!("mock_cursor_position")
    }

    fn mock_warp_pointer(&self, p: Point) -> Result<()> {
        unimplemented!("mock_warp_pointer")
    }

    fn mock_keyboard_mapping(&self) -> Result<KeyMap> {
        unimplemented!("mock_keyboard_mapping")
    }

    fn mock_grab_key(&self, code: u8) -> Result<()> {
        unimplemented!("mock_grab_key")
    }

    fn mock_next_event(&self) -> Result<XEvent> {
        unimplemented!("mock_next_event")
    }

    fn mock_flush(&self) {}

    fn mock_existing_clients(&self) -> Result<Vec<Xid>> {
        unimplemented!("mock_existing_clients")
    }

    fn mock_get_window_attributes(&self, client: Xid) -> Result<WindowAttributes> {
        unimplemented!("mock_get_window_attributes")
    }

    fn mock_get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        unimplemented!("mock_get_prop")
    }

    fn mock_map(&self, client: Xid) -> Result<()> {
        unimplemented!("mock_map")
    }

    fn mock_set_client_attributes(&self, client: Xid, attrs: &[ClientAttr]) -> Result<()> {
        unimplemented!("mock_set_client_attributes")
    }

    fn mock_set_client_config(&self, client: Xid, data: &[ClientConfig]) -> Result<()> {
        unimplemented!("mock_set_client_config")
    }

    fn mock_forward_configure_request(&self, req: &ConfigureEvent) -> Result<()> {
        unimplemented!("mock_forward_configure_request")
    }

    fn mock_send_configure_notify(&self, client: Xid, r: Rect) -> Result<()> {
        unimplemented!("mock_send_configure_notify")
    }

    fn mock_set_input_focus(&self, id: Xid, time: u32) -> Result<()> {
        unimplemented!("mock_set_input_focus")
    }

    fn mock_send_client_message(&self, msg: ClientMessage) -> Result<()> {
        unimplemented!("mock_send_client_message")
    }

    fn mock_send_synthetic(&self, ev: SyntheticEvent) -> Result<()> {
        unimplemented!("mock_send_synthetic")
    }

    fn mock_clear_area(&self, r: Rect) -> Result<()> {
        unimplemented!("mock_clear_area")
    }

    fn mock_draw_rects(&self, color: Color, rects: &[Rect]) -> Result<()> {
        unimplemented!("mock_draw_rects")
    }

    fn mock_draw_text(&self, color: Color, p: Point, text: &str) -> Result<()> {
        unimplemented!("mock_draw_text")
    }

    fn mock_set_clip(&self, r: Option<Rect>) -> Result<()> {
        unimplemented!("mock_set_clip")
    }
}

impl<T> XConn for T
where
    T: MockXConn,
{
    fn root(&self) -> Xid {
        self.mock_root()
    }

    fn desktop(&self) -> Xid {
        self.mock_desktop()
    }

    fn screen_details(&self) -> Result<Vec<Rect>> {
        self.mock_screen_details()
    }

    fn cursor_position(&self) -> Result<Point> {
        self.mock_cursor_position()
    }

    fn warp_pointer(&self, p: Point) -> Result<()> {
        self.mock_warp_pointer(p)
    }

    fn keyboard_mapping(&self) -> Result<KeyMap> {
        self.mock_keyboard_mapping()
    }

    fn grab_key(&self, code: u8) -> Result<()> {
        self.mock_grab_key(code)
    }

    fn next_event(&self) -> Result<XEvent> {
        self.mock_next_event()
    }

    fn flush(&self) {
        self.mock_flush()
    }

    fn existing_clients(&self) -> Result<Vec<Xid>> {
        self.mock_existing_clients()
    }

    fn get_window_attributes(&self, client: Xid) -> Result<WindowAttributes> {
        self.mock_get_window_attributes(client)
    }

    fn get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        self.mock_get_prop(client, prop_name)
    }

    fn map(&self, client: Xid) -> Result<()> {
        self.mock_map(client)
    }

    fn set_client_attributes(&self, client: Xid, attrs: &[ClientAttr]) -> Result<()> {
        self.mock_set_client_attributes(client, attrs)
    }

    fn set_client_config(&self, client: Xid, data: &[ClientConfig]) -> Result<()> {
        self.mock_set_client_config(client, data)
    }

    fn forward_configure_request(&self, req: &ConfigureEvent) -> Result<()> {
        self.mock_forward_configure_request(req)
    }

    fn send_configure_notify(&self, client: Xid, r: Rect) -> Result<()> {
        self.mock_send_configure_notify(client, r)
    }

    fn set_input_focus(&self, id: Xid, time: u32) -> Result<()> {
        self.mock_set_input_focus(id, time)
    }

    fn send_client_message(&self, msg: ClientMessage) -> Result<()> {
        self.mock_send_client_message(msg)
    }

    fn send_synthetic(&self, ev: SyntheticEvent) -> Result<()> {
        self.mock_send_synthetic(ev)
    }

    fn clear_area(&self, r: Rect) -> Result<()> {
        self.mock_clear_area(r)
    }

    fn draw_rects(&self, color: Color, rects: &[Rect]) -> Result<()> {
        self.mock_draw_rects(color, rects)
    }

    fn draw_text(&self, color: Color, p: Point, text: &str) -> Result<()> {
        self.mock_draw_text(color, p, text)
    }

    fn set_clip(&self, r: Option<Rect>) -> Result<()> {
        self.mock_set_clip(r)
    }
}

/// The side effects a [RecordingXConn] was asked to carry out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Configure(Xid, Vec<ClientConfig>),
    ConfigureNotify(Xid, Rect),
    ClientMessage(ClientMessage),
    Focus(Xid),
    Grab(u8),
    Forwarded(Xid),
    Map(Xid),
    Synthetic(SyntheticEvent),
    Warp(Point),
}

/// A MockXConn with a fixed pointer position and screen layout that records every
/// request that changes client state. Drawing requests are only counted.
///
/// Pointer queries fail while `pointer_lost` is set and property reads fail for any
/// client in `vanished`.
#[derive(Debug, Default)]
pub struct RecordingXConn {
    pub screens: Vec<Rect>,
    pub pointer: Cell<Point>,
    pub pointer_lost: Cell<bool>,
    pub vanished: RefCell<Vec<Xid>>,
    pub props: RefCell<Vec<(Xid, &'static str, Prop)>>,
    pub calls: RefCell<Vec<Call>>,
    pub draws: Cell<usize>,
}

impl RecordingXConn {
    pub fn new(screens: Vec<Rect>) -> Self {
        Self {
            screens,
            ..Default::default()
        }
    }

    pub fn set_prop(&self, id: Xid, name: &'static str, p: Prop) {
        self.props.borrow_mut().push((id, name, p));
    }

    pub fn take_calls(&self) -> Vec<Call> {
        self.calls.borrow_mut().drain(..).collect()
    }

    pub fn placements(&self, id: Xid) -> Vec<Vec<ClientConfig>> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Configure(cid, data) if *cid == id => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, c: Call) -> Result<()> {
        self.calls.borrow_mut().push(c);
        Ok(())
    }
}

impl MockXConn for RecordingXConn {
    fn mock_screen_details(&self) -> Result<Vec<Rect>> {
        Ok(self.screens.clone())
    }

    fn mock_cursor_position(&self) -> Result<Point> {
        if self.pointer_lost.get() {
            return Err(Error::Custom("query pointer failed".to_owned()));
        }

        Ok(self.pointer.get())
    }

    fn mock_warp_pointer(&self, p: Point) -> Result<()> {
        self.pointer.set(p);
        self.record(Call::Warp(p))
    }

    fn mock_keyboard_mapping(&self) -> Result<KeyMap> {
        Ok(KeyMap::default())
    }

    fn mock_grab_key(&self, code: u8) -> Result<()> {
        self.record(Call::Grab(code))
    }

    fn mock_existing_clients(&self) -> Result<Vec<Xid>> {
        Ok(vec![])
    }

    fn mock_get_window_attributes(&self, _: Xid) -> Result<WindowAttributes> {
        Ok(WindowAttributes {
            override_redirect: false,
            map_state: MapState::Viewable,
        })
    }

    fn mock_get_prop(&self, client: Xid, prop_name: &str) -> Result<Option<Prop>> {
        if self.vanished.borrow().contains(&client) {
            return Err(Error::Custom(format!("BadWindow: {client}")));
        }

        Ok(self
            .props
            .borrow()
            .iter()
            .find(|(id, name, _)| *id == client && *name == prop_name)
            .map(|(_, _, p)| p.clone()))
    }

    fn mock_map(&self, client: Xid) -> Result<()> {
        self.record(Call::Map(client))
    }

    fn mock_set_client_attributes(&self, _: Xid, _: &[ClientAttr]) -> Result<()> {
        Ok(())
    }

    fn mock_set_client_config(&self, client: Xid, data: &[ClientConfig]) -> Result<()> {
        self.record(Call::Configure(client, data.to_vec()))
    }

    fn mock_forward_configure_request(&self, req: &ConfigureEvent) -> Result<()> {
        self.record(Call::Forwarded(req.id))
    }

    fn mock_send_configure_notify(&self, client: Xid, r: Rect) -> Result<()> {
        self.record(Call::ConfigureNotify(client, r))
    }

    fn mock_set_input_focus(&self, id: Xid, _: u32) -> Result<()> {
        self.record(Call::Focus(id))
    }

    fn mock_send_client_message(&self, msg: ClientMessage) -> Result<()> {
        self.record(Call::ClientMessage(msg))
    }

    fn mock_send_synthetic(&self, ev: SyntheticEvent) -> Result<()> {
        self.record(Call::Synthetic(ev))
    }

    fn mock_clear_area(&self, _: Rect) -> Result<()> {
        Ok(())
    }

    fn mock_draw_rects(&self, _: Color, _: &[Rect]) -> Result<()> {
        self.draws.set(self.draws.get() + 1);
        Ok(())
    }

    fn mock_draw_text(&self, _: Color, _: Point, _: &str) -> Result<()> {
        self.draws.set(self.draws.get() + 1);
        Ok(())
    }

    fn mock_set_clip(&self, _: Option<Rect>) -> Result<()> {
        Ok(())
    }
}
