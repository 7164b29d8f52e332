//! The x11rb implementation of [XConn]
use crate::{
    pure::geometry::{Point, Rect},
    x::{
        event::{ClientMessage, ConfigureEvent, RawInput, SyntheticEvent, XEvent},
        keymap::MIN_KEYCODE,
        property::{MapState, Prop, WindowAttributes},
        Atom, ClientAttr, ClientConfig, KeyMap, XConn,
    },
    x11rb::{event::convert_event, Result, X11rbError},
    Color, Error, Xid,
};
use std::{collections::HashMap, str::FromStr};
use strum::IntoEnumIterator;
use tracing::{debug, error, info, warn};
use x11rb::{
    connection::Connection,
    errors::ReplyError,
    protocol::{
        randr::ConnectionExt as _,
        xproto::{
            AtomEnum, ButtonPressEvent, ChangeGCAux, ChangeWindowAttributesAux, ClientMessageEvent,
            ClipOrdering, ConfigureNotifyEvent, ConfigureWindowAux, ConnectionExt as _,
            CreateGCAux, CreateWindowAux, EventMask, GrabMode, InputFocus, KeyButMask,
            KeyPressEvent, ModMask, Rectangle, StackMode, Window, WindowClass,
            BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT, CONFIGURE_NOTIFY_EVENT, KEY_PRESS_EVENT,
            KEY_RELEASE_EVENT,
        },
        ErrorKind,
    },
    rust_connection::RustConnection,
    CURRENT_TIME, NONE,
};

// XC_left_ptr from X11/cursorfont.h
const XC_LEFT_PTR: u16 = 68;

/// A connection to the X server using the pure Rust x11rb [RustConnection].
///
/// Creating a new X11rbConn takes over as the window manager for the default screen and
/// creates the desktop window that borders and lists are drawn on.
#[derive(Debug)]
pub struct X11rbConn {
    conn: RustConnection,
    root: Window,
    desktop: Window,
    gc: u32,
    root_rect: Rect,
    atoms: HashMap<Atom, u32>,
}

impl X11rbConn {
    /// Connect to the X server named by `$DISPLAY` and become the window manager, drawing
    /// text using the named X core font.
    pub fn new(font_name: &str) -> crate::Result<Self> {
        let (conn, screen_num) = RustConnection::connect(None).map_err(X11rbError::from)?;

        Self::new_for_connection(conn, screen_num, font_name)
    }

    /// Become the window manager on screen `screen_num` of an existing connection.
    pub fn new_for_connection(
        conn: RustConnection,
        screen_num: usize,
        font_name: &str,
    ) -> crate::Result<Self> {
        let screen = &conn.setup().roots[screen_num];
        let root = screen.root;
        let root_rect = Rect::new(
            0,
            0,
            screen.width_in_pixels as u32,
            screen.height_in_pixels as u32,
        );
        info!(screen_num, root, ?root_rect, "connected to the X server");

        become_wm(&conn, root)?;
        let atoms = intern_atoms(&conn)?;
        let (desktop, gc) = init_desktop(&conn, screen_num, font_name)?;
        conn.flush().map_err(X11rbError::from)?;

        Ok(Self {
            conn,
            root,
            desktop,
            gc,
            root_rect,
            atoms,
        })
    }

    /// A reference to the underlying x11rb [RustConnection].
    pub fn connection(&self) -> &RustConnection {
        &self.conn
    }

    // Every variant of Atom is interned on startup
    fn known_atom(&self, atom: Atom) -> u32 {
        self.atoms.get(&atom).copied().unwrap_or(NONE)
    }

    fn atom_id(&self, name: &str) -> Result<u32> {
        if let Ok(atom) = Atom::from_str(name) {
            return Ok(self.known_atom(atom));
        }

        Ok(self.conn.intern_atom(false, name.as_bytes())?.reply()?.atom)
    }

    fn atom_name(&self, atom: u32) -> Result<String> {
        if let Some((known, _)) = self.atoms.iter().find(|(_, id)| **id == atom) {
            return Ok(known.as_ref().to_owned());
        }
        let reply = self.conn.get_atom_name(atom)?.reply()?;

        Ok(String::from_utf8_lossy(&reply.name).into_owned())
    }

    fn crtc_rects(&self) -> Result<Vec<Rect>> {
        let resources = self.conn.randr_get_screen_resources(self.root)?.reply()?;
        let cookies = resources
            .crtcs
            .iter()
            .map(|&c| self.conn.randr_get_crtc_info(c, 0))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut rects = Vec::with_capacity(cookies.len());
        for cookie in cookies {
            let info = cookie.reply()?;
            let r = Rect::new(
                info.x as i32,
                info.y as i32,
                info.width as u32,
                info.height as u32,
            );
            if r.w > 0 && r.h > 0 && !rects.contains(&r) {
                rects.push(r);
            }
        }

        Ok(rects)
    }

    fn pointer(&self) -> Result<Point> {
        let reply = self.conn.query_pointer(self.root)?.reply()?;

        Ok(Point::new(reply.root_x as i32, reply.root_y as i32))
    }

    fn next_xevent(&self) -> Result<XEvent> {
        loop {
            let event = self.conn.wait_for_event()?;
            if let Some(e) = convert_event(event) {
                return Ok(e);
            }
        }
    }

    fn prop(&self, client: Xid, name: &str) -> Result<Option<Prop>> {
        let atom = self.atom_id(name)?;
        let reply = self
            .conn
            .get_property(false, client.0, atom, AtomEnum::ANY, 0, 1024)?
            .reply()?;

        if reply.type_ == NONE {
            return Ok(None);
        }

        let words = || reply.value32().map(|it| it.collect::<Vec<u32>>());
        let prop = if reply.type_ == u32::from(AtomEnum::ATOM) {
            let atoms = words().unwrap_or_default();
            Prop::Atom(
                atoms
                    .into_iter()
                    .map(|a| self.atom_name(a))
                    .collect::<Result<Vec<_>>>()?,
            )
        } else if reply.type_ == u32::from(AtomEnum::WINDOW) {
            Prop::Window(words().unwrap_or_default().into_iter().map(Xid).collect())
        } else if reply.format == 8 {
            Prop::UTF8String(
                reply
                    .value
                    .split(|&b| b == 0)
                    .filter(|s| !s.is_empty())
                    .map(|s| String::from_utf8_lossy(s).into_owned())
                    .collect(),
            )
        } else {
            return Err(X11rbError::UnsupportedProp(name.to_owned(), client));
        };

        Ok(Some(prop))
    }

    // A press immediately followed by a release of the same input
    fn send_input(&self, ev: SyntheticEvent) -> Result<()> {
        let id = ev.id.0;
        let state = KeyButMask::from(ev.state.bits());
        let (root_x, root_y) = (ev.root.x as i16, ev.root.y as i16);
        let (event_x, event_y) = (ev.pos.x as i16, ev.pos.y as i16);

        match ev.input {
            RawInput::Button(detail) => {
                for response_type in [BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT] {
                    let e = ButtonPressEvent {
                        response_type,
                        detail,
                        sequence: 0,
                        time: ev.time,
                        root: self.root,
                        event: id,
                        child: id,
                        root_x,
                        root_y,
                        event_x,
                        event_y,
                        state,
                        same_screen: true,
                    };
                    self.conn.send_event(false, id, EventMask::NO_EVENT, e)?;
                }
            }

            RawInput::Key(detail) => {
                for response_type in [KEY_PRESS_EVENT, KEY_RELEASE_EVENT] {
                    let e = KeyPressEvent {
                        response_type,
                        detail,
                        sequence: 0,
                        time: ev.time,
                        root: self.root,
                        event: id,
                        child: id,
                        root_x,
                        root_y,
                        event_x,
                        event_y,
                        state,
                        same_screen: true,
                    };
                    self.conn.send_event(false, id, EventMask::NO_EVENT, e)?;
                }
            }
        }
        debug!(id = %ev.id, input = ?ev.input, "sent synthetic input");

        Ok(())
    }
}

fn become_wm(conn: &RustConnection, root: Window) -> crate::Result<()> {
    let mask = EventMask::BUTTON_PRESS
        | EventMask::BUTTON_RELEASE
        | EventMask::POINTER_MOTION
        | EventMask::SUBSTRUCTURE_REDIRECT;
    let aux = ChangeWindowAttributesAux::new().event_mask(mask);
    let cookie = conn
        .change_window_attributes(root, &aux)
        .map_err(X11rbError::from)?;

    match cookie.check() {
        Ok(()) => Ok(()),
        Err(ReplyError::X11Error(e)) if e.error_kind == ErrorKind::Access => {
            Err(Error::AnotherWmRunning)
        }
        Err(e) => Err(X11rbError::from(e).into()),
    }
}

fn intern_atoms(conn: &RustConnection) -> Result<HashMap<Atom, u32>> {
    let cookies = Atom::iter()
        .map(|atom| Ok((atom, conn.intern_atom(false, atom.as_ref().as_bytes())?)))
        .collect::<Result<Vec<_>>>()?;

    cookies
        .into_iter()
        .map(|(atom, cookie)| Ok((atom, cookie.reply()?.atom)))
        .collect()
}

// The desktop window sits below every client covering the whole root window. It is where
// we receive exposure events and draw borders and lists.
fn init_desktop(conn: &RustConnection, screen_num: usize, font_name: &str) -> Result<(u32, u32)> {
    let screen = &conn.setup().roots[screen_num];

    let cursor_font = conn.generate_id()?;
    conn.open_font(cursor_font, b"cursor")?;
    let cursor = conn.generate_id()?;
    conn.create_glyph_cursor(
        cursor,
        cursor_font,
        cursor_font,
        XC_LEFT_PTR,
        XC_LEFT_PTR + 1,
        0xffff,
        0xffff,
        0xffff,
        0,
        0,
        0,
    )?;
    conn.close_font(cursor_font)?;

    let desktop = conn.generate_id()?;
    let aux = CreateWindowAux::new()
        .background_pixel(screen.black_pixel)
        .override_redirect(1)
        .event_mask(EventMask::EXPOSURE)
        .cursor(cursor);
    conn.create_window(
        screen.root_depth,
        desktop,
        screen.root,
        0,
        0,
        screen.width_in_pixels,
        screen.height_in_pixels,
        0,
        WindowClass::INPUT_OUTPUT,
        screen.root_visual,
        &aux,
    )?;
    conn.configure_window(desktop, &ConfigureWindowAux::new().stack_mode(StackMode::BELOW))?;

    let font = conn.generate_id()?;
    conn.open_font(font, font_name.as_bytes())?;
    let gc = conn.generate_id()?;
    let aux = CreateGCAux::new()
        .font(font)
        .background(screen.black_pixel)
        .graphics_exposures(0);
    conn.create_gc(gc, desktop, &aux)?;
    conn.map_window(desktop)?;
    debug!(desktop, gc, font_name, "created desktop window");

    Ok((desktop, gc))
}

impl XConn for X11rbConn {
    fn root(&self) -> Xid {
        Xid(self.root)
    }

    fn desktop(&self) -> Xid {
        Xid(self.desktop)
    }

    fn screen_details(&self) -> crate::Result<Vec<Rect>> {
        match self.crtc_rects() {
            Ok(rects) if !rects.is_empty() => Ok(rects),
            Ok(_) => Ok(vec![self.root_rect]),
            Err(e) => {
                warn!(%e, "unable to query RandR CRTCs: using the root window size");
                Ok(vec![self.root_rect])
            }
        }
    }

    fn cursor_position(&self) -> crate::Result<Point> {
        Ok(self.pointer()?)
    }

    fn warp_pointer(&self, p: Point) -> crate::Result<()> {
        self.conn
            .warp_pointer(NONE, self.root, 0, 0, 0, 0, p.x as i16, p.y as i16)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn keyboard_mapping(&self) -> crate::Result<KeyMap> {
        let count = u8::MAX - MIN_KEYCODE + 1;
        let reply = self
            .conn
            .get_keyboard_mapping(MIN_KEYCODE, count)
            .map_err(X11rbError::from)?
            .reply()
            .map_err(X11rbError::from)?;

        KeyMap::from_raw(reply.keysyms_per_keycode, &reply.keysyms)
    }

    fn grab_key(&self, code: u8) -> crate::Result<()> {
        self.conn
            .grab_key(
                false,
                self.root,
                ModMask::ANY,
                code,
                GrabMode::ASYNC,
                GrabMode::ASYNC,
            )
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn next_event(&self) -> crate::Result<XEvent> {
        Ok(self.next_xevent()?)
    }

    fn flush(&self) {
        if let Err(e) = self.conn.flush() {
            error!(%e, "unable to flush the X connection");
        }
    }

    fn existing_clients(&self) -> crate::Result<Vec<Xid>> {
        let reply = self
            .conn
            .query_tree(self.root)
            .map_err(X11rbError::from)?
            .reply()
            .map_err(X11rbError::from)?;

        Ok(reply.children.into_iter().map(Xid).collect())
    }

    fn get_window_attributes(&self, client: Xid) -> crate::Result<WindowAttributes> {
        let reply = self
            .conn
            .get_window_attributes(client.0)
            .map_err(X11rbError::from)?
            .reply()
            .map_err(X11rbError::from)?;

        let map_state = match reply.map_state {
            x11rb::protocol::xproto::MapState::UNMAPPED => MapState::Unmapped,
            x11rb::protocol::xproto::MapState::UNVIEWABLE => MapState::UnViewable,
            _ => MapState::Viewable,
        };

        Ok(WindowAttributes {
            override_redirect: reply.override_redirect,
            map_state,
        })
    }

    fn get_prop(&self, client: Xid, prop_name: &str) -> crate::Result<Option<Prop>> {
        Ok(self.prop(client, prop_name)?)
    }

    fn map(&self, client: Xid) -> crate::Result<()> {
        self.conn.map_window(client.0).map_err(X11rbError::from)?;

        Ok(())
    }

    fn set_client_attributes(&self, client: Xid, attrs: &[ClientAttr]) -> crate::Result<()> {
        let mut aux = ChangeWindowAttributesAux::new();
        for attr in attrs {
            aux = match attr {
                ClientAttr::ClientEventMask => {
                    aux.event_mask(EventMask::ENTER_WINDOW | EventMask::STRUCTURE_NOTIFY)
                }
            };
        }
        self.conn
            .change_window_attributes(client.0, &aux)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn set_client_config(&self, client: Xid, data: &[ClientConfig]) -> crate::Result<()> {
        let mut aux = ConfigureWindowAux::new();
        for conf in data {
            aux = match *conf {
                ClientConfig::BorderPx(px) => aux.border_width(px),
                ClientConfig::Position(r) => aux.x(r.x).y(r.y).width(r.w).height(r.h),
                ClientConfig::Move(p) => aux.x(p.x).y(p.y),
            };
        }
        self.conn
            .configure_window(client.0, &aux)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn forward_configure_request(&self, req: &ConfigureEvent) -> crate::Result<()> {
        let aux = ConfigureWindowAux::new()
            .x(req.x)
            .y(req.y)
            .width(req.w)
            .height(req.h)
            .border_width(req.border_width)
            .sibling(req.sibling.map(|s| s.0))
            .stack_mode(req.stack_mode.map(StackMode::from));
        self.conn
            .configure_window(req.id.0, &aux)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn send_configure_notify(&self, client: Xid, r: Rect) -> crate::Result<()> {
        let event = ConfigureNotifyEvent {
            response_type: CONFIGURE_NOTIFY_EVENT,
            sequence: 0,
            event: client.0,
            window: client.0,
            above_sibling: NONE,
            x: r.x as i16,
            y: r.y as i16,
            width: r.w as u16,
            height: r.h as u16,
            border_width: 0,
            override_redirect: false,
        };
        self.conn
            .send_event(false, client.0, EventMask::STRUCTURE_NOTIFY, event)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn set_input_focus(&self, id: Xid, time: u32) -> crate::Result<()> {
        let time = if time == 0 { CURRENT_TIME } else { time };
        self.conn
            .set_input_focus(InputFocus::POINTER_ROOT, id.0, time)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn send_client_message(&self, msg: ClientMessage) -> crate::Result<()> {
        let data = [self.known_atom(msg.protocol), msg.time, 0, 0, 0];
        let event = ClientMessageEvent::new(32, msg.id.0, self.known_atom(Atom::WmProtocols), data);
        self.conn
            .send_event(false, msg.id.0, EventMask::NO_EVENT, event)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn send_synthetic(&self, ev: SyntheticEvent) -> crate::Result<()> {
        Ok(self.send_input(ev)?)
    }

    fn clear_area(&self, r: Rect) -> crate::Result<()> {
        self.conn
            .clear_area(
                true,
                self.desktop,
                r.x as i16,
                r.y as i16,
                r.w as u16,
                r.h as u16,
            )
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn draw_rects(&self, color: Color, rects: &[Rect]) -> crate::Result<()> {
        let rects: Vec<Rectangle> = rects
            .iter()
            .map(|r| Rectangle {
                x: r.x as i16,
                y: r.y as i16,
                width: r.w.saturating_sub(1) as u16,
                height: r.h.saturating_sub(1) as u16,
            })
            .collect();

        let aux = ChangeGCAux::new().foreground(color.rgb_u32());
        self.conn
            .change_gc(self.gc, &aux)
            .map_err(X11rbError::from)?;
        self.conn
            .poly_rectangle(self.desktop, self.gc, &rects)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn draw_text(&self, color: Color, p: Point, text: &str) -> crate::Result<()> {
        // ImageText8 is limited to 255 bytes of Latin-1
        let bytes: Vec<u8> = text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
            .take(255)
            .collect();

        let aux = ChangeGCAux::new().foreground(color.rgb_u32());
        self.conn
            .change_gc(self.gc, &aux)
            .map_err(X11rbError::from)?;
        self.conn
            .image_text8(self.desktop, self.gc, p.x as i16, p.y as i16, &bytes)
            .map_err(X11rbError::from)?;

        Ok(())
    }

    fn set_clip(&self, r: Option<Rect>) -> crate::Result<()> {
        match r {
            Some(r) => {
                let rect = Rectangle {
                    x: r.x as i16,
                    y: r.y as i16,
                    width: r.w as u16,
                    height: r.h as u16,
                };
                self.conn
                    .set_clip_rectangles(ClipOrdering::UNSORTED, self.gc, 0, 0, &[rect])
                    .map_err(X11rbError::from)?;
            }
            None => {
                let aux = ChangeGCAux::new().clip_mask(NONE);
                self.conn
                    .change_gc(self.gc, &aux)
                    .map_err(X11rbError::from)?;
            }
        }

        Ok(())
    }
}
