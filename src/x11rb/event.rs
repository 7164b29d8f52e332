//! Translating x11rb events into [XEvent]s
use crate::{
    core::bindings::ModMask,
    pure::geometry::{Point, Rect},
    x::{
        event::{ExposeEvent, KeyEvent, PointerChange, PointerEvent},
        ConfigureEvent, XEvent,
    },
    Xid,
};
use tracing::{trace, warn};
use x11rb::protocol::{
    xproto::{ConfigWindow, ConfigureRequestEvent, KeyButMask},
    Event,
};

/// Convert an x11rb [Event] into an [XEvent] if it is one that we handle.
pub(crate) fn convert_event(event: Event) -> Option<XEvent> {
    match event {
        Event::ButtonPress(e) => Some(XEvent::ButtonPress(PointerEvent {
            button: e.detail,
            state: mod_mask(e.state),
            root: Point::new(e.root_x as i32, e.root_y as i32),
            time: e.time,
        })),

        Event::ButtonRelease(e) => Some(XEvent::ButtonRelease(e.time)),

        Event::ConfigureRequest(e) => Some(XEvent::ConfigureRequest(configure_event(&e))),

        Event::DestroyNotify(e) => Some(XEvent::Destroy(Xid(e.window))),

        Event::EnterNotify(e) => Some(XEvent::Enter(PointerChange {
            id: Xid(e.event),
            root: Point::new(e.root_x as i32, e.root_y as i32),
            time: e.time,
        })),

        Event::Expose(e) => Some(XEvent::Expose(ExposeEvent {
            r: Rect::new(e.x as i32, e.y as i32, e.width as u32, e.height as u32),
            count: e.count,
        })),

        Event::KeyPress(e) => Some(XEvent::KeyPress(KeyEvent {
            code: e.detail,
            state: mod_mask(e.state),
            root: Point::new(e.root_x as i32, e.root_y as i32),
            time: e.time,
        })),

        Event::KeyRelease(e) => Some(XEvent::KeyRelease(e.time)),

        Event::MapRequest(e) => Some(XEvent::MapRequest(Xid(e.window))),

        Event::MotionNotify(e) => Some(XEvent::Motion(PointerEvent {
            button: 0,
            state: mod_mask(e.state),
            root: Point::new(e.root_x as i32, e.root_y as i32),
            time: e.time,
        })),

        Event::UnmapNotify(e) => Some(XEvent::UnmapNotify(Xid(e.window))),

        Event::Error(e) => {
            warn!(?e, "error event from the X server");
            None
        }

        // Events we do not handle
        e => {
            trace!(?e, "dropping unhandled event");
            None
        }
    }
}

fn mod_mask(state: KeyButMask) -> ModMask {
    ModMask::from_bits_truncate(u16::from(state))
}

fn configure_event(e: &ConfigureRequestEvent) -> ConfigureEvent {
    let mask = u16::from(e.value_mask);
    let has = |flag: ConfigWindow| mask & u16::from(flag) != 0;

    ConfigureEvent {
        id: Xid(e.window),
        x: has(ConfigWindow::X).then_some(e.x as i32),
        y: has(ConfigWindow::Y).then_some(e.y as i32),
        w: has(ConfigWindow::WIDTH).then_some(e.width as u32),
        h: has(ConfigWindow::HEIGHT).then_some(e.height as u32),
        border_width: has(ConfigWindow::BORDER_WIDTH).then_some(e.border_width as u32),
        sibling: has(ConfigWindow::SIBLING).then_some(Xid(e.sibling)),
        stack_mode: has(ConfigWindow::STACK_MODE).then_some(u32::from(e.stack_mode) as u8),
    }
}
