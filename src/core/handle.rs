//! XEvent handlers for use in the main event loop
use crate::{
    core::{
        actions::{dispatch, do_fullscreen, do_list, do_window},
        bindings::{Binding, ModMask, MouseButton},
        draw,
        focus::{
            change_window, change_workspace, close_list, configure_window, focus_frame,
            focus_window, make_list, make_lists, repaint,
        },
        InputState, State,
    },
    pure::{geometry::Point, model::Protocols, ring, ListEntry, Listing, Traversal},
    x::{
        event::{ExposeEvent, KeyEvent, PointerChange, PointerEvent},
        ClientAttr, ConfigureEvent, XConn, XConnExt,
    },
    Result, Xid,
};
use tracing::{debug, info, trace, warn};

/// Start managing a client window.
///
/// Clients that are already managed are only mapped and refocused.
pub(crate) fn manage<X>(id: Xid, map_request: bool, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    if id == x.root() || id == x.desktop() {
        return Ok(());
    }

    if let Some(w) = state.inst.find_window(id) {
        trace!(%id, "map request for a managed window");
        if map_request {
            x.map(id)?;
        }
        let k = state.inst.windows[w].workspace;
        let shown = state.inst.workspaces[k].display.is_some();
        if shown && state.inst.focused_window(k) == Some(w) {
            focus_window(Some(w), state, x)?;
        }
        return make_lists(state, x);
    }

    let protocols = x.client_protocols(id).unwrap_or_else(|e| {
        warn!(%e, %id, "unable to fetch WM_PROTOCOLS");
        Protocols::empty()
    });
    let transient_for = match x.transient_for(id) {
        Ok(t) => t.and_then(|t| state.inst.find_window(t)),
        Err(e) => {
            warn!(%e, %id, "unable to fetch WM_TRANSIENT_FOR");
            None
        }
    };
    let name = x.window_title(id).unwrap_or_else(|e| {
        warn!(%e, %id, "unable to fetch window title");
        "?".to_owned()
    });

    let k = match transient_for {
        Some(t) => state.inst.windows[t].workspace,
        None => match x.cursor_position() {
            Ok(p) => state.inst.workspace_on(state.inst.display_containing(p)),
            Err(e) => {
                warn!(%e, %id, "unable to query the pointer: using the first screen");
                state.inst.workspace_on(0)
            }
        },
    };

    let dummy = state.inst.workspaces[k].dummy_window;
    let after = transient_for
        .or_else(|| state.inst.focused_window(k))
        .unwrap_or_else(|| ring::step(&state.inst.windows, dummy, Traversal::Prev));
    let w = state.inst.new_window(k, id, protocols, transient_for, after);
    state.inst.windows[w].name = name;

    let focused = state.inst.focused_frame(k);
    let frame = match transient_for.and_then(|t| state.inst.windows[t].frame) {
        Some(f) => Some(f),
        None if state.inst.frames[focused].window.is_none() => Some(focused),
        None => state.inst.first_empty_frame(state.inst.workspaces[k].main_frame),
    };
    if let Some(f) = frame {
        state.inst.attach(f, w);
    }
    info!(%id, ?k, ?frame, "managing new client");

    x.set_client_attributes(id, &[ClientAttr::ClientEventMask])?;
    configure_window(w, state, x)?;
    if let Some(t) = transient_for {
        configure_window(t, state, x)?;
    }
    if map_request {
        x.map(id)?;
    }
    if frame == Some(focused) && state.inst.workspaces[k].display.is_some() {
        focus_window(Some(w), state, x)?;
    }
    make_lists(state, x)?;
    state.start_pulse();

    Ok(())
}

/// Stop managing a client window that has been unmapped or destroyed.
///
/// If it was being shown then the most suitable hidden window takes over its frame.
pub(crate) fn unmanage<X>(id: Xid, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    let w = match state.inst.find_window(id) {
        Some(w) => w,
        None => return Ok(()),
    };
    let (k, frame) = (state.inst.windows[w].workspace, state.inst.windows[w].frame);
    let replacement = state.inst.replacement_for(w);
    info!(%id, ?k, ?replacement, "removing client");

    let ws = &state.inst.workspaces[k];
    let exit_fullscreen =
        replacement.is_none() && ws.fullscreen && frame == Some(ws.focused_frame);

    // settle the model before making any requests
    if let (Some(f), Some(r)) = (frame, replacement) {
        state.inst.attach(f, r);
    }
    state.inst.remove_window(w);
    state.start_pulse();

    if state.quit.is_quitting() && state.inst.all_windows().next().is_none() {
        info!("all windows closed: exiting");
        state.exit = true;
    }

    if let (Some(f), Some(r)) = (frame, replacement) {
        configure_window(r, state, x)?;

        match x.cursor_position() {
            Ok(p) => {
                let ws = &state.inst.workspaces[k];
                let under_pointer = ws.display == Some(state.inst.display_containing(p))
                    && state.inst.workspace_frame_at(k, p) == Some(f);
                if under_pointer {
                    focus_window(Some(r), state, x)?;
                }
            }
            Err(e) => warn!(%e, "unable to query the pointer: focus left unchanged"),
        }
    }

    if exit_fullscreen {
        do_fullscreen(k, state, x)?;
    }

    make_lists(state, x)
}

/// Managed clients are told where they are, everything else gets what it asked for.
pub(crate) fn configure_request<X>(req: ConfigureEvent, state: &State, x: &X) -> Result<()>
where
    X: XConn,
{
    match state.inst.find_window(req.id) {
        Some(w) => x.send_configure_notify(req.id, state.inst.windows[w].r),
        None => x.forward_configure_request(&req),
    }
}

/// The pointer entered a client window: focus its frame.
pub(crate) fn enter<X>(p: PointerChange, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    let w = match state.inst.find_window(p.id) {
        Some(w) => w,
        None => return Ok(()),
    };
    let (k, f) = match state.inst.windows[w].frame {
        Some(f) => (state.inst.windows[w].workspace, f),
        None => return Ok(()),
    };

    let f0 = state.inst.focused_frame(k);
    focus_frame(k, f, state, x)?;
    if f != f0 && state.inst.workspaces[k].listing == Listing::Windows {
        make_list(k, state, x)?;
    }

    Ok(())
}

/// The pointer moved over the desktop: follow it with focus and the list marker.
pub(crate) fn motion<X>(e: PointerEvent, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    let k = state.inst.workspace_on(state.inst.display_containing(e.root));
    let ws = &state.inst.workspaces[k];
    let (f0, listing) = (ws.focused_frame, ws.listing);

    if !ws.fullscreen && listing != Listing::Workspaces {
        if let Some(f) = state.inst.workspace_frame_at(k, e.root) {
            if f != f0 {
                focus_frame(k, f, state, x)?;
                if listing == Listing::Windows {
                    return make_list(k, state, x);
                }
            }
        }
    }

    if listing == Listing::None {
        return Ok(());
    }

    let line_height = state.config.font.height.max(1) as u32;
    let index = state.inst.index_for_point(k, e.root, line_height);
    let old = state.inst.workspaces[k].index;
    if index != old {
        state.inst.workspaces[k].index = index;
        draw::move_marker(k, old, index, state, x)?;
    }

    Ok(())
}

/// A mouse button was pressed over the desktop.
pub(crate) fn button_press<X>(e: PointerEvent, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    let s = state.inst.display_containing(e.root);
    let k = state.inst.workspace_on(s);
    let listing = state.inst.workspaces[k].listing;

    let button = match (MouseButton::from_press(e.button, e.state), listing) {
        (None, _) => return Ok(()),
        (Some(b), Listing::None) => b,
        (Some(b), _) if b.is_wheel() => return Ok(()),
        (Some(_), Listing::Windows) => MouseButton::Left,
        (Some(_), Listing::Workspaces) => MouseButton::Right,
    };
    debug!(?button, ?listing, "button press");

    let ws = &state.inst.workspaces[k];
    let hovered = ws.index.and_then(|i| ws.list.get(i)).copied();

    match (button, listing, hovered) {
        (MouseButton::Left, Listing::Windows, Some(ListEntry::Window(w1))) => {
            close_list(k, state, x)?;
            let f0 = state.inst.focused_frame(k);
            let w0 = state.inst.focused_window(k);
            change_window(f0, w0, w1, state, x)?;
            repaint(s, state, x)?;
        }
        (MouseButton::Left, _, _) => {
            do_list(k, Listing::Windows, state, x)?;
        }
        (MouseButton::Right, Listing::Workspaces, Some(ListEntry::Workspace(k1))) => {
            close_list(k, state, x)?;
            change_workspace(s, k, k1, state, x)?;
            repaint(s, state, x)?;
        }
        (MouseButton::Right, _, _) => {
            do_list(k, Listing::Workspaces, state, x)?;
        }
        (MouseButton::ScrollUp, _, _) => {
            do_window(k, Traversal::Prev, state, x)?;
        }
        (MouseButton::ScrollDown, _, _) => {
            do_window(k, Traversal::Next, state, x)?;
        }
    }

    if !button.is_wheel() {
        let k = state.inst.workspace_on(s);
        let w = match state.inst.workspaces[k].listing {
            Listing::None => state.inst.focused_window(k),
            _ => None,
        };
        focus_window(w, state, x)?;
    }

    Ok(())
}

/// A grabbed key was pressed: run its binding against the workspace under the pointer.
pub(crate) fn key_press<X>(e: KeyEvent, state: &mut State, x: &X) -> Result<()>
where
    X: XConn,
{
    state.input = InputState {
        time: e.time,
        root: e.root,
        state: e.state,
    };

    let shift = e.state.contains(ModMask::SHIFT);
    let binding = Binding {
        keysym: state.keymap.keysym(e.code, shift),
        shift,
    };
    let action = match state.config.bindings.get(&binding) {
        Some(action) => action.clone(),
        None => {
            trace!(?binding, code = e.code, "no binding for key press");
            return Ok(());
        }
    };

    let k = state.inst.workspace_on(state.inst.display_containing(e.root));
    if dispatch(&action, k, state, x)? {
        state.start_pulse();
    }

    Ok(())
}

/// A grabbed key was released.
pub(crate) fn key_release(time: u32, state: &mut State) {
    state.input = InputState {
        time,
        ..Default::default()
    };
}

/// Part of the desktop needs redrawing: redraw the display the region belongs to once
/// the last expose event of a series arrives.
pub(crate) fn expose<X>(e: ExposeEvent, state: &State, x: &X) -> Result<()>
where
    X: XConn,
{
    if e.count > 0 {
        return Ok(());
    }

    let s = state.inst.display_containing(Point::new(e.r.x, e.r.y));

    draw::redraw_display(s, state, x)
}
