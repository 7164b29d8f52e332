//! Pushing the pure state out to the X server: window placement, input focus and
//! list overlays.
use crate::{
    core::{draw, State},
    pure::{
        geometry::Point,
        model::{FrameId, Protocols, WindowId, WorkspaceId},
        ListEntry, Listing,
    },
    x::{event::ClientMessage, Atom, ClientConfig, XConn, XConnExt},
    Result,
};
use tracing::{debug, trace, warn};

/// Move window `w` to wherever the current state says it belongs.
///
/// Windows that have already been placed at their desired position are left alone.
/// Windows being parked off screen keep their size and are stamped with a new park
/// sequence number.
pub(crate) fn configure_window<X: XConn>(w: WindowId, state: &mut State, x: &X) -> Result<()> {
    let r = state.inst.desired_rect(w, state.config.border_width);
    let win = &state.inst.windows[w];
    if win.placed && win.r == r {
        return Ok(());
    }
    let id = win.id;

    if r.is_offscreen() {
        let seq = state.inst.next_park_seq();
        let win = &mut state.inst.windows[w];
        win.r = r;
        win.placed = true;
        win.park_seq = seq;
        trace!(%id, seq, "parking window");

        x.set_client_config(id, &[ClientConfig::Move(Point::new(r.x, r.y))])
    } else {
        let win = &mut state.inst.windows[w];
        win.r = r;
        win.placed = true;
        win.seen = true;
        trace!(%id, ?r, "placing window");

        x.set_client_config(id, &[ClientConfig::Position(r), ClientConfig::BorderPx(0)])
    }
}

/// Configure every window of workspace `k`.
pub(crate) fn configure_workspace<X: XConn>(
    k: WorkspaceId,
    state: &mut State,
    x: &X,
) -> Result<()> {
    let ws: Vec<WindowId> = state.inst.windows_of(k).collect();
    for w in ws {
        configure_window(w, state, x)?;
    }

    Ok(())
}

/// Give input focus to `w`, or to the desktop if there is no window to focus.
///
/// Clients supporting WM_TAKE_FOCUS are asked to take focus themselves.
pub(crate) fn focus_window<X: XConn>(w: Option<WindowId>, state: &State, x: &X) -> Result<()> {
    let time = state.input.time;
    match w.map(|w| &state.inst.windows[w]) {
        Some(win) if win.protocols.contains(Protocols::TAKE_FOCUS) => {
            x.send_client_message(ClientMessage::new(win.id, Atom::WmTakeFocus, time))
        }
        Some(win) => x.set_input_focus(win.id, time),
        None => x.set_input_focus(x.desktop(), time),
    }
}

/// Make `f` the focused frame of workspace `k` and focus its window.
pub(crate) fn focus_frame<X: XConn>(
    k: WorkspaceId,
    f: FrameId,
    state: &mut State,
    x: &X,
) -> Result<()> {
    let ws = &state.inst.workspaces[k];
    let f0 = ws.focused_frame;

    if f != f0 {
        let redraw =
            ws.display.is_some() && !ws.fullscreen && ws.listing != Listing::Workspaces;
        state.inst.workspaces[k].focused_frame = f;
        debug!(?k, ?f0, ?f, "focused frame");

        if redraw {
            let colors = state.border_colors();
            draw::draw_border(f0, colors.unfocused, state, x)?;
            draw::draw_border(f, colors.focused, state, x)?;
        }
    }

    focus_window(state.inst.frames[f].window, state, x)
}

/// The frame of workspace `k` that the pointer is over, falling back to the current
/// focused frame.
///
/// If the pointer can not be queried the first leaf of the workspace is used.
pub(crate) fn frame_under_pointer<X: XConn>(k: WorkspaceId, state: &State, x: &X) -> FrameId {
    match x.cursor_position() {
        Ok(p) => state
            .inst
            .workspace_frame_at(k, p)
            .unwrap_or_else(|| state.inst.focused_frame(k)),

        Err(e) => {
            warn!(%e, ?k, "unable to query the pointer: using the first frame");
            state.inst.first_descendant(state.inst.workspaces[k].main_frame)
        }
    }
}

/// Focus the frame of workspace `k` that the pointer is over.
pub(crate) fn focus_under_pointer<X: XConn>(
    k: WorkspaceId,
    state: &mut State,
    x: &X,
) -> Result<()> {
    let f = frame_under_pointer(k, state, x);

    focus_frame(k, f, state, x)
}

/// Focus frame `f` of workspace `k` and move the pointer to its centre.
pub(crate) fn warp_to_frame<X: XConn>(
    k: WorkspaceId,
    f: FrameId,
    state: &mut State,
    x: &X,
) -> Result<()> {
    focus_frame(k, f, state, x)?;
    x.warp_pointer_to(state.inst.frames[f].r)?;

    make_lists(state, x)
}

/// Show `w1` in frame `f0` in place of `w0`.
///
/// If `w1` is currently shown in another frame then the two windows swap places.
pub(crate) fn change_window<X: XConn>(
    f0: FrameId,
    w0: Option<WindowId>,
    w1: WindowId,
    state: &mut State,
    x: &X,
) -> Result<()> {
    if w0 != Some(w1) {
        match (state.inst.windows[w1].frame, w0) {
            (Some(f1), Some(w0)) => state.inst.attach(f1, w0),
            (Some(_), None) => state.inst.detach(w1),
            (None, Some(w0)) => state.inst.detach(w0),
            (None, None) => (),
        }
        state.inst.attach(f0, w1);

        configure_window(w1, state, x)?;
        if let Some(w0) = w0 {
            configure_window(w0, state, x)?;
        }
    }
    focus_window(Some(w1), state, x)?;

    make_lists(state, x)
}

/// Show workspace `k1` on display `s0` in place of `k0`.
pub(crate) fn change_workspace<X: XConn>(
    s0: usize,
    k0: WorkspaceId,
    k1: WorkspaceId,
    state: &mut State,
    x: &X,
) -> Result<()> {
    let s1 = state.inst.change_workspace(s0, k0, k1);
    configure_workspace(k0, state, x)?;
    configure_workspace(k1, state, x)?;
    focus_under_pointer(k1, state, x)?;

    repaint(s0, state, x)?;
    if let Some(s1) = s1.filter(|&s1| s1 != s0) {
        repaint(s1, state, x)?;
    }

    make_lists(state, x)
}

/// Hide the list overlay of workspace `k`, bringing back any windows it covered.
pub(crate) fn close_list<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<()> {
    let ws = &mut state.inst.workspaces[k];
    ws.listing = Listing::None;
    ws.list.clear();
    ws.index = None;

    configure_workspace(k, state, x)
}

/// Rebuild the list overlay of workspace `k` to match its listing mode.
pub(crate) fn make_list<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<()> {
    let list = match state.inst.workspaces[k].listing {
        Listing::None => Vec::new(),
        Listing::Windows => state.inst.window_list(k),
        Listing::Workspaces => state.inst.workspace_list(),
    };

    for entry in list.iter() {
        if let ListEntry::Window(w) = *entry {
            let id = state.inst.windows[w].id;
            state.inst.windows[w].name = x.window_title(id).unwrap_or_else(|e| {
                warn!(%e, %id, "unable to fetch window title");
                "?".to_owned()
            });
        }
    }

    let empty = list.is_empty();
    state.inst.workspaces[k].list = list;
    state.inst.workspaces[k].index = if empty {
        None
    } else {
        match x.cursor_position() {
            Ok(p) => {
                let line_height = state.config.font.height.max(1) as u32;
                state.inst.index_for_point(k, p, line_height)
            }
            Err(e) => {
                warn!(%e, "unable to query the pointer: no list entry is hovered");
                None
            }
        }
    };

    configure_workspace(k, state, x)?;
    match state.inst.workspaces[k].display {
        Some(s) => repaint(s, state, x),
        None => Ok(()),
    }
}

/// Rebuild every list overlay currently being shown.
pub(crate) fn make_lists<X: XConn>(state: &mut State, x: &X) -> Result<()> {
    let listing: Vec<WorkspaceId> = state
        .inst
        .displays
        .iter()
        .map(|d| d.workspace)
        .filter(|&k| state.inst.workspaces[k].listing != Listing::None)
        .collect();

    for k in listing {
        make_list(k, state, x)?;
    }

    Ok(())
}

/// Clear display `s` so that the X server asks us to redraw it.
pub(crate) fn repaint<X: XConn>(s: usize, state: &State, x: &X) -> Result<()> {
    x.clear_area(state.inst.displays[s].r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::tests::{managed, test_wm},
        x::mock::Call,
        Rect, Xid,
    };

    #[test]
    fn configure_window_is_idempotent() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let w = managed(&mut wm, &conn, &[10])[0];
        let before = conn.placements(Xid(10)).len();

        configure_window(w, &mut wm.state, &conn).unwrap();
        configure_window(w, &mut wm.state, &conn).unwrap();

        assert_eq!(before, 1);
        assert_eq!(conn.placements(Xid(10)).len(), 1);
    }

    #[test]
    fn parking_stamps_increasing_sequence_numbers() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let ws = managed(&mut wm, &conn, &[10, 20]);

        for &w in ws.iter() {
            wm.state.inst.detach(w);
            configure_window(w, &mut wm.state, &conn).unwrap();
        }

        let seqs: Vec<u32> = ws.iter().map(|&w| wm.state.inst.windows[w].park_seq).collect();
        assert!(seqs[0] > 0 && seqs[1] > seqs[0]);
        assert!(wm.state.inst.windows[ws[0]].r.is_offscreen());
    }

    #[test]
    fn take_focus_clients_are_sent_a_message() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        conn.set_prop(
            Xid(10),
            "WM_PROTOCOLS",
            crate::x::Prop::Atom(vec!["WM_TAKE_FOCUS".to_owned()]),
        );
        let w = managed(&mut wm, &conn, &[10])[0];
        conn.take_calls();

        focus_window(Some(w), &wm.state, &conn).unwrap();
        focus_window(None, &wm.state, &conn).unwrap();

        assert_eq!(
            conn.take_calls(),
            vec![
                Call::ClientMessage(ClientMessage::new(Xid(10), Atom::WmTakeFocus, 0)),
                Call::Focus(Xid(1)),
            ]
        );
    }

    #[test]
    fn lost_pointer_resolves_to_the_first_leaf() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let k = wm.state.inst.workspace_on(0);
        let main = wm.state.inst.workspaces[k].main_frame;
        let last = wm.state.inst.last_descendant(main);
        wm.state.inst.workspaces[k].focused_frame = last;
        conn.pointer.set(Point::new(600, 300));
        assert_eq!(frame_under_pointer(k, &wm.state, &conn), last);

        conn.pointer_lost.set(true);
        let f = frame_under_pointer(k, &wm.state, &conn);

        assert_eq!(f, wm.state.inst.first_descendant(main));
    }

    #[test]
    fn warp_to_frame_moves_the_pointer_to_the_frame_centre() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let k = wm.state.inst.workspace_on(0);
        let main = wm.state.inst.workspaces[k].main_frame;
        let last = wm.state.inst.last_descendant(main);

        warp_to_frame(k, last, &mut wm.state, &conn).unwrap();

        assert_eq!(wm.state.inst.focused_frame(k), last);
        assert_eq!(conn.pointer.get(), Point::new(600, 300));
    }
}
