//! The actions that can be bound to keys and the logic for running them.
//!
//! Every action runs against the workspace shown on the display under the pointer and
//! returns whether the borders should pulse to acknowledge it.
use crate::{
    core::{
        bindings::ModMask,
        focus::{
            change_window, change_workspace, configure_window, configure_workspace,
            focus_under_pointer, focus_window, make_list, make_lists, repaint, warp_to_frame,
        },
        quit::{QuitPress, GRACE_PERIOD},
        Callback, State,
    },
    pure::{
        geometry::Point,
        model::{Protocols, WindowId, WorkspaceId},
        ring, Listing, Orientation, Traversal,
    },
    util::spawn_with_args,
    x::{
        event::{ClientMessage, RawInput, SyntheticEvent},
        Atom, XConn, XConnExt,
    },
    KeySym, Result, Xid,
};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::{thread, time::Instant};
use strum::{AsRefStr, EnumIter, EnumString};
use tracing::{debug, info, warn};

/// Whether a selection toggle applies to the focused window or the whole workspace.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SelectScope {
    /// Only the window in the focused frame
    One,
    /// Every window of the workspace
    All,
}

/// Common operations that programs bind to different key combinations.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(AsRefStr, EnumString, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[strum(serialize_all = "kebab-case")]
pub enum ProgramAction {
    /// Open a new tab
    TabNew,
    /// Close the current tab
    TabClose,
    /// Switch to the previous tab
    TabPrev,
    /// Switch to the next tab
    TabNext,
    /// Cut the selection
    Cut,
    /// Copy the selection
    Copy,
    /// Paste the clipboard
    Paste,
    /// Paste without formatting
    PasteSpecial,
    /// Increase the zoom level
    ZoomIn,
    /// Decrease the zoom level
    ZoomOut,
    /// Restore the default zoom level
    ZoomReset,
}

/// Input to be injected into the focused window.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SyntheticInput {
    /// A mouse button: 4 and 5 scroll
    Button(u8),
    /// A key, resolved to a keycode using the current keyboard mapping
    Key(KeySym),
}

/// Something to do in response to a key binding.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Spawn a program
    Exec(Vec<String>),
    /// Spawn a program controlling audio, if audio actions are enabled
    Audio(Vec<String>),
    /// Move the pointer to the next or previous display
    Screen(Traversal),
    /// Move focus to the next or previous frame
    Frame(Traversal),
    /// Bring the next or previous hidden window into the focused frame
    Window(Traversal),
    /// Bring the nth window of the ring into the focused frame
    WindowN(usize),
    /// Show the next or previous hidden workspace on this display
    Workspace(Traversal),
    /// Show the nth workspace on this display
    WorkspaceN(usize),
    /// Create a new workspace and show it on this display
    WorkspaceNew,
    /// Delete this workspace if it holds no windows
    WorkspaceDelete,
    /// Ask the focused window to close
    WindowDelete,
    /// Toggle a list overlay
    List(Listing),
    /// Move the focused window within the window ring
    WindowNudge(Traversal),
    /// Move this workspace within the workspace ring
    WorkspaceNudge(Traversal),
    /// Toggle selection of windows for migration
    Select(SelectScope),
    /// Move all selected windows to this workspace
    Migrate,
    /// Toggle showing the focused window across the whole display
    Fullscreen,
    /// Hide the focused window
    Hide,
    /// Split the focused frame
    Split(Orientation),
    /// Remove the focused frame
    Merge,
    /// Send the focused program its own key combination for a common operation
    Program(ProgramAction),
    /// Inject input into the focused window
    Synthetic(SyntheticInput),
    /// Shut down: needs to be pressed twice in quick succession
    Quit,
}

/// Run `action` against workspace `k`, returning whether to pulse the borders.
pub(crate) fn dispatch<X: XConn>(
    action: &Action,
    k: WorkspaceId,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    debug!(?action, ?k, "running action");

    match action {
        Action::Exec(cmd) => do_exec(cmd),
        Action::Audio(cmd) => do_audio(cmd, state),
        Action::Screen(t) => do_screen(k, *t, state, x),
        Action::Frame(t) => do_frame(k, *t, state, x),
        Action::Window(t) => do_window(k, *t, state, x),
        Action::WindowN(n) => do_window_n(k, *n, state, x),
        Action::Workspace(t) => do_workspace(k, *t, state, x),
        Action::WorkspaceN(n) => do_workspace_n(k, *n, state, x),
        Action::WorkspaceNew => do_workspace_new(k, state, x),
        Action::WorkspaceDelete => do_workspace_delete(k, state, x),
        Action::WindowDelete => do_window_delete(k, state, x),
        Action::List(l) => do_list(k, *l, state, x),
        Action::WindowNudge(t) => do_window_nudge(k, *t, state, x),
        Action::WorkspaceNudge(t) => do_workspace_nudge(k, *t, state, x),
        Action::Select(scope) => do_select(k, *scope, state, x),
        Action::Migrate => do_migrate(k, state, x),
        Action::Fullscreen => do_fullscreen(k, state, x),
        Action::Hide => do_hide(k, state, x),
        Action::Split(o) => do_split(k, *o, state, x),
        Action::Merge => do_merge(k, state, x),
        Action::Program(pa) => do_program(k, *pa, state, x),
        Action::Synthetic(input) => do_synthetic(k, *input, state, x),
        Action::Quit => do_quit(state, x),
    }
}

fn do_exec(cmd: &[String]) -> Result<bool> {
    if let Err(e) = spawn_with_args(cmd) {
        warn!(%e, ?cmd, "unable to run command");
    }

    Ok(false)
}

fn do_audio(cmd: &[String], state: &State) -> Result<bool> {
    if !state.config.audio_actions {
        return Ok(false);
    }
    if let Err(e) = spawn_with_args(cmd) {
        warn!(%e, ?cmd, "unable to run audio command");
    }

    Ok(true)
}

fn do_screen<X: XConn>(k: WorkspaceId, t: Traversal, state: &mut State, x: &X) -> Result<bool> {
    let s0 = match state.inst.workspaces[k].display {
        Some(s) => s,
        None => return Ok(true),
    };

    let n = state.inst.displays.len();
    let s1 = match t {
        Traversal::Next => (s0 + 1) % n,
        Traversal::Prev => (s0 + n - 1) % n,
    };
    let k1 = state.inst.workspace_on(s1);
    let f = state.inst.focused_frame(k1);
    warp_to_frame(k1, f, state, x)?;

    Ok(true)
}

fn do_frame<X: XConn>(k: WorkspaceId, t: Traversal, state: &mut State, x: &X) -> Result<bool> {
    let ws = &state.inst.workspaces[k];
    if ws.fullscreen || ws.listing != Listing::None {
        return Ok(false);
    }

    let f = state.inst.traverse(ws.focused_frame, t);
    warp_to_frame(k, f, state, x)?;

    Ok(true)
}

pub(crate) fn do_window<X: XConn>(
    k: WorkspaceId,
    t: Traversal,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    let ws = &state.inst.workspaces[k];
    let (dummy, fullscreen) = (ws.dummy_window, ws.fullscreen);
    let w0 = state.inst.focused_window(k);
    let start = w0.unwrap_or(dummy);

    let mut w1 = start;
    loop {
        w1 = ring::step(&state.inst.windows, w1, t);
        if w1 == start {
            return Ok(true);
        }
        if w1 == dummy {
            continue;
        }
        if fullscreen || state.inst.windows[w1].frame.is_none() {
            break;
        }
    }

    let f0 = state.inst.focused_frame(k);
    change_window(f0, w0, w1, state, x)?;

    Ok(true)
}

fn do_window_n<X: XConn>(k: WorkspaceId, n: usize, state: &mut State, x: &X) -> Result<bool> {
    let dummy = state.inst.workspaces[k].dummy_window;
    let w0 = state.inst.focused_window(k);
    let w1 = match ring::nth(&state.inst.windows, dummy, n) {
        Some(w) if Some(w) != w0 => w,
        _ => return Ok(true),
    };

    let f0 = state.inst.focused_frame(k);
    change_window(f0, w0, w1, state, x)?;

    Ok(true)
}

fn do_workspace<X: XConn>(k: WorkspaceId, t: Traversal, state: &mut State, x: &X) -> Result<bool> {
    let (s0, k1) = match (
        state.inst.workspaces[k].display,
        state.inst.hidden_workspace_from(k, t),
    ) {
        (Some(s0), Some(k1)) => (s0, k1),
        _ => return Ok(true),
    };
    change_workspace(s0, k, k1, state, x)?;

    Ok(true)
}

fn do_workspace_n<X: XConn>(k: WorkspaceId, n: usize, state: &mut State, x: &X) -> Result<bool> {
    let s0 = match state.inst.workspaces[k].display {
        Some(s) => s,
        None => return Ok(true),
    };
    let k1 = match ring::nth(&state.inst.workspaces, state.inst.dummy_workspace, n) {
        Some(k1) if k1 != k => k1,
        _ => return Ok(true),
    };
    change_workspace(s0, k, k1, state, x)?;

    Ok(true)
}

fn do_workspace_new<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    let s0 = match state.inst.workspaces[k].display {
        Some(s) => s,
        None => return Ok(true),
    };
    let r = state.inst.displays[s0].r;
    let k1 = state.inst.new_workspace(r, k);
    change_workspace(s0, k, k1, state, x)?;

    Ok(true)
}

fn do_workspace_delete<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    if let Some(k1) = state.inst.delete_workspace(k) {
        configure_workspace(k1, state, x)?;
        focus_window(state.inst.focused_window(k1), state, x)?;
        if let Some(s) = state.inst.workspaces[k1].display {
            repaint(s, state, x)?;
        }
        make_lists(state, x)?;
    }

    Ok(true)
}

fn do_window_delete<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    if let Some(w) = state.inst.focused_window(k) {
        let win = &state.inst.windows[w];
        if win.protocols.contains(Protocols::DELETE_WINDOW) {
            let msg = ClientMessage::new(win.id, Atom::WmDeleteWindow, state.input.time);
            x.send_client_message(msg)?;
        }
    }

    Ok(true)
}

/// Toggle listing mode `l` for workspace `k`.
pub(crate) fn do_list<X: XConn>(
    k: WorkspaceId,
    l: Listing,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    let ws = &mut state.inst.workspaces[k];
    ws.listing = if ws.listing == l { Listing::None } else { l };
    make_list(k, state, x)?;

    Ok(false)
}

fn do_window_nudge<X: XConn>(
    k: WorkspaceId,
    t: Traversal,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    if let Some(w) = state.inst.focused_window(k) {
        ring::nudge(&mut state.inst.windows, w, t);
    }
    make_lists(state, x)?;

    Ok(true)
}

fn do_workspace_nudge<X: XConn>(
    k: WorkspaceId,
    t: Traversal,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    ring::nudge(&mut state.inst.workspaces, k, t);
    make_lists(state, x)?;

    Ok(true)
}

fn do_select<X: XConn>(
    k: WorkspaceId,
    scope: SelectScope,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    match scope {
        SelectScope::One => state.inst.toggle_selected(k),
        SelectScope::All => state.inst.toggle_select_all(k),
    }
    make_lists(state, x)?;

    Ok(true)
}

fn do_migrate<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    let exit_fullscreen = state.inst.migrate_selected(k);

    let ws: Vec<WindowId> = state.inst.all_windows().collect();
    for w in ws {
        configure_window(w, state, x)?;
    }
    for k1 in exit_fullscreen {
        do_fullscreen(k1, state, x)?;
    }
    make_lists(state, x)?;

    Ok(true)
}

/// Toggle fullscreen for workspace `k`.
pub(crate) fn do_fullscreen<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    let fullscreen = state.inst.workspaces[k].fullscreen;
    if !fullscreen && state.inst.focused_window(k).is_none() {
        return Ok(true);
    }

    state.inst.workspaces[k].fullscreen = !fullscreen;
    debug!(?k, fullscreen = !fullscreen, "toggled fullscreen");
    focus_under_pointer(k, state, x)?;
    configure_workspace(k, state, x)?;
    if let Some(s) = state.inst.workspaces[k].display {
        repaint(s, state, x)?;
    }

    Ok(true)
}

fn do_hide<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    if let Some(w) = state.inst.focused_window(k) {
        state.inst.detach(w);
        configure_window(w, state, x)?;
        if state.inst.workspaces[k].fullscreen {
            do_fullscreen(k, state, x)?;
        } else {
            focus_window(None, state, x)?;
        }
    }
    make_lists(state, x)?;

    Ok(true)
}

fn refuses_layout_changes(k: WorkspaceId, state: &State) -> bool {
    let ws = &state.inst.workspaces[k];

    ws.fullscreen || ws.listing == Listing::Workspaces
}

fn do_split<X: XConn>(k: WorkspaceId, o: Orientation, state: &mut State, x: &X) -> Result<bool> {
    if refuses_layout_changes(k, state) {
        return Ok(false);
    }

    let f = state.inst.focused_frame(k);
    state.inst.split(f, o);
    configure_workspace(k, state, x)?;
    finish_merge_split(k, state, x)?;

    Ok(true)
}

fn do_merge<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<bool> {
    if refuses_layout_changes(k, state) {
        return Ok(false);
    }

    let f = state.inst.focused_frame(k);
    if !state.inst.merge(f) {
        return Ok(true);
    }
    configure_workspace(k, state, x)?;
    finish_merge_split(k, state, x)?;

    Ok(true)
}

fn finish_merge_split<X: XConn>(k: WorkspaceId, state: &mut State, x: &X) -> Result<()> {
    focus_under_pointer(k, state, x)?;
    if let Some(s) = state.inst.workspaces[k].display {
        repaint(s, state, x)?;
    }

    make_lists(state, x)
}

fn do_program<X: XConn>(
    k: WorkspaceId,
    pa: ProgramAction,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    let w = match state.inst.focused_window(k) {
        Some(w) => w,
        None => return Ok(false),
    };
    let class = match x.window_class(state.inst.windows[w].id)? {
        Some(class) => class,
        None => return Ok(false),
    };

    let (mods, keysym) = match state
        .config
        .program_actions
        .get(&class)
        .and_then(|actions| actions.get(&pa))
    {
        Some(&entry) => entry,
        None => {
            debug!(%class, action = pa.as_ref(), "no program action defined");
            return Ok(false);
        }
    };
    send_synthetic(w, SyntheticInput::Key(keysym), mods, state, x)?;

    Ok(true)
}

fn do_synthetic<X: XConn>(
    k: WorkspaceId,
    input: SyntheticInput,
    state: &mut State,
    x: &X,
) -> Result<bool> {
    if let Some(w) = state.inst.focused_window(k) {
        let mods = state.input.state;
        send_synthetic(w, input, mods, state, x)?;
    }

    Ok(false)
}

fn send_synthetic<X: XConn>(
    w: WindowId,
    input: SyntheticInput,
    mods: ModMask,
    state: &State,
    x: &X,
) -> Result<()> {
    let win = &state.inst.windows[w];
    let root = state.input.root;
    let pos = Point::new(root.x - win.r.x, root.y - win.r.y);

    let (input, mods) = match input {
        SyntheticInput::Button(b) => (RawInput::Button(b), mods),
        SyntheticInput::Key(sym) => match state.keymap.keycode(sym) {
            Some((code, true)) => (RawInput::Key(code), mods | ModMask::SHIFT),
            Some((code, false)) => (RawInput::Key(code), mods),
            None => {
                debug!(%sym, "keysym is not on the keyboard: dropping synthetic input");
                return Ok(());
            }
        },
    };

    x.send_synthetic(SyntheticEvent {
        id: win.id,
        input,
        state: mods,
        root,
        pos,
        time: state.input.time,
    })
}

fn do_quit<X: XConn>(state: &mut State, x: &X) -> Result<bool> {
    match state.quit.press(Instant::now()) {
        QuitPress::Ignored => Ok(false),
        QuitPress::Unconfirmed => {
            info!("press quit again to confirm");
            Ok(true)
        }
        QuitPress::Confirmed => {
            let closable: Vec<Xid> = state
                .inst
                .all_windows()
                .map(|w| &state.inst.windows[w])
                .filter(|win| win.protocols.contains(Protocols::DELETE_WINDOW))
                .map(|win| win.id)
                .collect();

            if closable.is_empty() {
                info!("no windows to close: exiting");
                state.exit = true;
                return Ok(true);
            }

            info!(n = closable.len(), "asking windows to close before exiting");
            for id in closable {
                let msg = ClientMessage::new(id, Atom::WmDeleteWindow, state.input.time);
                x.send_client_message(msg)?;
            }

            let tx = state.callbacks.clone();
            thread::spawn(move || {
                thread::sleep(GRACE_PERIOD);
                // The receiver is gone if we already exited cleanly
                let _ = tx.send(Callback::ForceQuit);
            });

            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::tests::{managed, test_wm},
        x::{event::RawInput, mock::Call, Prop},
        Rect,
    };
    use simple_test_case::test_case;
    use strum::IntoEnumIterator;

    #[test]
    fn program_actions_round_trip_through_their_names() {
        for pa in ProgramAction::iter() {
            assert_eq!(pa.as_ref().parse::<ProgramAction>().unwrap(), pa);
        }
    }

    #[test_case(Action::Split(Orientation::Vertical); "split")]
    #[test_case(Action::Merge; "merge")]
    #[test_case(Action::Frame(Traversal::Next); "frame")]
    #[test]
    fn layout_actions_are_refused_in_fullscreen(action: Action) {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        managed(&mut wm, &conn, &[10]);
        let k = wm.state.inst.workspace_on(0);
        dispatch(&Action::Fullscreen, k, &mut wm.state, &conn).unwrap();

        let n_frames = wm.state.inst.frames.len();
        let pulse = dispatch(&action, k, &mut wm.state, &conn).unwrap();

        assert!(!pulse);
        assert_eq!(wm.state.inst.frames.len(), n_frames);
    }

    #[test]
    fn fullscreen_needs_a_focused_window() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let k = wm.state.inst.workspace_on(0);

        dispatch(&Action::Fullscreen, k, &mut wm.state, &conn).unwrap();

        assert!(!wm.state.inst.workspaces[k].fullscreen);
    }

    #[test]
    fn window_cycles_through_hidden_windows() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        // Two leaves: the first two windows are shown, the third is hidden
        let ws = managed(&mut wm, &conn, &[10, 20, 30]);
        let k = wm.state.inst.workspace_on(0);
        let w0 = wm.state.inst.focused_window(k);

        dispatch(&Action::Window(Traversal::Next), k, &mut wm.state, &conn).unwrap();

        assert_eq!(w0, Some(ws[0]));
        assert_eq!(wm.state.inst.focused_window(k), Some(ws[2]));
        assert_eq!(wm.state.inst.windows[ws[0]].frame, None);
        assert!(wm.state.inst.windows[ws[0]].park_seq > 0);
    }

    #[test]
    fn window_n_swaps_visible_windows_between_frames() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let ws = managed(&mut wm, &conn, &[10, 20]);
        let k = wm.state.inst.workspace_on(0);
        let f0 = wm.state.inst.focused_frame(k);
        let w0 = wm.state.inst.focused_window(k).unwrap();
        let other = if w0 == ws[0] { ws[1] } else { ws[0] };
        let f1 = wm.state.inst.windows[other].frame.unwrap();
        let n = wm.state.inst.windows_of(k).position(|w| w == other).unwrap();

        dispatch(&Action::WindowN(n), k, &mut wm.state, &conn).unwrap();

        assert_eq!(wm.state.inst.frames[f0].window, Some(other));
        assert_eq!(wm.state.inst.frames[f1].window, Some(w0));
    }

    #[test]
    fn list_toggles() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        managed(&mut wm, &conn, &[10]);
        let k = wm.state.inst.workspace_on(0);
        let list = Action::List(Listing::Windows);

        assert!(!dispatch(&list, k, &mut wm.state, &conn).unwrap());
        assert_eq!(wm.state.inst.workspaces[k].listing, Listing::Windows);
        assert_eq!(wm.state.inst.workspaces[k].list.len(), 1);

        dispatch(&list, k, &mut wm.state, &conn).unwrap();
        assert_eq!(wm.state.inst.workspaces[k].listing, Listing::None);
        assert!(wm.state.inst.workspaces[k].list.is_empty());
    }

    #[test]
    fn window_lists_survive_clients_that_have_gone_away() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        conn.set_prop(Xid(10), "WM_NAME", Prop::UTF8String(vec!["editor".to_owned()]));
        conn.set_prop(Xid(20), "WM_NAME", Prop::UTF8String(vec!["term".to_owned()]));
        let ws = managed(&mut wm, &conn, &[10, 20]);
        let k = wm.state.inst.workspace_on(0);
        conn.vanished.borrow_mut().push(Xid(20));

        dispatch(&Action::List(Listing::Windows), k, &mut wm.state, &conn).unwrap();

        let ws_k = &wm.state.inst.workspaces[k];
        assert_eq!(ws_k.listing, Listing::Windows);
        assert_eq!(ws_k.list.len(), 2);
        assert_eq!(wm.state.inst.windows[ws[0]].name, "editor");
        assert_eq!(wm.state.inst.windows[ws[1]].name, "?");
        // the list covers the focused frame
        assert!(wm.state.inst.windows[ws[0]].r.is_offscreen());
    }

    #[test_case(Action::WorkspaceNew; "new workspace")]
    #[test_case(Action::Split(Orientation::Vertical); "vertical split")]
    #[test_case(Action::Merge; "merge right")]
    #[test]
    fn lost_pointer_focuses_the_first_leaf(action: Action) {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        managed(&mut wm, &conn, &[10, 20]);
        let k0 = wm.state.inst.workspace_on(0);
        let main = wm.state.inst.workspaces[k0].main_frame;
        wm.state.inst.workspaces[k0].focused_frame = wm.state.inst.last_descendant(main);
        conn.pointer_lost.set(true);
        conn.take_calls();

        assert!(dispatch(&action, k0, &mut wm.state, &conn).unwrap());

        let k = wm.state.inst.workspace_on(0);
        let first = wm.state.inst.first_descendant(wm.state.inst.workspaces[k].main_frame);
        assert_eq!(wm.state.inst.focused_frame(k), first);
        assert!(conn.take_calls().iter().any(|c| matches!(c, Call::Focus(_))));
    }

    #[test]
    fn workspace_new_then_delete() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let k0 = wm.state.inst.workspace_on(0);

        dispatch(&Action::WorkspaceNew, k0, &mut wm.state, &conn).unwrap();
        let k1 = wm.state.inst.workspace_on(0);
        assert_ne!(k0, k1);
        assert_eq!(wm.state.inst.workspaces().count(), 2);

        dispatch(&Action::WorkspaceDelete, k1, &mut wm.state, &conn).unwrap();
        assert_eq!(wm.state.inst.workspace_on(0), k0);
        assert_eq!(wm.state.inst.workspaces().count(), 1);
    }

    #[test]
    fn window_delete_requires_protocol_support() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        conn.set_prop(
            Xid(20),
            "WM_PROTOCOLS",
            crate::x::Prop::Atom(vec!["WM_DELETE_WINDOW".to_owned()]),
        );
        managed(&mut wm, &conn, &[10, 20]);
        let k = wm.state.inst.workspace_on(0);
        conn.take_calls();

        for id in [10, 20] {
            let w = wm.state.inst.find_window(Xid(id)).unwrap();
            let f = wm.state.inst.windows[w].frame.unwrap();
            wm.state.inst.workspaces[k].focused_frame = f;
            dispatch(&Action::WindowDelete, k, &mut wm.state, &conn).unwrap();
        }

        let msgs: Vec<Call> = conn
            .take_calls()
            .into_iter()
            .filter(|c| matches!(c, Call::ClientMessage(_)))
            .collect();
        assert_eq!(
            msgs,
            vec![Call::ClientMessage(ClientMessage::new(
                Xid(20),
                Atom::WmDeleteWindow,
                0
            ))]
        );
    }

    #[test]
    fn synthetic_keys_add_shift_when_needed() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        managed(&mut wm, &conn, &[10]);
        let k = wm.state.inst.workspace_on(0);
        wm.state.keymap.set(20, KeySym::from('='), KeySym::from('+'));
        conn.take_calls();

        let input = SyntheticInput::Key(KeySym::from('+'));
        dispatch(&Action::Synthetic(input), k, &mut wm.state, &conn).unwrap();

        match conn.take_calls().as_slice() {
            [Call::Synthetic(ev)] => {
                assert_eq!(ev.id, Xid(10));
                assert_eq!(ev.input, RawInput::Key(20));
                assert!(ev.state.contains(ModMask::SHIFT));
            }
            calls => panic!("unexpected calls: {calls:?}"),
        }
    }

    #[test]
    fn unknown_programs_have_no_actions() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        managed(&mut wm, &conn, &[10]);
        let k = wm.state.inst.workspace_on(0);

        let pulse = dispatch(&Action::Program(ProgramAction::Copy), k, &mut wm.state, &conn);

        assert!(!pulse.unwrap());
    }

    #[test]
    fn quit_with_nothing_to_close_exits_on_confirmation() {
        let (mut wm, conn) = test_wm(vec![Rect::new(0, 0, 800, 600)]);
        let k = wm.state.inst.workspace_on(0);

        assert!(dispatch(&Action::Quit, k, &mut wm.state, &conn).unwrap());
        assert!(!wm.state.exit);
        assert!(dispatch(&Action::Quit, k, &mut wm.state, &conn).unwrap());
        assert!(wm.state.exit);
    }
}
