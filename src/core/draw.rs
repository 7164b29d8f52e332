//! Drawing frame borders and list overlays on the desktop window.
use crate::{
    core::{pulse::BorderColors, State},
    pure::{
        geometry::Point,
        model::{FrameId, WorkspaceId},
        ListEntry, Listing,
    },
    x::XConn,
    Color, Result,
};

/// Outline a single frame.
pub(crate) fn draw_border<X: XConn>(
    f: FrameId,
    color: Color,
    state: &State,
    x: &X,
) -> Result<()> {
    x.draw_rects(color, &[state.inst.frames[f].r])
}

/// Outline every leaf frame of workspace `k`, highlighting the focused frame.
pub(crate) fn draw_frame_borders<X: XConn>(
    k: WorkspaceId,
    colors: BorderColors,
    state: &State,
    x: &X,
) -> Result<()> {
    let ws = &state.inst.workspaces[k];
    if ws.fullscreen || ws.listing == Listing::Workspaces {
        return Ok(());
    }

    let rects: Vec<_> = state
        .inst
        .leaves(ws.main_frame)
        .into_iter()
        .map(|f| state.inst.frames[f].r)
        .collect();
    x.draw_rects(colors.unfocused, &rects)?;

    draw_border(ws.focused_frame, colors.focused, state, x)
}

/// Draw the list overlay of workspace `k` if it has one.
pub(crate) fn draw_list<X: XConn>(k: WorkspaceId, state: &State, x: &X) -> Result<()> {
    let ws = &state.inst.workspaces[k];
    let header = match ws.listing {
        Listing::None => return Ok(()),
        Listing::Windows => format!("workspace {}", workspace_number(k, state)),
        Listing::Workspaces => "workspaces".to_owned(),
    };

    let r = state.inst.list_rect(k);
    let font = state.config.font;
    let color = state.config.pulse_colors.focused;
    let text_x = r.x + 3 * font.width;

    x.set_clip(Some(r))?;
    x.draw_text(color, Point::new(text_x, r.y + font.first_line), &header)?;
    for (i, &entry) in ws.list.iter().enumerate() {
        let y = r.y + font.first_line + (i as i32 + 1) * font.height;
        x.draw_text(color, Point::new(text_x, y), &list_line(entry, state))?;
    }
    if let Some(i) = ws.index {
        x.draw_text(color, marker_position(k, i, state), ">")?;
    }

    x.set_clip(None)
}

/// Move the `>` marker of the list overlay of workspace `k` from line `old` to line `new`.
pub(crate) fn move_marker<X: XConn>(
    k: WorkspaceId,
    old: Option<usize>,
    new: Option<usize>,
    state: &State,
    x: &X,
) -> Result<()> {
    let color = state.config.pulse_colors.focused;
    x.set_clip(Some(state.inst.list_rect(k)))?;
    if let Some(i) = old {
        x.draw_text(color, marker_position(k, i, state), " ")?;
    }
    if let Some(i) = new {
        x.draw_text(color, marker_position(k, i, state), ">")?;
    }

    x.set_clip(None)
}

/// Redraw everything shown on display `s`.
pub(crate) fn redraw_display<X: XConn>(s: usize, state: &State, x: &X) -> Result<()> {
    let k = state.inst.workspace_on(s);
    draw_frame_borders(k, state.border_colors(), state, x)?;

    draw_list(k, state, x)
}

fn marker_position(k: WorkspaceId, i: usize, state: &State) -> Point {
    let r = state.inst.list_rect(k);
    let font = state.config.font;

    Point::new(
        r.x + font.width,
        r.y + font.first_line + (i as i32 + 1) * font.height,
    )
}

// 1-based position of `k` in the workspace ring
fn workspace_number(k: WorkspaceId, state: &State) -> usize {
    state
        .inst
        .workspaces()
        .position(|k1| k1 == k)
        .map(|i| i + 1)
        .unwrap_or(0)
}

fn list_line(entry: ListEntry, state: &State) -> String {
    match entry {
        ListEntry::Workspace(k) => {
            let n = workspace_number(k, state);
            match state.inst.workspaces[k].display {
                Some(s) => format!("workspace {n} (screen {})", s + 1),
                None => format!("workspace {n}"),
            }
        }

        ListEntry::Window(w) => {
            let win = &state.inst.windows[w];
            let focused = state.inst.focused_frame(win.workspace);
            let status = match win.frame {
                Some(f) if f == focused => '+',
                Some(_) => '-',
                None if !win.seen => '@',
                None => ' ',
            };
            let selected = if win.selected { '#' } else { ' ' };
            let indent = match state.inst.workspaces[win.workspace].listing {
                Listing::Workspaces => "  ",
                _ => "",
            };

            format!("{indent}{status}{selected} {}", win.name)
        }
    }
}
