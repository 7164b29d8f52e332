//! The linked entity model: displays, workspaces, frames and windows.
//!
//! Every entity lives in an arena owned by the [Installation] and refers to the others
//! by key. Workspaces form one global ring anchored on a dummy workspace and each
//! workspace owns a ring of windows anchored on its own dummy window.
use crate::{
    pure::{
        geometry::{Point, Rect},
        ring::{self, Linked, Links, RingIter},
        ListEntry, Listing, Orientation, Traversal,
    },
    Error, Result, Xid,
};
use bitflags::bitflags;
use slotmap::{new_key_type, SlotMap};
use tracing::debug;

new_key_type! {
    /// A handle on a [Workspace] held by an [Installation]
    pub struct WorkspaceId;
    /// A handle on a [Frame] held by an [Installation]
    pub struct FrameId;
    /// A handle on a [Window] held by an [Installation]
    pub struct WindowId;
}

bitflags! {
    /// The subset of WM_PROTOCOLS that a client supports and we care about.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Protocols: u8 {
        /// The client can be asked to close gracefully
        const DELETE_WINDOW = 0b01;
        /// The client wants to be told when it gains input focus
        const TAKE_FOCUS    = 0b10;
    }
}

/// A physical monitor region showing exactly one workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Display {
    /// The workspace currently shown on this display
    pub workspace: WorkspaceId,
    /// The region of the root window covered by this display
    pub r: Rect,
}

/// A complete frame tree along with its own ring of windows.
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    pub(crate) links: Links<WorkspaceId>,
    /// The index of the display showing this workspace, `None` when hidden
    pub display: Option<usize>,
    /// The permanent root of the frame tree
    pub main_frame: FrameId,
    /// The leaf frame holding focus within this workspace
    pub focused_frame: FrameId,
    /// The sentinel anchoring the window ring
    pub dummy_window: WindowId,
    /// Whether the focused frame's window is covering the whole display
    pub fullscreen: bool,
    /// The list overlay currently shown
    pub listing: Listing,
    /// The entries of the list overlay
    pub list: Vec<ListEntry>,
    /// The list entry under the pointer
    pub index: Option<usize>,
}

impl Linked<WorkspaceId> for Workspace {
    fn links(&self) -> &Links<WorkspaceId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<WorkspaceId> {
        &mut self.links
    }
}

/// A node in a frame tree.
///
/// Leaves hold at most one window, split frames always have at least two children.
#[derive(Debug, Default, Clone)]
pub struct Frame {
    /// `None` for the main frame of a workspace
    pub parent: Option<FrameId>,
    /// The preceding child of our parent
    pub prev_sibling: Option<FrameId>,
    /// The following child of our parent
    pub next_sibling: Option<FrameId>,
    /// Our first child if we are a split frame
    pub first_child: Option<FrameId>,
    /// Our last child if we are a split frame
    pub last_child: Option<FrameId>,
    /// The axis our children are laid out along: `None` for leaves
    pub orientation: Option<Orientation>,
    /// The workspace owning the tree this frame belongs to
    pub workspace: WorkspaceId,
    /// The window occupying this frame
    pub window: Option<WindowId>,
    /// The region assigned to this frame by the last layout
    pub r: Rect,
}

impl Frame {
    /// Whether or not this frame has no children.
    pub fn is_leaf(&self) -> bool {
        self.first_child.is_none()
    }
}

/// A managed client window.
#[derive(Debug, Default, Clone)]
pub struct Window {
    pub(crate) links: Links<WindowId>,
    /// The workspace whose ring this window belongs to
    pub workspace: WorkspaceId,
    /// The frame currently showing this window, `None` when hidden
    pub frame: Option<FrameId>,
    /// The window this one declared itself transient for
    pub transient_for: Option<WindowId>,
    /// The X ID of the client
    pub id: Xid,
    /// The last rect this window was placed at
    pub r: Rect,
    /// The title shown in list overlays
    pub name: String,
    /// Stamped each time the window is parked off screen
    pub park_seq: u32,
    /// Whether other windows are transient for this one
    pub has_transients: bool,
    /// Whether this window has ever been placed on screen
    pub seen: bool,
    /// Whether this window has ever been placed at all
    pub placed: bool,
    /// Marked for migration
    pub selected: bool,
    /// The WM_PROTOCOLS this client supports
    pub protocols: Protocols,
}

impl Linked<WindowId> for Window {
    fn links(&self) -> &Links<WindowId> {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links<WindowId> {
        &mut self.links
    }
}

/// The complete pure state of the window manager.
#[derive(Debug)]
pub struct Installation {
    /// Every workspace, including the dummy anchoring the workspace ring
    pub workspaces: SlotMap<WorkspaceId, Workspace>,
    /// Every frame of every workspace
    pub frames: SlotMap<FrameId, Frame>,
    /// Every window, including the dummy window of each workspace
    pub windows: SlotMap<WindowId, Window>,
    /// The physical displays in the order the X server reported them
    pub displays: Vec<Display>,
    /// The sentinel of the workspace ring
    pub dummy_workspace: WorkspaceId,
    next_park_seq: u32,
}

impl Installation {
    /// Create a new Installation with one workspace per screen.
    pub fn new(screens: &[Rect]) -> Result<Self> {
        if screens.is_empty() {
            return Err(Error::NoScreens);
        }

        let mut workspaces = SlotMap::with_key();
        let dummy_workspace = workspaces.insert_with_key(|k| Workspace {
            links: Links::looped(k),
            ..Default::default()
        });

        let mut inst = Self {
            workspaces,
            frames: SlotMap::with_key(),
            windows: SlotMap::with_key(),
            displays: Vec::with_capacity(screens.len()),
            dummy_workspace,
            next_park_seq: 1,
        };

        for (i, &r) in screens.iter().enumerate() {
            let last = ring::step(&inst.workspaces, dummy_workspace, Traversal::Prev);
            let k = inst.new_workspace(r, last);
            inst.workspaces[k].display = Some(i);
            inst.displays.push(Display { workspace: k, r });
        }

        Ok(inst)
    }

    /// Create a new workspace occupying `r`, linked into the workspace ring after `after`.
    ///
    /// New workspaces start with their main frame split horizontally into two leaves.
    pub fn new_workspace(&mut self, r: Rect, after: WorkspaceId) -> WorkspaceId {
        let k = self.workspaces.insert_with_key(|k| Workspace {
            links: Links::looped(k),
            ..Default::default()
        });
        let main = self.frames.insert(Frame {
            workspace: k,
            r,
            ..Default::default()
        });
        let dummy = self.windows.insert_with_key(|w| Window {
            links: Links::looped(w),
            workspace: k,
            ..Default::default()
        });

        let ws = &mut self.workspaces[k];
        ws.main_frame = main;
        ws.focused_frame = main;
        ws.dummy_window = dummy;

        ring::insert_after(&mut self.workspaces, k, after);
        self.split(main, Orientation::Horizontal);
        debug!(?k, ?r, "created new workspace");

        k
    }

    /// The workspaces in ring order.
    pub fn workspaces(&self) -> RingIter<'_, WorkspaceId, Workspace> {
        ring::iter(&self.workspaces, self.dummy_workspace)
    }

    /// The windows of workspace `k` in ring order.
    pub fn windows_of(&self, k: WorkspaceId) -> RingIter<'_, WindowId, Window> {
        ring::iter(&self.windows, self.workspaces[k].dummy_window)
    }

    /// Every managed window across all workspaces, in ring order.
    pub fn all_windows(&self) -> impl Iterator<Item = WindowId> + '_ {
        self.workspaces().flat_map(move |k| self.windows_of(k))
    }

    /// Look up the managed window for a given X client.
    pub fn find_window(&self, id: Xid) -> Option<WindowId> {
        self.all_windows().find(|&w| self.windows[w].id == id)
    }

    /// The workspace currently shown on display `s`.
    pub fn workspace_on(&self, s: usize) -> WorkspaceId {
        self.displays[s].workspace
    }

    /// The index of the display containing `p`, falling back to the first display.
    pub fn display_containing(&self, p: Point) -> usize {
        self.displays
            .iter()
            .position(|d| d.r.contains_point(p))
            .unwrap_or(0)
    }

    /// The focused frame of workspace `k`.
    pub fn focused_frame(&self, k: WorkspaceId) -> FrameId {
        self.workspaces[k].focused_frame
    }

    /// The window in the focused frame of workspace `k`.
    pub fn focused_window(&self, k: WorkspaceId) -> Option<WindowId> {
        self.frames[self.focused_frame(k)].window
    }

    /// Take the next sequence number for a window being parked off screen.
    pub fn next_park_seq(&mut self) -> u32 {
        let seq = self.next_park_seq;
        self.next_park_seq += 1;

        seq
    }

    /// Create a new hidden window in the ring of workspace `k`, directly after `after`.
    pub fn new_window(
        &mut self,
        k: WorkspaceId,
        id: Xid,
        protocols: Protocols,
        transient_for: Option<WindowId>,
        after: WindowId,
    ) -> WindowId {
        let w = self.windows.insert_with_key(|w| Window {
            links: Links::looped(w),
            workspace: k,
            transient_for,
            id,
            r: Rect::offscreen(1, 1),
            protocols,
            ..Default::default()
        });
        ring::insert_after(&mut self.windows, w, after);
        if let Some(t) = transient_for {
            self.windows[t].has_transients = true;
        }

        w
    }

    /// Destroy a window, dropping any transient-for references to it and removing it
    /// from its frame and ring.
    pub fn remove_window(&mut self, w: WindowId) {
        if self.windows[w].has_transients {
            let dependants: Vec<WindowId> = self
                .all_windows()
                .filter(|&w1| self.windows[w1].transient_for == Some(w))
                .collect();
            for w1 in dependants {
                self.windows[w1].transient_for = None;
            }
        }

        self.detach(w);
        ring::splice_out(&mut self.windows, w);
        self.windows.remove(w);
    }

    /// Show window `w` in frame `f`.
    ///
    /// Any window already in `f` is left hidden and `w` is taken out of its previous frame.
    pub fn attach(&mut self, f: FrameId, w: WindowId) {
        if let Some(w0) = self.frames[f].window {
            self.windows[w0].frame = None;
        }
        self.detach(w);
        self.frames[f].window = Some(w);
        self.windows[w].frame = Some(f);
    }

    /// Hide window `w`, leaving its frame empty.
    pub fn detach(&mut self, w: WindowId) {
        if let Some(f) = self.windows[w].frame.take() {
            self.frames[f].window = None;
        }
    }

    /// Move window `w` to the ring of workspace `k`, directly after `after`.
    pub fn move_window(&mut self, w: WindowId, k: WorkspaceId, after: WindowId) {
        ring::splice_out(&mut self.windows, w);
        ring::insert_after(&mut self.windows, w, after);
        self.windows[w].workspace = k;
    }

    /// Re-run the layout of workspace `k` against the display showing it, or against an off
    /// screen region if it is hidden.
    pub fn layout_workspace(&mut self, k: WorkspaceId) {
        let ws = &self.workspaces[k];
        let r = match ws.display {
            Some(s) => self.displays[s].r,
            None => Rect::offscreen(256, 256),
        };
        let main = ws.main_frame;
        self.frames[main].r = r;
        self.layout(main);
    }

    /// The first workspace in direction `t` from `k0` that is not shown on any display.
    pub fn hidden_workspace_from(&self, k0: WorkspaceId, t: Traversal) -> Option<WorkspaceId> {
        let mut k1 = k0;
        loop {
            k1 = ring::step(&self.workspaces, k1, t);
            if k1 == k0 {
                return None;
            }
            if k1 != self.dummy_workspace && self.workspaces[k1].display.is_none() {
                return Some(k1);
            }
        }
    }

    /// Replace `k0` with `k1` on display `s0`.
    ///
    /// If `k1` was shown on another display then `k0` takes its place there. Returns the
    /// display `k1` was previously shown on.
    pub fn change_workspace(
        &mut self,
        s0: usize,
        k0: WorkspaceId,
        k1: WorkspaceId,
    ) -> Option<usize> {
        let ws0 = &mut self.workspaces[k0];
        ws0.listing = Listing::None;
        ws0.list.clear();
        ws0.index = None;

        let s1 = self.workspaces[k1].display;
        if k0 != k1 {
            if let Some(s1) = s1 {
                self.displays[s1].workspace = k0;
            }
            self.workspaces[k0].display = s1;
            self.displays[s0].workspace = k1;
            self.workspaces[k1].display = Some(s0);
        }

        self.layout_workspace(k1);
        self.layout_workspace(k0);
        debug!(?k0, ?k1, s0, ?s1, "changed workspace");

        s1
    }

    /// Delete the displayed workspace `k0`, handing its display to the next hidden
    /// workspace.
    ///
    /// Workspaces that still hold windows are never deleted and there must be a hidden
    /// workspace available to take over the display: otherwise this is a no-op returning
    /// `None`.
    pub fn delete_workspace(&mut self, k0: WorkspaceId) -> Option<WorkspaceId> {
        if !ring::is_empty(&self.windows, self.workspaces[k0].dummy_window) {
            return None;
        }
        let s = self.workspaces[k0].display?;
        let k1 = self.hidden_workspace_from(k0, Traversal::Next)?;

        ring::splice_out(&mut self.workspaces, k0);
        self.displays[s].workspace = k1;
        self.workspaces[k1].display = Some(s);

        let ws = self.workspaces.remove(k0)?;
        self.remove_subtree(ws.main_frame);
        self.windows.remove(ws.dummy_window);
        self.layout_workspace(k1);
        debug!(?k0, ?k1, s, "deleted workspace");

        Some(k1)
    }

    /// The rect window `w` should currently occupy given the state of its workspace.
    ///
    /// Hidden windows and windows covered by a list overlay are parked off screen.
    pub fn desired_rect(&self, w: WindowId, border: u32) -> Rect {
        let win = &self.windows[w];
        let parked = Rect::offscreen(win.r.w, win.r.h);

        let f = match win.frame {
            Some(f) => f,
            None => return parked,
        };
        let k = self.frames[f].workspace;
        let ws = &self.workspaces[k];
        if ws.display.is_none() {
            return parked;
        }

        let focused = ws.focused_frame == f;
        match ws.listing {
            Listing::Workspaces => parked,
            Listing::Windows if focused => parked,
            _ if ws.fullscreen && focused => self.frames[ws.main_frame].r,
            _ if ws.fullscreen => parked,
            _ => self.frames[f].r.shrink_in(border),
        }
    }

    /// Choose the window that should take over the frame of `w` when `w` goes away.
    ///
    /// A hidden transient-for parent wins, otherwise the most recently parked window that
    /// is not already visible.
    pub fn replacement_for(&self, w: WindowId) -> Option<WindowId> {
        let win = &self.windows[w];
        let f = win.frame?;

        if let Some(t) = win.transient_for {
            if self.windows[t].frame.is_none() {
                return Some(t);
            }
        }

        let ws = &self.workspaces[self.frames[f].workspace];
        self.windows_of(win.workspace)
            .filter(|&w1| w1 != w)
            .filter(|&w1| {
                let frame = self.windows[w1].frame;
                if ws.fullscreen {
                    frame != Some(ws.focused_frame)
                } else {
                    frame.is_none()
                }
            })
            .filter(|&w1| self.windows[w1].park_seq > 0)
            .max_by_key(|&w1| self.windows[w1].park_seq)
    }

    /// The entries of a window list for workspace `k`.
    pub fn window_list(&self, k: WorkspaceId) -> Vec<ListEntry> {
        self.windows_of(k).map(ListEntry::Window).collect()
    }

    /// The entries of a workspace list: each workspace followed by its windows.
    pub fn workspace_list(&self) -> Vec<ListEntry> {
        self.workspaces()
            .flat_map(|k| std::iter::once(ListEntry::Workspace(k)).chain(self.window_list(k)))
            .collect()
    }

    /// The region a list overlay for workspace `k` is drawn within.
    pub fn list_rect(&self, k: WorkspaceId) -> Rect {
        let ws = &self.workspaces[k];
        if ws.fullscreen || ws.listing == Listing::Workspaces {
            self.frames[ws.main_frame].r
        } else {
            self.frames[ws.focused_frame].r
        }
    }

    /// The index of the list entry of workspace `k` under `p`.
    ///
    /// The first line of the overlay is a header. For workspace lists the index always
    /// snaps up to the workspace owning the hovered line.
    pub fn index_for_point(&self, k: WorkspaceId, p: Point, line_height: u32) -> Option<usize> {
        let ws = &self.workspaces[k];
        let r = self.list_rect(k);
        let (x, y) = (p.x as i64 - r.x as i64, p.y as i64 - r.y as i64);
        if x <= 0 || r.w as i64 <= x || y <= 0 || r.h as i64 <= y {
            return None;
        }

        let i: usize = (y / line_height.max(1) as i64 - 1).try_into().ok()?;
        if i >= ws.list.len() {
            return None;
        }

        if ws.listing == Listing::Workspaces {
            return ws.list[..=i]
                .iter()
                .rposition(|e| matches!(e, ListEntry::Workspace(_)));
        }

        Some(i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simple_test_case::test_case;

    fn one_display(w: u32, h: u32) -> Installation {
        Installation::new(&[Rect::new(0, 0, w, h)]).unwrap()
    }

    fn add_windows(inst: &mut Installation, k: WorkspaceId, n: u32) -> Vec<WindowId> {
        (1..=n)
            .map(|id| {
                let dummy = inst.workspaces[k].dummy_window;
                let last = ring::step(&inst.windows, dummy, Traversal::Prev);
                inst.new_window(k, Xid(id), Protocols::empty(), None, last)
            })
            .collect()
    }

    #[test]
    fn no_screens_is_an_error() {
        assert!(matches!(Installation::new(&[]), Err(Error::NoScreens)));
    }

    #[test]
    fn each_screen_gets_a_workspace() {
        let screens = [Rect::new(0, 0, 800, 600), Rect::new(800, 0, 1024, 768)];
        let inst = Installation::new(&screens).unwrap();
        let ks: Vec<_> = inst.workspaces().collect();

        assert_eq!(ks.len(), 2);
        for (i, k) in ks.into_iter().enumerate() {
            assert_eq!(inst.workspaces[k].display, Some(i));
            assert_eq!(inst.displays[i].workspace, k);
        }
    }

    #[test]
    fn new_workspace_has_an_empty_window_ring() {
        let inst = one_display(800, 600);
        let k = inst.workspace_on(0);

        assert_eq!(inst.windows_of(k).count(), 0);
    }

    #[test_case(Point::new(10, 10), 0; "first display")]
    #[test_case(Point::new(900, 10), 1; "second display")]
    #[test_case(Point::new(-10, -10), 0; "nowhere falls back to first")]
    #[test]
    fn display_containing(p: Point, expected: usize) {
        let screens = [Rect::new(0, 0, 800, 600), Rect::new(800, 0, 1024, 768)];
        let inst = Installation::new(&screens).unwrap();

        assert_eq!(inst.display_containing(p), expected);
    }

    #[test]
    fn attach_and_detach_keep_back_references_consistent() {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let ws = add_windows(&mut inst, k, 2);
        let f = inst.focused_frame(k);

        inst.attach(f, ws[0]);
        assert_eq!(inst.frames[f].window, Some(ws[0]));
        assert_eq!(inst.windows[ws[0]].frame, Some(f));

        inst.attach(f, ws[1]);
        assert_eq!(inst.frames[f].window, Some(ws[1]));
        assert_eq!(inst.windows[ws[0]].frame, None);

        inst.detach(ws[1]);
        assert_eq!(inst.frames[f].window, None);
        assert_eq!(inst.windows[ws[1]].frame, None);
    }

    #[test]
    fn remove_window_clears_transient_references() {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let parent = add_windows(&mut inst, k, 1)[0];
        let child = inst.new_window(k, Xid(42), Protocols::empty(), Some(parent), parent);

        assert!(inst.windows[parent].has_transients);
        inst.remove_window(parent);

        assert_eq!(inst.windows[child].transient_for, None);
        assert_eq!(inst.windows_of(k).collect::<Vec<_>>(), vec![child]);
    }

    #[test]
    fn hidden_windows_are_parked() {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let w = add_windows(&mut inst, k, 1)[0];

        assert!(inst.desired_rect(w, 2).is_offscreen());
    }

    #[test]
    fn framed_windows_are_inset() {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let w = add_windows(&mut inst, k, 1)[0];
        let f = inst.focused_frame(k);
        inst.attach(f, w);

        let fr = inst.frames[f].r;
        assert_eq!(inst.desired_rect(w, 2), fr.shrink_in(2));
    }

    #[test_case(true, false, false; "fullscreen focused window covers the display")]
    #[test_case(false, true, true; "window list parks the focused window")]
    #[test]
    fn overlay_and_fullscreen_placement(fullscreen: bool, listing: bool, parked: bool) {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let w = add_windows(&mut inst, k, 1)[0];
        let f = inst.focused_frame(k);
        inst.attach(f, w);
        inst.workspaces[k].fullscreen = fullscreen;
        if listing {
            inst.workspaces[k].listing = Listing::Windows;
        }

        let r = inst.desired_rect(w, 2);
        assert_eq!(r.is_offscreen(), parked);
        if fullscreen {
            assert_eq!(r, Rect::new(0, 0, 800, 600));
        }
    }

    #[test]
    fn replacement_is_the_most_recently_parked_window() {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let ws = add_windows(&mut inst, k, 3);
        let f = inst.focused_frame(k);
        inst.attach(f, ws[0]);
        inst.windows[ws[1]].park_seq = inst.next_park_seq();
        inst.windows[ws[2]].park_seq = inst.next_park_seq();

        assert_eq!(inst.replacement_for(ws[0]), Some(ws[2]));
    }

    #[test]
    fn hidden_transient_parent_is_preferred_as_replacement() {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        let ws = add_windows(&mut inst, k, 2);
        let child = inst.new_window(k, Xid(42), Protocols::empty(), Some(ws[0]), ws[0]);
        let f = inst.focused_frame(k);
        inst.attach(f, child);
        inst.windows[ws[0]].park_seq = inst.next_park_seq();
        inst.windows[ws[1]].park_seq = inst.next_park_seq();

        assert_eq!(inst.replacement_for(child), Some(ws[0]));
    }

    #[test]
    fn delete_workspace_requires_it_to_be_empty_and_a_hidden_alternative() {
        let mut inst = one_display(800, 600);
        let k0 = inst.workspace_on(0);
        assert_eq!(inst.delete_workspace(k0), None);

        let k1 = inst.new_workspace(Rect::new(0, 0, 800, 600), k0);
        let w = add_windows(&mut inst, k0, 1)[0];
        assert_eq!(inst.delete_workspace(k0), None);

        inst.remove_window(w);
        assert_eq!(inst.delete_workspace(k0), Some(k1));
        assert_eq!(inst.workspace_on(0), k1);
        assert_eq!(inst.workspaces().collect::<Vec<_>>(), vec![k1]);
        assert!(inst.frames.values().all(|f| f.workspace == k1));
    }

    #[test]
    fn change_workspace_swaps_displays() {
        let screens = [Rect::new(0, 0, 800, 600), Rect::new(800, 0, 800, 600)];
        let mut inst = Installation::new(&screens).unwrap();
        let (k0, k1) = (inst.workspace_on(0), inst.workspace_on(1));

        let s1 = inst.change_workspace(0, k0, k1);

        assert_eq!(s1, Some(1));
        assert_eq!(inst.workspace_on(0), k1);
        assert_eq!(inst.workspace_on(1), k0);
        assert_eq!(inst.frames[inst.workspaces[k1].main_frame].r.x, 0);
        assert_eq!(inst.frames[inst.workspaces[k0].main_frame].r.x, 800);
    }

    #[test_case(Listing::Windows, Point::new(5, 40), Some(1); "second window")]
    #[test_case(Listing::Windows, Point::new(5, 8), None; "header")]
    #[test_case(Listing::Windows, Point::new(5, 500), None; "past the end")]
    #[test_case(Listing::Workspaces, Point::new(5, 56), Some(0); "snaps to workspace")]
    #[test]
    fn index_for_point(listing: Listing, p: Point, expected: Option<usize>) {
        let mut inst = one_display(800, 600);
        let k = inst.workspace_on(0);
        add_windows(&mut inst, k, 3);
        inst.workspaces[k].listing = listing;
        inst.workspaces[k].list = match listing {
            Listing::Windows => inst.window_list(k),
            _ => inst.workspace_list(),
        };

        assert_eq!(inst.index_for_point(k, p, 16), expected);
    }
}
