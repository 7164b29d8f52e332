//! Frame tree operations: split, merge, proportional layout and cyclic traversal.
use crate::pure::{
    geometry::Point,
    model::{Frame, FrameId, Installation, WorkspaceId},
    Listing, Orientation, Traversal,
};
use tracing::{debug, trace};

impl Installation {
    /// The leftmost leaf of the subtree rooted at `f`.
    pub fn first_descendant(&self, mut f: FrameId) -> FrameId {
        while let Some(c) = self.frames[f].first_child {
            f = c;
        }

        f
    }

    /// The rightmost leaf of the subtree rooted at `f`.
    pub fn last_descendant(&self, mut f: FrameId) -> FrameId {
        while let Some(c) = self.frames[f].last_child {
            f = c;
        }

        f
    }

    /// The children of `f` in order.
    pub fn children(&self, f: FrameId) -> Vec<FrameId> {
        let mut children = Vec::new();
        let mut cur = self.frames[f].first_child;
        while let Some(c) = cur {
            children.push(c);
            cur = self.frames[c].next_sibling;
        }

        children
    }

    /// The leaves of the subtree rooted at `f` in document order.
    pub fn leaves(&self, f: FrameId) -> Vec<FrameId> {
        if self.frames[f].is_leaf() {
            return vec![f];
        }

        self.children(f)
            .into_iter()
            .flat_map(|c| self.leaves(c))
            .collect()
    }

    /// The first leaf of the subtree rooted at `f` that holds no window.
    pub fn first_empty_frame(&self, f: FrameId) -> Option<FrameId> {
        self.leaves(f)
            .into_iter()
            .find(|&l| self.frames[l].window.is_none())
    }

    /// The leaf of the subtree rooted at `f` containing `p`.
    pub fn frame_at(&self, f: FrameId, p: Point) -> Option<FrameId> {
        let frame = &self.frames[f];
        if !frame.r.contains_point(p) {
            return None;
        }
        if frame.is_leaf() {
            return Some(f);
        }

        self.children(f).into_iter().find_map(|c| self.frame_at(c, p))
    }

    /// The frame of workspace `k` that should take focus for a pointer at `p`.
    ///
    /// Fullscreen workspaces and workspace lists cover the whole display so the focused
    /// frame is retained.
    pub fn workspace_frame_at(&self, k: WorkspaceId, p: Point) -> Option<FrameId> {
        let ws = &self.workspaces[k];
        let focused = ws.focused_frame;
        if ws.fullscreen
            || ws.listing == Listing::Workspaces
            || self.frames[focused].r.contains_point(p)
        {
            return Some(focused);
        }

        self.frame_at(ws.main_frame, p)
    }

    /// Split frame `f` along orientation `o`, returning the new empty frame.
    ///
    /// If the parent of `f` is already split along `o` then a new sibling is added
    /// directly after `f`. Otherwise `f` becomes a split frame with two children, the
    /// first of which takes over any window held by `f`.
    pub fn split(&mut self, f: FrameId, o: Orientation) -> FrameId {
        let k = self.frames[f].workspace;
        let had_window = self.frames[f].window.is_some();

        if let Some(parent) = self.frames[f].parent {
            if self.frames[parent].orientation == Some(o) {
                let next = self.frames[f].next_sibling;
                let g = self.frames.insert(Frame {
                    parent: Some(parent),
                    prev_sibling: Some(f),
                    next_sibling: next,
                    workspace: k,
                    ..Default::default()
                });
                match next {
                    Some(n) => self.frames[n].prev_sibling = Some(g),
                    None => self.frames[parent].last_child = Some(g),
                }
                self.frames[f].next_sibling = Some(g);
                if had_window && self.workspaces[k].focused_frame == f {
                    self.workspaces[k].focused_frame = g;
                }
                self.layout(parent);
                debug!(?f, ?g, ?o, "added sibling frame");

                return g;
            }
        }

        let first = self.frames.insert(Frame {
            parent: Some(f),
            workspace: k,
            ..Default::default()
        });
        let last = self.frames.insert(Frame {
            parent: Some(f),
            prev_sibling: Some(first),
            workspace: k,
            ..Default::default()
        });
        self.frames[first].next_sibling = Some(last);

        let frame = &mut self.frames[f];
        frame.orientation = Some(o);
        frame.first_child = Some(first);
        frame.last_child = Some(last);
        let w = frame.window.take();

        if let Some(w) = w {
            self.frames[first].window = Some(w);
            self.windows[w].frame = Some(first);
        }
        if self.workspaces[k].focused_frame == f {
            self.workspaces[k].focused_frame = if had_window { last } else { first };
        }
        self.layout(f);
        debug!(?f, ?first, ?last, ?o, "split frame");

        last
    }

    /// Merge frame `f` away, hiding any window it held.
    ///
    /// Returns `false` if `f` is the main frame of its workspace. If only one sibling
    /// remains after removing `f` then that sibling is hoisted into the parent so that
    /// split frames always keep at least two children.
    pub fn merge(&mut self, f: FrameId) -> bool {
        let Frame {
            parent,
            prev_sibling,
            next_sibling,
            workspace: k,
            ..
        } = self.frames[f];

        let parent = match parent {
            Some(p) => p,
            None => return false,
        };

        let was_focused = self.workspaces[k].focused_frame == f;
        let mut focus = None;
        if let Some(p) = prev_sibling {
            self.frames[p].next_sibling = next_sibling;
            focus = Some(self.last_descendant(p));
        }
        if let Some(n) = next_sibling {
            self.frames[n].prev_sibling = prev_sibling;
            focus = Some(self.first_descendant(n));
        }
        if self.frames[parent].first_child == Some(f) {
            self.frames[parent].first_child = next_sibling;
        }
        if self.frames[parent].last_child == Some(f) {
            self.frames[parent].last_child = prev_sibling;
        }
        self.remove_subtree(f);

        if was_focused {
            if let Some(g) = focus {
                self.workspaces[k].focused_frame = g;
            }
        }

        if self.children(parent).len() == 1 {
            self.hoist(parent);
        }

        self.layout(parent);
        debug!(?f, ?parent, "merged frame");

        true
    }

    // Collapse the only child of `parent` into it.
    fn hoist(&mut self, parent: FrameId) {
        let sibling = match self.frames[parent].first_child {
            Some(s) => s,
            None => return,
        };
        let Frame {
            first_child,
            last_child,
            orientation,
            window,
            workspace: k,
            ..
        } = self.frames[sibling];

        let p = &mut self.frames[parent];
        p.first_child = first_child;
        p.last_child = last_child;
        p.orientation = orientation;
        for c in self.children(parent) {
            self.frames[c].parent = Some(parent);
        }
        if let Some(w) = window {
            self.frames[parent].window = Some(w);
            self.windows[w].frame = Some(parent);
        }
        if self.workspaces[k].focused_frame == sibling {
            self.workspaces[k].focused_frame = self.first_descendant(parent);
        }

        self.frames.remove(sibling);
        trace!(?parent, ?sibling, "hoisted frame");
    }

    /// Remove `f` and all of its descendants, hiding any windows they held.
    pub(crate) fn remove_subtree(&mut self, f: FrameId) {
        for c in self.children(f) {
            self.remove_subtree(c);
        }
        if let Some(frame) = self.frames.remove(f) {
            if let Some(w) = frame.window {
                if let Some(win) = self.windows.get_mut(w) {
                    win.frame = None;
                }
            }
        }
    }

    /// Assign rects to the descendants of `f` by dividing its rect equally between its
    /// children along its orientation.
    pub fn layout(&mut self, f: FrameId) {
        let o = match self.frames[f].orientation {
            Some(o) if !self.frames[f].is_leaf() => o,
            _ => return,
        };

        let r = self.frames[f].r;
        let children = self.children(f);
        let n = children.len() as u32;
        for (i, c) in children.into_iter().enumerate() {
            self.frames[c].r = r.nth_division(o, i as u32, n);
            self.layout(c);
        }
    }

    /// The next or previous leaf after `f` in a cyclic pre-order walk of its tree.
    ///
    /// The main frame traverses to itself.
    pub fn traverse(&self, f: FrameId, t: Traversal) -> FrameId {
        let frame = &self.frames[f];
        let parent = match frame.parent {
            Some(p) => p,
            None => return f,
        };

        match (t, frame.prev_sibling, frame.next_sibling) {
            (Traversal::Next, _, Some(n)) => return self.first_descendant(n),
            (Traversal::Prev, Some(p), _) => return self.last_descendant(p),
            _ => (),
        }

        let (mut cur, mut from) = (parent, f);
        loop {
            let fr = &self.frames[cur];
            let next = if fr.parent == Some(from) {
                let child = match t {
                    Traversal::Next => fr.first_child,
                    Traversal::Prev => fr.last_child,
                };
                match child {
                    Some(c) => c,
                    None => return cur,
                }
            } else if fr.first_child == Some(from) {
                fr.prev_sibling.or(fr.parent).or(fr.last_child).unwrap_or(cur)
            } else if fr.last_child == Some(from) {
                fr.next_sibling.or(fr.parent).or(fr.first_child).unwrap_or(cur)
            } else if fr.prev_sibling == Some(from) {
                return self.first_descendant(cur);
            } else if fr.next_sibling == Some(from) {
                return self.last_descendant(cur);
            } else {
                return cur;
            };

            from = cur;
            cur = next;
        }
    }
}
