//! Cross workspace selection of windows and migrating the selection.
use crate::pure::{
    model::{Installation, WindowId, WorkspaceId},
    ring,
    Traversal,
};
use tracing::debug;

impl Installation {
    /// Toggle the selection of the window in the focused frame of workspace `k`.
    pub fn toggle_selected(&mut self, k: WorkspaceId) {
        if let Some(w) = self.focused_window(k) {
            let win = &mut self.windows[w];
            win.selected = !win.selected;
        }
    }

    /// Select every window of workspace `k`, or deselect them all if they are all
    /// already selected.
    pub fn toggle_select_all(&mut self, k: WorkspaceId) {
        let ws: Vec<WindowId> = self.windows_of(k).collect();
        let all_selected = ws.iter().all(|&w| self.windows[w].selected);
        for w in ws {
            self.windows[w].selected = !all_selected;
        }
    }

    /// Move every selected window from other workspaces into the ring of workspace `k`.
    ///
    /// Migrants are inserted after the window in the focused frame (or at the end of the
    /// ring) keeping their relative order. Each migrant is shown in the focused frame if
    /// it is empty, otherwise in the first empty leaf, otherwise it stays hidden. All
    /// selections are cleared.
    ///
    /// Returns the displayed workspaces that were left fullscreen with nothing to show:
    /// hidden workspaces in that state simply have their fullscreen flag cleared.
    pub fn migrate_selected(&mut self, k: WorkspaceId) -> Vec<WorkspaceId> {
        let dummy = self.workspaces[k].dummy_window;
        let mut previous = self
            .focused_window(k)
            .unwrap_or_else(|| ring::step(&self.windows, dummy, Traversal::Prev));

        let mut exit_fullscreen = Vec::new();
        let sources: Vec<WorkspaceId> = self.workspaces().collect();

        for k0 in sources {
            let selected: Vec<WindowId> = self
                .windows_of(k0)
                .filter(|&w| self.windows[w].selected)
                .collect();

            for w in selected {
                self.windows[w].selected = false;
                if k0 == k {
                    continue;
                }

                self.detach(w);
                self.move_window(w, k, previous);
                previous = w;

                let focused = self.focused_frame(k);
                let target = if self.frames[focused].window.is_none() {
                    Some(focused)
                } else {
                    self.first_empty_frame(self.workspaces[k].main_frame)
                };
                if let Some(f) = target {
                    self.attach(f, w);
                }
                debug!(?w, ?k0, ?k, "migrated window");
            }

            let ws = &mut self.workspaces[k0];
            if ws.fullscreen && self.frames[ws.focused_frame].window.is_none() {
                if ws.display.is_some() {
                    exit_fullscreen.push(k0);
                } else {
                    ws.fullscreen = false;
                }
            }
        }

        exit_fullscreen
    }
}
