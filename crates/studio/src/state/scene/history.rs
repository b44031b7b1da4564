//! Undo/redo functionality
//!
//! History entries are whole-registry snapshots. Restoring one replaces every view
//! at once, so structural edits, reorders and cross-view changes all unwind together.

use shared::ViewRegistry;

use super::SceneState;
use crate::error::{HistoryDirection, Result, StudioError};

/// Bounded undo/redo stacks of registry snapshots
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<ViewRegistry>,
    redo_stack: Vec<ViewRegistry>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

impl History {
    /// New history keeping at most `limit` undo entries (at least one)
    pub fn new(limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            limit: limit.max(1),
        }
    }

    fn push_undo(&mut self, snapshot: ViewRegistry) {
        self.undo_stack.push(snapshot);
        if self.undo_stack.len() > self.limit {
            self.undo_stack.remove(0);
        }
    }

    /// Record a snapshot and drop the redo branch
    pub fn record(&mut self, snapshot: ViewRegistry) {
        self.push_undo(snapshot);
        self.redo_stack.clear();
    }

    /// Pop the latest undo entry, parking `live` on the redo stack
    pub fn step_back(&mut self, live: &ViewRegistry) -> Option<ViewRegistry> {
        let prev = self.undo_stack.pop()?;
        self.redo_stack.push(live.clone());
        Some(prev)
    }

    /// Pop the latest redo entry, parking `live` on the undo stack
    pub fn step_forward(&mut self, live: &ViewRegistry) -> Option<ViewRegistry> {
        let next = self.redo_stack.pop()?;
        self.push_undo(live.clone());
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

impl SceneState {
    /// Snapshot the whole registry as an undo step; discards any redo history
    pub fn checkpoint(&mut self) {
        self.history.record(self.scene.clone());
        tracing::debug!(
            "Checkpoint recorded (undo depth {})",
            self.history.undo_depth()
        );
    }

    /// Run one user-perceived edit as a single undo step.
    ///
    /// The pre-edit registry is recorded only if the edit changed something, so no-op
    /// edits (missing id, boundary moves) leave history alone.
    pub fn edit<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let before = self.scene.clone();
        let out = f(self)?;
        self.record_if_changed(before);
        Ok(out)
    }

    /// Record `before` as an undo step if the live registry differs from it
    pub fn record_if_changed(&mut self, before: ViewRegistry) -> bool {
        if self.scene == before {
            return false;
        }
        self.history.record(before);
        tracing::debug!("Edit recorded (undo depth {})", self.history.undo_depth());
        true
    }

    /// Undo last change
    pub fn undo(&mut self) -> Result<()> {
        match self.history.step_back(&self.scene) {
            Some(prev) => {
                self.restore(prev);
                tracing::info!("Undo (remaining {})", self.history.undo_depth());
                Ok(())
            }
            None => {
                tracing::info!("Nothing to undo");
                Err(StudioError::HistoryEmpty(HistoryDirection::Undo))
            }
        }
    }

    /// Redo last undone change
    pub fn redo(&mut self) -> Result<()> {
        match self.history.step_forward(&self.scene) {
            Some(next) => {
                self.restore(next);
                tracing::info!("Redo (remaining {})", self.history.redo_depth());
                Ok(())
            }
            None => {
                tracing::info!("Nothing to redo");
                Err(StudioError::HistoryEmpty(HistoryDirection::Redo))
            }
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Drop both stacks
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn restore(&mut self, snapshot: ViewRegistry) {
        self.scene = snapshot;
        if self.scene.view(&self.current_view).is_none() {
            if let Some(first) = self.scene.keys().next() {
                self.current_view = first.to_string();
            }
        }
        self.version += 1;
    }
}
