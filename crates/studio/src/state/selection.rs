use shared::ObjectId;

/// Object selection state (at most one object, in the current view).
///
/// Lock checks are not done here; adapters consult `locked` before selecting.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<ObjectId>,
    /// Version counter for selection changes (for cache invalidation)
    pub version: u64,
}

impl SelectionState {
    /// Currently selected object
    pub fn selected(&self) -> Option<&ObjectId> {
        self.selected.as_ref()
    }

    /// Replace the selection unconditionally
    pub fn set_selected(&mut self, id: Option<ObjectId>) {
        if self.selected != id {
            self.selected = id;
            self.version += 1;
        }
    }

    /// Select a single object (replaces previous selection)
    pub fn select(&mut self, id: ObjectId) {
        self.set_selected(Some(id));
    }

    /// Clear selection
    pub fn clear(&mut self) {
        self.set_selected(None);
    }

    /// Check if an object is selected
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none()
    }
}
