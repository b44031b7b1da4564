//! Headless harness for programmatic scene manipulation.
//!
//! Drives a [`StudioState`] the way a scripted adapter would: every editing call
//! is one undo step, and operations address the current view unless a view key
//! is given.

use shared::{DesignObject, ObjectId, ObjectPatch, ViewRegistry};

use crate::error::Result;
use crate::interaction::{self, KeyAction};
use crate::state::{NodeTransform, StudioSettings, StudioState};

/// Headless harness owning one editing session
pub struct StudioHarness {
    pub state: StudioState,
}

impl StudioHarness {
    /// Create a new empty harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(StudioSettings::default())
    }

    pub fn with_settings(settings: StudioSettings) -> Self {
        Self {
            state: StudioState::new(settings),
        }
    }

    fn current_view(&self) -> String {
        self.state.scene.current_view().to_string()
    }

    fn resolve_view(&self, view: Option<&str>) -> String {
        view.map(str::to_string).unwrap_or_else(|| self.current_view())
    }

    // ── Scene manipulation ────────────────────────────────────

    /// Add an object to a view (current view if `None`) and return its ID
    pub fn add(&mut self, view: Option<&str>, object: DesignObject) -> Result<ObjectId> {
        let view = self.resolve_view(view);
        self.state.scene.edit(|s| s.add_object(&view, object))
    }

    /// Add an image to the current view
    pub fn add_image(&mut self, id: &str, x: f64, y: f64, w: f64, h: f64) -> ObjectId {
        let obj = DesignObject::image(id, &format!("{id}.png"), x, y, w, h);
        self.add(None, obj).unwrap_or_default()
    }

    /// Add a text object to the current view
    pub fn add_text(&mut self, id: &str, text: &str, x: f64, y: f64) -> ObjectId {
        self.add(None, DesignObject::text(id, text, x, y, 32.0))
            .unwrap_or_default()
    }

    pub fn update(&mut self, view: Option<&str>, id: &str, patch: &ObjectPatch) -> Result<bool> {
        let view = self.resolve_view(view);
        self.state.scene.edit(|s| s.update_object(&view, id, patch))
    }

    pub fn remove(&mut self, view: Option<&str>, id: &str) -> Result<bool> {
        let view = self.resolve_view(view);
        let removed = self.state.scene.edit(|s| s.remove_object(&view, id))?;
        if removed && self.state.selection.is_selected(id) {
            self.state.selection.clear();
        }
        Ok(removed)
    }

    pub fn duplicate(&mut self, view: Option<&str>, id: &str) -> Result<Option<ObjectId>> {
        let view = self.resolve_view(view);
        self.state.scene.edit(|s| s.duplicate_object(&view, id))
    }

    pub fn move_up(&mut self, view: Option<&str>, id: &str) -> Result<bool> {
        let view = self.resolve_view(view);
        self.state.scene.edit(|s| s.move_object_up(&view, id))
    }

    pub fn move_down(&mut self, view: Option<&str>, id: &str) -> Result<bool> {
        let view = self.resolve_view(view);
        self.state.scene.edit(|s| s.move_object_down(&view, id))
    }

    /// Commit a drag end on the current view
    pub fn drag_to(&mut self, id: &str, x: f64, y: f64) -> Result<bool> {
        let view = self.current_view();
        self.state.scene.edit(|s| s.commit_drag(&view, id, x, y))
    }

    /// Commit a transform end on the current view
    pub fn transform(&mut self, id: &str, node: &NodeTransform) -> Result<bool> {
        let view = self.current_view();
        self.state.scene.edit(|s| s.commit_transform(&view, id, node))
    }

    pub fn set_background(&mut self, view: Option<&str>, color: &str) -> Result<bool> {
        let view = self.resolve_view(view);
        self.state.scene.edit(|s| s.set_background_color(&view, color))
    }

    /// Load a scene (replaces current, drops history and selection)
    pub fn load_scene(&mut self, scene: ViewRegistry) -> Result<()> {
        self.state.scene.set_scene(scene)?;
        self.state.selection.clear();
        Ok(())
    }

    /// Load a scene from JSON string
    pub fn load_scene_json(&mut self, json: &str) -> std::result::Result<(), String> {
        let scene: ViewRegistry =
            serde_json::from_str(json).map_err(|e| format!("JSON parse error: {e}"))?;
        self.load_scene(scene).map_err(|e| e.to_string())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> String {
        serde_json::to_string_pretty(&self.state.scene.scene).unwrap_or_default()
    }

    /// Explicit checkpoint of the live registry
    pub fn checkpoint(&mut self) {
        self.state.scene.checkpoint();
    }

    /// Undo the last operation
    pub fn undo(&mut self) -> bool {
        self.state.scene.undo().is_ok()
    }

    /// Redo the last undone operation
    pub fn redo(&mut self) -> bool {
        self.state.scene.redo().is_ok()
    }

    /// Apply a resolved key action
    pub fn key(&mut self, action: KeyAction) -> Result<bool> {
        interaction::apply_key_action(&mut self.state, action)
    }

    // ── Views and selection ───────────────────────────────────

    pub fn switch_view(&mut self, view: &str) -> Result<()> {
        self.state.switch_view(view)
    }

    /// Select as the pointer would (refuses locked objects)
    pub fn click(&mut self, id: &str) -> bool {
        interaction::pointer_select(&mut self.state, id)
    }

    /// Select regardless of lock state; automation may bypass the pointer policy
    pub fn select(&mut self, id: &str) {
        self.state.selection.select(id.to_string());
    }

    /// Clear selection
    pub fn clear_selection(&mut self) {
        interaction::click_empty(&mut self.state);
    }

    // ── Inspection ────────────────────────────────────────────

    /// Objects of the current view
    pub fn objects(&self) -> &[DesignObject] {
        self.state.scene.current_objects()
    }

    /// Object of the current view by ID
    pub fn object(&self, id: &str) -> Option<&DesignObject> {
        self.state.scene.current_object(id)
    }

    /// IDs of the current view in z-order
    pub fn ids(&self) -> Vec<String> {
        self.objects().iter().map(|o| o.id.clone()).collect()
    }

    /// Number of objects in the current view
    pub fn object_count(&self) -> usize {
        self.objects().len()
    }

    /// Number of objects across all views
    pub fn total_object_count(&self) -> usize {
        self.state.scene.scene.object_count()
    }

    pub fn selected(&self) -> Option<&ObjectId> {
        self.state.selection.selected()
    }
}

impl Default for StudioHarness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_harness_empty() {
        let h = StudioHarness::new();
        assert_eq!(h.object_count(), 0);
        assert_eq!(h.total_object_count(), 0);
    }

    #[test]
    fn test_add_objects() {
        let mut h = StudioHarness::new();
        let id = h.add_image("a", 0.0, 0.0, 10.0, 10.0);
        assert_eq!(id, "a");
        h.add_text("t", "Hi", 0.0, 0.0);
        assert_eq!(h.ids(), vec!["a", "t"]);
    }

    #[test]
    fn test_undo_redo_cycle() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);
        assert_eq!(h.object_count(), 1);
        assert!(h.undo());
        assert_eq!(h.object_count(), 0);
        assert!(h.redo());
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_load_export_json() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);
        let json = h.export_scene_json();

        let mut h2 = StudioHarness::new();
        h2.load_scene_json(&json).unwrap();
        assert_eq!(h2.object_count(), 1);
        assert!(!h2.state.scene.can_undo());
    }

    #[test]
    fn test_load_invalid_json() {
        let mut h = StudioHarness::new();
        assert!(h.load_scene_json("{").is_err());
    }

    #[test]
    fn test_load_rejected_scene_keeps_session() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);
        h.click("a");
        let err = h
            .load_scene_json(r#"{"views":[{"key":"front","objects":[]},{"key":"sleeve","objects":[]}]}"#)
            .unwrap_err();
        assert!(err.contains("invalid scene"));
        assert_eq!(h.ids(), vec!["a"]);
        assert_eq!(h.selected().map(String::as_str), Some("a"));
        assert!(h.state.scene.can_undo());
    }

    #[test]
    fn test_remove_clears_matching_selection() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);
        h.click("a");
        assert!(h.remove(None, "a").unwrap());
        assert!(h.selected().is_none());
    }

    #[test]
    fn test_select_bypasses_lock() {
        let mut h = StudioHarness::new();
        h.add(None, DesignObject::text("t", "x", 0.0, 0.0, 10.0).with_locked(true))
            .unwrap();
        assert!(!h.click("t"));
        assert!(h.selected().is_none());
        h.select("t");
        assert_eq!(h.selected().map(String::as_str), Some("t"));
    }

    #[test]
    fn test_other_view_addressing() {
        let mut h = StudioHarness::new();
        h.add(Some("back"), DesignObject::text("b", "back", 0.0, 0.0, 10.0))
            .unwrap();
        assert_eq!(h.object_count(), 0);
        h.switch_view("back").unwrap();
        assert_eq!(h.ids(), vec!["b"]);
    }
}
