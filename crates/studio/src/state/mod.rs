pub mod scene;
pub mod selection;
pub mod settings;

use shared::{DesignObject, ObjectId};

pub use scene::{object_display_name, object_kind_label, short_id, NodeTransform, SceneState};
pub use selection::SelectionState;
pub use settings::{EditSettings, HistorySettings, StudioSettings, ViewSettings};

use crate::error::Result;

/// Combined editing session state.
///
/// This is the engine object adapters hold: every mutation goes through it or its
/// `scene`, never through shared globals.
#[derive(Debug, Clone)]
pub struct StudioState {
    pub scene: SceneState,
    pub selection: SelectionState,
    pub settings: StudioSettings,
}

impl Default for StudioState {
    fn default() -> Self {
        Self::new(StudioSettings::default())
    }
}

impl StudioState {
    pub fn new(settings: StudioSettings) -> Self {
        Self {
            scene: SceneState::new(&settings),
            selection: SelectionState::default(),
            settings,
        }
    }

    /// Switch the current view. The selection belongs to the old view and is cleared.
    pub fn switch_view(&mut self, view_key: &str) -> Result<()> {
        let changed = self.scene.current_view() != view_key;
        self.scene.set_current_view(view_key)?;
        if changed {
            self.selection.clear();
        }
        Ok(())
    }

    /// The selected object, if it still exists in the current view
    pub fn selected_object(&self) -> Option<&DesignObject> {
        let id = self.selection.selected()?;
        self.scene.current_object(id)
    }

    /// ID of the selected object, if it still exists in the current view
    pub fn selected_id(&self) -> Option<ObjectId> {
        self.selected_object().map(|o| o.id.clone())
    }

    /// Garment color of the current view
    pub fn current_background(&self) -> &str {
        self.scene
            .background_color(self.scene.current_view())
            .unwrap_or("#ffffff")
    }
}
