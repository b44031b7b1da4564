//! Scene state management
//!
//! This module provides the view registry with per-view objects, the current view,
//! and undo/redo history. Mutations never record history on their own; callers
//! decide where an undo step begins with [`SceneState::checkpoint`].

mod display;
mod history;
mod layer_ops;
mod object_ops;
mod transform_ops;
mod view_ops;

pub use display::{object_display_name, object_kind_label, short_id};
pub use history::History;
pub use transform_ops::NodeTransform;

use shared::{DesignObject, ObjectId, View, ViewKey, ViewRegistry};

use crate::error::{Result, StudioError};
use crate::state::settings::{EditSettings, StudioSettings};

/// View registry, current view and undo/redo history
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Live registry of all views
    pub scene: ViewRegistry,
    /// Key of the view being edited
    pub(crate) current_view: ViewKey,
    /// View keys fixed at construction, in display order
    pub(crate) configured_views: Vec<ViewKey>,
    pub(crate) history: History,
    pub(crate) edit: EditSettings,
    /// Monotonically increasing version counter for cache invalidation
    pub(crate) version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(&StudioSettings::default())
    }
}

impl SceneState {
    /// Empty scene with the configured views; the first view is current
    pub fn new(settings: &StudioSettings) -> Self {
        let scene = settings.build_registry();
        let current_view = scene.keys().next().unwrap_or("front").to_string();
        let configured_views = scene.keys().map(str::to_string).collect();
        Self {
            scene,
            current_view,
            configured_views,
            history: History::new(settings.history.limit),
            edit: settings.edit.clone(),
            version: 0,
        }
    }

    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Editing step sizes in effect
    pub fn edit_settings(&self) -> &EditSettings {
        &self.edit
    }

    /// Get a view by key
    pub fn view(&self, key: &str) -> Result<&View> {
        self.scene.view(key).ok_or_else(|| {
            tracing::error!("Unknown view key: {key}");
            StudioError::ViewNotFound(key.to_string())
        })
    }

    /// Get mutable view by key
    pub(crate) fn view_mut(&mut self, key: &str) -> Result<&mut View> {
        match self.scene.view_mut(key) {
            Some(view) => Ok(view),
            None => {
                tracing::error!("Unknown view key: {key}");
                Err(StudioError::ViewNotFound(key.to_string()))
            }
        }
    }

    /// Objects of a view in z-order (bottom first)
    pub fn objects(&self, key: &str) -> Result<&[DesignObject]> {
        Ok(&self.view(key)?.objects)
    }

    /// Get an object of a view by ID
    pub fn get_object(&self, key: &str, id: &str) -> Option<&DesignObject> {
        self.scene.view(key)?.get(id)
    }

    /// Objects of the current view
    pub fn current_objects(&self) -> &[DesignObject] {
        self.scene
            .view(&self.current_view)
            .map(|v| v.objects.as_slice())
            .unwrap_or(&[])
    }

    /// Get an object of the current view by ID
    pub fn current_object(&self, id: &str) -> Option<&DesignObject> {
        self.get_object(&self.current_view, id)
    }

    /// Bump version without saving undo
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }

    /// Fresh object ID
    pub(crate) fn new_object_id() -> ObjectId {
        uuid::Uuid::new_v4().to_string()
    }
}
