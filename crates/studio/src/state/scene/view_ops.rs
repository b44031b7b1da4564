//! Current view, per-view background and whole-scene replacement

use std::collections::HashSet;

use shared::ViewRegistry;

use super::SceneState;
use crate::error::{Result, StudioError};

impl SceneState {
    /// Key of the view being edited
    pub fn current_view(&self) -> &str {
        &self.current_view
    }

    /// Switch the view being edited
    pub fn set_current_view(&mut self, view_key: &str) -> Result<()> {
        self.view(view_key)?;
        if self.current_view != view_key {
            tracing::info!("Switched view {} -> {view_key}", self.current_view);
            self.current_view = view_key.to_string();
        }
        Ok(())
    }

    /// All view keys, in display order
    pub fn view_keys(&self) -> Vec<String> {
        self.scene.keys().map(str::to_string).collect()
    }

    /// Garment color of a view
    pub fn background_color(&self, view_key: &str) -> Result<&str> {
        Ok(&self.view(view_key)?.background_color)
    }

    /// Change the garment color of a view. Part of the registry, so undoable.
    pub fn set_background_color(&mut self, view_key: &str, color: &str) -> Result<bool> {
        let view = self.view_mut(view_key)?;
        if view.background_color == color {
            return Ok(false);
        }
        view.background_color = color.to_string();
        self.version += 1;
        tracing::debug!("Background of {view_key} set to {color}");
        Ok(true)
    }

    /// Remove every object from every view, keeping views and colors
    pub fn clear_objects(&mut self) {
        for view in &mut self.scene.views {
            view.objects.clear();
        }
        self.version += 1;
    }

    /// Replace the whole registry (e.g. a loaded design). History is dropped.
    ///
    /// The registry must hold exactly the configured views, each once, with unique
    /// non-empty object IDs per view. Views are put back into display order. On error
    /// the live scene is untouched.
    pub fn set_scene(&mut self, mut scene: ViewRegistry) -> Result<()> {
        if let Err(e) = self.validate_scene(&scene) {
            tracing::error!("Rejected scene: {e}");
            return Err(e);
        }
        let order = &self.configured_views;
        scene
            .views
            .sort_by_key(|v| order.iter().position(|k| *k == v.key));

        self.scene = scene;
        self.history.clear();
        self.version += 1;
        tracing::info!(
            "Loaded scene ({} views, {} objects)",
            self.scene.views.len(),
            self.scene.object_count()
        );
        Ok(())
    }

    fn validate_scene(&self, scene: &ViewRegistry) -> Result<()> {
        let invalid = |msg: String| -> Result<()> { Err(StudioError::InvalidScene(msg)) };

        let mut keys = HashSet::new();
        for view in &scene.views {
            if !keys.insert(view.key.as_str()) {
                return invalid(format!("duplicate view key {}", view.key));
            }
            if !self.configured_views.contains(&view.key) {
                return invalid(format!("unknown view {}", view.key));
            }
            let mut ids = HashSet::new();
            for obj in &view.objects {
                if obj.id.is_empty() {
                    return invalid(format!("object without id in {}", view.key));
                }
                if !ids.insert(obj.id.as_str()) {
                    return invalid(format!("duplicate object id {} in {}", obj.id, view.key));
                }
            }
        }
        if let Some(missing) = self
            .configured_views
            .iter()
            .find(|k| !keys.contains(k.as_str()))
        {
            return invalid(format!("missing view {missing}"));
        }
        Ok(())
    }
}
