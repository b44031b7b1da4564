//! Transform/drag operations
//!
//! These build patches from gesture results and resolved object defaults, then go
//! through [`SceneState::update_object`]. None of them record history.

use serde::{Deserialize, Serialize};
use shared::{clamp_min_size, ObjectPatch};

use super::SceneState;
use crate::error::Result;

/// Node geometry reported by the canvas when a transform gesture ends.
///
/// `width`/`height` are the node's unscaled size; only image and template objects use
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeTransform {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl NodeTransform {
    /// Patch committed for an object of the given kind.
    ///
    /// Sized objects bake the scale into width/height, clamped to the minimum size,
    /// and reset scale to 1. Text and groups keep the scale as reported.
    pub fn to_patch(&self, sized: bool) -> ObjectPatch {
        let base = ObjectPatch {
            x: Some(self.x),
            y: Some(self.y),
            rotation: Some(self.rotation),
            ..Default::default()
        };
        if sized {
            ObjectPatch {
                width: Some(clamp_min_size(self.width * self.scale_x)),
                height: Some(clamp_min_size(self.height * self.scale_y)),
                scale_x: Some(1.0),
                scale_y: Some(1.0),
                ..base
            }
        } else {
            ObjectPatch {
                scale_x: Some(self.scale_x),
                scale_y: Some(self.scale_y),
                ..base
            }
        }
    }
}

impl SceneState {
    /// Commit the final position of a drag
    pub fn commit_drag(&mut self, view_key: &str, id: &str, x: f64, y: f64) -> Result<bool> {
        self.update_object(view_key, id, &ObjectPatch::position(x, y))
    }

    /// Commit the result of a transform-handle gesture
    pub fn commit_transform(&mut self, view_key: &str, id: &str, node: &NodeTransform) -> Result<bool> {
        let Some(sized) = self.get_object(view_key, id).map(|o| o.kind.is_sized()) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.update_object(view_key, id, &node.to_patch(sized))
    }

    /// Move an object by a delta
    pub fn nudge(&mut self, view_key: &str, id: &str, dx: f64, dy: f64) -> Result<bool> {
        let Some(t) = self.get_object(view_key, id).map(|o| o.transform()) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.update_object(view_key, id, &ObjectPatch::position(t.x + dx, t.y + dy))
    }

    /// Mirror along the X axis
    pub fn flip_horizontal(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let Some(t) = self.get_object(view_key, id).map(|o| o.transform()) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.update_object(
            view_key,
            id,
            &ObjectPatch {
                scale_x: Some(-t.scale_x),
                ..Default::default()
            },
        )
    }

    /// Mirror along the Y axis
    pub fn flip_vertical(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let Some(t) = self.get_object(view_key, id).map(|o| o.transform()) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.update_object(
            view_key,
            id,
            &ObjectPatch {
                scale_y: Some(-t.scale_y),
                ..Default::default()
            },
        )
    }

    /// Set both scale factors, clamped to the configured slider range
    pub fn set_uniform_scale(&mut self, view_key: &str, id: &str, scale: f64) -> Result<bool> {
        let scale = self.edit.clamp_scale(scale);
        self.update_object(view_key, id, &ObjectPatch::scale(scale, scale))
    }

    /// Set rotation in degrees
    pub fn set_rotation(&mut self, view_key: &str, id: &str, degrees: f64) -> Result<bool> {
        self.update_object(view_key, id, &ObjectPatch::rotation(degrees))
    }

    /// Rotate a quarter turn clockwise, wrapping into [0, 360)
    pub fn rotate_quarter(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let Some(t) = self.get_object(view_key, id).map(|o| o.transform()) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.set_rotation(view_key, id, (t.rotation + 90.0).rem_euclid(360.0))
    }
}
