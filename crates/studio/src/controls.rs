//! Object controls panel actions.
//!
//! Every action targets the selected object of the current view and is one undo
//! step. With nothing selected they return `Ok(false)`.

use shared::ObjectId;

use crate::error::Result;
use crate::state::{object_display_name, SceneState, StudioState};

/// What the controls panel shows for the selection
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsSnapshot {
    pub id: ObjectId,
    pub name: String,
    /// Uniform scale shown on the slider (taken from `scale_x`)
    pub scale: f64,
    pub rotation: f64,
    pub locked: bool,
    pub visible: bool,
}

/// Panel read model, `None` when nothing valid is selected
pub fn snapshot(state: &StudioState) -> Option<ControlsSnapshot> {
    let obj = state.selected_object()?;
    let t = obj.transform();
    Some(ControlsSnapshot {
        id: obj.id.clone(),
        name: object_display_name(obj).to_string(),
        scale: t.scale_x,
        rotation: t.rotation,
        locked: obj.locked,
        visible: obj.visible,
    })
}

fn on_selected(
    state: &mut StudioState,
    f: impl FnOnce(&mut SceneState, &str, &str) -> Result<bool>,
) -> Result<bool> {
    let Some(id) = state.selected_id() else {
        return Ok(false);
    };
    let view = state.scene.current_view().to_string();
    state.scene.edit(|s| f(s, &view, &id))
}

/// Scale slider
pub fn set_scale(state: &mut StudioState, scale: f64) -> Result<bool> {
    on_selected(state, |s, view, id| s.set_uniform_scale(view, id, scale))
}

/// Zoom-in button
pub fn scale_up(state: &mut StudioState) -> Result<bool> {
    let Some(current) = snapshot(state).map(|c| c.scale) else {
        return Ok(false);
    };
    let step = state.settings.edit.scale_step;
    set_scale(state, current + step)
}

/// Zoom-out button
pub fn scale_down(state: &mut StudioState) -> Result<bool> {
    let Some(current) = snapshot(state).map(|c| c.scale) else {
        return Ok(false);
    };
    let step = state.settings.edit.scale_step;
    set_scale(state, current - step)
}

/// Rotation slider
pub fn set_rotation(state: &mut StudioState, degrees: f64) -> Result<bool> {
    on_selected(state, |s, view, id| s.set_rotation(view, id, degrees))
}

/// Rotate 90° button
pub fn rotate_quarter(state: &mut StudioState) -> Result<bool> {
    on_selected(state, |s, view, id| s.rotate_quarter(view, id))
}

pub fn flip_horizontal(state: &mut StudioState) -> Result<bool> {
    on_selected(state, |s, view, id| s.flip_horizontal(view, id))
}

pub fn flip_vertical(state: &mut StudioState) -> Result<bool> {
    on_selected(state, |s, view, id| s.flip_vertical(view, id))
}

/// Layer "Forward" button
pub fn bring_forward(state: &mut StudioState) -> Result<bool> {
    on_selected(state, |s, view, id| s.move_object_up(view, id))
}

/// Layer "Back" button
pub fn send_backward(state: &mut StudioState) -> Result<bool> {
    on_selected(state, |s, view, id| s.move_object_down(view, id))
}

/// Remove the selection from the product and deselect
pub fn delete(state: &mut StudioState) -> Result<bool> {
    let removed = on_selected(state, |s, view, id| s.remove_object(view, id))?;
    if removed {
        state.selection.clear();
        tracing::info!("Object removed");
    }
    Ok(removed)
}
