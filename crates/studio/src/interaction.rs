//! Engine side of the canvas interaction contract.
//!
//! The canvas resolves pointer and keyboard input into the calls below. Each
//! user-perceived edit becomes exactly one undo step: discrete actions go through
//! [`SceneState::edit`](crate::state::SceneState::edit), continuous ones through a
//! [`Gesture`].

use serde::{Deserialize, Serialize};
use shared::{DesignObject, ObjectId, ObjectPatch, Transform2D, ViewKey, ViewRegistry};

use crate::error::Result;
use crate::state::{NodeTransform, StudioState};

/// Arrow-key direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeDirection {
    Left,
    Right,
    Up,
    Down,
}

impl NudgeDirection {
    /// Unit delta in view coordinates (y grows downwards)
    pub fn delta(self) -> (f64, f64) {
        match self {
            NudgeDirection::Left => (-1.0, 0.0),
            NudgeDirection::Right => (1.0, 0.0),
            NudgeDirection::Up => (0.0, -1.0),
            NudgeDirection::Down => (0.0, 1.0),
        }
    }
}

/// Keyboard input after shortcut resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum KeyAction {
    Undo,
    Redo,
    /// Duplicate the selection
    Duplicate,
    /// Remove the selection
    Delete,
    /// Move the selection one step; `coarse` is the modifier-held step
    Nudge {
        direction: NudgeDirection,
        #[serde(default)]
        coarse: bool,
    },
}

/// True if pointer interaction may select or transform this object
pub fn is_interactive(obj: &DesignObject) -> bool {
    obj.visible && !obj.locked
}

/// Pointer press on an object. Locked, hidden or unknown objects leave the selection as is.
pub fn pointer_select(state: &mut StudioState, id: &str) -> bool {
    match state.scene.current_object(id) {
        Some(obj) if is_interactive(obj) => {
            state.selection.select(obj.id.clone());
            true
        }
        Some(_) => {
            tracing::debug!("pointer_select: {id} is locked or hidden");
            false
        }
        None => {
            tracing::warn!("pointer_select: {id} not in {}", state.scene.current_view());
            false
        }
    }
}

/// Pointer press on empty canvas
pub fn click_empty(state: &mut StudioState) {
    state.selection.clear();
}

/// Apply a resolved key action. Returns whether the scene changed.
///
/// Undo/redo with an empty stack return `HistoryEmpty`, which callers show as a notice.
pub fn apply_key_action(state: &mut StudioState, action: KeyAction) -> Result<bool> {
    match action {
        KeyAction::Undo => state.scene.undo().map(|_| true),
        KeyAction::Redo => state.scene.redo().map(|_| true),
        KeyAction::Duplicate => {
            let Some(id) = state.selected_id() else {
                return Ok(false);
            };
            let view = state.scene.current_view().to_string();
            let copy = state.scene.edit(|s| s.duplicate_object(&view, &id))?;
            match copy {
                Some(copy) => {
                    state.selection.select(copy);
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        KeyAction::Delete => {
            let Some(id) = state.selected_id() else {
                return Ok(false);
            };
            let view = state.scene.current_view().to_string();
            let removed = state.scene.edit(|s| s.remove_object(&view, &id))?;
            state.selection.clear();
            Ok(removed)
        }
        KeyAction::Nudge { direction, coarse } => {
            let Some(id) = state.selected_id() else {
                return Ok(false);
            };
            let step = state.settings.edit.nudge(coarse);
            let (ux, uy) = direction.delta();
            let view = state.scene.current_view().to_string();
            state.scene.edit(|s| s.nudge(&view, &id, ux * step, uy * step))
        }
    }
}

/// A continuous edit (drag, transform handles, slider scrub) on one object.
///
/// Intermediate updates skip history; [`Gesture::finish`] records a single undo step
/// holding the state from before the gesture.
#[derive(Debug)]
pub struct Gesture {
    view: ViewKey,
    id: ObjectId,
    before: ViewRegistry,
}

impl Gesture {
    /// Start a gesture on an object of the current view.
    ///
    /// Returns `None` for objects that are not transform targets (unknown, locked, hidden).
    pub fn begin(state: &StudioState, id: &str) -> Option<Self> {
        let obj = state.scene.current_object(id)?;
        if !is_interactive(obj) {
            tracing::debug!("Gesture refused on {id}: locked or hidden");
            return None;
        }
        Some(Self {
            view: state.scene.current_view().to_string(),
            id: id.to_string(),
            before: state.scene.scene.clone(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Intermediate frame; never recorded
    pub fn update(&self, state: &mut StudioState, patch: &ObjectPatch) -> Result<bool> {
        state.scene.update_object(&self.view, &self.id, patch)
    }

    /// End with a final patch. Returns whether an undo step was recorded.
    pub fn finish(self, state: &mut StudioState, patch: &ObjectPatch) -> Result<bool> {
        state.scene.update_object(&self.view, &self.id, patch)?;
        Ok(state.scene.record_if_changed(self.before))
    }

    /// End a drag at its final position
    pub fn finish_drag(self, state: &mut StudioState, x: f64, y: f64) -> Result<bool> {
        state.scene.commit_drag(&self.view, &self.id, x, y)?;
        Ok(state.scene.record_if_changed(self.before))
    }

    /// End a transform-handle gesture with the node's final geometry
    pub fn finish_transform(self, state: &mut StudioState, node: &NodeTransform) -> Result<bool> {
        state.scene.commit_transform(&self.view, &self.id, node)?;
        Ok(state.scene.record_if_changed(self.before))
    }

    /// Abandon the gesture and put the registry back
    pub fn cancel(self, state: &mut StudioState) {
        state.scene.scene = self.before;
        state.scene.notify_mutated();
    }
}

/// One object to paint on the current view
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem<'a> {
    pub object: &'a DesignObject,
    pub transform: Transform2D,
    pub selected: bool,
    /// Selected and unlocked: the canvas attaches transform handles
    pub transform_target: bool,
}

/// Visible objects of the current view, bottom first
pub fn render_list(state: &StudioState) -> Vec<RenderItem<'_>> {
    state
        .scene
        .current_objects()
        .iter()
        .filter(|obj| obj.visible)
        .map(|obj| {
            let selected = state.selection.is_selected(&obj.id);
            RenderItem {
                object: obj,
                transform: obj.transform(),
                selected,
                transform_target: selected && !obj.locked,
            }
        })
        .collect()
}
