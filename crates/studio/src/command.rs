//! JSON command protocol for scripted automation.
//!
//! Commands address the current view unless `view` is given.

use serde::{Deserialize, Serialize};
use shared::{DesignObject, ObjectPatch, ViewRegistry};

use crate::error::StudioError;
use crate::harness::StudioHarness;
use crate::interaction::KeyAction;
use crate::state::{object_display_name, object_kind_label};

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum StudioCommand {
    /// Add an object; the response carries the final ID.
    AddObject {
        #[serde(default)]
        view: Option<String>,
        object: DesignObject,
    },
    /// Shallow-merge a patch into an object.
    UpdateObject {
        #[serde(default)]
        view: Option<String>,
        id: String,
        patch: ObjectPatch,
    },
    RemoveObject {
        #[serde(default)]
        view: Option<String>,
        id: String,
    },
    DuplicateObject {
        #[serde(default)]
        view: Option<String>,
        id: String,
    },
    MoveUp {
        #[serde(default)]
        view: Option<String>,
        id: String,
    },
    MoveDown {
        #[serde(default)]
        view: Option<String>,
        id: String,
    },
    /// Select an object. `force` skips the lock check.
    Select {
        id: String,
        #[serde(default)]
        force: bool,
    },
    /// Clear selection.
    Deselect,
    SwitchView {
        view: String,
    },
    SetBackground {
        #[serde(default)]
        view: Option<String>,
        color: String,
    },
    /// Snapshot the registry as an undo step.
    Checkpoint,
    /// Undo the last operation.
    Undo,
    /// Redo the last undone operation.
    Redo,
    /// Resolved keyboard input.
    Key {
        #[serde(flatten)]
        action: KeyAction,
    },
    /// Inspect the current view: list all objects.
    Inspect,
    /// Export the scene as JSON.
    ExportScene,
    /// Replace the scene; history and selection are dropped.
    LoadScene {
        scene: ViewRegistry,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

/// Engine errors become failed responses, except empty history which is a notice.
fn from_result<T>(
    result: crate::error::Result<T>,
    data: impl FnOnce(T) -> serde_json::Value,
) -> CommandResponse {
    match result {
        Ok(value) => CommandResponse::ok_with_data(data(value)),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

fn history_step(result: crate::error::Result<()>, key: &str) -> CommandResponse {
    match result {
        Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ key: true })),
        Err(e @ StudioError::HistoryEmpty(_)) => {
            CommandResponse::ok_with_data(serde_json::json!({ key: false, "notice": e.to_string() }))
        }
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut StudioHarness, cmd: StudioCommand) -> CommandResponse {
    match cmd {
        StudioCommand::AddObject { view, object } => {
            from_result(harness.add(view.as_deref(), object), |id| {
                serde_json::json!({ "id": id })
            })
        }

        StudioCommand::UpdateObject { view, id, patch } => {
            from_result(harness.update(view.as_deref(), &id, &patch), |updated| {
                serde_json::json!({ "updated": updated })
            })
        }

        StudioCommand::RemoveObject { view, id } => {
            from_result(harness.remove(view.as_deref(), &id), |removed| {
                serde_json::json!({ "removed": removed })
            })
        }

        StudioCommand::DuplicateObject { view, id } => {
            from_result(harness.duplicate(view.as_deref(), &id), |copy| {
                serde_json::json!({ "id": copy })
            })
        }

        StudioCommand::MoveUp { view, id } => {
            from_result(harness.move_up(view.as_deref(), &id), |moved| {
                serde_json::json!({ "moved": moved })
            })
        }

        StudioCommand::MoveDown { view, id } => {
            from_result(harness.move_down(view.as_deref(), &id), |moved| {
                serde_json::json!({ "moved": moved })
            })
        }

        StudioCommand::Select { id, force } => {
            let selected = if force {
                harness.select(&id);
                true
            } else {
                harness.click(&id)
            };
            CommandResponse::ok_with_data(serde_json::json!({ "selected": selected }))
        }

        StudioCommand::Deselect => {
            harness.clear_selection();
            CommandResponse::ok()
        }

        StudioCommand::SwitchView { view } => match harness.switch_view(&view) {
            Ok(()) => CommandResponse::ok_with_data(serde_json::json!({ "view": view })),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        StudioCommand::SetBackground { view, color } => {
            from_result(harness.set_background(view.as_deref(), &color), |changed| {
                serde_json::json!({ "changed": changed })
            })
        }

        StudioCommand::Checkpoint => {
            harness.checkpoint();
            CommandResponse::ok_with_data(
                serde_json::json!({ "undo_depth": harness.state.scene.undo_depth() }),
            )
        }

        StudioCommand::Undo => history_step(harness.state.scene.undo(), "undone"),

        StudioCommand::Redo => history_step(harness.state.scene.redo(), "redone"),

        StudioCommand::Key { action } => match harness.key(action) {
            Ok(changed) => CommandResponse::ok_with_data(serde_json::json!({ "changed": changed })),
            Err(e) if e.is_informational() => CommandResponse::ok_with_data(
                serde_json::json!({ "changed": false, "notice": e.to_string() }),
            ),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        StudioCommand::Inspect => {
            let objects: Vec<serde_json::Value> = harness
                .objects()
                .iter()
                .map(|obj| {
                    serde_json::json!({
                        "id": obj.id,
                        "name": object_display_name(obj),
                        "kind": object_kind_label(&obj.kind),
                        "visible": obj.visible,
                        "locked": obj.locked,
                    })
                })
                .collect();
            CommandResponse::ok_with_data(serde_json::json!({
                "view": harness.state.scene.current_view(),
                "object_count": objects.len(),
                "objects": objects,
                "selected": harness.selected(),
                "can_undo": harness.state.scene.can_undo(),
                "can_redo": harness.state.scene.can_redo(),
            }))
        }

        StudioCommand::ExportScene => {
            let json = harness.export_scene_json();
            CommandResponse::ok_with_data(serde_json::json!({ "scene_json": json }))
        }

        StudioCommand::LoadScene { scene } => {
            let count = scene.object_count();
            from_result(harness.load_scene(scene), |()| {
                serde_json::json!({ "object_count": count })
            })
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut StudioHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: StudioCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut StudioHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<StudioCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::NudgeDirection;

    #[test]
    fn test_command_serde_undo() {
        let json = r#"{"command": "undo"}"#;
        let cmd: StudioCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(cmd, StudioCommand::Undo));
    }

    #[test]
    fn test_command_serde_add_object() {
        let json = r##"{"command": "add_object", "object": {"id": "t1", "x": 5, "y": 6, "type": "text", "text": "Hi", "font_size": 20, "font_family": "Arial", "fill": "#000"}}"##;
        let cmd: StudioCommand = serde_json::from_str(json).unwrap();
        match cmd {
            StudioCommand::AddObject { view, object } => {
                assert!(view.is_none());
                assert_eq!(object.id, "t1");
            }
            _ => panic!("Expected AddObject"),
        }
    }

    #[test]
    fn test_command_serde_key() {
        let json = r#"{"command": "key", "action": "nudge", "direction": "left", "coarse": true}"#;
        let cmd: StudioCommand = serde_json::from_str(json).unwrap();
        match cmd {
            StudioCommand::Key { action } => assert_eq!(
                action,
                KeyAction::Nudge {
                    direction: NudgeDirection::Left,
                    coarse: true
                }
            ),
            _ => panic!("Expected Key"),
        }
    }

    #[test]
    fn test_execute_add_object() {
        let mut h = StudioHarness::new();
        let json = r#"{"command": "add_object", "view": "back", "object": {"id": "img", "x": 0, "y": 0, "type": "image", "src": "a.png", "width": 10, "height": 10}}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["id"], "img");
        assert_eq!(h.state.scene.objects("back").unwrap().len(), 1);
    }

    #[test]
    fn test_execute_unknown_view_fails() {
        let mut h = StudioHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "remove_object", "view": "side", "id": "a"}"#)
            .unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("view not found: side"));
    }

    #[test]
    fn test_execute_inspect() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);
        h.add_text("b", "Hi", 0.0, 0.0);

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["object_count"], 2);
        assert_eq!(data["objects"][1]["kind"], "Text");
        assert_eq!(data["view"], "front");
    }

    #[test]
    fn test_execute_undo_redo() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);

        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["undone"], true);
        assert_eq!(h.object_count(), 0);

        let resp = execute_json(&mut h, r#"{"command": "redo"}"#).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["redone"], true);
        assert_eq!(h.object_count(), 1);
    }

    #[test]
    fn test_execute_undo_empty_is_notice() {
        let mut h = StudioHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "undo"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        assert_eq!(data["undone"], false);
        assert_eq!(data["notice"], "nothing to undo");
    }

    #[test]
    fn test_execute_export_scene() {
        let mut h = StudioHarness::new();
        h.add_image("a", 0.0, 0.0, 10.0, 10.0);

        let resp = execute_json(&mut h, r#"{"command": "export_scene"}"#).unwrap();
        assert!(resp.success);
        let data = resp.data.unwrap();
        let scene_json = data["scene_json"].as_str().unwrap();
        assert!(scene_json.contains("views"));
    }

    #[test]
    fn test_execute_batch() {
        let mut h = StudioHarness::new();
        let json = r#"[
            {"command": "add_object", "object": {"id": "a", "x": 0, "y": 0, "type": "image", "src": "a.png", "width": 10, "height": 10}},
            {"command": "select", "id": "a"},
            {"command": "key", "action": "duplicate"},
            {"command": "inspect"}
        ]"#;
        let resps = execute_json_batch(&mut h, json).unwrap();
        assert_eq!(resps.len(), 4);
        assert!(resps.iter().all(|r| r.success));
        assert_eq!(h.object_count(), 2);
    }

    #[test]
    fn test_execute_load_scene_duplicate_ids_fails() {
        let mut h = StudioHarness::new();
        h.add_image("keep", 0.0, 0.0, 10.0, 10.0);
        let json = r#"{"command": "load_scene", "scene": {"views": [
            {"key": "front", "objects": [
                {"id": "a", "x": 0, "y": 0, "type": "image", "src": "a.png", "width": 10, "height": 10},
                {"id": "a", "x": 5, "y": 5, "type": "image", "src": "a.png", "width": 10, "height": 10}
            ]},
            {"key": "back", "objects": []}
        ]}}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(!resp.success);
        assert_eq!(
            resp.error.as_deref(),
            Some("invalid scene: duplicate object id a in front")
        );
        assert_eq!(h.ids(), vec!["keep"]);
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = StudioHarness::new();
        let result = execute_json(&mut h, "not valid json");
        assert!(result.is_err());
    }
}
