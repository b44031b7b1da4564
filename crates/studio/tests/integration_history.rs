//! Integration tests for the engine's editing and history guarantees.
//!
//! These drive `SceneState` directly with explicit checkpoints, the way an adapter
//! that manages its own undo granularity would.

use mockup_studio_lib::error::{HistoryDirection, StudioError};
use mockup_studio_lib::fixtures::*;
use mockup_studio_lib::state::{NodeTransform, SceneState, StudioSettings};
use shared::{DesignObject, ObjectKind, ObjectPatch};

fn scene_with(objects: Vec<DesignObject>) -> SceneState {
    let mut s = SceneState::new(&StudioSettings::default());
    for obj in objects {
        s.add_object("front", obj).unwrap();
    }
    s
}

#[test]
fn test_missing_id_is_noop_for_every_mutation() {
    let mut s = scene_with(vec![square_image("a"), text_at("t", "Hi", 1.0, 2.0)]);
    let before = s.objects("front").unwrap().to_vec();

    assert!(!s
        .update_object("front", "ghost", &ObjectPatch::position(9.0, 9.0))
        .unwrap());
    assert!(!s.remove_object("front", "ghost").unwrap());
    assert_eq!(s.duplicate_object("front", "ghost").unwrap(), None);
    assert!(!s.move_object_up("front", "ghost").unwrap());
    assert!(!s.move_object_down("front", "ghost").unwrap());

    assert_eq!(s.objects("front").unwrap(), before.as_slice());
}

#[test]
fn test_z_order_boundaries() {
    let mut s = scene_with(vec![square_image("a"), square_image("b"), square_image("c")]);
    assert!(!s.move_object_up("front", "c").unwrap());
    assert!(!s.move_object_down("front", "a").unwrap());
    let ids: Vec<_> = s.objects("front").unwrap().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);

    assert!(s.move_object_up("front", "a").unwrap());
    let ids: Vec<_> = s.objects("front").unwrap().iter().map(|o| o.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "c"]);
}

#[test]
fn test_duplicate_then_checkpoint_remove_undo() {
    let mut s = scene_with(vec![square_image("a")]);
    let original = s.current_object("a").unwrap().clone();

    let copy_id = s.duplicate_object("front", "a").unwrap().unwrap();
    assert_ne!(copy_id, "a");

    let objects = s.objects("front").unwrap();
    assert_eq!(objects.len(), 2);
    assert_eq!(objects[0], original);
    assert_eq!(objects[1].id, copy_id);
    assert_eq!((objects[1].placement.x, objects[1].placement.y), (20.0, 20.0));
    assert_eq!(objects[1].kind.size(), Some((100.0, 100.0)));
    let copy = objects[1].clone();

    s.checkpoint();
    assert!(s.remove_object("front", &copy_id).unwrap());
    assert_eq!(s.objects("front").unwrap().len(), 1);

    s.undo().unwrap();
    assert_eq!(s.current_object(&copy_id), Some(&copy));
    assert_eq!(s.layer_of("front", &copy_id), Some(1));
}

#[test]
fn test_history_round_trip_across_views() {
    let mut s = SceneState::new(&StudioSettings::default());
    s.set_scene(two_sided_registry()).unwrap();
    s.update_object("back", "badge", &ObjectPatch::rotation(45.0))
        .unwrap();
    s.set_background_color("front", "#ff0000").unwrap();

    s.checkpoint();
    let captured = s.scene.clone();

    s.remove_object("front", "logo").unwrap();
    s.set_background_color("back", "#123456").unwrap();
    s.add_object("back", text_at("extra", "More", 0.0, 0.0))
        .unwrap();

    s.undo().unwrap();
    assert_eq!(s.scene, captured);
}

#[test]
fn test_new_checkpoint_invalidates_redo() {
    let mut s = scene_with(vec![square_image("a")]);
    s.checkpoint();
    s.update_object("front", "a", &ObjectPatch::position(5.0, 5.0))
        .unwrap();
    s.undo().unwrap();
    assert!(s.can_redo());

    s.checkpoint();
    s.update_object("front", "a", &ObjectPatch::position(7.0, 7.0))
        .unwrap();
    assert_eq!(
        s.redo(),
        Err(StudioError::HistoryEmpty(HistoryDirection::Redo))
    );
    assert_eq!(s.current_object("a").unwrap().placement.x, 7.0);
}

#[test]
fn test_history_cap_evicts_oldest() {
    let mut settings = StudioSettings::default();
    settings.history.limit = 3;
    let mut s = SceneState::new(&settings);
    s.add_object("front", square_image("a")).unwrap();
    for i in 0..5 {
        s.checkpoint();
        s.update_object("front", "a", &ObjectPatch::position(i as f64, 0.0))
            .unwrap();
    }
    assert_eq!(s.undo_depth(), 3);
    while s.undo().is_ok() {}
    // the oldest reachable snapshot is the one taken before the third move
    assert_eq!(s.current_object("a").unwrap().placement.x, 1.0);
}

#[test]
fn test_transform_end_clamps_minimum_size() {
    let mut s = scene_with(vec![
        image_at("img", 0.0, 0.0, 100.0, 100.0),
        template_at("tpl", 0.0, 0.0, 40.0, 40.0),
    ]);
    let shrink = NodeTransform {
        x: 3.0,
        y: 4.0,
        rotation: 0.0,
        scale_x: 0.01,
        scale_y: 0.02,
        width: 100.0,
        height: 100.0,
    };
    s.commit_transform("front", "img", &shrink).unwrap();
    let img = s.current_object("img").unwrap();
    assert_eq!(img.kind.size(), Some((5.0, 5.0)));
    assert_eq!(img.transform().scale_x, 1.0);

    let tiny = NodeTransform {
        width: 40.0,
        height: 40.0,
        scale_x: 0.5,
        scale_y: 0.05,
        ..shrink
    };
    s.commit_transform("front", "tpl", &tiny).unwrap();
    let tpl = s.current_object("tpl").unwrap();
    assert!(matches!(tpl.kind, ObjectKind::Template { .. }));
    assert_eq!(tpl.kind.size(), Some((20.0, 5.0)));
}

#[test]
fn test_unknown_view_is_error() {
    let mut s = SceneState::new(&StudioSettings::default());
    assert_eq!(
        s.remove_object("side", "a"),
        Err(StudioError::ViewNotFound("side".into()))
    );
    assert!(s.objects("side").is_err());
}
