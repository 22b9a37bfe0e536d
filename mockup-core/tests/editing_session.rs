//! Editing Session Integration Tests
//!
//! Exercises the session through the public API:
//! - Bounded history and redo-branch discard
//! - Atomic composite commits
//! - Gesture isolation (immediate vs. committed updates)
//! - Scene paint order
//! - Resolution fallback

use mockup_core::resolution;
use mockup_core::{
    BorderKind, DeviceType, DocumentState, Edit, Editor, EntityPatch, LayoutMode,
    RenderComposition, SceneEntity, SceneGraph, Transform, TransformPatch,
};

/// Commit `count` distinct zoom edits, starting at 11%.
fn commit_zooms(editor: &mut Editor, count: u16) {
    for i in 0..count {
        editor.set_zoom(f32::from(11 + i));
    }
}

fn zoom(editor: &Editor) -> f32 {
    editor.document().viewport().zoom
}

// ============================================================================
// History Tests
// ============================================================================

#[test]
fn test_history_is_bounded_and_recent_edits_recoverable() {
    let mut editor = Editor::new();
    commit_zooms(&mut editor, 120);

    assert_eq!(editor.history_len(), 50);
    assert!((zoom(&editor) - 130.0).abs() < f32::EPSILON);

    let mut seen = vec![zoom(&editor)];
    while editor.undo() {
        seen.push(zoom(&editor));
        assert!(editor.history_len() <= 50);
    }

    assert_eq!(seen.len(), 50);
    assert!((seen[49] - 81.0).abs() < f32::EPSILON);
    assert!(!editor.can_undo());
}

#[test]
fn test_push_after_undo_discards_redo() {
    let mut editor = Editor::new();
    commit_zooms(&mut editor, 5);
    editor.undo();
    editor.undo();
    assert!(editor.can_redo());

    editor.set_border_radius(3.0_f32);
    assert!(!editor.can_redo());
    assert!(!editor.redo());

    editor.undo();
    assert!(editor.can_redo());
}

#[test]
fn test_undo_redo_round_trip() {
    let mut editor = Editor::new();
    editor.set_layout(LayoutMode::Double);
    editor.add_device(DeviceType::Browser);
    editor.set_resolution("ig-portrait");
    editor.undo();

    let before: DocumentState = editor.document().clone();
    assert!(editor.undo());
    assert!(editor.redo());
    assert_eq!(editor.document(), &before);
}

#[test]
fn test_boundaries_are_silent() {
    let mut editor = Editor::new();
    assert!(!editor.undo());
    assert!(!editor.redo());
    assert_eq!(editor.history_len(), 1);
    assert_eq!(editor.history_index(), 0);
}

#[test]
fn test_identical_commits_are_kept() {
    let mut editor = Editor::new();
    editor.set_zoom(100.0_f32);
    editor.set_zoom(100.0_f32);
    assert_eq!(editor.history_len(), 3);
}

// ============================================================================
// Composite Commit Tests
// ============================================================================

#[test]
fn test_layout_change_commits_zoom_together() {
    let mut editor = Editor::new();
    editor.set_layout(LayoutMode::Triple);

    assert_eq!(editor.history_len(), 2);
    assert_eq!(editor.document().layout(), LayoutMode::Triple);
    assert!((zoom(&editor) - 60.0).abs() < f32::EPSILON);
}

#[test]
fn test_resolution_commits_all_fields_together() {
    let mut editor = Editor::new();
    editor.set_resolution("hd-1080p");
    assert_eq!(editor.history_len(), 2);

    let canvas = editor.document().canvas().clone();
    assert_eq!((canvas.width, canvas.height), (1920, 1080));
    assert_eq!(canvas.resolution, "hd-1080p");

    editor.undo();
    assert_eq!(editor.document().canvas().resolution, "hd-720p");
    assert_eq!(editor.document().canvas().width, 1280);
}

#[test]
fn test_batch_is_one_entry() {
    let mut editor = Editor::new();
    editor.commit(Edit::Batch {
        edits: vec![
            Edit::SetNoise { noise: 20.0 },
            Edit::SetBlur { blur: 4.0 },
            Edit::SetBorderPreset {
                kind: BorderKind::Sharp,
            },
        ],
    });
    assert_eq!(editor.history_len(), 2);

    editor.undo();
    assert_eq!(editor.document(), &DocumentState::new());
}

// ============================================================================
// Gesture Tests
// ============================================================================

#[test]
fn test_pan_gesture_produces_one_entry() {
    for n in [1_u16, 7, 200] {
        let mut editor = Editor::new();
        for i in 1..=n {
            editor.pan_immediate(f32::from(i), f32::from(i) * 2.0);
        }
        editor.commit_pan_history();

        assert_eq!(editor.history_len(), 2);
        let viewport = editor.document().viewport();
        assert!((viewport.pan_x - f32::from(n)).abs() < f32::EPSILON);
        assert!((viewport.pan_y - f32::from(n) * 2.0).abs() < f32::EPSILON);
    }
}

#[test]
fn test_gesture_then_undo_restores_pre_gesture_state() {
    let mut editor = Editor::new();
    editor.pan_immediate(40.0, 40.0);
    editor.pan_immediate(80.0, 10.0);
    editor.commit_pan_history();

    assert!(editor.undo());
    let viewport = editor.document().viewport();
    assert!(viewport.pan_x.abs() < f32::EPSILON);
    assert!(viewport.pan_y.abs() < f32::EPSILON);
}

// ============================================================================
// Scene Tests
// ============================================================================

#[test]
fn test_paint_order_ascending_z_ties_by_insertion() {
    let mut scene = SceneGraph::new();
    let ids: Vec<_> = [3, 1, 3, 2]
        .into_iter()
        .map(|z_index| {
            let entity = SceneEntity::new(DeviceType::Phone).with_transform(Transform {
                z_index,
                ..Transform::default()
            });
            scene.insert_entity(entity).expect("unique id")
        })
        .collect();

    let order: Vec<_> = scene.paint_order().iter().map(|e| e.id).collect();
    assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);
}

#[test]
fn test_entity_ids_unique_across_lifetime() {
    let mut editor = Editor::new();
    let mut ids = Vec::new();
    for device in DeviceType::ALL {
        ids.push(editor.add_device(device).expect("added"));
    }
    editor.remove_device(ids[0]);
    ids.push(editor.add_device(DeviceType::Phone).expect("added"));

    let mut deduped = ids.clone();
    deduped.sort_by_key(ToString::to_string);
    deduped.dedup();
    assert_eq!(deduped.len(), ids.len());
}

#[test]
fn test_scene_update_clamps_and_ignores_stale_ids() {
    let mut editor = Editor::new();
    let id = editor.add_device(DeviceType::Laptop).expect("added");
    let patch = EntityPatch::transform(TransformPatch {
        scale: Some(900.0),
        rotation: Some(-80.0),
        z_index: Some(99),
        ..TransformPatch::default()
    });
    editor.update_device(id, patch.clone());

    let entity = editor
        .document()
        .scene()
        .and_then(|s| s.get_entity(id))
        .cloned()
        .expect("entity exists");
    assert!((entity.transform.scale - 400.0).abs() < f32::EPSILON);
    assert!((entity.transform.rotation + 45.0).abs() < f32::EPSILON);
    assert_eq!(entity.transform.z_index, 10);

    editor.remove_device(id);
    let before = editor.document().clone();
    editor.update_device(id, patch);
    assert_eq!(editor.document(), &before);
}

#[test]
fn test_render_snapshot_follows_composition() {
    let mut editor = Editor::new();
    assert!(matches!(
        editor.render_snapshot().composition,
        RenderComposition::Single { .. }
    ));

    editor.add_device(DeviceType::Tablet);
    let snapshot = editor.render_snapshot();
    assert_eq!(snapshot.device_count(), 2);
    assert!(matches!(
        snapshot.composition,
        RenderComposition::Scene { .. }
    ));
}

// ============================================================================
// Resolution & Border Tests
// ============================================================================

#[test]
fn test_unknown_resolution_falls_back() {
    let size = resolution::resolve("nonexistent-id");
    assert_eq!((size.width, size.height), (1280, 720));

    let mut editor = Editor::new();
    editor.set_resolution("nonexistent-id");
    assert_eq!(editor.document().canvas().resolution, "hd-720p");
}

#[test]
fn test_border_radius_scenario() {
    let mut editor = Editor::new();
    editor.set_border_radius(0.0_f32);
    assert_eq!(editor.document().border().kind(), BorderKind::Sharp);
    editor.set_border_radius(25.0_f32);
    assert_eq!(editor.document().border().kind(), BorderKind::Curved);
    editor.set_border_radius(40.0_f32);
    assert_eq!(editor.document().border().kind(), BorderKind::Round);
}
