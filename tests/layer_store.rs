use egui::{Color32, pos2, vec2};
use inkcanvas::document::Document;
use inkcanvas::layer::{BlendMode, LayerId};
use inkcanvas::stroke::{InputPoint, Paint, Stroke, StrokeBuilder};

fn new_doc() -> Document {
    Document::new(vec2(400.0, 300.0))
}

fn stroke_at(x: f32, y: f32, color: Color32) -> Stroke {
    let mut builder = StrokeBuilder::new();
    builder.start(InputPoint::new(pos2(x, y)), Paint::brush(color, 6.0, 1.0));
    builder.add_point(InputPoint::new(pos2(x + 20.0, y)));
    builder.end().unwrap()
}

#[test]
fn new_document_has_one_active_layer() {
    let doc = new_doc();
    assert_eq!(doc.layers().len(), 1);
    assert_eq!(doc.layers()[0].name, "Layer 1");
    assert_eq!(doc.active_layer_id(), doc.layers()[0].id);
    assert!(doc.can_draw());
}

#[test]
fn added_layers_are_numbered_and_stacked_on_top() {
    let mut doc = new_doc();
    let second = doc.add_layer(None);
    assert_eq!(doc.layers().len(), 2);
    assert_eq!(doc.layers()[1].id, second);
    assert_eq!(doc.layers()[1].name, "Layer 2");
    // Active pointer is untouched when one already exists.
    assert_eq!(doc.active_layer_id(), doc.layers()[0].id);

    let inserted = doc.add_layer(Some(0));
    assert_eq!(doc.layers()[0].id, inserted);
    assert_eq!(doc.layers()[0].name, "Layer 3");
}

#[test]
fn delete_never_empties_the_stack() {
    let mut doc = new_doc();
    let only = doc.active_layer_id();
    assert!(!doc.delete_layer(only));
    assert_eq!(doc.layers().len(), 1);

    let second = doc.add_layer(None);
    assert!(doc.delete_layer(second));
    assert_eq!(doc.layers().len(), 1);
    assert!(!doc.delete_layer(doc.active_layer_id()));
}

#[test]
fn delete_unknown_id_is_refused() {
    let mut doc = new_doc();
    doc.add_layer(None);
    assert!(!doc.delete_layer(LayerId::new()));
    assert_eq!(doc.layers().len(), 2);
}

#[test]
fn deleting_the_active_layer_activates_the_one_below() {
    let mut doc = new_doc();
    let bottom = doc.active_layer_id();
    let middle = doc.add_layer(None);
    let top = doc.add_layer(None);

    assert!(doc.set_active(middle));
    assert!(doc.delete_layer(middle));
    assert_eq!(doc.active_layer_id(), bottom);

    // Deleting a non-active layer leaves the pointer alone.
    assert!(doc.set_active(bottom));
    assert!(doc.delete_layer(top));
    assert_eq!(doc.active_layer_id(), bottom);
}

#[test]
fn opacity_is_clamped_to_unit_range() {
    let mut doc = new_doc();
    let id = doc.active_layer_id();
    assert!(doc.set_opacity(id, 3.5));
    assert_eq!(doc.layer(id).unwrap().opacity, 1.0);
    assert!(doc.set_opacity(id, -0.25));
    assert_eq!(doc.layer(id).unwrap().opacity, 0.0);
    assert!(!doc.set_opacity(LayerId::new(), 0.5));
}

#[test]
fn property_setters_reject_unknown_ids() {
    let mut doc = new_doc();
    let ghost = LayerId::new();
    assert!(!doc.set_blend_mode(ghost, BlendMode::Multiply));
    assert!(!doc.set_visible(ghost, false));
    assert!(!doc.set_locked(ghost, true));
    assert!(!doc.set_name(ghost, "nope"));
    assert!(!doc.reorder_layer(ghost, 0));
    assert!(doc.duplicate_layer(ghost).is_none());
}

#[test]
fn reorder_moves_within_the_stack() {
    let mut doc = new_doc();
    let bottom = doc.active_layer_id();
    let top = doc.add_layer(None);

    assert!(doc.reorder_layer(top, 0));
    assert_eq!(doc.layers()[0].id, top);
    assert_eq!(doc.layers()[1].id, bottom);

    // Out-of-range target clamps to the top.
    assert!(doc.reorder_layer(top, 99));
    assert_eq!(doc.layers()[1].id, top);
}

#[test]
fn duplicate_is_a_deep_copy_above_the_source() {
    let mut doc = new_doc();
    let source = doc.active_layer_id();
    doc.commit_stroke(stroke_at(50.0, 50.0, Color32::RED));

    let copy = doc.duplicate_layer(source).unwrap();
    assert_eq!(doc.index_of(copy), Some(1));
    let copy_layer = doc.layer(copy).unwrap();
    assert_eq!(copy_layer.name, "Layer 1 Copy");
    assert_eq!(copy_layer.strokes().len(), 1);

    let original_stroke_id = doc.layer(source).unwrap().strokes()[0].id();
    let copy_stroke_id = copy_layer.strokes()[0].id();
    assert_ne!(original_stroke_id, copy_stroke_id);

    // Recoloring the copy must not reach the original.
    doc.find_stroke_mut(copy_stroke_id)
        .unwrap()
        .recolor(Color32::BLUE);
    assert_eq!(
        doc.layer(source).unwrap().strokes()[0].color(),
        Color32::RED
    );
}

#[test]
fn merge_down_concatenates_onto_the_lower_layer() {
    let mut doc = new_doc();
    let lower = doc.active_layer_id();
    doc.commit_stroke(stroke_at(10.0, 10.0, Color32::RED));

    let upper = doc.add_layer(None);
    doc.set_active(upper);
    doc.commit_stroke(stroke_at(100.0, 100.0, Color32::BLUE));

    assert!(doc.merge_down(upper));
    assert_eq!(doc.layers().len(), 1);
    let merged = doc.layer(lower).unwrap();
    assert_eq!(merged.strokes().len(), 2);
    // Lower paint order first, then the upper layer's strokes.
    assert_eq!(merged.strokes()[0].color(), Color32::RED);
    assert_eq!(merged.strokes()[1].color(), Color32::BLUE);
    assert_eq!(merged.strokes()[1].layer_id(), lower);
    assert_eq!(doc.active_layer_id(), lower);

    // The survivor is now the bottom layer.
    assert!(!doc.merge_down(lower));
}

#[test]
fn locked_or_hidden_layers_reject_strokes() {
    let mut doc = new_doc();
    let id = doc.active_layer_id();

    doc.set_locked(id, true);
    assert!(!doc.can_draw());
    assert!(!doc.commit_stroke(stroke_at(10.0, 10.0, Color32::RED)));

    doc.set_locked(id, false);
    doc.set_visible(id, false);
    assert!(!doc.commit_stroke(stroke_at(10.0, 10.0, Color32::RED)));

    doc.set_visible(id, true);
    assert!(doc.commit_stroke(stroke_at(10.0, 10.0, Color32::RED)));
    assert_eq!(doc.layer(id).unwrap().strokes().len(), 1);
}

#[test]
fn committed_strokes_point_back_at_their_layer() {
    let mut doc = new_doc();
    let id = doc.active_layer_id();
    doc.commit_stroke(stroke_at(10.0, 10.0, Color32::RED));
    assert_eq!(doc.layer(id).unwrap().strokes()[0].layer_id(), id);
}

#[test]
fn color_sampling_prefers_the_topmost_stroke() {
    let mut doc = new_doc();
    doc.commit_stroke(stroke_at(50.0, 50.0, Color32::RED));

    let top = doc.add_layer(None);
    doc.set_active(top);
    doc.commit_stroke(stroke_at(50.0, 50.0, Color32::BLUE));

    assert_eq!(doc.sample_color_at(pos2(55.0, 50.0)), Color32::BLUE);
    // Empty canvas regions sample the white background.
    assert_eq!(doc.sample_color_at(pos2(300.0, 250.0)), Color32::WHITE);
}

#[test]
fn color_sampling_skips_erasers_and_hidden_layers() {
    let mut doc = new_doc();
    doc.commit_stroke(stroke_at(50.0, 50.0, Color32::RED));

    let top = doc.add_layer(None);
    doc.set_active(top);
    let mut builder = StrokeBuilder::new();
    builder.start(InputPoint::new(pos2(50.0, 50.0)), Paint::eraser(6.0, 1.0));
    builder.add_point(InputPoint::new(pos2(70.0, 50.0)));
    doc.commit_stroke(builder.end().unwrap());

    assert_eq!(doc.sample_color_at(pos2(55.0, 50.0)), Color32::RED);

    doc.set_visible(doc.layers()[0].id, false);
    assert_eq!(doc.sample_color_at(pos2(55.0, 50.0)), Color32::WHITE);
}

#[test]
fn clear_keeps_layers_but_drops_strokes() {
    let mut doc = new_doc();
    doc.commit_stroke(stroke_at(10.0, 10.0, Color32::RED));
    doc.add_layer(None);
    doc.clear();
    assert_eq!(doc.layers().len(), 2);
    assert!(doc.layers().iter().all(|l| l.strokes().is_empty()));
}
