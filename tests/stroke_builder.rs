use egui::{Color32, pos2};
use inkcanvas::geometry::build_path;
use inkcanvas::stroke::{InputPoint, Paint, StrokeBuilder};

fn pt(x: f32, y: f32) -> InputPoint {
    InputPoint::new(pos2(x, y))
}

fn black_paint() -> Paint {
    Paint::brush(Color32::BLACK, 6.0, 1.0)
}

#[test]
fn end_without_start_returns_none() {
    let mut builder = StrokeBuilder::new();
    assert!(builder.end().is_none());
}

#[test]
fn bare_start_yields_single_point_stroke() {
    let mut builder = StrokeBuilder::new();
    builder.start(pt(10.0, 10.0), black_paint());
    let stroke = builder.end().expect("start buffers its point");
    assert_eq!(stroke.points().len(), 1);
    assert!(!builder.is_active());
}

#[test]
fn point_count_matches_points_fed() {
    let mut builder = StrokeBuilder::new();
    builder.start(pt(0.0, 0.0), black_paint());
    for i in 1..=5 {
        builder.add_point(pt(i as f32 * 10.0, 0.0));
    }
    let stroke = builder.end().unwrap();
    assert_eq!(stroke.points().len(), 6);
}

#[test]
fn committed_path_matches_build_path() {
    let points = vec![pt(0.0, 0.0), pt(10.0, 5.0), pt(20.0, 0.0), pt(30.0, 8.0)];
    let mut builder = StrokeBuilder::new();
    builder.start(points[0], black_paint());
    for p in &points[1..] {
        builder.add_point(*p);
    }
    let stroke = builder.end().unwrap();
    assert_eq!(*stroke.path(), build_path(&points));
}

#[test]
fn start_while_active_is_ignored() {
    let mut builder = StrokeBuilder::new();
    builder.start(pt(0.0, 0.0), black_paint());
    builder.add_point(pt(10.0, 0.0));
    // Second start must not reset the buffer or swap the paint.
    builder.start(pt(99.0, 99.0), Paint::brush(Color32::RED, 20.0, 0.5));
    let stroke = builder.end().unwrap();
    assert_eq!(stroke.points().len(), 2);
    assert_eq!(stroke.color(), Color32::BLACK);
    assert_eq!(stroke.width(), 6.0);
}

#[test]
fn add_point_while_idle_is_ignored() {
    let mut builder = StrokeBuilder::new();
    builder.add_point(pt(10.0, 10.0));
    assert!(builder.end().is_none());

    // The defensive no-op leaves the builder usable.
    builder.start(pt(0.0, 0.0), black_paint());
    assert!(builder.end().is_some());
}

#[test]
fn cancel_discards_the_stroke() {
    let mut builder = StrokeBuilder::new();
    builder.start(pt(0.0, 0.0), black_paint());
    builder.add_point(pt(10.0, 0.0));
    builder.cancel();
    assert!(!builder.is_active());
    assert!(builder.end().is_none());
}

#[test]
fn builder_is_reusable_after_end() {
    let mut builder = StrokeBuilder::new();
    builder.start(pt(0.0, 0.0), black_paint());
    builder.add_point(pt(5.0, 0.0));
    let first = builder.end().unwrap();

    builder.start(pt(100.0, 100.0), Paint::brush(Color32::RED, 3.0, 0.8));
    builder.add_point(pt(110.0, 100.0));
    let second = builder.end().unwrap();

    assert_ne!(first.id(), second.id());
    assert_eq!(second.color(), Color32::RED);
    assert_eq!(second.points()[0].pos, pos2(100.0, 100.0));
}

#[test]
fn eraser_paint_marks_the_stroke() {
    let mut builder = StrokeBuilder::new();
    builder.start(pt(0.0, 0.0), Paint::eraser(12.0, 1.0));
    builder.add_point(pt(10.0, 0.0));
    let stroke = builder.end().unwrap();
    assert!(stroke.is_eraser());
    assert_eq!(stroke.color(), Color32::TRANSPARENT);
}

#[test]
fn live_path_only_while_active() {
    let mut builder = StrokeBuilder::new();
    assert!(builder.live_path().is_none());
    builder.start(pt(0.0, 0.0), black_paint());
    assert!(builder.live_path().is_some());
    assert!(builder.end().is_some());
    assert!(builder.live_path().is_none());
}

#[test]
fn smoothing_flattens_interior_points_at_commit() {
    let mut builder = StrokeBuilder::new();
    builder.set_smoothing(100.0);
    builder.start(pt(0.0, 0.0), black_paint());
    builder.add_point(pt(5.0, 10.0));
    builder.add_point(pt(10.0, 0.0));
    let stroke = builder.end().unwrap();

    // Endpoints stay put, the apex is pulled to the neighbor average.
    assert_eq!(stroke.points().len(), 3);
    assert_eq!(stroke.points()[0].pos, pos2(0.0, 0.0));
    assert_eq!(stroke.points()[1].pos, pos2(5.0, 0.0));
    assert_eq!(stroke.points()[2].pos, pos2(10.0, 0.0));
}

#[test]
fn pressure_is_clamped_on_construction() {
    let point = pt(0.0, 0.0).with_pressure(2.5);
    assert_eq!(point.pressure, 1.0);
    let point = pt(0.0, 0.0).with_pressure(-0.5);
    assert_eq!(point.pressure, 0.0);
}
