use crate::stroke::Stroke;
use egui::{Pos2, Rect};

/// Minimum padding around a stroke's bounds, whatever its width.
pub const STROKE_BASE_PADDING: f32 = 5.0;

/// Extra slack for tap lookups (selection tap, fill, eyedropper, clone).
pub const HIT_TOLERANCE: f32 = 15.0;

/// Tight bounds of the input samples. The derived path ends at the midpoint
/// of the last two samples, so the sample list is the authoritative extent.
pub fn sample_bounds(stroke: &Stroke) -> Rect {
    let mut rect = Rect::NOTHING;
    for point in stroke.points() {
        rect.extend_with(point.pos);
    }
    rect
}

/// Axis-aligned bounds of the painted area: sample bounds padded by
/// `max(width/2, STROKE_BASE_PADDING)`.
pub fn painted_bounds(stroke: &Stroke) -> Rect {
    let bounds = sample_bounds(stroke);
    if bounds == Rect::NOTHING {
        return bounds;
    }
    bounds.expand((stroke.width() * 0.5).max(STROKE_BASE_PADDING))
}

/// Cheap pre-check used by every tap lookup: padded bounds expanded by
/// `tolerance` contain the point.
pub fn hits_stroke(stroke: &Stroke, pos: Pos2, tolerance: f32) -> bool {
    let bounds = painted_bounds(stroke);
    bounds != Rect::NOTHING && bounds.expand(tolerance).contains(pos)
}
