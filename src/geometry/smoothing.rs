use super::Path;
use crate::stroke::InputPoint;

/// Build the smoothed render path for an ordered point sequence.
///
/// The first point anchors the path; every subsequent point contributes a
/// quadratic whose control point is the *previous* sample and whose endpoint
/// is the midpoint between the previous and current sample. This midpoint
/// scheme flattens finger/pencil jitter without a full spline fit.
pub fn build_path(points: &[InputPoint]) -> Path {
    let mut path = Path::new();
    let Some(first) = points.first() else {
        return path;
    };
    path.move_to(first.pos);
    for pair in points.windows(2) {
        let prev = pair[0].pos;
        let current = pair[1].pos;
        path.quad_to(prev, prev.lerp(current, 0.5));
    }
    path
}

/// Blend interior points toward the average of their neighbors.
///
/// `strength` is a percentage in `0..=100`; 0 is a no-op and higher values
/// flatten sharp corners. First and last points are left untouched so the
/// stroke keeps its endpoints.
pub fn smooth(points: &[InputPoint], strength: f32) -> Vec<InputPoint> {
    let factor = (strength / 100.0).clamp(0.0, 1.0);
    if factor == 0.0 || points.len() < 3 {
        return points.to_vec();
    }
    let mut out = points.to_vec();
    for i in 1..points.len() - 1 {
        let average = points[i - 1].pos.lerp(points[i + 1].pos, 0.5);
        out[i].pos = points[i].pos.lerp(average, factor);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathSegment;
    use egui::pos2;

    fn pt(x: f32, y: f32) -> InputPoint {
        InputPoint::new(pos2(x, y))
    }

    #[test]
    fn empty_input_builds_empty_path() {
        assert!(build_path(&[]).is_empty());
    }

    #[test]
    fn path_uses_previous_point_as_control() {
        let path = build_path(&[pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0)]);
        let segments = path.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], PathSegment::MoveTo(pos2(0.0, 0.0)));
        assert_eq!(
            segments[1],
            PathSegment::QuadTo {
                ctrl: pos2(0.0, 0.0),
                to: pos2(5.0, 0.0),
            }
        );
        assert_eq!(
            segments[2],
            PathSegment::QuadTo {
                ctrl: pos2(10.0, 0.0),
                to: pos2(10.0, 5.0),
            }
        );
    }

    #[test]
    fn smooth_zero_strength_is_identity() {
        let points = vec![pt(0.0, 0.0), pt(4.0, 9.0), pt(8.0, 0.0)];
        assert_eq!(smooth(&points, 0.0), points);
    }

    #[test]
    fn smooth_keeps_endpoints_and_flattens_corners() {
        let points = vec![pt(0.0, 0.0), pt(5.0, 10.0), pt(10.0, 0.0)];
        let smoothed = smooth(&points, 100.0);
        assert_eq!(smoothed[0].pos, pos2(0.0, 0.0));
        assert_eq!(smoothed[2].pos, pos2(10.0, 0.0));
        // Full strength pulls the apex all the way to the neighbor average.
        assert_eq!(smoothed[1].pos, pos2(5.0, 0.0));
    }
}
