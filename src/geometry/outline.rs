use super::{FLATTEN_TOLERANCE, Path};
use egui::{Pos2, Vec2, pos2, vec2};
use serde::{Deserialize, Serialize};

/// Stroke end-cap shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CapStyle {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke corner shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinStyle {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Angular step for sampling round caps and joins, radians.
const ARC_STEP: f32 = std::f32::consts::PI / 8.0;

/// Miter spikes longer than this multiple of the half-width fall back to a
/// bevel.
const MITER_LIMIT: f32 = 4.0;

/// Convert an open stroked path into the closed polygon of its painted area.
///
/// Open strokes have no fillable interior, so hit-testing and the dashed
/// selected-object border both need this expansion. The result is a single
/// closed contour; callers test containment with the nonzero winding rule,
/// which keeps self-overlapping joins reading as filled.
pub fn outline(path: &Path, stroke_width: f32, cap: CapStyle, join: JoinStyle) -> Path {
    let spine = path.flatten(FLATTEN_TOLERANCE);
    let half = (stroke_width * 0.5).max(0.5);

    match spine.len() {
        0 => Path::new(),
        // A dot: the painted area is the cap shape around the single sample.
        1 => dot_outline(spine[0], half, cap),
        _ => stroke_outline(&spine, half, cap, join),
    }
}

fn dot_outline(center: Pos2, half: f32, cap: CapStyle) -> Path {
    let mut path = Path::new();
    match cap {
        CapStyle::Butt | CapStyle::Round => {
            let mut angle = 0.0_f32;
            path.move_to(center + vec2(half, 0.0));
            while angle < std::f32::consts::TAU {
                angle += ARC_STEP;
                path.line_to(center + half * vec2(angle.cos(), angle.sin()));
            }
        }
        CapStyle::Square => {
            path.move_to(center + vec2(-half, -half));
            path.line_to(center + vec2(half, -half));
            path.line_to(center + vec2(half, half));
            path.line_to(center + vec2(-half, half));
            path.line_to(center + vec2(-half, -half));
        }
    }
    path
}

fn stroke_outline(spine: &[Pos2], half: f32, cap: CapStyle, join: JoinStyle) -> Path {
    let mut left: Vec<Pos2> = Vec::with_capacity(spine.len() * 2);
    let mut right: Vec<Pos2> = Vec::with_capacity(spine.len() * 2);

    let mut first_dir: Option<Vec2> = None;
    let mut prev: Option<(Vec2, Vec2)> = None; // (dir, normal) of the last segment
    for pair in spine.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let Some(dir) = direction(a, b) else {
            continue; // coincident samples
        };
        let normal = vec2(-dir.y, dir.x);
        first_dir.get_or_insert(dir);

        if let Some((_, prev_normal)) = prev {
            emit_join(&mut left, a, prev_normal, normal, half, join, 1.0);
            emit_join(&mut right, a, prev_normal, normal, half, join, -1.0);
        }
        left.push(a + normal * half);
        left.push(b + normal * half);
        right.push(a - normal * half);
        right.push(b - normal * half);
        prev = Some((dir, normal));
    }

    let (Some(first_dir), Some((last_dir, last_normal))) = (first_dir, prev) else {
        // Every sample coincided; degenerate to a dot.
        return dot_outline(spine[0], half, cap);
    };

    let start = spine[0];
    let end = spine[spine.len() - 1];
    let first_normal = vec2(-first_dir.y, first_dir.x);

    let mut polygon = Vec::with_capacity(left.len() + right.len() + 16);
    polygon.extend_from_slice(&left);
    // The end cap bulges along the last direction, the start cap backwards.
    emit_cap(&mut polygon, end, last_normal, last_dir, half, cap);
    polygon.extend(right.iter().rev());
    emit_cap(&mut polygon, start, -first_normal, -first_dir, half, cap);

    let mut path = Path::new();
    path.move_to(polygon[0]);
    for p in &polygon[1..] {
        path.line_to(*p);
    }
    path.line_to(polygon[0]);
    path
}

fn direction(a: Pos2, b: Pos2) -> Option<Vec2> {
    let d = b - a;
    let len = d.length();
    (len > f32::EPSILON).then(|| d / len)
}

/// Bridge the gap between two segment offsets at vertex `v`. `side` is +1
/// for the left offset polyline and -1 for the right.
fn emit_join(out: &mut Vec<Pos2>, v: Pos2, from: Vec2, to: Vec2, half: f32, join: JoinStyle, side: f32) {
    let from = from * side;
    let to = to * side;
    match join {
        JoinStyle::Bevel => {}
        JoinStyle::Round => {
            arc_between(out, v, from, to, half);
        }
        JoinStyle::Miter => {
            let bisector = from + to;
            let len = bisector.length();
            if len > f32::EPSILON {
                let m = bisector / len;
                let cos_half_angle = m.dot(from);
                if cos_half_angle > 1.0 / MITER_LIMIT {
                    out.push(v + m * (half / cos_half_angle));
                }
            }
        }
    }
}

/// Close one end of the band, walking from the `+normal` offset to the
/// `-normal` offset so the cap bulges along `forward`.
fn emit_cap(out: &mut Vec<Pos2>, tip: Pos2, normal: Vec2, forward: Vec2, half: f32, cap: CapStyle) {
    match cap {
        CapStyle::Butt => {}
        CapStyle::Round => {
            let a0 = normal.y.atan2(normal.x);
            // A half-turn either way connects the offsets; pick the one
            // whose midpoint faces `forward`.
            let midpoint = vec2(
                (a0 + std::f32::consts::FRAC_PI_2).cos(),
                (a0 + std::f32::consts::FRAC_PI_2).sin(),
            );
            let sweep = if midpoint.dot(forward) >= 0.0 {
                std::f32::consts::PI
            } else {
                -std::f32::consts::PI
            };
            let steps = (std::f32::consts::PI / ARC_STEP).ceil() as usize;
            for i in 1..steps {
                let angle = a0 + sweep * (i as f32 / steps as f32);
                out.push(tip + half * vec2(angle.cos(), angle.sin()));
            }
        }
        CapStyle::Square => {
            out.push(tip + (normal + forward) * half);
            out.push(tip + (-normal + forward) * half);
        }
    }
}

/// Append arc samples around `center` from direction `from` to direction
/// `to`, taking the shorter sweep.
fn arc_between(out: &mut Vec<Pos2>, center: Pos2, from: Vec2, to: Vec2, radius: f32) {
    let a0 = from.y.atan2(from.x);
    let a1 = to.y.atan2(to.x);
    let mut sweep = a1 - a0;
    while sweep > std::f32::consts::PI {
        sweep -= std::f32::consts::TAU;
    }
    while sweep < -std::f32::consts::PI {
        sweep += std::f32::consts::TAU;
    }
    let steps = (sweep.abs() / ARC_STEP).ceil().max(1.0) as usize;
    for i in 1..steps {
        let angle = a0 + sweep * (i as f32 / steps as f32);
        out.push(pos2(
            center.x + radius * angle.cos(),
            center.y + radius * angle.sin(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn horizontal_path() -> Path {
        let mut path = Path::new();
        path.move_to(pos2(0.0, 0.0));
        path.line_to(pos2(100.0, 0.0));
        path
    }

    #[test]
    fn outline_of_empty_path_is_empty() {
        assert!(outline(&Path::new(), 10.0, CapStyle::Round, JoinStyle::Round).is_empty());
    }

    #[test]
    fn outline_covers_the_painted_band() {
        let body = outline(&horizontal_path(), 10.0, CapStyle::Round, JoinStyle::Round);
        // On the spine and just inside the band.
        assert!(body.contains(pos2(50.0, 0.0)));
        assert!(body.contains(pos2(50.0, 4.0)));
        assert!(body.contains(pos2(50.0, -4.0)));
        // Outside the band.
        assert!(!body.contains(pos2(50.0, 8.0)));
        assert!(!body.contains(pos2(120.0, 0.0)));
    }

    #[test]
    fn round_cap_extends_past_endpoint() {
        let body = outline(&horizontal_path(), 10.0, CapStyle::Round, JoinStyle::Round);
        assert!(body.contains(pos2(103.0, 0.0)));
        let butt = outline(&horizontal_path(), 10.0, CapStyle::Butt, JoinStyle::Round);
        assert!(!butt.contains(pos2(103.0, 0.0)));
    }

    #[test]
    fn single_point_becomes_a_dot() {
        let mut path = Path::new();
        path.move_to(pos2(10.0, 10.0));
        let dot = outline(&path, 8.0, CapStyle::Round, JoinStyle::Round);
        assert!(dot.contains(pos2(10.0, 10.0)));
        assert!(dot.contains(pos2(12.5, 10.0)));
        assert!(!dot.contains(pos2(20.0, 10.0)));
    }

    #[test]
    fn corner_join_stays_filled() {
        let mut path = Path::new();
        path.move_to(pos2(0.0, 0.0));
        path.line_to(pos2(50.0, 0.0));
        path.line_to(pos2(50.0, 50.0));
        for join in [JoinStyle::Miter, JoinStyle::Round, JoinStyle::Bevel] {
            let body = outline(&path, 10.0, CapStyle::Butt, join);
            assert!(body.contains(pos2(48.0, 2.0)), "join {join:?}");
        }
    }
}
