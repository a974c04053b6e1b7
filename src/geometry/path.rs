use crate::error::ArtworkError;
use egui::{Pos2, Rect, Vec2, pos2};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Flattening tolerance used for hit-testing and outline generation, in
/// canvas pixels.
pub const FLATTEN_TOLERANCE: f32 = 0.25;

/// One command of a vector path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Pos2),
    LineTo(Pos2),
    QuadTo { ctrl: Pos2, to: Pos2 },
}

/// A vector path as a flat list of segments. Value type: every transform
/// returns a new path, so snapshots and duplicated layers never share
/// geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed rectangular path (rectangle selections baked as clip masks).
    pub fn from_rect(rect: Rect) -> Self {
        let mut path = Self::new();
        path.move_to(rect.left_top());
        path.line_to(rect.right_top());
        path.line_to(rect.right_bottom());
        path.line_to(rect.left_bottom());
        path.line_to(rect.left_top());
        path
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn move_to(&mut self, to: Pos2) {
        self.segments.push(PathSegment::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Pos2) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn quad_to(&mut self, ctrl: Pos2, to: Pos2) {
        self.segments.push(PathSegment::QuadTo { ctrl, to });
    }

    /// Endpoint of the last segment, if any.
    pub fn end_point(&self) -> Option<Pos2> {
        self.segments.last().map(|seg| match seg {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => *p,
            PathSegment::QuadTo { to, .. } => *to,
        })
    }

    /// Conservative axis-aligned bounds. Quadratic curves are bounded by
    /// their control polygon, so including control points never
    /// under-reports.
    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::NOTHING;
        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => rect.extend_with(*p),
                PathSegment::QuadTo { ctrl, to } => {
                    rect.extend_with(*ctrl);
                    rect.extend_with(*to);
                }
            }
        }
        rect
    }

    pub fn translate(&self, delta: Vec2) -> Self {
        self.map_points(|p| p + delta)
    }

    /// Mirror horizontally about the vertical line `x = axis_x`.
    pub fn mirror_x(&self, axis_x: f32) -> Self {
        self.map_points(|p| pos2(2.0 * axis_x - p.x, p.y))
    }

    /// Mirror vertically about the horizontal line `y = axis_y`.
    pub fn mirror_y(&self, axis_y: f32) -> Self {
        self.map_points(|p| pos2(p.x, 2.0 * axis_y - p.y))
    }

    /// Rotate every point by `angle` radians about `origin`.
    pub fn rotate_about(&self, origin: Pos2, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.map_points(|p| {
            let d = p - origin;
            pos2(
                origin.x + d.x * cos - d.y * sin,
                origin.y + d.x * sin + d.y * cos,
            )
        })
    }

    fn map_points(&self, f: impl Fn(Pos2) -> Pos2) -> Self {
        let segments = self
            .segments
            .iter()
            .map(|seg| match seg {
                PathSegment::MoveTo(p) => PathSegment::MoveTo(f(*p)),
                PathSegment::LineTo(p) => PathSegment::LineTo(f(*p)),
                PathSegment::QuadTo { ctrl, to } => PathSegment::QuadTo {
                    ctrl: f(*ctrl),
                    to: f(*to),
                },
            })
            .collect();
        Self { segments }
    }

    /// Flatten to a polyline. Quadratics are subdivided until the maximum
    /// deviation from the chord stays under `tolerance`.
    pub fn flatten(&self, tolerance: f32) -> Vec<Pos2> {
        let mut points = Vec::new();
        let mut cursor: Option<Pos2> = None;
        for seg in &self.segments {
            match *seg {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                    push_dedup(&mut points, p);
                    cursor = Some(p);
                }
                PathSegment::QuadTo { ctrl, to } => {
                    let from = cursor.unwrap_or(ctrl);
                    let steps = quad_steps(from, ctrl, to, tolerance);
                    for i in 1..=steps {
                        let t = i as f32 / steps as f32;
                        push_dedup(&mut points, quad_point(from, ctrl, to, t));
                    }
                    cursor = Some(to);
                }
            }
        }
        points
    }

    /// Average of the flattened points. `None` for an empty path.
    pub fn centroid(&self) -> Option<Pos2> {
        let points = self.flatten(FLATTEN_TOLERANCE);
        if points.is_empty() {
            return None;
        }
        let sum = points
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        Some((sum / points.len() as f32).to_pos2())
    }

    /// Point containment treating the path as a closed polygon, using the
    /// nonzero winding rule so self-intersecting contours read as one filled
    /// perimeter.
    pub fn contains(&self, pos: Pos2) -> bool {
        let polygon = self.flatten(FLATTEN_TOLERANCE);
        polygon.len() >= 3 && winding_number(&polygon, pos) != 0
    }

    /// Compact command-string encoding (`M x y`, `L x y`, `Q cx cy x y`),
    /// the wire format the persistence layer stores paths in.
    pub fn to_description(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            if !out.is_empty() {
                out.push(' ');
            }
            match seg {
                PathSegment::MoveTo(p) => {
                    out.push_str(&format!("M {} {}", p.x, p.y));
                }
                PathSegment::LineTo(p) => {
                    out.push_str(&format!("L {} {}", p.x, p.y));
                }
                PathSegment::QuadTo { ctrl, to } => {
                    out.push_str(&format!("Q {} {} {} {}", ctrl.x, ctrl.y, to.x, to.y));
                }
            }
        }
        out
    }

    /// Parse a description produced by [`Path::to_description`].
    pub fn parse(description: &str) -> Result<Self, ArtworkError> {
        let mut tokens = description.split_whitespace().peekable();
        let mut path = Path::new();
        while let Some(cmd) = tokens.next() {
            match cmd {
                "M" => {
                    let p = take_point(&mut tokens)?;
                    path.move_to(p);
                }
                "L" => {
                    let p = take_point(&mut tokens)?;
                    path.line_to(p);
                }
                "Q" => {
                    let ctrl = take_point(&mut tokens)?;
                    let to = take_point(&mut tokens)?;
                    path.quad_to(ctrl, to);
                }
                other => {
                    return Err(ArtworkError::PathParse(format!(
                        "unknown command {other:?}"
                    )));
                }
            }
        }
        Ok(path)
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_description())
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let description = String::deserialize(deserializer)?;
        Path::parse(&description).map_err(D::Error::custom)
    }
}

fn take_point<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<Pos2, ArtworkError> {
    let x = take_number(tokens)?;
    let y = take_number(tokens)?;
    Ok(pos2(x, y))
}

fn take_number<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
) -> Result<f32, ArtworkError> {
    let token = tokens
        .next()
        .ok_or_else(|| ArtworkError::PathParse("truncated description".into()))?;
    token
        .parse::<f32>()
        .map_err(|_| ArtworkError::PathParse(format!("bad number {token:?}")))
}

fn push_dedup(points: &mut Vec<Pos2>, p: Pos2) {
    if points.last() != Some(&p) {
        points.push(p);
    }
}

fn quad_point(from: Pos2, ctrl: Pos2, to: Pos2, t: f32) -> Pos2 {
    let a = from.lerp(ctrl, t);
    let b = ctrl.lerp(to, t);
    a.lerp(b, t)
}

fn quad_steps(from: Pos2, ctrl: Pos2, to: Pos2, tolerance: f32) -> usize {
    // Max deviation of a quadratic from its chord is half the distance from
    // the control point to the chord midpoint.
    let chord_mid = from.lerp(to, 0.5);
    let deviation = 0.5 * (ctrl - chord_mid).length();
    let steps = (deviation / tolerance.max(0.01)).sqrt().ceil() as usize;
    steps.clamp(1, 24)
}

/// Winding number of `pos` with respect to the closed polygon `polygon`.
pub(crate) fn winding_number(polygon: &[Pos2], pos: Pos2) -> i32 {
    let mut winding = 0;
    for i in 0..polygon.len() {
        let a = polygon[i];
        let b = polygon[(i + 1) % polygon.len()];
        if a.y <= pos.y {
            if b.y > pos.y && cross(b - a, pos - a) > 0.0 {
                winding += 1;
            }
        } else if b.y <= pos.y && cross(b - a, pos - a) < 0.0 {
            winding -= 1;
        }
    }
    winding
}

fn cross(u: Vec2, v: Vec2) -> f32 {
    u.x * v.y - u.y * v.x
}
