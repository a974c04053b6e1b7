use crate::geometry::{self, CapStyle, JoinStyle, Path, build_path};
use crate::layer::LayerId;
use egui::{Color32, Pos2, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StrokeId(Uuid);

impl StrokeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StrokeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StrokeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One resolved pointer sample. Pressure defaults to 1.0 when the input
/// device does not report it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputPoint {
    pub pos: Pos2,
    pub pressure: f32,
    pub timestamp_ms: u64,
}

impl InputPoint {
    pub fn new(pos: Pos2) -> Self {
        Self {
            pos,
            pressure: 1.0,
            timestamp_ms: 0,
        }
    }

    pub fn with_pressure(mut self, pressure: f32) -> Self {
        self.pressure = pressure.clamp(0.0, 1.0);
        self
    }

    pub fn with_timestamp(mut self, timestamp_ms: u64) -> Self {
        self.timestamp_ms = timestamp_ms;
        self
    }
}

/// Paint parameters for new strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub color: Color32,
    pub width: f32,
    pub opacity: f32,
    pub cap: CapStyle,
    pub join: JoinStyle,
    pub is_eraser: bool,
}

impl Paint {
    pub fn brush(color: Color32, width: f32, opacity: f32) -> Self {
        Self {
            color,
            width: width.max(0.1),
            opacity: opacity.clamp(0.0, 1.0),
            cap: CapStyle::Round,
            join: JoinStyle::Round,
            is_eraser: false,
        }
    }

    /// Erasers carry a clear composite semantic rather than a visible color.
    pub fn eraser(width: f32, opacity: f32) -> Self {
        Self {
            is_eraser: true,
            ..Self::brush(Color32::TRANSPARENT, width, opacity)
        }
    }
}

/// A committed freehand stroke. Immutable after commit except for the fill
/// tool recoloring it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    /// Owning layer, by id reference. The nil id means "not yet committed".
    layer_id: LayerId,
    points: Vec<InputPoint>,
    path: Path,
    color: Color32,
    width: f32,
    opacity: f32,
    cap: CapStyle,
    join: JoinStyle,
    is_eraser: bool,
    is_filled: bool,
    /// Selection mask baked in at commit time; never reevaluated later.
    clip_mask: Option<Path>,
}

impl Stroke {
    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn layer_id(&self) -> LayerId {
        self.layer_id
    }

    pub fn points(&self) -> &[InputPoint] {
        &self.points
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn cap(&self) -> CapStyle {
        self.cap
    }

    pub fn join(&self) -> JoinStyle {
        self.join
    }

    pub fn is_eraser(&self) -> bool {
        self.is_eraser
    }

    pub fn is_filled(&self) -> bool {
        self.is_filled
    }

    pub fn clip_mask(&self) -> Option<&Path> {
        self.clip_mask.as_ref()
    }

    /// The one mutation a committed stroke supports (fill tool).
    pub fn recolor(&mut self, color: Color32) {
        self.color = color;
    }

    pub(crate) fn set_layer(&mut self, layer_id: LayerId) {
        self.layer_id = layer_id;
    }

    pub(crate) fn set_clip_mask(&mut self, mask: Option<Path>) {
        self.clip_mask = mask;
    }

    /// Average of the input samples; anchor for clone offsets and the clone
    /// crosshair.
    pub fn centroid(&self) -> Pos2 {
        if self.points.is_empty() {
            return Pos2::ZERO;
        }
        let sum = self
            .points
            .iter()
            .fold(Vec2::ZERO, |acc, p| acc + p.pos.to_vec2());
        (sum / self.points.len() as f32).to_pos2()
    }

    /// Closed perimeter of the painted area: the outlined band for stroked
    /// paths, the path itself for filled ones.
    pub fn mask_outline(&self) -> Path {
        if self.is_filled {
            self.path.clone()
        } else {
            geometry::outline(&self.path, self.width, self.cap, self.join)
        }
    }

    /// Deep copy with a fresh identity, used by layer duplication.
    pub(crate) fn duplicated(&self) -> Self {
        Self {
            id: StrokeId::new(),
            ..self.clone()
        }
    }

    /// Copy with every point shifted by `offset` (clone tool stamp).
    pub fn translated(&self, offset: Vec2) -> Self {
        self.rebuilt(|p| p + offset)
    }

    /// Copy mirrored about the vertical line `x = axis_x`.
    pub fn mirrored_x(&self, axis_x: f32) -> Self {
        self.rebuilt(|p| Pos2::new(2.0 * axis_x - p.x, p.y))
    }

    /// Copy mirrored about the horizontal line `y = axis_y`.
    pub fn mirrored_y(&self, axis_y: f32) -> Self {
        self.rebuilt(|p| Pos2::new(p.x, 2.0 * axis_y - p.y))
    }

    /// Copy rotated by `angle` radians about `origin`.
    pub fn rotated_about(&self, origin: Pos2, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        self.rebuilt(|p| {
            let d = p - origin;
            Pos2::new(
                origin.x + d.x * cos - d.y * sin,
                origin.y + d.x * sin + d.y * cos,
            )
        })
    }

    fn rebuilt(&self, f: impl Fn(Pos2) -> Pos2) -> Self {
        let points: Vec<InputPoint> = self
            .points
            .iter()
            .map(|p| InputPoint {
                pos: f(p.pos),
                ..*p
            })
            .collect();
        let path = build_path(&points);
        Self {
            id: StrokeId::new(),
            points,
            path,
            clip_mask: None,
            ..self.clone()
        }
    }
}

/// Owns the in-progress stroke. `Idle -> Active -> Idle`; `end` hands the
/// finished stroke to the caller, which decides whether and where to commit.
#[derive(Debug, Clone, Default)]
pub struct StrokeBuilder {
    points: Vec<InputPoint>,
    path: Path,
    paint: Option<Paint>,
    smoothing: f32,
}

impl StrokeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Neighbor-average smoothing strength (`0..=100`) applied to the
    /// buffered samples when the stroke finishes. 0 leaves the midpoint
    /// quadratics as the only smoothing.
    pub fn set_smoothing(&mut self, strength: f32) {
        self.smoothing = strength.clamp(0.0, 100.0);
    }

    pub fn is_active(&self) -> bool {
        self.paint.is_some()
    }

    /// Begin a stroke. No-op while a stroke is already active; callers must
    /// `end` (or `cancel`) first.
    pub fn start(&mut self, point: InputPoint, paint: Paint) {
        if self.is_active() {
            debug!("stroke builder already active; ignoring start");
            return;
        }
        self.points.clear();
        self.points.push(point);
        self.path = Path::new();
        self.path.move_to(point.pos);
        self.paint = Some(paint);
    }

    /// Append a sample. Ignored while idle. The first sample after `start`
    /// only buffers; curve segments are emitted once two previous samples
    /// exist to anchor the midpoint quadratic.
    pub fn add_point(&mut self, point: InputPoint) {
        if !self.is_active() {
            debug!("add_point with no active stroke; ignoring");
            return;
        }
        self.points.push(point);
        if self.points.len() >= 3 {
            let prev = self.points[self.points.len() - 2].pos;
            self.path.quad_to(prev, prev.lerp(point.pos, 0.5));
        }
    }

    /// Finish the stroke. `None` when no stroke was active or nothing was
    /// buffered; otherwise the finalized stroke, with the path rebuilt from
    /// the full sample list so it matches [`build_path`] exactly.
    pub fn end(&mut self) -> Option<Stroke> {
        let paint = self.paint.take()?;
        let mut points = std::mem::take(&mut self.points);
        self.path = Path::new();
        if points.is_empty() {
            return None;
        }
        if self.smoothing > 0.0 {
            points = geometry::smooth(&points, self.smoothing);
        }
        let path = build_path(&points);
        Some(Stroke {
            id: StrokeId::new(),
            layer_id: LayerId::nil(),
            points,
            path,
            color: paint.color,
            width: paint.width,
            opacity: paint.opacity,
            cap: paint.cap,
            join: paint.join,
            is_eraser: paint.is_eraser,
            is_filled: false,
            clip_mask: None,
        })
    }

    /// Abandon the in-progress stroke without producing anything.
    pub fn cancel(&mut self) {
        self.paint = None;
        self.points.clear();
        self.path = Path::new();
    }

    /// Buffered samples, for live preview.
    pub fn points(&self) -> &[InputPoint] {
        &self.points
    }

    /// Live preview path while a stroke is active.
    pub fn live_path(&self) -> Option<&Path> {
        self.is_active().then_some(&self.path)
    }

    pub fn paint(&self) -> Option<&Paint> {
        self.paint.as_ref()
    }

    /// Mutable paint while active; smudge and blur retint the live stroke
    /// through this.
    pub fn paint_mut(&mut self) -> Option<&mut Paint> {
        self.paint.as_mut()
    }
}
