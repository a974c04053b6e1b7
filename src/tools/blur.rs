use super::{LiveStroke, ToolCtx, ToolEffect};
use crate::document::Document;
use crate::stroke::{InputPoint, Paint, StrokeBuilder};
use egui::{Color32, Pos2, vec2};

/// Samples per concentric ring.
const RING_SAMPLES: usize = 8;

/// Ring radii as multiples of the brush radius.
const RING_FACTORS: [f32; 3] = [0.5, 1.0, 1.5];

/// Opacity ceiling for blur strokes.
const MAX_BLUR_OPACITY: f32 = 0.3;

/// Softens the area under the pointer by painting the ring-averaged
/// neighborhood color at reduced opacity.
#[derive(Debug, Clone, Default)]
pub struct BlurTool {
    builder: StrokeBuilder,
}

impl BlurTool {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Average of the neighborhood colors around `pos`: three concentric rings
/// of 8 samples around the brush radius plus a double-weighted center
/// sample. Background-colored samples are excluded so the blur never drags
/// the canvas white into a stroke.
fn neighborhood_average(doc: &Document, pos: Pos2, brush_radius: f32) -> Color32 {
    let background = doc.background();
    let center = doc.sample_color_at(pos);
    let mut samples = Vec::with_capacity(2 + RING_FACTORS.len() * RING_SAMPLES);
    samples.push(center);
    samples.push(center);
    for factor in RING_FACTORS {
        let radius = brush_radius * factor;
        for i in 0..RING_SAMPLES {
            let angle = std::f32::consts::TAU * i as f32 / RING_SAMPLES as f32;
            let at = pos + radius * vec2(angle.cos(), angle.sin());
            samples.push(doc.sample_color_at(at));
        }
    }

    let mut sum = [0u32; 3];
    let mut count = 0u32;
    for color in samples {
        if color == background {
            continue;
        }
        sum[0] += u32::from(color.r());
        sum[1] += u32::from(color.g());
        sum[2] += u32::from(color.b());
        count += 1;
    }
    if count == 0 {
        return background;
    }
    Color32::from_rgb(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
}

impl ToolEffect for BlurTool {
    fn name(&self) -> &'static str {
        "Blur"
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !ctx.can_start_at(point.pos) {
            return;
        }
        let color = neighborhood_average(ctx.doc, point.pos, ctx.brush.width * 0.5);
        let opacity = (ctx.brush.opacity * MAX_BLUR_OPACITY).min(MAX_BLUR_OPACITY);
        self.builder
            .start(point, Paint::brush(color, ctx.brush.width, opacity));
    }

    fn on_move(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !self.builder.is_active() {
            return;
        }
        let color = neighborhood_average(ctx.doc, point.pos, ctx.brush.width * 0.5);
        if let Some(paint) = self.builder.paint_mut() {
            paint.color = color;
        }
        self.builder.add_point(point);
    }

    fn on_end(&mut self, _point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if let Some(stroke) = self.builder.end() {
            ctx.commit_with_symmetry(stroke);
        }
    }

    fn cancel(&mut self) {
        self.builder.cancel();
    }

    fn live_stroke(&self) -> Option<LiveStroke<'_>> {
        Some(LiveStroke {
            path: self.builder.live_path()?,
            paint: self.builder.paint()?,
        })
    }
}
