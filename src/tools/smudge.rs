use super::{LiveStroke, ToolCtx, ToolEffect};
use crate::stroke::{InputPoint, Paint, StrokeBuilder};
use egui::Color32;
use std::collections::VecDeque;

/// Rolling sample window for the smudge color drag.
const COLOR_BUFFER_CAP: usize = 5;

/// Drags color along the stroke: every move samples the canvas under the
/// pointer into a rolling buffer and paints with the most recent entry.
#[derive(Debug, Clone, Default)]
pub struct SmudgeTool {
    builder: StrokeBuilder,
    colors: VecDeque<Color32>,
}

impl SmudgeTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_color(&mut self, color: Color32) -> Color32 {
        self.colors.push_back(color);
        while self.colors.len() > COLOR_BUFFER_CAP {
            self.colors.pop_front();
        }
        // The buffer exists to approximate a directional blend, but only
        // the newest entry is ever painted; matching app behavior.
        *self.colors.back().unwrap_or(&color)
    }
}

impl ToolEffect for SmudgeTool {
    fn name(&self) -> &'static str {
        "Smudge"
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !ctx.can_start_at(point.pos) {
            return;
        }
        self.colors.clear();
        let seed = self.push_color(ctx.doc.sample_color_at(point.pos));
        self.builder.start(
            point,
            Paint::brush(seed, ctx.brush.width, ctx.brush.opacity),
        );
    }

    fn on_move(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !self.builder.is_active() {
            return;
        }
        let sampled = ctx.doc.sample_color_at(point.pos);
        let current = self.push_color(sampled);
        if let Some(paint) = self.builder.paint_mut() {
            paint.color = current;
        }
        self.builder.add_point(point);
    }

    fn on_end(&mut self, _point: InputPoint, ctx: &mut ToolCtx<'_>) {
        self.colors.clear();
        if let Some(stroke) = self.builder.end() {
            ctx.commit_with_symmetry(stroke);
        }
    }

    fn cancel(&mut self) {
        self.colors.clear();
        self.builder.cancel();
    }

    fn live_stroke(&self) -> Option<LiveStroke<'_>> {
        Some(LiveStroke {
            path: self.builder.live_path()?,
            paint: self.builder.paint()?,
        })
    }
}
