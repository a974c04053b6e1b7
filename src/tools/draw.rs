use super::{LiveStroke, ToolCtx, ToolEffect};
use crate::stroke::{InputPoint, Paint, StrokeBuilder};
use log::debug;

/// Freehand drawing. One struct serves both the brush and the eraser; the
/// eraser only differs in its clear-composite paint.
#[derive(Debug, Clone, Default)]
pub struct DrawTool {
    builder: StrokeBuilder,
    eraser: bool,
}

impl DrawTool {
    pub fn brush() -> Self {
        Self::default()
    }

    pub fn eraser() -> Self {
        Self {
            builder: StrokeBuilder::new(),
            eraser: true,
        }
    }
}

impl ToolEffect for DrawTool {
    fn name(&self) -> &'static str {
        if self.eraser { "Eraser" } else { "Brush" }
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !ctx.can_start_at(point.pos) {
            debug!("draw start rejected at {:?}", point.pos);
            return;
        }
        let paint = if self.eraser {
            Paint::eraser(ctx.brush.width, ctx.brush.opacity)
        } else {
            Paint::brush(*ctx.primary_color, ctx.brush.width, ctx.brush.opacity)
        };
        self.builder.set_smoothing(ctx.brush.smoothing);
        self.builder.start(point, paint);
    }

    fn on_move(&mut self, point: InputPoint, _ctx: &mut ToolCtx<'_>) {
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
