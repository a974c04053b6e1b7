use super::{ToolCtx, ToolEffect};
use crate::event::EngineEvent;
use crate::geometry::hit_testing::HIT_TOLERANCE;
use crate::stroke::InputPoint;

/// Recolors the topmost stroke under the tap with the primary color — the
/// one mutation a committed stroke permits.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillTool;

impl FillTool {
    pub fn new() -> Self {
        Self
    }
}

impl ToolEffect for FillTool {
    fn name(&self) -> &'static str {
        "Fill"
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !ctx.selection.contains(point.pos) {
            return;
        }
        let target = ctx
            .doc
            .top_stroke_at(point.pos, HIT_TOLERANCE, false)
            .map(|stroke| stroke.id());
        let Some(id) = target else {
            ctx.events.emit(EngineEvent::NoTarget);
            return;
        };
        let color = *ctx.primary_color;
        if let Some(stroke) = ctx.doc.find_stroke_mut(id) {
            stroke.recolor(color);
        }
        ctx.history.save_state(ctx.doc.layers(), ctx.selection);
        ctx.events.emit(EngineEvent::StrokeRecolored { stroke: id });
    }

    fn on_move(&mut self, _point: InputPoint, _ctx: &mut ToolCtx<'_>) {}

    fn on_end(&mut self, _point: InputPoint, _ctx: &mut ToolCtx<'_>) {}
}
