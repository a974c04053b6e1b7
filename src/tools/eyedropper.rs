use super::{ToolCtx, ToolEffect};
use crate::event::EngineEvent;
use crate::geometry::hit_testing::HIT_TOLERANCE;
use crate::stroke::InputPoint;

/// Picks the color of the topmost stroke under the tap into the session's
/// primary color. Not undoable: the primary color is not canvas state.
#[derive(Debug, Clone, Copy, Default)]
pub struct EyedropperTool;

impl EyedropperTool {
    pub fn new() -> Self {
        Self
    }
}

impl ToolEffect for EyedropperTool {
    fn name(&self) -> &'static str {
        "Eyedropper"
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !ctx.selection.contains(point.pos) {
            return;
        }
        match ctx.doc.top_stroke_at(point.pos, HIT_TOLERANCE, false) {
            Some(stroke) => {
                let color = stroke.color();
                *ctx.primary_color = color;
                ctx.events.emit(EngineEvent::ColorSampled { color });
            }
            None => ctx.events.emit(EngineEvent::NoTarget),
        }
    }

    fn on_move(&mut self, _point: InputPoint, _ctx: &mut ToolCtx<'_>) {}

    fn on_end(&mut self, _point: InputPoint, _ctx: &mut ToolCtx<'_>) {}
}
