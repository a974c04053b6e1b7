use super::{ToolCtx, ToolEffect};
use crate::event::EngineEvent;
use crate::geometry::hit_testing::HIT_TOLERANCE;
use crate::selection::Selection;
use crate::stroke::InputPoint;
use egui::{Pos2, Rect};
use log::debug;

/// Drags smaller than this (each axis) are reinterpreted as a tap.
const TAP_DRAG_EPSILON: f32 = 5.0;

/// Rectangle/object selection. A drag defines a normalized rectangle; a tap
/// picks the topmost stroke under the pointer or clears the selection.
#[derive(Debug, Clone, Default)]
pub struct SelectTool {
    drag: Option<(Pos2, Pos2)>,
}

impl SelectTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rectangle being dragged out, for the overlay dashes.
    pub fn preview_rect(&self) -> Option<Rect> {
        self.drag
            .map(|(start, current)| Rect::from_two_pos(start, current))
    }
}

impl ToolEffect for SelectTool {
    fn name(&self) -> &'static str {
        "Select"
    }

    fn on_start(&mut self, point: InputPoint, _ctx: &mut ToolCtx<'_>) {
        self.drag = Some((point.pos, point.pos));
    }

    fn on_move(&mut self, point: InputPoint, _ctx: &mut ToolCtx<'_>) {
        if let Some((_, current)) = &mut self.drag {
            *current = point.pos;
        }
    }

    fn on_end(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        let Some((start, _)) = self.drag.take() else {
            return;
        };
        // from_two_pos normalizes, so drag direction never matters.
        let rect = Rect::from_two_pos(start, point.pos);
        if rect.width() < TAP_DRAG_EPSILON && rect.height() < TAP_DRAG_EPSILON {
            match ctx.doc.top_stroke_at(point.pos, HIT_TOLERANCE, false) {
                Some(stroke) => {
                    debug!("tap-selected stroke {}", stroke.id());
                    *ctx.selection = Selection::from_stroke(stroke);
                }
                None => ctx.selection.clear(),
            }
        } else {
            *ctx.selection = Selection::from_rect(rect);
        }
        ctx.history.save_state(ctx.doc.layers(), ctx.selection);
        ctx.events.emit(EngineEvent::SelectionChanged);
    }

    fn cancel(&mut self) {
        self.drag = None;
    }
}
