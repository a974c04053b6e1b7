use super::{ToolCtx, ToolEffect};
use crate::event::EngineEvent;
use crate::geometry::Path;
use crate::geometry::hit_testing::HIT_TOLERANCE;
use crate::stroke::{InputPoint, StrokeId};
use egui::Pos2;
use log::debug;

#[derive(Debug, Clone)]
struct CloneSource {
    stroke: StrokeId,
    /// Source centroid; stamp offset is measured from here.
    anchor: Pos2,
    /// Cached outline for the dashed source marker.
    outline: Path,
}

/// Two-phase duplication: the first tap marks a source stroke, every later
/// tap stamps a translated copy onto the active layer.
#[derive(Debug, Clone, Default)]
pub struct CloneTool {
    source: Option<CloneSource>,
}

impl CloneTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashed outline + crosshair marker of the armed source.
    pub fn source_overlay(&self) -> Option<(&Path, Pos2)> {
        self.source.as_ref().map(|s| (&s.outline, s.anchor))
    }
}

impl ToolEffect for CloneTool {
    fn name(&self) -> &'static str {
        "Clone"
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        if !ctx.selection.contains(point.pos) {
            return;
        }
        let armed = self.source.as_ref().map(|s| (s.stroke, s.anchor));
        match armed {
            None => match ctx.doc.top_stroke_at(point.pos, HIT_TOLERANCE, false) {
                Some(stroke) => {
                    debug!("clone source set to {}", stroke.id());
                    self.source = Some(CloneSource {
                        stroke: stroke.id(),
                        anchor: stroke.centroid(),
                        outline: stroke.mask_outline(),
                    });
                    ctx.events
                        .emit(EngineEvent::CloneSourceSet { stroke: stroke.id() });
                }
                None => ctx.events.emit(EngineEvent::NoTarget),
            },
            Some((source_id, anchor)) => {
                if !ctx.doc.can_draw() {
                    return;
                }
                let Some(source) = ctx.doc.find_stroke(source_id) else {
                    // Source stroke was deleted (layer removal, clear, undo).
                    self.source = None;
                    ctx.events.emit(EngineEvent::NoTarget);
                    return;
                };
                let stamp = source.translated(point.pos - anchor);
                ctx.commit_single(stamp);
            }
        }
    }

    fn on_move(&mut self, _point: InputPoint, _ctx: &mut ToolCtx<'_>) {}

    fn on_end(&mut self, _point: InputPoint, _ctx: &mut ToolCtx<'_>) {}
}
