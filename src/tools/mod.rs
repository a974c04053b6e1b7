use crate::document::Document;
use crate::event::{EngineEvent, FeedbackBus};
use crate::geometry::Path;
use crate::history::History;
use crate::selection::Selection;
use crate::stroke::{InputPoint, Paint, Stroke};
use crate::symmetry::SymmetryState;
use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

mod blur;
mod clone;
mod draw;
mod eyedropper;
mod fill;
mod select;
mod smudge;

pub use blur::BlurTool;
pub use clone::CloneTool;
pub use draw::DrawTool;
pub use eyedropper::EyedropperTool;
pub use fill::FillTool;
pub use select::SelectTool;
pub use smudge::SmudgeTool;

/// Brush parameters shared by the paint-producing tools. The color comes
/// from the session's primary color at stroke start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub width: f32,
    pub opacity: f32,
    /// Post-stroke neighbor smoothing strength, `0..=100`.
    pub smoothing: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            width: 8.0,
            opacity: 1.0,
            smoothing: 0.0,
        }
    }
}

/// The in-progress stroke a tool exposes for live preview.
#[derive(Debug, Clone, Copy)]
pub struct LiveStroke<'a> {
    pub path: &'a Path,
    pub paint: &'a Paint,
}

/// Everything a tool may touch while handling a pointer event. Borrowed
/// from the session per event; tools never hold onto canvas state.
pub struct ToolCtx<'a> {
    pub doc: &'a mut Document,
    pub selection: &'a mut Selection,
    pub history: &'a mut History,
    pub symmetry: &'a SymmetryState,
    pub brush: &'a BrushSettings,
    pub primary_color: &'a mut Color32,
    pub events: &'a FeedbackBus,
}

impl ToolCtx<'_> {
    /// Gate shared by every stroke-producing tool start: inside the
    /// selection mask and the active layer accepts strokes.
    pub fn can_start_at(&self, pos: Pos2) -> bool {
        self.selection.contains(pos) && self.doc.can_draw()
    }

    /// Commit a finished stroke plus its symmetry siblings atomically:
    /// one layer append batch, one history entry, one feedback event.
    pub fn commit_with_symmetry(&mut self, stroke: Stroke) {
        let mut batch = Vec::with_capacity(4);
        batch.extend(self.symmetry.siblings(&stroke));
        batch.insert(0, stroke);
        self.commit_batch(batch);
    }

    /// Commit a single stroke with no symmetry expansion (clone stamps).
    pub fn commit_single(&mut self, stroke: Stroke) {
        self.commit_batch(vec![stroke]);
    }

    fn commit_batch(&mut self, batch: Vec<Stroke>) {
        let layer = self.doc.active_layer_id();
        let count = batch.len();
        for mut stroke in batch {
            self.bake_clip(&mut stroke);
            if !self.doc.commit_stroke(stroke) {
                return;
            }
        }
        // Mutation first, derived state next, history last.
        self.history.save_state(self.doc.layers(), self.selection);
        self.events.emit(EngineEvent::StrokeCommitted { layer, count });
    }

    /// Bake the active selection into the stroke as its clip mask. The mask
    /// is frozen at commit time and never reevaluated.
    fn bake_clip(&self, stroke: &mut Stroke) {
        if !self.selection.is_active() {
            return;
        }
        let mask = self
            .selection
            .mask()
            .cloned()
            .or_else(|| self.selection.rect().map(Path::from_rect));
        stroke.set_clip_mask(mask);
    }
}

/// Identifies a tool for switching and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolKind {
    Brush,
    Eraser,
    Select,
    Fill,
    Eyedropper,
    Smudge,
    Blur,
    Clone,
}

/// Tool behavior over the shared pointer lifecycle. Implementations keep
/// their own per-gesture state machines isolated from the draw pipeline.
pub trait ToolEffect {
    fn name(&self) -> &'static str;

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>);

    fn on_move(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>);

    fn on_end(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>);

    /// Abandon any in-progress gesture without committing.
    fn cancel(&mut self) {}

    /// In-progress stroke for the frame view, if the tool paints.
    fn live_stroke(&self) -> Option<LiveStroke<'_>> {
        None
    }
}

/// All available tools as an enum, avoiding `Box<dyn Tool>` in the pointer
/// hot path.
#[derive(Debug, Clone)]
pub enum ToolType {
    Brush(DrawTool),
    Eraser(DrawTool),
    Select(SelectTool),
    Fill(FillTool),
    Eyedropper(EyedropperTool),
    Smudge(SmudgeTool),
    Blur(BlurTool),
    Clone(CloneTool),
}

impl ToolType {
    pub fn new(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Brush => Self::Brush(DrawTool::brush()),
            ToolKind::Eraser => Self::Eraser(DrawTool::eraser()),
            ToolKind::Select => Self::Select(SelectTool::new()),
            ToolKind::Fill => Self::Fill(FillTool::new()),
            ToolKind::Eyedropper => Self::Eyedropper(EyedropperTool::new()),
            ToolKind::Smudge => Self::Smudge(SmudgeTool::new()),
            ToolKind::Blur => Self::Blur(BlurTool::new()),
            ToolKind::Clone => Self::Clone(CloneTool::new()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Brush(_) => ToolKind::Brush,
            Self::Eraser(_) => ToolKind::Eraser,
            Self::Select(_) => ToolKind::Select,
            Self::Fill(_) => ToolKind::Fill,
            Self::Eyedropper(_) => ToolKind::Eyedropper,
            Self::Smudge(_) => ToolKind::Smudge,
            Self::Blur(_) => ToolKind::Blur,
            Self::Clone(_) => ToolKind::Clone,
        }
    }

    /// Rectangle being dragged out by the selection tool, for overlays.
    pub fn selection_preview(&self) -> Option<Rect> {
        match self {
            Self::Select(tool) => tool.preview_rect(),
            _ => None,
        }
    }

    /// Clone source marker (outline + centroid crosshair), for overlays.
    pub fn clone_overlay(&self) -> Option<(&Path, Pos2)> {
        match self {
            Self::Clone(tool) => tool.source_overlay(),
            _ => None,
        }
    }
}

impl ToolEffect for ToolType {
    fn name(&self) -> &'static str {
        match self {
            Self::Brush(tool) | Self::Eraser(tool) => tool.name(),
            Self::Select(tool) => tool.name(),
            Self::Fill(tool) => tool.name(),
            Self::Eyedropper(tool) => tool.name(),
            Self::Smudge(tool) => tool.name(),
            Self::Blur(tool) => tool.name(),
            Self::Clone(tool) => tool.name(),
        }
    }

    fn on_start(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        match self {
            Self::Brush(tool) | Self::Eraser(tool) => tool.on_start(point, ctx),
            Self::Select(tool) => tool.on_start(point, ctx),
            Self::Fill(tool) => tool.on_start(point, ctx),
            Self::Eyedropper(tool) => tool.on_start(point, ctx),
            Self::Smudge(tool) => tool.on_start(point, ctx),
            Self::Blur(tool) => tool.on_start(point, ctx),
            Self::Clone(tool) => tool.on_start(point, ctx),
        }
    }

    fn on_move(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        match self {
            Self::Brush(tool) | Self::Eraser(tool) => tool.on_move(point, ctx),
            Self::Select(tool) => tool.on_move(point, ctx),
            Self::Fill(tool) => tool.on_move(point, ctx),
            Self::Eyedropper(tool) => tool.on_move(point, ctx),
            Self::Smudge(tool) => tool.on_move(point, ctx),
            Self::Blur(tool) => tool.on_move(point, ctx),
            Self::Clone(tool) => tool.on_move(point, ctx),
        }
    }

    fn on_end(&mut self, point: InputPoint, ctx: &mut ToolCtx<'_>) {
        match self {
            Self::Brush(tool) | Self::Eraser(tool) => tool.on_end(point, ctx),
            Self::Select(tool) => tool.on_end(point, ctx),
            Self::Fill(tool) => tool.on_end(point, ctx),
            Self::Eyedropper(tool) => tool.on_end(point, ctx),
            Self::Smudge(tool) => tool.on_end(point, ctx),
            Self::Blur(tool) => tool.on_end(point, ctx),
            Self::Clone(tool) => tool.on_end(point, ctx),
        }
    }

    fn cancel(&mut self) {
        match self {
            Self::Brush(tool) | Self::Eraser(tool) => tool.cancel(),
            Self::Select(tool) => tool.cancel(),
            Self::Fill(tool) => tool.cancel(),
            Self::Eyedropper(tool) => tool.cancel(),
            Self::Smudge(tool) => tool.cancel(),
            Self::Blur(tool) => tool.cancel(),
            Self::Clone(tool) => tool.cancel(),
        }
    }

    fn live_stroke(&self) -> Option<LiveStroke<'_>> {
        match self {
            Self::Brush(tool) | Self::Eraser(tool) => tool.live_stroke(),
            Self::Smudge(tool) => tool.live_stroke(),
            Self::Blur(tool) => tool.live_stroke(),
            _ => None,
        }
    }
}
