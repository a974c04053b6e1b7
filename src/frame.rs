use crate::geometry::Path;
use crate::layer::Layer;
use crate::symmetry::SymmetryMode;
use crate::tools::LiveStroke;
use egui::{Pos2, Rect};

/// Indicator the renderer draws on top of the composited layers.
#[derive(Debug, Clone, Copy)]
pub enum Overlay<'a> {
    /// Dashed bound of the committed selection.
    SelectionRect(Rect),
    /// Dashed outline of a selected stroke.
    SelectionOutline(&'a Path),
    /// Rectangle currently being dragged out by the selection tool.
    SelectionDrag(Rect),
    /// Mirror/rotation axis marker.
    SymmetryAxis { origin: Pos2, mode: SymmetryMode },
    /// Armed clone source: dashed outline plus centroid crosshair.
    CloneSource { outline: &'a Path, crosshair: Pos2 },
}

/// Read-only snapshot handed to the external renderer once per frame:
/// visible layers bottom to top, the in-progress stroke, and overlay
/// indicators. The engine never rasterizes any of it.
#[derive(Debug)]
pub struct FrameView<'a> {
    pub layers: Vec<&'a Layer>,
    pub live_stroke: Option<LiveStroke<'a>>,
    pub overlays: Vec<Overlay<'a>>,
}
