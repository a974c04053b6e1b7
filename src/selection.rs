use crate::geometry::Path;
use crate::geometry::hit_testing::{STROKE_BASE_PADDING, sample_bounds};
use crate::stroke::{Stroke, StrokeId};
use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

/// The region constraining tool operations: a rectangle, or a traced stroke
/// outline. No selection means every tool operates canvas-wide.
///
/// When a stroke is selected, the authoritative mask is the outlined
/// geometry; the rectangle is only a cached bound for quick pre-checks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    rect: Option<Rect>,
    stroke_id: Option<StrokeId>,
    /// Derived from the selected stroke; rebuilt on restore, not persisted.
    #[serde(skip)]
    mask: Option<Path>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    /// Rectangle selection. The rect is normalized by construction
    /// (`Rect::from_two_pos` at the call sites), so width/height are
    /// non-negative regardless of drag direction.
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            rect: Some(rect),
            stroke_id: None,
            mask: None,
        }
    }

    /// Object selection: mask is the stroke's painted outline, bound padded
    /// by `max(width/2, 5)`.
    pub fn from_stroke(stroke: &Stroke) -> Self {
        let padding = (stroke.width() * 0.5).max(STROKE_BASE_PADDING);
        let bounds = sample_bounds(stroke);
        let rect = if bounds == Rect::NOTHING {
            Rect::ZERO
        } else {
            bounds.expand(padding)
        };
        Self {
            rect: Some(rect),
            stroke_id: Some(stroke.id()),
            mask: Some(stroke.mask_outline()),
        }
    }

    pub fn is_active(&self) -> bool {
        self.rect.is_some()
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn stroke_id(&self) -> Option<StrokeId> {
        self.stroke_id
    }

    pub fn mask(&self) -> Option<&Path> {
        self.mask.as_ref()
    }

    /// Containment test gating every tool start. True unconditionally when
    /// nothing is selected; exact polygon containment when a stroke mask
    /// exists; bounding-rectangle containment otherwise.
    pub fn contains(&self, pos: Pos2) -> bool {
        let Some(rect) = self.rect else {
            return true;
        };
        match &self.mask {
            Some(mask) => mask.contains(pos),
            None => rect.contains(pos),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::none();
    }

    /// Rebuild the derived mask after a restore, from the stroke the id
    /// still refers to. Clears the stroke reference if the stroke is gone.
    pub(crate) fn refresh_mask(&mut self, find: impl Fn(StrokeId) -> Option<Path>) {
        match self.stroke_id {
            Some(id) => match find(id) {
                Some(outline) => self.mask = Some(outline),
                None => {
                    self.stroke_id = None;
                    self.mask = None;
                }
            },
            None => self.mask = None,
        }
    }
}
