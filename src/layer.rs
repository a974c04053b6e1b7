use crate::stroke::{Stroke, StrokeId};
use egui::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerId(Uuid);

impl LayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The id carried by strokes that have not landed on a layer yet.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for LayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-layer composite modes understood by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

/// One layer of the canvas: an ordered, independently composited collection
/// of strokes. Paint order is append order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub opacity: f32,
    pub blend_mode: BlendMode,
    pub visible: bool,
    pub locked: bool,
    pub rect: Rect,
    strokes: Vec<Stroke>,
}

impl Layer {
    pub fn new(name: &str, rect: Rect) -> Self {
        Self {
            id: LayerId::new(),
            name: name.to_string(),
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
            visible: true,
            locked: false,
            rect,
            strokes: Vec::new(),
        }
    }

    /// Whether draw starts are accepted here. Locked or hidden layers
    /// silently reject new strokes.
    pub fn accepts_strokes(&self) -> bool {
        self.visible && !self.locked
    }

    /// Adds a stroke, re-pointing its layer reference to this layer.
    pub fn add_stroke(&mut self, mut stroke: Stroke) {
        stroke.set_layer(self.id);
        self.strokes.push(stroke);
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    pub fn stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.strokes.iter_mut().find(|s| s.id() == id)
    }

    pub fn clear_strokes(&mut self) {
        self.strokes.clear();
    }

    pub(crate) fn take_strokes(&mut self) -> Vec<Stroke> {
        std::mem::take(&mut self.strokes)
    }

    /// Deep copy with fresh identities: new layer id, `"{name} Copy"`, and
    /// every stroke's path re-owned under a fresh stroke id so edits to the
    /// duplicate never reach the original.
    pub fn duplicated(&self) -> Self {
        let mut copy = Self {
            id: LayerId::new(),
            name: format!("{} Copy", self.name),
            strokes: Vec::with_capacity(self.strokes.len()),
            ..self.clone()
        };
        for stroke in &self.strokes {
            copy.add_stroke(stroke.duplicated());
        }
        copy
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
