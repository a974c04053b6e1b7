use crate::geometry::hit_testing::{HIT_TOLERANCE, hits_stroke};
use crate::layer::{BlendMode, Layer, LayerId};
use crate::stroke::{Stroke, StrokeId};
use egui::{Color32, Pos2, Rect, Vec2};
use log::debug;

/// The layer store: the ordered stack of layers (index 0 = bottom), the
/// active-layer pointer, and the canvas extent. All structural mutation of
/// the canvas goes through here.
///
/// Invariant: the stack is never empty.
#[derive(Debug, Clone)]
pub struct Document {
    layers: Vec<Layer>,
    active: LayerId,
    dimensions: Vec2,
    background: Color32,
}

impl Document {
    pub fn new(dimensions: Vec2) -> Self {
        let base = Layer::new("Layer 1", Rect::from_min_size(Pos2::ZERO, dimensions));
        let active = base.id;
        Self {
            layers: vec![base],
            active,
            dimensions,
            background: Color32::WHITE,
        }
    }

    /// Rebuild a document from restored parts. Used by the persistence
    /// boundary; rejects an empty layer list before it gets here.
    pub(crate) fn from_parts(layers: Vec<Layer>, dimensions: Vec2) -> Self {
        debug_assert!(!layers.is_empty());
        let active = layers.last().map(|l| l.id).unwrap_or_else(LayerId::nil);
        Self {
            layers,
            active,
            dimensions,
            background: Color32::WHITE,
        }
    }

    pub fn dimensions(&self) -> Vec2 {
        self.dimensions
    }

    pub fn center(&self) -> Pos2 {
        (self.dimensions * 0.5).to_pos2()
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn active_layer_id(&self) -> LayerId {
        self.active
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layer(self.active)
    }

    pub fn active_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layer_mut(self.active)
    }

    pub fn set_active(&mut self, id: LayerId) -> bool {
        if self.layer(id).is_none() {
            return false;
        }
        self.active = id;
        true
    }

    /// Whether a draw start would be accepted right now.
    pub fn can_draw(&self) -> bool {
        self.active_layer().is_some_and(Layer::accepts_strokes)
    }

    /// Insert a new layer at `position` (appended on top when `None`),
    /// named `Layer {count+1}`, fully opaque, normal blend, visible and
    /// unlocked. Becomes active if no active layer existed.
    pub fn add_layer(&mut self, position: Option<usize>) -> LayerId {
        let name = format!("Layer {}", self.layers.len() + 1);
        let layer = Layer::new(&name, Rect::from_min_size(Pos2::ZERO, self.dimensions));
        let id = layer.id;
        let index = position.unwrap_or(self.layers.len()).min(self.layers.len());
        self.layers.insert(index, layer);
        if self.layer(self.active).is_none() {
            self.active = id;
        }
        id
    }

    /// Remove a layer. Refused for the last remaining layer and for unknown
    /// ids. When the active layer is removed, activation falls to the layer
    /// below it (`max(0, index - 1)`).
    pub fn delete_layer(&mut self, id: LayerId) -> bool {
        if self.layers.len() <= 1 {
            debug!("refusing to delete the last layer");
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.layers.remove(index);
        if self.active == id {
            self.active = self.layers[index.saturating_sub(1)].id;
        }
        true
    }

    /// Move a layer to `new_index` (clamped to the stack), preserving the
    /// relative order of the others.
    pub fn reorder_layer(&mut self, id: LayerId, new_index: usize) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let layer = self.layers.remove(index);
        let new_index = new_index.min(self.layers.len());
        self.layers.insert(new_index, layer);
        true
    }

    pub fn set_opacity(&mut self, id: LayerId, opacity: f32) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.opacity = opacity.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    pub fn set_blend_mode(&mut self, id: LayerId, mode: BlendMode) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.blend_mode = mode;
                true
            }
            None => false,
        }
    }

    pub fn set_visible(&mut self, id: LayerId, visible: bool) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.visible = visible;
                true
            }
            None => false,
        }
    }

    pub fn set_locked(&mut self, id: LayerId, locked: bool) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.locked = locked;
                true
            }
            None => false,
        }
    }

    pub fn set_name(&mut self, id: LayerId, name: &str) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.set_name(name.to_string());
                true
            }
            None => false,
        }
    }

    /// Deep-copy a layer (fresh stroke identities), inserted immediately
    /// above the source and named `"{name} Copy"`.
    pub fn duplicate_layer(&mut self, id: LayerId) -> Option<LayerId> {
        let index = self.index_of(id)?;
        let copy = self.layers[index].duplicated();
        let copy_id = copy.id;
        self.layers.insert(index + 1, copy);
        Some(copy_id)
    }

    /// Flatten a layer into the one below it: the lower layer keeps its own
    /// strokes first, then takes the upper layer's (paint order preserved),
    /// and the upper layer is removed. Refused for the bottom-most layer.
    pub fn merge_down(&mut self, id: LayerId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if index == 0 {
            debug!("refusing to merge the bottom layer down");
            return false;
        }
        let mut upper = self.layers.remove(index);
        let lower = &mut self.layers[index - 1];
        for stroke in upper.take_strokes() {
            lower.add_stroke(stroke);
        }
        if self.active == id {
            self.active = self.layers[index - 1].id;
        }
        true
    }

    /// Append a stroke to the active layer. Refused when the active layer
    /// is locked or hidden.
    pub fn commit_stroke(&mut self, stroke: Stroke) -> bool {
        if !self.can_draw() {
            debug!("active layer rejects strokes (locked or hidden)");
            return false;
        }
        if let Some(layer) = self.active_layer_mut() {
            layer.add_stroke(stroke);
            true
        } else {
            false
        }
    }

    /// Drop every stroke from every layer, keeping the layer structure.
    pub fn clear(&mut self) {
        for layer in &mut self.layers {
            layer.clear_strokes();
        }
    }

    pub fn find_stroke(&self, id: StrokeId) -> Option<&Stroke> {
        self.layers.iter().find_map(|l| l.stroke(id))
    }

    pub fn find_stroke_mut(&mut self, id: StrokeId) -> Option<&mut Stroke> {
        self.layers.iter_mut().find_map(|l| l.stroke_mut(id))
    }

    /// The shared tap lookup: visible layers top to bottom, strokes newest
    /// to oldest, first stroke whose padded bounds (expanded by `tolerance`)
    /// contain the point.
    pub fn top_stroke_at(
        &self,
        pos: Pos2,
        tolerance: f32,
        skip_erasers: bool,
    ) -> Option<&Stroke> {
        self.layers
            .iter()
            .rev()
            .filter(|layer| layer.visible)
            .flat_map(|layer| layer.strokes().iter().rev())
            .filter(|stroke| !(skip_erasers && stroke.is_eraser()))
            .find(|stroke| hits_stroke(stroke, pos, tolerance))
    }

    /// Color of the topmost non-eraser stroke under the point, else the
    /// canvas background.
    pub fn sample_color_at(&self, pos: Pos2) -> Color32 {
        self.top_stroke_at(pos, HIT_TOLERANCE, true)
            .map(Stroke::color)
            .unwrap_or(self.background)
    }

    /// Replace the whole layer stack (undo/redo restore). Keeps the active
    /// pointer when its layer survived, otherwise falls back to the top.
    pub(crate) fn restore_layers(&mut self, layers: Vec<Layer>) {
        debug_assert!(!layers.is_empty());
        self.layers = layers;
        if self.layer(self.active).is_none() {
            if let Some(top) = self.layers.last() {
                self.active = top.id;
            }
        }
    }
}
