use crate::artwork::Artwork;
use crate::document::Document;
use crate::error::ArtworkResult;
use crate::event::{EngineEvent, FeedbackBus, FeedbackHandler};
use crate::frame::{FrameView, Overlay};
use crate::history::History;
use crate::input::TouchFrame;
use crate::input::gestures::{GestureClassifier, GestureConfig, GestureIntent};
use crate::layer::{BlendMode, LayerId};
use crate::selection::Selection;
use crate::settings::SessionSettings;
use crate::stroke::InputPoint;
use crate::symmetry::{SymmetryMode, SymmetryState};
use crate::tools::{BrushSettings, ToolCtx, ToolEffect, ToolKind, ToolType};
use egui::{Color32, Pos2, Vec2};
use log::debug;

/// One canvas editing session: the explicitly constructed owner of the
/// document, selection, history, active tool and symmetry state. All
/// mutation runs synchronously on the caller's thread, in the fixed order
/// apply → update derived state → push history.
#[derive(Debug)]
pub struct CanvasSession {
    settings: SessionSettings,
    classifier: GestureClassifier,
    doc: Document,
    selection: Selection,
    history: History,
    tool: ToolType,
    symmetry: SymmetryState,
    brush: BrushSettings,
    primary_color: Color32,
    events: FeedbackBus,
}

impl CanvasSession {
    pub fn new(settings: SessionSettings, dimensions: Vec2) -> Self {
        let doc = Document::new(dimensions);
        let selection = Selection::none();
        let mut history = History::new(settings.undo_capacity);
        history.initialize(doc.layers(), &selection);

        let gesture_config = GestureConfig {
            palm_size_threshold: settings.palm_rejection.size_threshold(),
            ..GestureConfig::default()
        };
        let symmetry = SymmetryState::new(doc.center());

        Self {
            settings,
            classifier: GestureClassifier::new(gesture_config, dimensions),
            doc,
            selection,
            history,
            tool: ToolType::new(ToolKind::Brush),
            symmetry,
            brush: BrushSettings::default(),
            primary_color: Color32::BLACK,
            events: FeedbackBus::new(),
        }
    }

    // --- accessors -------------------------------------------------------

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn classifier(&self) -> &GestureClassifier {
        &self.classifier
    }

    pub fn symmetry(&self) -> &SymmetryState {
        &self.symmetry
    }

    pub fn primary_color(&self) -> Color32 {
        self.primary_color
    }

    pub fn set_primary_color(&mut self, color: Color32) {
        self.primary_color = color;
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn set_brush_width(&mut self, width: f32) {
        self.brush.width = width.max(0.1);
    }

    pub fn set_brush_opacity(&mut self, opacity: f32) {
        self.brush.opacity = opacity.clamp(0.0, 1.0);
    }

    pub fn set_brush_smoothing(&mut self, strength: f32) {
        self.brush.smoothing = strength.clamp(0.0, 100.0);
    }

    pub fn subscribe_feedback(&self, handler: Box<dyn FeedbackHandler>) {
        self.events.subscribe(handler);
    }

    // --- tool + symmetry switching ---------------------------------------

    pub fn tool(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Switch tools, discarding the outgoing tool's transient state (clone
    /// sources, drag rects, in-progress strokes).
    pub fn set_tool(&mut self, kind: ToolKind) {
        if self.tool.kind() == kind {
            return;
        }
        self.tool.cancel();
        self.tool = ToolType::new(kind);
        self.events.emit(EngineEvent::ToolChanged);
    }

    pub fn set_symmetry_mode(&mut self, mode: SymmetryMode) {
        self.symmetry.mode = mode;
    }

    /// Move the symmetry axis origin; defaults to the canvas center.
    pub fn set_symmetry_origin(&mut self, origin: Pos2) {
        self.symmetry.origin = origin;
    }

    // --- pointer routing --------------------------------------------------

    pub fn pointer_down(&mut self, point: InputPoint) {
        let point = self.normalize(point);
        self.dispatch(|tool, ctx| tool.on_start(point, ctx));
    }

    pub fn pointer_move(&mut self, point: InputPoint) {
        let point = self.normalize(point);
        self.dispatch(|tool, ctx| tool.on_move(point, ctx));
    }

    pub fn pointer_up(&mut self, point: InputPoint) {
        let point = self.normalize(point);
        self.dispatch(|tool, ctx| tool.on_end(point, ctx));
    }

    /// Implicit cancellation: all pointers lifted abnormally or a competing
    /// gesture took over. Any in-progress stroke is dropped uncommitted.
    pub fn cancel_input(&mut self) {
        self.tool.cancel();
        self.events.emit(EngineEvent::StrokeCancelled);
    }

    fn normalize(&self, mut point: InputPoint) -> InputPoint {
        if !self.settings.pressure_sensitivity {
            point.pressure = 1.0;
        }
        point
    }

    fn dispatch(&mut self, f: impl FnOnce(&mut ToolType, &mut ToolCtx<'_>)) {
        let Self {
            doc,
            selection,
            history,
            symmetry,
            brush,
            primary_color,
            events,
            tool,
            ..
        } = self;
        let mut ctx = ToolCtx {
            doc,
            selection,
            history,
            symmetry,
            brush,
            primary_color,
            events,
        };
        f(tool, &mut ctx);
    }

    // --- gestures ---------------------------------------------------------

    pub fn classify(&self, frame: &TouchFrame) -> GestureIntent {
        self.classifier.classify(frame)
    }

    /// Service the intents the engine owns (history swipes, two-finger
    /// eyedropper). Returns `true` when the intent was consumed; draw,
    /// transform and fullscreen intents go back to the caller.
    pub fn handle_intent(&mut self, intent: GestureIntent) -> bool {
        match intent {
            GestureIntent::Undo => {
                self.undo();
                true
            }
            GestureIntent::Redo => {
                self.redo();
                true
            }
            GestureIntent::EyedropperAt { pos } => {
                let color = self.doc.sample_color_at(pos);
                self.primary_color = color;
                self.events.emit(EngineEvent::ColorSampled { color });
                true
            }
            _ => false,
        }
    }

    // --- history ----------------------------------------------------------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.history.undo() else {
            return false;
        };
        self.doc.restore_layers(entry.layers);
        self.selection = entry.selection;
        self.events.emit(EngineEvent::Undo);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.history.redo() else {
            return false;
        };
        self.doc.restore_layers(entry.layers);
        self.selection = entry.selection;
        self.events.emit(EngineEvent::Redo);
        true
    }

    // --- selection --------------------------------------------------------

    /// Clear the selection programmatically (toolbar button). Undoable like
    /// any other selection change.
    pub fn clear_selection(&mut self) {
        if !self.selection.is_active() {
            return;
        }
        self.selection.clear();
        self.history.save_state(self.doc.layers(), &self.selection);
        self.events.emit(EngineEvent::SelectionChanged);
    }

    // --- layer operations -------------------------------------------------
    //
    // Thin wrappers over the layer store that pair each successful mutation
    // with exactly one history snapshot and one feedback event.

    pub fn add_layer(&mut self, position: Option<usize>) -> LayerId {
        let id = self.doc.add_layer(position);
        self.save_history();
        self.events.emit(EngineEvent::LayerAdded { layer: id });
        id
    }

    pub fn delete_layer(&mut self, id: LayerId) -> bool {
        if !self.doc.delete_layer(id) {
            return false;
        }
        self.save_history();
        self.events.emit(EngineEvent::LayerRemoved { layer: id });
        true
    }

    pub fn reorder_layer(&mut self, id: LayerId, new_index: usize) -> bool {
        if !self.doc.reorder_layer(id, new_index) {
            return false;
        }
        self.save_history();
        self.events.emit(EngineEvent::LayerReordered {
            layer: id,
            index: new_index,
        });
        true
    }

    pub fn duplicate_layer(&mut self, id: LayerId) -> Option<LayerId> {
        let copy = self.doc.duplicate_layer(id)?;
        self.save_history();
        self.events.emit(EngineEvent::LayerAdded { layer: copy });
        Some(copy)
    }

    pub fn merge_down(&mut self, id: LayerId) -> bool {
        let Some(index) = self.doc.index_of(id) else {
            return false;
        };
        if !self.doc.merge_down(id) {
            return false;
        }
        let into = self.doc.layers()[index - 1].id;
        self.save_history();
        self.events.emit(EngineEvent::LayersMerged { into });
        true
    }

    pub fn set_layer_opacity(&mut self, id: LayerId, opacity: f32) -> bool {
        self.layer_mutation(|doc| doc.set_opacity(id, opacity))
    }

    pub fn set_layer_blend_mode(&mut self, id: LayerId, mode: BlendMode) -> bool {
        self.layer_mutation(|doc| doc.set_blend_mode(id, mode))
    }

    pub fn set_layer_visible(&mut self, id: LayerId, visible: bool) -> bool {
        self.layer_mutation(|doc| doc.set_visible(id, visible))
    }

    pub fn set_layer_locked(&mut self, id: LayerId, locked: bool) -> bool {
        self.layer_mutation(|doc| doc.set_locked(id, locked))
    }

    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> bool {
        self.layer_mutation(|doc| doc.set_name(id, name))
    }

    /// Not undoable: the active pointer is not part of the snapshot state.
    pub fn set_active_layer(&mut self, id: LayerId) -> bool {
        self.doc.set_active(id)
    }

    /// Drop every stroke on every layer.
    pub fn clear_canvas(&mut self) {
        self.doc.clear();
        self.save_history();
        debug!("canvas cleared");
    }

    fn layer_mutation(&mut self, f: impl FnOnce(&mut Document) -> bool) -> bool {
        if !f(&mut self.doc) {
            return false;
        }
        self.save_history();
        true
    }

    fn save_history(&mut self) {
        self.history.save_state(self.doc.layers(), &self.selection);
    }

    // --- renderer + persistence boundaries --------------------------------

    /// Assemble the per-frame view: visible layers bottom to top, the
    /// in-progress stroke, and overlay indicators.
    pub fn frame(&self) -> FrameView<'_> {
        let mut overlays = Vec::new();
        if let Some(mask) = self.selection.mask() {
            overlays.push(Overlay::SelectionOutline(mask));
        } else if let Some(rect) = self.selection.rect() {
            overlays.push(Overlay::SelectionRect(rect));
        }
        if let Some(rect) = self.tool.selection_preview() {
            overlays.push(Overlay::SelectionDrag(rect));
        }
        if self.symmetry.is_active() {
            overlays.push(Overlay::SymmetryAxis {
                origin: self.symmetry.origin,
                mode: self.symmetry.mode,
            });
        }
        if let Some((outline, crosshair)) = self.tool.clone_overlay() {
            overlays.push(Overlay::CloneSource { outline, crosshair });
        }

        FrameView {
            layers: self.doc.layers().iter().filter(|l| l.visible).collect(),
            live_stroke: self.tool.live_stroke(),
            overlays,
        }
    }

    /// Snapshot the canvas into the persistence exchange shape.
    pub fn artwork(&self, title: &str) -> Artwork {
        Artwork::capture(&self.doc, &self.selection, title)
    }

    /// Replace the canvas with restored artwork. History restarts from the
    /// restored state as its baseline.
    pub fn restore_artwork(&mut self, artwork: Artwork) -> ArtworkResult<()> {
        let (doc, selection) = artwork.restore()?;
        self.doc = doc;
        self.selection = selection;
        self.symmetry = SymmetryState::new(self.doc.center());
        self.history = History::new(self.settings.undo_capacity);
        self.history.initialize(self.doc.layers(), &self.selection);
        Ok(())
    }
}
