use crate::layer::LayerId;
use crate::stroke::StrokeId;
use egui::Color32;
use std::cell::RefCell;

/// Fire-and-forget notifications for the haptics/audio layer. The engine
/// never depends on a handler's result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// A stroke (plus any symmetry siblings) landed on a layer.
    StrokeCommitted { layer: LayerId, count: usize },
    StrokeCancelled,
    Undo,
    Redo,
    ToolChanged,
    LayerAdded { layer: LayerId },
    LayerRemoved { layer: LayerId },
    LayerReordered { layer: LayerId, index: usize },
    LayersMerged { into: LayerId },
    SelectionChanged,
    /// The fill tool recolored a committed stroke.
    StrokeRecolored { stroke: StrokeId },
    ColorSampled { color: Color32 },
    CloneSourceSet { stroke: StrokeId },
    /// A fill/eyedropper/clone tap missed every stroke; distinct haptic cue.
    NoTarget,
}

/// A registered haptics/audio hook.
pub trait FeedbackHandler {
    fn handle_event(&mut self, event: &EngineEvent);
}

/// Broadcasts engine events to registered handlers.
pub struct FeedbackBus {
    handlers: RefCell<Vec<Box<dyn FeedbackHandler>>>,
}

impl Default for FeedbackBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FeedbackBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl FeedbackBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn FeedbackHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: EngineEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}
