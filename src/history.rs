use crate::layer::Layer;
use crate::selection::Selection;
use log::warn;
use std::collections::VecDeque;

/// Default cap on each history stack.
pub const DEFAULT_CAPACITY: usize = 50;

/// A full snapshot of the undoable canvas state: the layer stack (deep
/// clone, strokes included) plus the selection at that moment.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub layers: Vec<Layer>,
    pub selection: Selection,
}

/// Bounded two-stack undo/redo over whole-canvas snapshots.
///
/// The top of the undo stack is always the *current* state; undoing pops it
/// to the redo stack and restores whatever is underneath (or the initial
/// state). Callers must push a snapshot after every committed mutation,
/// never before.
#[derive(Debug, Clone, Default)]
pub struct History {
    initial: Option<HistoryEntry>,
    undo: VecDeque<HistoryEntry>,
    redo: Vec<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            initial: None,
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Seed the baseline state. Once per canvas session; repeated calls are
    /// logged no-ops.
    pub fn initialize(&mut self, layers: &[Layer], selection: &Selection) {
        if self.initial.is_some() {
            warn!("history already initialized; ignoring");
            return;
        }
        self.initial = Some(HistoryEntry {
            layers: layers.to_vec(),
            selection: selection.clone(),
        });
    }

    /// Record the state *resulting from* a committed mutation. Trims the
    /// oldest entry past capacity and clears the redo stack (linear
    /// history).
    pub fn save_state(&mut self, layers: &[Layer], selection: &Selection) {
        self.undo.push_back(HistoryEntry {
            layers: layers.to_vec(),
            selection: selection.clone(),
        });
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Step back: pops the current state onto the redo stack and returns
    /// the state to restore — the new undo top, or the initial state when
    /// the stack runs out. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let current = self.undo.pop_back()?;
        self.redo.push(current);
        self.undo
            .back()
            .cloned()
            .or_else(|| self.initial.clone())
    }

    /// Step forward again. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let entry = self.redo.pop()?;
        self.undo.push_back(entry.clone());
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
        }
        Some(entry)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Pos2, Rect, vec2};

    fn layers(n: usize) -> Vec<Layer> {
        (0..n)
            .map(|i| {
                Layer::new(
                    &format!("Layer {}", i + 1),
                    Rect::from_min_size(Pos2::ZERO, vec2(100.0, 100.0)),
                )
            })
            .collect()
    }

    #[test]
    fn undo_returns_prior_state() {
        let mut history = History::new(DEFAULT_CAPACITY);
        let selection = Selection::none();
        history.initialize(&layers(1), &selection);

        let two = layers(2);
        history.save_state(&two, &selection);
        assert!(history.can_undo());
        assert!(!history.can_redo());

        let restored = history.undo().unwrap();
        assert_eq!(restored.layers.len(), 1);
        assert!(history.can_redo());

        let redone = history.redo().unwrap();
        assert_eq!(redone.layers.len(), 2);
    }

    #[test]
    fn empty_history_has_nothing_to_undo() {
        let mut history = History::new(DEFAULT_CAPACITY);
        history.initialize(&layers(1), &Selection::none());
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut history = History::new(3);
        let selection = Selection::none();
        history.initialize(&layers(1), &selection);
        for n in 2..=10 {
            history.save_state(&layers(n), &selection);
        }
        assert_eq!(history.undo_depth(), 3);
        // Undoing past the trimmed stack lands on the initial state.
        history.undo();
        history.undo();
        let bottom = history.undo().unwrap();
        assert_eq!(bottom.layers.len(), 1);
        assert_eq!(history.redo_depth(), 3);
        assert!(history.undo().is_none());
    }

    #[test]
    fn new_save_clears_redo() {
        let mut history = History::new(DEFAULT_CAPACITY);
        let selection = Selection::none();
        history.initialize(&layers(1), &selection);
        history.save_state(&layers(2), &selection);
        history.undo();
        assert!(history.can_redo());
        history.save_state(&layers(3), &selection);
        assert!(!history.can_redo());
    }
}
