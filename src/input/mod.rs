//! Resolved pointer/touch state handed to the engine by the platform layer.
//! Raw touch-event plumbing stays outside; the classifier only sees
//! positions, contact sizes and timestamps.

pub mod gestures;

use egui::{Pos2, Vec2};

/// Phase of a touch interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Represents a single touch point
#[derive(Debug, Clone, Copy)]
pub struct TouchSample {
    pub id: u64,
    pub pos: Pos2,
    /// Approximate contact diameter in pixels; drives palm rejection.
    pub contact_size: f32,
    pub phase: TouchPhase,
    pub timestamp_ms: u64,
}

impl TouchSample {
    pub fn new(id: u64, pos: Pos2, timestamp_ms: u64) -> Self {
        Self {
            id,
            pos,
            contact_size: 1.0,
            phase: TouchPhase::Moved,
            timestamp_ms,
        }
    }

    pub fn with_contact_size(mut self, contact_size: f32) -> Self {
        self.contact_size = contact_size;
        self
    }

    pub fn with_phase(mut self, phase: TouchPhase) -> Self {
        self.phase = phase;
        self
    }
}

/// One classifier input: the live touch points plus the gesture-scoped
/// aggregates the platform layer tracks for us.
#[derive(Debug, Clone, Default)]
pub struct TouchFrame {
    pub touches: Vec<TouchSample>,
    /// Cumulative translation since the gesture started.
    pub translation: Vec2,
    /// Instantaneous velocity, px/s.
    pub velocity: Vec2,
    /// Time since the gesture started.
    pub duration_ms: u64,
    /// All pointers lifted this frame.
    pub ended: bool,
}

impl TouchFrame {
    pub fn centroid(&self) -> Option<Pos2> {
        if self.touches.is_empty() {
            return None;
        }
        let sum = self
            .touches
            .iter()
            .fold(Vec2::ZERO, |acc, t| acc + t.pos.to_vec2());
        Some((sum / self.touches.len() as f32).to_pos2())
    }
}
