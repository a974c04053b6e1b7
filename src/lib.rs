//! Touch-driven, layered vector painting engine.
//!
//! The crate captures resolved pointer input as smoothed curves, keeps them
//! in an ordered stack of layers, constrains tool effects to the active
//! selection, and provides bounded undo/redo over the whole canvas state.
//! Rendering, persistence I/O and platform touch plumbing are external
//! collaborators: the engine hands out read-only [`frame::FrameView`]s and
//! serde-able [`artwork::Artwork`] snapshots and never touches pixels.

#![warn(clippy::all, rust_2018_idioms)]

pub mod artwork;
pub mod document;
pub mod error;
pub mod event;
pub mod frame;
pub mod geometry;
pub mod history;
pub mod input;
pub mod layer;
pub mod selection;
pub mod session;
pub mod settings;
pub mod stroke;
pub mod symmetry;
pub mod tools;
pub mod util;

pub use artwork::Artwork;
pub use document::Document;
pub use error::{ArtworkError, ArtworkResult};
pub use event::{EngineEvent, FeedbackBus, FeedbackHandler};
pub use frame::{FrameView, Overlay};
pub use history::{History, HistoryEntry};
pub use input::gestures::{GestureClassifier, GestureConfig, GestureIntent};
pub use input::{TouchFrame, TouchPhase, TouchSample};
pub use layer::{BlendMode, Layer, LayerId};
pub use selection::Selection;
pub use session::CanvasSession;
pub use settings::{PalmRejection, SessionSettings};
pub use stroke::{InputPoint, Paint, Stroke, StrokeBuilder, StrokeId};
pub use symmetry::{SymmetryMode, SymmetryState};
pub use tools::{BrushSettings, ToolEffect, ToolKind, ToolType};
