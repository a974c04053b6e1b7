use crate::document::Document;
use crate::error::{ArtworkError, ArtworkResult};
use crate::layer::Layer;
use crate::selection::Selection;
use crate::stroke::Stroke;
use crate::util::time;
use egui::Vec2;
use serde::{Deserialize, Serialize};

/// Artwork metadata carried alongside the canvas content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtworkMeta {
    pub title: String,
    /// Seconds since the UNIX epoch at capture time.
    pub created_at: u64,
    pub app_version: String,
}

/// The exchange shape the persistence collaborator reads and supplies. The
/// engine owns no file I/O; callers serialize and store the bytes. Paths
/// travel as description strings and are reconstructed on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artwork {
    pub layers: Vec<Layer>,
    pub selection: Selection,
    pub dimensions: Vec2,
    pub metadata: ArtworkMeta,
}

impl Artwork {
    /// Deep-copy the canvas into a serializable snapshot.
    pub fn capture(doc: &Document, selection: &Selection, title: &str) -> Self {
        Self {
            layers: doc.layers().to_vec(),
            selection: selection.clone(),
            dimensions: doc.dimensions(),
            metadata: ArtworkMeta {
                title: title.to_string(),
                created_at: time::timestamp_secs(),
                app_version: env!("CARGO_PKG_VERSION").to_string(),
            },
        }
    }

    pub fn to_json(&self) -> ArtworkResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> ArtworkResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuild live canvas state, re-deriving the selection mask from the
    /// restored stroke geometry. An artwork with no layers violates the
    /// never-empty invariant and is rejected.
    pub fn restore(self) -> ArtworkResult<(Document, Selection)> {
        if self.layers.is_empty() {
            return Err(ArtworkError::InvalidArtwork(
                "artwork has no layers".into(),
            ));
        }
        let doc = Document::from_parts(self.layers, self.dimensions);
        let mut selection = self.selection;
        selection.refresh_mask(|id| doc.find_stroke(id).map(Stroke::mask_outline));
        Ok((doc, selection))
    }
}
