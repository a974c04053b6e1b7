use crate::history;
use serde::{Deserialize, Serialize};

/// How aggressively large touches are discarded as palms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PalmRejection {
    Off,
    #[default]
    Standard,
    Aggressive,
}

impl PalmRejection {
    /// Contact-size threshold in px-equivalents; infinite disables.
    pub fn size_threshold(self) -> f32 {
        match self {
            Self::Off => f32::INFINITY,
            Self::Standard => 40.0,
            Self::Aggressive => 28.0,
        }
    }
}

/// Session-start configuration supplied by the settings collaborator. Read
/// once when the session is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub undo_capacity: usize,
    /// When off, incoming pressure is forced to 1.0.
    pub pressure_sensitivity: bool,
    pub palm_rejection: PalmRejection,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            undo_capacity: history::DEFAULT_CAPACITY,
            pressure_sensitivity: true,
            palm_rejection: PalmRejection::default(),
        }
    }
}
