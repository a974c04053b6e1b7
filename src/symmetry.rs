use crate::stroke::Stroke;
use egui::Pos2;
use serde::{Deserialize, Serialize};

/// Axis mode for symmetric stroke replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SymmetryMode {
    #[default]
    Off,
    Vertical,
    Horizontal,
    Both,
    Radial,
}

/// Ephemeral, tool-scoped symmetry state. Not part of persisted history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymmetryState {
    pub mode: SymmetryMode,
    /// Axis origin; defaults to the canvas center.
    pub origin: Pos2,
}

impl SymmetryState {
    pub fn new(origin: Pos2) -> Self {
        Self {
            mode: SymmetryMode::Off,
            origin,
        }
    }

    pub fn is_active(&self) -> bool {
        self.mode != SymmetryMode::Off
    }

    /// Mirrored/rotated siblings for a stroke about to commit. The primary
    /// stroke is not included; callers commit it together with these in one
    /// history entry.
    pub fn siblings(&self, stroke: &Stroke) -> Vec<Stroke> {
        match self.mode {
            SymmetryMode::Off => Vec::new(),
            SymmetryMode::Vertical => vec![stroke.mirrored_x(self.origin.x)],
            SymmetryMode::Horizontal => vec![stroke.mirrored_y(self.origin.y)],
            SymmetryMode::Both => vec![
                stroke.mirrored_x(self.origin.x),
                stroke.mirrored_y(self.origin.y),
                stroke.mirrored_x(self.origin.x).mirrored_y(self.origin.y),
            ],
            SymmetryMode::Radial => [90.0_f32, 180.0, 270.0]
                .iter()
                .map(|deg| stroke.rotated_about(self.origin, deg.to_radians()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::{InputPoint, Paint, StrokeBuilder};
    use egui::{Color32, pos2};

    fn stroke_at(x: f32, y: f32) -> Stroke {
        let mut builder = StrokeBuilder::new();
        builder.start(
            InputPoint::new(pos2(x, y)),
            Paint::brush(Color32::BLACK, 4.0, 1.0),
        );
        builder.add_point(InputPoint::new(pos2(x + 2.0, y)));
        builder.end().unwrap()
    }

    #[test]
    fn both_mode_yields_three_siblings() {
        let mut sym = SymmetryState::new(pos2(100.0, 100.0));
        sym.mode = SymmetryMode::Both;
        let siblings = sym.siblings(&stroke_at(105.0, 100.0));
        assert_eq!(siblings.len(), 3);
        let first_points: Vec<Pos2> =
            siblings.iter().map(|s| s.points()[0].pos).collect();
        // x-mirror, y-mirror (on-axis here), and the double mirror.
        assert_eq!(first_points[0], pos2(95.0, 100.0));
        assert_eq!(first_points[1], pos2(105.0, 100.0));
        assert_eq!(first_points[2], pos2(95.0, 100.0));
    }

    #[test]
    fn radial_mode_rotates_by_quadrants() {
        let mut sym = SymmetryState::new(pos2(0.0, 0.0));
        sym.mode = SymmetryMode::Radial;
        let siblings = sym.siblings(&stroke_at(10.0, 0.0));
        assert_eq!(siblings.len(), 3);
        let p90 = siblings[0].points()[0].pos;
        assert!((p90.x - 0.0).abs() < 1e-3 && (p90.y - 10.0).abs() < 1e-3);
        let p180 = siblings[1].points()[0].pos;
        assert!((p180.x + 10.0).abs() < 1e-3 && p180.y.abs() < 1e-3);
    }

    #[test]
    fn off_mode_yields_nothing() {
        let sym = SymmetryState::new(pos2(0.0, 0.0));
        assert!(sym.siblings(&stroke_at(5.0, 5.0)).is_empty());
    }

    #[test]
    fn siblings_get_fresh_ids() {
        let mut sym = SymmetryState::new(pos2(50.0, 50.0));
        sym.mode = SymmetryMode::Vertical;
        let original = stroke_at(60.0, 50.0);
        let siblings = sym.siblings(&original);
        assert_ne!(siblings[0].id(), original.id());
    }
}
