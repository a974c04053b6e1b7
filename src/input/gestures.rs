use super::{TouchFrame, TouchSample};
use egui::{Pos2, Vec2};
use log::trace;

/// A resolved gesture intent, one per touch-point family.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureIntent {
    None,
    /// Single pointer: freehand drawing.
    Draw { pos: Pos2 },
    /// Quick single tap: fullscreen toggle.
    ToggleFullscreen { pos: Pos2 },
    /// Two pointers moving: pinch/pan/rotate of the viewport.
    Transform { center: Pos2 },
    /// Two pointers held in place: eyedropper at the centroid.
    EyedropperAt { pos: Pos2 },
    /// Three-finger swipe down.
    Undo,
    /// Three-finger swipe up.
    Redo,
}

/// Configuration for gesture recognition
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Maximum duration of a tap (ms)
    pub tap_max_ms: u64,
    /// Hold time required for the two-finger eyedropper (ms)
    pub long_press_ms: u64,
    /// Minimum travel before a drag counts as movement
    pub min_pan_distance: f32,
    /// Vertical travel required for the undo/redo swipe
    pub swipe_translation: f32,
    /// Vertical speed required for the undo/redo swipe, px/s
    pub swipe_velocity: f32,
    /// Zoom clamp range
    pub min_scale: f32,
    pub max_scale: f32,
    /// Snap-to-1.0 window for pinch zoom
    pub scale_snap: f32,
    /// Snap window around 0/90/180/270, degrees
    pub rotation_snap_deg: f32,
    /// Overscroll resistance base
    pub rubber_band_resistance: f32,
    /// Contact diameter above which a touch is a palm; `f32::INFINITY`
    /// disables palm rejection
    pub palm_size_threshold: f32,
    /// Fraction of the size threshold that still counts as a palm near a
    /// screen edge
    pub palm_edge_fraction: f32,
    /// Width of the edge/bottom band used for edge palm checks
    pub edge_margin: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_max_ms: 100,
            long_press_ms: 300,
            min_pan_distance: 5.0,
            swipe_translation: 60.0,
            swipe_velocity: 500.0,
            min_scale: 0.25,
            max_scale: 32.0,
            scale_snap: 0.05,
            rotation_snap_deg: 5.0,
            rubber_band_resistance: 0.5,
            palm_size_threshold: 40.0,
            palm_edge_fraction: 0.7,
            edge_margin: 48.0,
        }
    }
}

/// Stateless gesture thresholds: touch counts, travel and timing in, a
/// discrete intent out. Continuous deltas (zoom, rotation, overscroll) come
/// from the pure helpers below.
#[derive(Debug, Clone, Default)]
pub struct GestureClassifier {
    config: GestureConfig,
    screen: Vec2,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig, screen: Vec2) -> Self {
        Self { config, screen }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Classify one frame of touch state. Palm touches are dropped before
    /// the touch count picks the gesture family.
    pub fn classify(&self, frame: &TouchFrame) -> GestureIntent {
        let live: Vec<&TouchSample> = frame
            .touches
            .iter()
            .filter(|t| !self.is_palm(t))
            .collect();
        if live.len() < frame.touches.len() {
            trace!(
                "ignoring {} palm touch(es)",
                frame.touches.len() - live.len()
            );
        }

        let centroid = || {
            let sum = live
                .iter()
                .fold(Vec2::ZERO, |acc, t| acc + t.pos.to_vec2());
            (sum / live.len().max(1) as f32).to_pos2()
        };

        match live.len() {
            0 => GestureIntent::None,
            1 => {
                let pos = live[0].pos;
                let moved = frame.translation.length() >= self.config.min_pan_distance;
                if frame.ended && frame.duration_ms <= self.config.tap_max_ms && !moved {
                    GestureIntent::ToggleFullscreen { pos }
                } else {
                    GestureIntent::Draw { pos }
                }
            }
            2 => {
                let moved = frame.translation.length() >= self.config.min_pan_distance;
                if frame.duration_ms >= self.config.long_press_ms && !moved {
                    GestureIntent::EyedropperAt { pos: centroid() }
                } else {
                    GestureIntent::Transform { center: centroid() }
                }
            }
            3 => {
                let ty = frame.translation.y;
                let vy = frame.velocity.y;
                if ty > self.config.swipe_translation && vy > self.config.swipe_velocity {
                    GestureIntent::Undo
                } else if ty < -self.config.swipe_translation
                    && vy < -self.config.swipe_velocity
                {
                    GestureIntent::Redo
                } else {
                    GestureIntent::None
                }
            }
            _ => GestureIntent::None,
        }
    }

    /// A touch is a palm when its contact size exceeds the threshold, or
    /// when it is both near a screen edge/bottom and at least the edge
    /// fraction of the threshold.
    pub fn is_palm(&self, touch: &TouchSample) -> bool {
        let threshold = self.config.palm_size_threshold;
        if !threshold.is_finite() {
            return false;
        }
        if touch.contact_size > threshold {
            return true;
        }
        let near_edge = touch.pos.x < self.config.edge_margin
            || touch.pos.x > self.screen.x - self.config.edge_margin
            || touch.pos.y > self.screen.y - self.config.edge_margin;
        near_edge && touch.contact_size >= threshold * self.config.palm_edge_fraction
    }

    /// Next zoom factor for a pinch update: scaled by the distance ratio,
    /// clamped, and snapped to exactly 1.0 inside the snap window.
    pub fn pinch_scale(&self, current: f32, previous_distance: f32, current_distance: f32) -> f32 {
        if previous_distance <= f32::EPSILON {
            return current;
        }
        let scaled = (current * (current_distance / previous_distance))
            .clamp(self.config.min_scale, self.config.max_scale);
        if (scaled - 1.0).abs() < self.config.scale_snap {
            1.0
        } else {
            scaled
        }
    }

    /// Normalize a rotation to `[0, 360)` and snap to the nearest quadrant
    /// when within the snap window.
    pub fn snap_rotation(&self, degrees: f32) -> f32 {
        let normalized = degrees.rem_euclid(360.0);
        for quadrant in [0.0_f32, 90.0, 180.0, 270.0, 360.0] {
            if (normalized - quadrant).abs() < self.config.rotation_snap_deg {
                return quadrant.rem_euclid(360.0);
            }
        }
        normalized
    }

    /// Decelerating overscroll: translation past `bounds` is compressed by
    /// `resistance^(excess/100)` instead of hard-clamped, sign preserved.
    pub fn rubber_band(&self, translation: f32, bounds: f32) -> f32 {
        let excess = translation.abs() - bounds;
        if excess <= 0.0 {
            return translation;
        }
        let resisted = bounds
            + excess * self.config.rubber_band_resistance.powf(excess / 100.0);
        resisted.copysign(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::TouchPhase;
    use egui::{pos2, vec2};

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(GestureConfig::default(), vec2(1024.0, 768.0))
    }

    fn touch(id: u64, x: f32, y: f32) -> TouchSample {
        TouchSample::new(id, pos2(x, y), 0).with_contact_size(8.0)
    }

    fn frame(touches: Vec<TouchSample>) -> TouchFrame {
        TouchFrame {
            touches,
            ..TouchFrame::default()
        }
    }

    #[test]
    fn one_touch_draws() {
        let intent = classifier().classify(&frame(vec![touch(1, 100.0, 100.0)]));
        assert_eq!(intent, GestureIntent::Draw { pos: pos2(100.0, 100.0) });
    }

    #[test]
    fn quick_tap_toggles_fullscreen() {
        let mut f = frame(vec![touch(1, 100.0, 100.0).with_phase(TouchPhase::Ended)]);
        f.ended = true;
        f.duration_ms = 80;
        assert_eq!(
            classifier().classify(&f),
            GestureIntent::ToggleFullscreen { pos: pos2(100.0, 100.0) }
        );
        // Too slow for a tap: stays a draw.
        f.duration_ms = 150;
        assert_eq!(
            classifier().classify(&f),
            GestureIntent::Draw { pos: pos2(100.0, 100.0) }
        );
    }

    #[test]
    fn two_finger_hold_is_eyedropper() {
        let mut f = frame(vec![touch(1, 100.0, 100.0), touch(2, 200.0, 100.0)]);
        f.duration_ms = 350;
        assert_eq!(
            classifier().classify(&f),
            GestureIntent::EyedropperAt { pos: pos2(150.0, 100.0) }
        );
        f.translation = vec2(40.0, 0.0);
        assert_eq!(
            classifier().classify(&f),
            GestureIntent::Transform { center: pos2(150.0, 100.0) }
        );
    }

    #[test]
    fn three_finger_swipes_map_to_history() {
        let touches = vec![
            touch(1, 100.0, 300.0),
            touch(2, 200.0, 300.0),
            touch(3, 300.0, 300.0),
        ];
        let mut f = frame(touches);
        f.translation = vec2(0.0, 80.0);
        f.velocity = vec2(0.0, 700.0);
        assert_eq!(classifier().classify(&f), GestureIntent::Undo);

        f.translation = vec2(0.0, -80.0);
        f.velocity = vec2(0.0, -700.0);
        assert_eq!(classifier().classify(&f), GestureIntent::Redo);

        // Fast but short travel: no intent.
        f.translation = vec2(0.0, -30.0);
        assert_eq!(classifier().classify(&f), GestureIntent::None);
    }

    #[test]
    fn pinch_clamps_and_snaps() {
        let c = classifier();
        assert_eq!(c.pinch_scale(16.0, 10.0, 40.0), 32.0);
        assert_eq!(c.pinch_scale(0.3, 100.0, 10.0), 0.25);
        assert_eq!(c.pinch_scale(0.98, 100.0, 105.0), 1.0);
        let free = c.pinch_scale(2.0, 100.0, 110.0);
        assert!((free - 2.2).abs() < 1e-4);
    }

    #[test]
    fn rotation_normalizes_and_snaps() {
        let c = classifier();
        assert_eq!(c.snap_rotation(357.0), 0.0);
        assert_eq!(c.snap_rotation(-3.0), 0.0);
        assert_eq!(c.snap_rotation(92.0), 90.0);
        assert_eq!(c.snap_rotation(268.0), 270.0);
        assert_eq!(c.snap_rotation(45.0), 45.0);
        assert_eq!(c.snap_rotation(405.0), 45.0);
    }

    #[test]
    fn rubber_band_resists_overscroll() {
        let c = classifier();
        assert_eq!(c.rubber_band(50.0, 100.0), 50.0);
        let over = c.rubber_band(200.0, 100.0);
        assert!(over > 100.0 && over < 200.0);
        let negative = c.rubber_band(-200.0, 100.0);
        assert!((negative + over).abs() < 1e-4);
    }

    #[test]
    fn palm_touches_are_dropped() {
        let c = classifier();
        assert!(c.is_palm(&touch(1, 500.0, 400.0).with_contact_size(45.0)));
        assert!(!c.is_palm(&touch(1, 500.0, 400.0).with_contact_size(30.0)));
        // Moderately large near the bottom edge.
        assert!(c.is_palm(&touch(1, 500.0, 750.0).with_contact_size(30.0)));

        let mut f = frame(vec![
            touch(1, 200.0, 200.0),
            touch(2, 500.0, 750.0).with_contact_size(35.0),
        ]);
        f.duration_ms = 10;
        assert_eq!(
            c.classify(&f),
            GestureIntent::Draw { pos: pos2(200.0, 200.0) }
        );
    }
}
