//! Map interaction state for one session.
//!
//! Holds what the map collaborator needs between events: the zoom level used
//! when centring on a workout and the current view centre.

use crate::workout::{Coordinates, Workout};

pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Clone, PartialEq)]
pub struct MapSession {
  pub zoom_level: u8,
  pub view:       Option<Coordinates>,
}

impl Default for MapSession {
  fn default() -> Self { Self::new(DEFAULT_ZOOM) }
}

impl MapSession {
  pub fn new(zoom_level: u8) -> Self {
    Self { zoom_level, view: None }
  }

  /// Centre the view on `workout`.
  pub fn pan_to(&mut self, workout: &Workout) -> Coordinates {
    let centre = workout.coordinates();
    self.view = Some(centre);
    centre
  }

  /// Popup text for the workout's marker.
  pub fn marker_label(workout: &Workout) -> String {
    format!("{} {}", workout.kind().icon(), workout.describe())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_session_has_no_view() {
    let s = MapSession::default();
    assert_eq!(s.zoom_level, 13);
    assert_eq!(s.view, None);
  }

  #[test]
  fn pan_moves_the_view() {
    let mut s = MapSession::new(15);
    let w = Workout::cycling(Coordinates::new(48.85, 2.35), 20.0, 60.0, 300.0);
    assert_eq!(s.pan_to(&w), Coordinates::new(48.85, 2.35));
    assert_eq!(s.view, Some(Coordinates::new(48.85, 2.35)));
    assert_eq!(s.zoom_level, 15);
  }

  #[test]
  fn marker_label_has_icon_and_description() {
    let w = Workout::running(Coordinates::new(0.0, 0.0), 5.0, 25.0, 180.0);
    let label = MapSession::marker_label(&w);
    assert!(label.starts_with("🏃‍♂️ Running on "));
  }
}
