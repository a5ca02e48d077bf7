//! Plain-text rendering of the workout list and map markers.

use waymark_core::{Activity, Workout, session::MapSession};

/// One list entry: title line followed by the details line.
pub fn workout_entry(w: &Workout) -> String {
  let mut details = format!(
    "  {} {} km   ⏱ {} min",
    w.kind().icon(),
    w.distance_km(),
    w.duration_min()
  );

  match *w.activity() {
    Activity::Running { cadence_spm, pace_min_per_km } => {
      details.push_str(&format!("   ⚡️ {pace_min_per_km:.1} min/km   🦶🏼 {cadence_spm} spm"));
    }
    Activity::Cycling { elevation_gain_m, speed_kmh } => {
      details.push_str(&format!("   ⚡️ {speed_kmh:.1} km/h   ⛰ {elevation_gain_m} m"));
    }
  }

  format!("{}  [{}]\n{details}", w.describe(), w.id())
}

/// The whole list, oldest first.
pub fn workout_list(workouts: &[Workout]) -> String {
  if workouts.is_empty() {
    return "No workouts yet.".into();
  }
  workouts
    .iter()
    .map(workout_entry)
    .collect::<Vec<_>>()
    .join("\n\n")
}

/// One marker per workout: position and popup text.
pub fn marker_list(workouts: &[Workout]) -> String {
  workouts
    .iter()
    .map(|w| format!("({})  {}", w.coordinates(), MapSession::marker_label(w)))
    .collect::<Vec<_>>()
    .join("\n")
}
