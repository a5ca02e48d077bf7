//! Validated construction of workouts from user input.
//!
//! Distance and duration must be finite and strictly positive. The extra
//! field must be finite; it must also be positive for running (cadence) but
//! not for cycling (elevation gain may be zero or negative).

use crate::{
  error::ValidationError,
  workout::{Coordinates, Workout, WorkoutKind},
};

/// Build a workout of `kind`, or explain why the input is unacceptable.
pub fn create(
  kind: WorkoutKind,
  coordinates: Coordinates,
  distance_km: f64,
  duration_min: f64,
  extra: f64,
) -> Result<Workout, ValidationError> {
  let extra_field = match kind {
    WorkoutKind::Running => "cadence",
    WorkoutKind::Cycling => "elevation",
  };

  let result = check(kind, coordinates, distance_km, duration_min, extra, extra_field);
  if let Err(err) = &result {
    tracing::debug!(%kind, error = %err, "rejected workout input");
  }
  result?;

  Ok(Workout::new(kind, coordinates, distance_km, duration_min, extra))
}

fn check(
  kind: WorkoutKind,
  coordinates: Coordinates,
  distance_km: f64,
  duration_min: f64,
  extra: f64,
  extra_field: &'static str,
) -> Result<(), ValidationError> {
  finite("latitude", coordinates.lat)?;
  finite("longitude", coordinates.lng)?;
  finite("distance", distance_km)?;
  finite("duration", duration_min)?;
  finite(extra_field, extra)?;

  positive("distance", distance_km)?;
  positive("duration", duration_min)?;
  if kind == WorkoutKind::Running {
    positive(extra_field, extra)?;
  }
  Ok(())
}

fn finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
  if value.is_finite() {
    Ok(())
  } else {
    Err(ValidationError::NotFinite { field, value })
  }
}

fn positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
  if value > 0.0 {
    Ok(())
  } else {
    Err(ValidationError::NotPositive { field, value })
  }
}

// ─── Form ────────────────────────────────────────────────────────────────────

/// The raw contents of the new-workout form, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct WorkoutForm {
  pub kind:      String,
  pub distance:  String,
  pub duration:  String,
  pub cadence:   String,
  pub elevation: String,
}

impl WorkoutForm {
  /// Coerce the fields to numbers and hand them to [`create`].
  ///
  /// Only the extra field belonging to the selected kind is read.
  pub fn submit(&self, coordinates: Coordinates) -> Result<Workout, ValidationError> {
    let kind: WorkoutKind = self
      .kind
      .trim()
      .parse()
      .map_err(|_| ValidationError::UnknownKind(self.kind.clone()))?;

    let extra = match kind {
      WorkoutKind::Running => &self.cadence,
      WorkoutKind::Cycling => &self.elevation,
    };

    create(
      kind,
      coordinates,
      coerce(&self.distance),
      coerce(&self.duration),
      coerce(extra),
    )
  }
}

/// Form-style numeric coercion: blank is zero, garbage is NaN.
fn coerce(raw: &str) -> f64 {
  let raw = raw.trim();
  if raw.is_empty() {
    return 0.0;
  }
  raw.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn nyc() -> Coordinates { Coordinates::new(40.7, -74.0) }

  #[test]
  fn running_pace_is_duration_over_distance() {
    let w = create(WorkoutKind::Running, nyc(), 5.0, 25.0, 180.0).unwrap();
    assert_eq!(w.pace_min_per_km(), Some(5.0));

    let w = create(WorkoutKind::Running, nyc(), 3.7, 21.3, 164.0).unwrap();
    assert_eq!(w.pace_min_per_km(), Some(21.3 / 3.7));
  }

  #[test]
  fn cycling_speed_is_km_per_hour() {
    let w = create(WorkoutKind::Cycling, nyc(), 20.0, 60.0, 300.0).unwrap();
    assert_eq!(w.speed_kmh(), Some(20.0));

    let w = create(WorkoutKind::Cycling, nyc(), 42.5, 97.0, 0.0).unwrap();
    assert_eq!(w.speed_kmh(), Some(42.5 / (97.0 / 60.0)));
  }

  #[test]
  fn negative_distance_is_rejected() {
    let err = create(WorkoutKind::Running, Coordinates::new(0.0, 0.0), -1.0, 25.0, 180.0)
      .unwrap_err();
    assert_eq!(err, ValidationError::NotPositive { field: "distance", value: -1.0 });
  }

  #[test]
  fn zero_duration_is_rejected() {
    let err = create(WorkoutKind::Cycling, nyc(), 10.0, 0.0, 50.0).unwrap_err();
    assert!(matches!(err, ValidationError::NotPositive { field: "duration", .. }));
  }

  #[test]
  fn cadence_must_be_positive() {
    let err = create(WorkoutKind::Running, nyc(), 5.0, 25.0, 0.0).unwrap_err();
    assert!(matches!(err, ValidationError::NotPositive { field: "cadence", .. }));
  }

  #[test]
  fn elevation_may_be_negative_or_zero() {
    let down = create(WorkoutKind::Cycling, nyc(), 20.0, 60.0, -120.0).unwrap();
    assert_eq!(down.elevation_gain_m(), Some(-120.0));
    assert!(create(WorkoutKind::Cycling, nyc(), 20.0, 60.0, 0.0).is_ok());
  }

  #[test]
  fn non_finite_inputs_are_rejected() {
    let err = create(WorkoutKind::Cycling, nyc(), 20.0, 60.0, f64::NAN).unwrap_err();
    assert!(matches!(err, ValidationError::NotFinite { field: "elevation", .. }));

    let err = create(WorkoutKind::Running, nyc(), f64::INFINITY, 25.0, 180.0).unwrap_err();
    assert!(matches!(err, ValidationError::NotFinite { field: "distance", .. }));

    let err = create(
      WorkoutKind::Running,
      Coordinates::new(f64::NAN, 0.0),
      5.0,
      25.0,
      180.0,
    )
    .unwrap_err();
    assert!(matches!(err, ValidationError::NotFinite { field: "latitude", .. }));
  }

  #[test]
  fn form_reads_the_matching_extra_field() {
    let form = WorkoutForm {
      kind:      "cycling".into(),
      distance:  "20".into(),
      duration:  " 60 ".into(),
      cadence:   "not used".into(),
      elevation: "300".into(),
    };
    let w = form.submit(nyc()).unwrap();
    assert_eq!(w.kind(), WorkoutKind::Cycling);
    assert_eq!(w.elevation_gain_m(), Some(300.0));
  }

  #[test]
  fn form_blank_field_counts_as_zero() {
    let form = WorkoutForm {
      kind:     "running".into(),
      distance: "5".into(),
      duration: "".into(),
      cadence:  "180".into(),
      ..Default::default()
    };
    let err = form.submit(nyc()).unwrap_err();
    assert_eq!(err, ValidationError::NotPositive { field: "duration", value: 0.0 });
  }

  #[test]
  fn form_garbage_is_not_finite() {
    let form = WorkoutForm {
      kind:     "running".into(),
      distance: "five".into(),
      duration: "25".into(),
      cadence:  "180".into(),
      ..Default::default()
    };
    let err = form.submit(nyc()).unwrap_err();
    assert!(matches!(err, ValidationError::NotFinite { field: "distance", .. }));
  }

  #[test]
  fn form_unknown_kind() {
    let form = WorkoutForm { kind: "skiing".into(), ..Default::default() };
    assert_eq!(
      form.submit(nyc()).unwrap_err(),
      ValidationError::UnknownKind("skiing".into())
    );
  }
}
