//! The plain-data shape of a workout: what is left after a trip through
//! JSON.
//!
//! Writing goes through [`to_field_bag`]. Reading goes through
//! [`PersistedWorkout`], which accepts both the current camelCase field names
//! and the shorter names written by the first version of the tracker
//! (`date`, `coords`, `distance`, `duration`, `clicks`, `cadence`,
//! `elevationGain`). Derived fields found in storage are never read back.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::Value;

use crate::{
  Error, Result,
  workout::{Activity, Coordinates, Workout, WorkoutId, WorkoutKind},
};

/// An untyped, flat record: a JSON object with a `type` discriminator.
pub type FieldBag = Value;

// ─── Writing ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlainWorkout<'a> {
  #[serde(rename = "type")]
  kind:         WorkoutKind,
  id:           &'a WorkoutId,
  created_at:   DateTime<Utc>,
  coordinates:  Coordinates,
  distance_km:  f64,
  duration_min: f64,
  click_count:  u32,
  description:  &'a str,
  #[serde(flatten)]
  metric:       PlainMetric,
}

#[derive(Serialize)]
#[serde(untagged)]
enum PlainMetric {
  Running {
    #[serde(rename = "cadenceSpm")]
    cadence_spm:     f64,
    #[serde(rename = "paceMinPerKm")]
    pace_min_per_km: f64,
  },
  Cycling {
    #[serde(rename = "elevationGainM")]
    elevation_gain_m: f64,
    #[serde(rename = "speedKmh")]
    speed_kmh:        f64,
  },
}

impl<'a> From<&'a Workout> for PlainWorkout<'a> {
  fn from(w: &'a Workout) -> Self {
    let metric = match *w.activity() {
      Activity::Running { cadence_spm, pace_min_per_km } => {
        PlainMetric::Running { cadence_spm, pace_min_per_km }
      }
      Activity::Cycling { elevation_gain_m, speed_kmh } => {
        PlainMetric::Cycling { elevation_gain_m, speed_kmh }
      }
    };
    Self {
      kind: w.kind(),
      id: w.id(),
      created_at: w.created_at(),
      coordinates: w.coordinates(),
      distance_km: w.distance_km(),
      duration_min: w.duration_min(),
      click_count: w.click_count(),
      description: w.describe(),
      metric,
    }
  }
}

/// Project a workout onto its field bag.
pub fn to_field_bag(workout: &Workout) -> Result<FieldBag> {
  Ok(serde_json::to_value(PlainWorkout::from(workout))?)
}

// ─── Reading ─────────────────────────────────────────────────────────────────

/// The stored fields of a workout of either kind. The discriminator is read
/// separately, before this is deserialised.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedWorkout {
  pub id:               WorkoutId,
  #[serde(alias = "date", deserialize_with = "timestamp")]
  pub created_at:       DateTime<Utc>,
  #[serde(alias = "coords")]
  pub coordinates:      Coordinates,
  #[serde(alias = "distance")]
  pub distance_km:      f64,
  #[serde(alias = "duration")]
  pub duration_min:     f64,
  #[serde(default, alias = "clicks", deserialize_with = "counter")]
  pub click_count:      u32,
  #[serde(default, alias = "cadence")]
  pub cadence_spm:      Option<f64>,
  #[serde(default, alias = "elevationGain")]
  pub elevation_gain_m: Option<f64>,
}

impl PersistedWorkout {
  /// Rebuild the workout as `kind`, keeping id, timestamp and click count
  /// exactly as stored. No validation is applied.
  pub fn into_workout(self, kind: WorkoutKind) -> Result<Workout> {
    let extra = match kind {
      WorkoutKind::Running => self
        .cadence_spm
        .ok_or_else(|| Error::MalformedBlob("running entry without cadenceSpm".into()))?,
      WorkoutKind::Cycling => self.elevation_gain_m.ok_or_else(|| {
        Error::MalformedBlob("cycling entry without elevationGainM".into())
      })?,
    };

    Ok(Workout::assemble(
      self.id,
      self.created_at,
      kind,
      self.coordinates,
      self.distance_km,
      self.duration_min,
      extra,
      self.click_count,
    ))
  }
}

/// Accept an RFC 3339 string or a count of epoch milliseconds.
fn timestamp<'de, D>(de: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Raw {
    Text(DateTime<Utc>),
    Millis(i64),
  }

  match Raw::deserialize(de)? {
    Raw::Text(dt) => Ok(dt),
    Raw::Millis(ms) => Utc
      .timestamp_millis_opt(ms)
      .single()
      .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
  }
}

/// Accept any JSON number (or `null`) as a click count. The `as` cast
/// saturates: negatives become 0, fractions truncate, overflow caps at
/// `u32::MAX`.
fn counter<'de, D>(de: D) -> std::result::Result<u32, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<f64>::deserialize(de)?;
  Ok(raw.map_or(0, |n| n as u32))
}
