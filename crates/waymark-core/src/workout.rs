//! Workout records, the unit the tracker stores and renders.
//!
//! A workout never changes after construction, with the single exception of
//! its interaction counter. The description and the performance metric are
//! computed in the constructor and never recomputed.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// The discriminator stored in the `type` field of every persisted entry.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum WorkoutKind {
  Running,
  Cycling,
}

impl WorkoutKind {
  /// Capitalised form used at the start of a description.
  pub fn title(self) -> &'static str {
    match self {
      Self::Running => "Running",
      Self::Cycling => "Cycling",
    }
  }

  pub fn icon(self) -> &'static str {
    match self {
      Self::Running => "🏃‍♂️",
      Self::Cycling => "🚴‍♀️",
    }
  }
}

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque identity key of a workout.
///
/// Fresh ids are random; ids read back from storage are kept verbatim, so
/// entries written by older versions keep whatever shape they had.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutId(String);

impl WorkoutId {
  pub fn generate() -> Self { Self(Uuid::new_v4().simple().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for WorkoutId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for WorkoutId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl AsRef<str> for WorkoutId {
  fn as_ref(&self) -> &str { &self.0 }
}

impl fmt::Display for WorkoutId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A map position. Serialised as a `[lat, lng]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinates {
  pub lat: f64,
  pub lng: f64,
}

impl Coordinates {
  pub fn new(lat: f64, lng: f64) -> Self { Self { lat, lng } }

  pub fn is_finite(&self) -> bool { self.lat.is_finite() && self.lng.is_finite() }
}

impl From<[f64; 2]> for Coordinates {
  fn from([lat, lng]: [f64; 2]) -> Self { Self { lat, lng } }
}

impl From<Coordinates> for [f64; 2] {
  fn from(c: Coordinates) -> Self { [c.lat, c.lng] }
}

impl fmt::Display for Coordinates {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}, {}", self.lat, self.lng)
  }
}

// ─── Activity ────────────────────────────────────────────────────────────────

/// The variant-specific payload of a workout: the extra input plus the
/// metric derived from it at construction time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Activity {
  Running {
    cadence_spm:     f64,
    /// Minutes per kilometre; lower is faster.
    pace_min_per_km: f64,
  },
  Cycling {
    /// Not required to be positive.
    elevation_gain_m: f64,
    speed_kmh:        f64,
  },
}

impl Activity {
  pub fn kind(&self) -> WorkoutKind {
    match self {
      Self::Running { .. } => WorkoutKind::Running,
      Self::Cycling { .. } => WorkoutKind::Cycling,
    }
  }

  fn derive(kind: WorkoutKind, distance_km: f64, duration_min: f64, extra: f64) -> Self {
    match kind {
      WorkoutKind::Running => Self::Running {
        cadence_spm:     extra,
        pace_min_per_km: duration_min / distance_km,
      },
      WorkoutKind::Cycling => Self::Cycling {
        elevation_gain_m: extra,
        speed_kmh:        distance_km / (duration_min / 60.0),
      },
    }
  }
}

// ─── Workout ─────────────────────────────────────────────────────────────────

/// A single recorded running or cycling session.
///
/// Construction performs no validation; [`crate::factory`] is the gate for
/// user input, and rehydration trusts what was persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
  id:           WorkoutId,
  created_at:   DateTime<Utc>,
  coordinates:  Coordinates,
  distance_km:  f64,
  duration_min: f64,
  description:  String,
  click_count:  u32,
  activity:     Activity,
}

impl Workout {
  /// Build a fresh workout with a new id, stamped with the current time.
  pub fn new(
    kind: WorkoutKind,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    extra: f64,
  ) -> Self {
    Self::assemble(
      WorkoutId::generate(),
      Utc::now(),
      kind,
      coordinates,
      distance_km,
      duration_min,
      extra,
      0,
    )
  }

  pub fn running(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    cadence_spm: f64,
  ) -> Self {
    Self::new(WorkoutKind::Running, coordinates, distance_km, duration_min, cadence_spm)
  }

  pub fn cycling(
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    elevation_gain_m: f64,
  ) -> Self {
    Self::new(
      WorkoutKind::Cycling,
      coordinates,
      distance_km,
      duration_min,
      elevation_gain_m,
    )
  }

  /// The one place where a workout is put together. Fresh construction and
  /// rehydration both come through here so derived values are always computed
  /// the same way.
  #[allow(clippy::too_many_arguments)]
  pub(crate) fn assemble(
    id: WorkoutId,
    created_at: DateTime<Utc>,
    kind: WorkoutKind,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    extra: f64,
    click_count: u32,
  ) -> Self {
    Self {
      description: format!("{} on {}", kind.title(), created_at.format("%B %-d")),
      activity: Activity::derive(kind, distance_km, duration_min, extra),
      id,
      created_at,
      coordinates,
      distance_km,
      duration_min,
      click_count,
    }
  }

  // ── Interaction ─────────────────────────────────────────────────────────

  /// Count one click on this workout in the list.
  pub fn record_interaction(&mut self) {
    self.click_count = self.click_count.saturating_add(1);
  }

  /// The description computed at construction, e.g. `"Running on April 14"`.
  pub fn describe(&self) -> &str { &self.description }

  // ── Accessors ───────────────────────────────────────────────────────────

  pub fn id(&self) -> &WorkoutId { &self.id }

  pub fn kind(&self) -> WorkoutKind { self.activity.kind() }

  pub fn created_at(&self) -> DateTime<Utc> { self.created_at }

  pub fn coordinates(&self) -> Coordinates { self.coordinates }

  pub fn distance_km(&self) -> f64 { self.distance_km }

  pub fn duration_min(&self) -> f64 { self.duration_min }

  pub fn click_count(&self) -> u32 { self.click_count }

  pub fn activity(&self) -> &Activity { &self.activity }

  pub fn pace_min_per_km(&self) -> Option<f64> {
    match self.activity {
      Activity::Running { pace_min_per_km, .. } => Some(pace_min_per_km),
      Activity::Cycling { .. } => None,
    }
  }

  pub fn speed_kmh(&self) -> Option<f64> {
    match self.activity {
      Activity::Cycling { speed_kmh, .. } => Some(speed_kmh),
      Activity::Running { .. } => None,
    }
  }

  pub fn cadence_spm(&self) -> Option<f64> {
    match self.activity {
      Activity::Running { cadence_spm, .. } => Some(cadence_spm),
      Activity::Cycling { .. } => None,
    }
  }

  pub fn elevation_gain_m(&self) -> Option<f64> {
    match self.activity {
      Activity::Cycling { elevation_gain_m, .. } => Some(elevation_gain_m),
      Activity::Running { .. } => None,
    }
  }
}
