//! Reconstruction of typed workouts from persisted field bags.
//!
//! Each entry is dispatched on its `type` discriminator to the matching
//! variant and rebuilt through the ordinary constructor path, which restores
//! the description and the derived metric. Stored ids, timestamps and click
//! counts are kept as they are.
//!
//! Bad entries are skipped one at a time; only a blob that is not a JSON
//! array at all is discarded wholesale. Entries sharing an id are all kept,
//! matching what [`crate::store::WorkoutStore::add`] accepts.

use serde_json::Value;

use crate::{
  Error, Result,
  plain::{FieldBag, PersistedWorkout},
  workout::{Workout, WorkoutKind},
};

/// Split a stored blob into its entries.
///
/// An absent blob, or one that does not parse as a JSON array, yields no
/// entries.
pub fn parse_blob(blob: Option<&str>) -> Vec<FieldBag> {
  let Some(raw) = blob else {
    return Vec::new();
  };

  match serde_json::from_str::<Vec<FieldBag>>(raw) {
    Ok(entries) => entries,
    Err(e) => {
      tracing::warn!(error = %e, "discarding unparsable workout blob");
      Vec::new()
    }
  }
}

/// Rebuild every entry that can be rebuilt, in order.
pub fn rehydrate<I>(plain: I) -> Vec<Workout>
where
  I: IntoIterator<Item = FieldBag>,
{
  plain
    .into_iter()
    .enumerate()
    .filter_map(|(index, entry)| match rehydrate_entry(entry) {
      Ok(w) => Some(w),
      Err(e) => {
        tracing::warn!(index, error = %e, "skipping persisted workout");
        None
      }
    })
    .collect()
}

/// Rebuild a single entry.
pub fn rehydrate_entry(entry: FieldBag) -> Result<Workout> {
  let kind = discriminant(&entry)?;
  let persisted: PersistedWorkout = serde_json::from_value(entry)?;
  persisted.into_workout(kind)
}

fn discriminant(entry: &Value) -> Result<WorkoutKind> {
  let tag = entry
    .get("type")
    .and_then(Value::as_str)
    .ok_or(Error::MissingWorkoutType)?;
  tag
    .parse()
    .map_err(|_| Error::UnknownWorkoutType(tag.to_owned()))
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;
  use crate::{
    plain::to_field_bag,
    workout::{Coordinates, Workout},
  };

  fn run_entry(id: &str) -> Value {
    json!({
      "type": "running",
      "id": id,
      "createdAt": "2024-04-14T09:30:00Z",
      "coordinates": [40.7, -74.0],
      "distanceKm": 5.0,
      "durationMin": 25.0,
      "clickCount": 3,
      "cadenceSpm": 180.0,
    })
  }

  #[test]
  fn absent_or_empty_input_is_empty() {
    assert!(parse_blob(None).is_empty());
    assert!(parse_blob(Some("[]")).is_empty());
    assert!(rehydrate(Vec::new()).is_empty());
  }

  #[test]
  fn unparsable_blob_is_discarded() {
    assert!(parse_blob(Some("{not json")).is_empty());
    assert!(parse_blob(Some(r#"{"type":"running"}"#)).is_empty());
  }

  #[test]
  fn unknown_type_is_skipped() {
    let entries = vec![json!({ "type": "skiing", "id": "s1", "distanceKm": 3.0 })];
    assert!(rehydrate(entries).is_empty());
  }

  #[test]
  fn bad_entries_do_not_abort_the_batch() {
    let entries = vec![
      run_entry("a"),
      json!({ "type": "skiing", "id": "s1" }),
      json!({ "id": "no-type" }),
      json!({ "type": "cycling", "id": "c1" }),
      json!(42),
      run_entry("b"),
    ];
    let ids: Vec<_> = rehydrate(entries)
      .iter()
      .map(|w| w.id().as_str().to_owned())
      .collect();
    assert_eq!(ids, ["a", "b"]);
  }

  #[test]
  fn identity_and_clicks_are_preserved() {
    let w = rehydrate_entry(run_entry("keep-me")).unwrap();
    assert_eq!(w.id().as_str(), "keep-me");
    assert_eq!(w.click_count(), 3);
    assert_eq!(w.created_at().to_rfc3339(), "2024-04-14T09:30:00+00:00");
    assert_eq!(w.pace_min_per_km(), Some(5.0));
    assert_eq!(w.describe(), "Running on April 14");
  }

  #[test]
  fn behaviour_is_restored() {
    let mut w = rehydrate_entry(run_entry("r")).unwrap();
    w.record_interaction();
    assert_eq!(w.click_count(), 4);
  }

  #[test]
  fn stored_derived_values_are_ignored() {
    let mut entry = run_entry("r");
    entry["paceMinPerKm"] = json!(99.0);
    entry["description"] = json!("Swimming on Mars 1");
    let w = rehydrate_entry(entry).unwrap();
    assert_eq!(w.pace_min_per_km(), Some(5.0));
    assert_eq!(w.describe(), "Running on April 14");
  }

  #[test]
  fn duplicate_ids_are_all_kept_in_order() {
    let mut second = run_entry("dup");
    second["clickCount"] = json!(9);
    let workouts = rehydrate(vec![run_entry("dup"), second]);
    assert_eq!(workouts.len(), 2);
    assert_eq!(workouts[0].click_count(), 3);
    assert_eq!(workouts[1].click_count(), 9);
  }

  #[test]
  fn round_trip_reproduces_every_field() {
    let mut run = Workout::running(Coordinates::new(40.7, -74.0), 5.0, 25.0, 180.0);
    run.record_interaction();
    let ride = Workout::cycling(Coordinates::new(48.85, 2.35), 20.0, 60.0, -15.0);
    let originals = vec![run, ride];

    let bags = originals
      .iter()
      .map(to_field_bag)
      .collect::<Result<Vec<_>>>()
      .unwrap();
    let restored = rehydrate(bags);

    assert_eq!(restored, originals);
    for (a, b) in restored.iter().zip(&originals) {
      assert_eq!(a.describe(), b.describe());
      assert_eq!(a.pace_min_per_km(), b.pace_min_per_km());
      assert_eq!(a.speed_kmh(), b.speed_kmh());
    }
  }
}
