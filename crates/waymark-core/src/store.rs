//! [`WorkoutStore`]: the session's ordered collection of workouts.
//!
//! The store is append-only: workouts are added at the end and never edited
//! or removed, except by a full [`WorkoutStore::reset`]. After every mutation
//! the whole collection is re-serialised and written to the gateway as one
//! blob.
//!
//! Mutating methods take `&mut self`, so a store never has two gateway
//! operations in flight at once. Several processes sharing one backend are
//! not coordinated; the last write wins.

use crate::{
  Error, Result,
  gateway::PersistenceGateway,
  plain::{FieldBag, to_field_bag},
  rehydrate::{parse_blob, rehydrate},
  workout::Workout,
};

/// The key the blob is stored under unless told otherwise.
pub const DEFAULT_KEY: &str = "workouts";

pub struct WorkoutStore<G> {
  gateway:  G,
  key:      String,
  workouts: Vec<Workout>,
}

impl<G: PersistenceGateway> WorkoutStore<G> {
  /// An empty store that has not read anything from `gateway`.
  pub fn new(gateway: G) -> Self { Self::with_key(gateway, DEFAULT_KEY) }

  pub fn with_key(gateway: G, key: impl Into<String>) -> Self {
    Self { gateway, key: key.into(), workouts: Vec::new() }
  }

  /// Open a store and populate it from whatever `gateway` holds.
  pub async fn open(gateway: G) -> Self { Self::open_with_key(gateway, DEFAULT_KEY).await }

  pub async fn open_with_key(gateway: G, key: impl Into<String>) -> Self {
    let mut store = Self::with_key(gateway, key);
    store.restore().await;
    store
  }

  /// Replace the in-memory collection with the persisted one.
  ///
  /// A read failure is logged and treated as "no prior data".
  pub async fn restore(&mut self) {
    let blob = match self.gateway.get(&self.key).await {
      Ok(blob) => blob,
      Err(e) => {
        tracing::warn!(key = %self.key, error = %e, "could not read workouts; starting empty");
        None
      }
    };
    self.load_from(parse_blob(blob.as_deref()));
  }

  // ── Writes ──────────────────────────────────────────────────────────────

  /// Append `workout` and persist the whole collection.
  ///
  /// If the write fails the workout stays in memory and the error is
  /// returned; memory is then ahead of storage until the next successful
  /// write.
  pub async fn add(&mut self, workout: Workout) -> Result<&Workout> {
    let index = self.workouts.len();
    self.workouts.push(workout);
    self.persist().await?;
    Ok(&self.workouts[index])
  }

  /// Count a click on the workout with `id` and persist. Returns `None` if
  /// there is no such workout.
  pub async fn record_interaction(&mut self, id: &str) -> Result<Option<&Workout>> {
    let Some(index) = self.position(id) else {
      return Ok(None);
    };
    self.workouts[index].record_interaction();
    self.persist().await?;
    Ok(Some(&self.workouts[index]))
  }

  /// Replace the collection with the rehydrated `plain` entries. Nothing is
  /// written.
  pub fn load_from<I>(&mut self, plain: I)
  where
    I: IntoIterator<Item = FieldBag>,
  {
    self.workouts = rehydrate(plain);
    tracing::debug!(count = self.workouts.len(), "loaded workouts");
  }

  /// Drop every workout and delete the persisted blob.
  pub async fn reset(&mut self) -> Result<()> {
    self.workouts.clear();
    self
      .gateway
      .remove(&self.key)
      .await
      .map_err(Error::persistence)?;
    tracing::info!(key = %self.key, "workouts reset");
    Ok(())
  }

  // ── Reads ───────────────────────────────────────────────────────────────

  /// The first workout with `id`, in insertion order.
  pub fn find_by_id(&self, id: &str) -> Option<&Workout> {
    self.position(id).map(|i| &self.workouts[i])
  }

  /// Every workout, oldest first.
  pub fn all(&self) -> &[Workout] { &self.workouts }

  pub fn len(&self) -> usize { self.workouts.len() }

  pub fn is_empty(&self) -> bool { self.workouts.is_empty() }

  /// The plain projection of every workout, in order.
  pub fn serialize(&self) -> Result<Vec<FieldBag>> {
    self.workouts.iter().map(to_field_bag).collect()
  }

  pub fn key(&self) -> &str { &self.key }

  pub fn gateway(&self) -> &G { &self.gateway }

  pub fn into_gateway(self) -> G { self.gateway }

  // ── Internals ───────────────────────────────────────────────────────────

  fn position(&self, id: &str) -> Option<usize> {
    self.workouts.iter().position(|w| w.id().as_str() == id)
  }

  async fn persist(&self) -> Result<()> {
    let blob = serde_json::to_string(&self.serialize()?)?;
    self
      .gateway
      .set(&self.key, blob)
      .await
      .map_err(Error::persistence)?;
    tracing::debug!(key = %self.key, count = self.workouts.len(), "persisted workouts");
    Ok(())
  }
}
