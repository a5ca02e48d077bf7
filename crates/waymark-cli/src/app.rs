//! Application state and command handlers.
//!
//! Every handler returns the text to print; `main` owns stdout.

use anyhow::{Context, Result, anyhow};
use waymark_core::{
  Coordinates, PersistenceGateway, WorkoutStore, factory::WorkoutForm,
  session::MapSession,
};

use crate::render;

/// Top-level application state.
pub struct App<G> {
  /// Workouts for this session, loaded from the gateway on startup.
  pub store:   WorkoutStore<G>,
  /// Map state shared by the handlers.
  pub session: MapSession,
}

impl<G: PersistenceGateway> App<G> {
  /// Open the store under `key` and start a session at `zoom_level`.
  pub async fn open(gateway: G, key: &str, zoom_level: u8) -> Self {
    Self {
      store:   WorkoutStore::open_with_key(gateway, key).await,
      session: MapSession::new(zoom_level),
    }
  }

  // ── Commands ────────────────────────────────────────────────────────────

  /// Submit `form` for the map position `at`.
  pub async fn add(&mut self, at: Coordinates, form: &WorkoutForm) -> Result<String> {
    let workout = form.submit(at).context("workout rejected")?;
    let added = self
      .store
      .add(workout)
      .await
      .context("saving workouts")?;

    Ok(format!(
      "{}\n{}",
      MapSession::marker_label(added),
      render::workout_entry(added)
    ))
  }

  pub fn list(&self) -> String { render::workout_list(self.store.all()) }

  pub fn markers(&self) -> String { render::marker_list(self.store.all()) }

  /// Centre the map on workout `id` and count the click.
  pub async fn show(&mut self, id: &str) -> Result<String> {
    let Some(workout) = self.store.find_by_id(id) else {
      return Ok(format!("No workout with id {id}."));
    };
    let centre = self.session.pan_to(workout);

    let workout = self
      .store
      .record_interaction(id)
      .await
      .context("saving workouts")?
      .ok_or_else(|| anyhow!("workout {id} vanished"))?;

    Ok(format!(
      "Centred map on ({centre}) at zoom {}\n{}",
      self.session.zoom_level,
      render::workout_entry(workout)
    ))
  }

  /// The persisted representation, pretty-printed.
  pub fn export(&self) -> Result<String> {
    let bags = self.store.serialize().context("serialising workouts")?;
    Ok(serde_json::to_string_pretty(&bags)?)
  }

  pub async fn reset(&mut self) -> Result<String> {
    let count = self.store.len();
    self.store.reset().await.context("resetting workouts")?;
    Ok(format!("Removed {count} workout(s)."))
  }
}
