//! `waymark`: record runs and rides against map positions.
//!
//! # Usage
//!
//! ```
//! waymark add running --lat 40.7 --lng -74.0 --distance 5 --duration 25 --cadence 180
//! waymark list
//! waymark show <id>
//! waymark --config ~/.config/waymark/waymark.toml reset
//! ```

mod app;
mod render;

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use app::App;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use waymark_core::{
  Coordinates, MemoryGateway, PersistenceGateway, factory::WorkoutForm,
  session::DEFAULT_ZOOM, store::DEFAULT_KEY,
};
use waymark_store_sqlite::SqliteGateway;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "waymark", version, about = "Track runs and rides on a map")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, default_value = "waymark.toml", value_name = "FILE")]
  config: PathBuf,

  /// Keep workouts in memory only; nothing is read or written on disk.
  #[arg(long)]
  in_memory: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Record a workout at a map position.
  Add(AddArgs),
  /// List all workouts, oldest first.
  List,
  /// Print one map marker per workout.
  Markers,
  /// Centre the map on a workout.
  Show { id: String },
  /// Print the stored representation of every workout.
  Export,
  /// Delete every workout.
  Reset,
}

/// Raw form input; numbers are validated by the workout factory, not here.
#[derive(Args, Debug)]
struct AddArgs {
  /// `running` or `cycling`.
  kind: String,

  #[arg(long, allow_negative_numbers = true)]
  lat: f64,

  #[arg(long, allow_negative_numbers = true)]
  lng: f64,

  /// Kilometres.
  #[arg(long, default_value = "", allow_hyphen_values = true)]
  distance: String,

  /// Minutes.
  #[arg(long, default_value = "", allow_hyphen_values = true)]
  duration: String,

  /// Steps per minute (running).
  #[arg(long, default_value = "", allow_hyphen_values = true)]
  cadence: String,

  /// Metres climbed (cycling).
  #[arg(long, default_value = "", allow_hyphen_values = true)]
  elevation: String,
}

impl AddArgs {
  fn form(&self) -> WorkoutForm {
    WorkoutForm {
      kind:      self.kind.clone(),
      distance:  self.distance.clone(),
      duration:  self.duration.clone(),
      cadence:   self.cadence.clone(),
      elevation: self.elevation.clone(),
    }
  }
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Settings from the optional config file, overridden by `WAYMARK_*`
/// environment variables.
#[derive(Deserialize, Debug)]
struct CliConfig {
  #[serde(default = "default_store_path")]
  store_path:  PathBuf,
  #[serde(default = "default_storage_key")]
  storage_key: String,
  #[serde(default = "default_zoom_level")]
  zoom_level:  u8,
}

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/waymark/waymark.db") }

fn default_storage_key() -> String { DEFAULT_KEY.to_string() }

fn default_zoom_level() -> u8 { DEFAULT_ZOOM }

fn load_config(path: &Path) -> Result<CliConfig> {
  config::Config::builder()
    .add_source(config::File::from(path).required(false))
    .add_source(config::Environment::with_prefix("WAYMARK"))
    .build()
    .context("failed to read config file")?
    .try_deserialize()
    .context("failed to deserialise config")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so command output stays clean.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = load_config(&cli.config)?;

  if cli.in_memory {
    return run(MemoryGateway::new(), &cfg, cli.command).await;
  }

  let store_path = expand_tilde(&cfg.store_path);
  if let Some(parent) = store_path.parent()
    && !parent.as_os_str().is_empty()
  {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }

  let gateway = SqliteGateway::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  tracing::debug!(path = %store_path.display(), "opened store");

  run(gateway, &cfg, cli.command).await
}

async fn run<G: PersistenceGateway>(gateway: G, cfg: &CliConfig, command: Command) -> Result<()> {
  let mut app = App::open(gateway, &cfg.storage_key, cfg.zoom_level).await;

  let output = match command {
    Command::Add(args) => {
      let at = Coordinates::new(args.lat, args.lng);
      app.add(at, &args.form()).await?
    }
    Command::List => app.list(),
    Command::Markers => app.markers(),
    Command::Show { id } => app.show(&id).await?,
    Command::Export => app.export()?,
    Command::Reset => app.reset().await?,
  };

  if !output.is_empty() {
    println!("{output}");
  }
  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn add_accepts_negative_longitude_and_raw_numbers() {
    let cli = Cli::try_parse_from([
      "waymark", "add", "running", "--lat", "40.7", "--lng", "-74.0", "--distance", "-1",
      "--duration", "25", "--cadence", "180",
    ])
    .unwrap();
    let Command::Add(args) = cli.command else {
      panic!("expected add");
    };
    assert_eq!(args.lng, -74.0);
    assert_eq!(args.form().distance, "-1");
    assert_eq!(args.form().elevation, "");
  }

  #[test]
  fn config_defaults_apply_without_a_file() {
    let cfg = load_config(Path::new("/nonexistent/waymark.toml")).unwrap();
    assert_eq!(cfg.storage_key, "workouts");
    assert_eq!(cfg.zoom_level, 13);
  }

  #[test]
  fn tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else {
      return;
    };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("/abs/x.db")), PathBuf::from("/abs/x.db"));
  }
}
