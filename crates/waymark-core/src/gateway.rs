//! The `PersistenceGateway` trait and an in-memory implementation.
//!
//! A gateway is an opaque string-keyed blob store. It knows nothing about
//! workouts; [`crate::store::WorkoutStore`] decides what goes into the blob.
//! Backends live in their own crates (e.g. `waymark-store-sqlite`).

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  sync::{Mutex, PoisonError},
};

/// Abstraction over durable key-value storage for serialised blobs.
///
/// All methods return `Send` futures so a store can be driven from a
/// multi-threaded runtime.
pub trait PersistenceGateway: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the blob stored under `key`. Returns `None` if there is none.
  fn get<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send + 'a;

  /// Replace the blob stored under `key`.
  fn set<'a>(
    &'a self,
    key: &'a str,
    value: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Delete the blob stored under `key`. Deleting a missing key is not an
  /// error.
  fn remove<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── MemoryGateway ───────────────────────────────────────────────────────────

/// A gateway that keeps blobs in a process-local map. Never fails.
#[derive(Debug, Default)]
pub struct MemoryGateway {
  blobs: Mutex<HashMap<String, String>>,
}

impl MemoryGateway {
  pub fn new() -> Self { Self::default() }

  /// A gateway that already holds `value` under `key`.
  pub fn with_blob(key: impl Into<String>, value: impl Into<String>) -> Self {
    let gateway = Self::default();
    gateway.lock().insert(key.into(), value.into());
    gateway
  }

  /// Read a blob synchronously; handy for assertions.
  pub fn peek(&self, key: &str) -> Option<String> { self.lock().get(key).cloned() }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    // Each critical section is a single map operation.
    self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl PersistenceGateway for MemoryGateway {
  type Error = Infallible;

  async fn get(&self, key: &str) -> Result<Option<String>, Infallible> {
    Ok(self.peek(key))
  }

  async fn set(&self, key: &str, value: String) -> Result<(), Infallible> {
    self.lock().insert(key.to_owned(), value);
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), Infallible> {
    self.lock().remove(key);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn set_get_remove() {
    let g = MemoryGateway::new();
    assert_eq!(g.get("k").await.unwrap(), None);

    g.set("k", "one".into()).await.unwrap();
    g.set("k", "two".into()).await.unwrap();
    assert_eq!(g.get("k").await.unwrap().as_deref(), Some("two"));

    g.remove("k").await.unwrap();
    g.remove("k").await.unwrap();
    assert_eq!(g.get("k").await.unwrap(), None);
  }

  #[tokio::test]
  async fn keys_are_independent() {
    let g = MemoryGateway::with_blob("a", "1");
    g.set("b", "2".into()).await.unwrap();
    g.remove("b").await.unwrap();
    assert_eq!(g.peek("a").as_deref(), Some("1"));
  }
}
