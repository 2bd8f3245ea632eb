use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use rusqlite::Connection;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::catalog;
use crate::db::queries;
use crate::models::{Appointment, Promotion, SalonConfig};

pub const BOOKINGS_KEY: &str = "dyra_bookings_v2";
pub const PROMOS_KEY: &str = "dyra_promos_v2";
pub const CONFIG_KEY: &str = "dyra_config_v2";

/// Synchronous key-value store holding one JSON document per key.
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

pub struct SqliteBlobStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBlobStore {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> anyhow::Result<T>) -> anyhow::Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow::anyhow!("blob store connection lock poisoned"))?;
        f(&conn)
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.with_conn(|conn| queries::get_blob(conn, key))
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.with_conn(|conn| queries::set_blob(conn, key, value))
    }

    fn clear(&self) -> anyhow::Result<()> {
        let removed = self.with_conn(queries::delete_all_blobs)?;
        tracing::info!(removed, "cleared stored documents");
        Ok(())
    }
}

/// Process-local store, used by tests and when no database is wanted.
#[derive(Default)]
pub struct MemoryBlobStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> anyhow::Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        self.entries()?.clear();
        Ok(())
    }
}

/// Reads one document, falling back to `default` when it is missing, unreadable
/// or not valid JSON for `T`. A bad key never affects the others.
fn load_or<T: DeserializeOwned>(store: &dyn BlobStore, key: &str, default: impl FnOnce() -> T) -> T {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read stored document, using default");
            return default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, "stored document is corrupt, using default");
            default()
        }
    }
}

fn save<T: Serialize + ?Sized>(store: &dyn BlobStore, key: &str, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string(value).with_context(|| format!("failed to encode {key}"))?;
    store
        .set(key, &json)
        .with_context(|| format!("failed to persist {key}"))
}

pub fn load_appointments(store: &dyn BlobStore) -> Vec<Appointment> {
    load_or(store, BOOKINGS_KEY, Vec::new)
}

pub fn load_promotions(store: &dyn BlobStore) -> Vec<Promotion> {
    load_or(store, PROMOS_KEY, catalog::initial_promotions)
}

pub fn load_config(store: &dyn BlobStore) -> SalonConfig {
    load_or(store, CONFIG_KEY, SalonConfig::default)
}

pub fn save_appointments(store: &dyn BlobStore, appointments: &[Appointment]) -> anyhow::Result<()> {
    save(store, BOOKINGS_KEY, appointments)
}

pub fn save_promotions(store: &dyn BlobStore, promotions: &[Promotion]) -> anyhow::Result<()> {
    save(store, PROMOS_KEY, promotions)
}

pub fn save_config(store: &dyn BlobStore, config: &SalonConfig) -> anyhow::Result<()> {
    save(store, CONFIG_KEY, config)
}
