//! Shared register
//!
//! Concurrently open instances coordinate through a flat string key-value
//! store. Every key is an independent last-write-wins register: there is no
//! locking across instances and a lost update is never reported.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use railboard_core::SimTime;

/// Whether instances follow the shared pause flag and sync time
pub const AUTO_SYNC_KEY: &str = "autoSyncEnabled";
/// Shared pause flag, only consulted with auto-sync enabled
pub const PAUSED_KEY: &str = "pausedFlag";
/// Last published simulated time, in milliseconds
pub const SYNC_TIME_KEY: &str = "syncedSimTimeMillis";
/// Raw export stored by "save locally"
pub const SAVED_TEXT_KEY: &str = "savedRawText";

/// Read/write contract of the storage behind the register
pub trait SharedRegister: Send + Sync {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-process register; clones share the same cells
#[derive(Clone, Default)]
pub struct MemoryRegister {
    cells: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryRegister {
    pub fn new() -> Self {
        MemoryRegister::default()
    }

    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }
}

impl SharedRegister for MemoryRegister {
    fn read(&self, key: &str) -> Option<String> {
        self.cells.read().get(key).cloned()
    }

    fn write(&self, key: &str, value: String) {
        self.cells.write().insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.cells.write().remove(key);
    }
}

/// Typed view over the four shared values
#[derive(Clone)]
pub struct SyncRegister {
    backend: Arc<dyn SharedRegister>,
}

impl SyncRegister {
    pub fn new(backend: Arc<dyn SharedRegister>) -> Self {
        SyncRegister { backend }
    }

    /// Fresh, unshared in-memory register
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRegister::new()))
    }

    pub fn auto_sync(&self) -> bool {
        self.read_bool(AUTO_SYNC_KEY).unwrap_or(false)
    }

    pub fn set_auto_sync(&self, enabled: bool) {
        self.write_bool(AUTO_SYNC_KEY, enabled);
    }

    /// `None` when no instance has written the flag yet
    pub fn paused(&self) -> Option<bool> {
        self.read_bool(PAUSED_KEY)
    }

    pub fn set_paused(&self, paused: bool) {
        self.write_bool(PAUSED_KEY, paused);
    }

    /// `None` when missing or unparsable
    pub fn synced_time(&self) -> Option<SimTime> {
        self.backend
            .read(SYNC_TIME_KEY)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .map(SimTime::from_millis)
    }

    pub fn set_synced_time(&self, time: SimTime) {
        self.backend.write(SYNC_TIME_KEY, time.as_millis().to_string());
    }

    pub fn saved_text(&self) -> Option<String> {
        self.backend.read(SAVED_TEXT_KEY)
    }

    pub fn set_saved_text(&self, raw: &str) {
        self.backend.write(SAVED_TEXT_KEY, raw.to_string());
    }

    pub fn clear_saved_text(&self) {
        self.backend.remove(SAVED_TEXT_KEY);
    }

    fn read_bool(&self, key: &str) -> Option<bool> {
        self.backend.read(key).map(|v| v == "true")
    }

    fn write_bool(&self, key: &str, value: bool) {
        self.backend.write(key, value.to_string());
    }
}

impl std::fmt::Debug for SyncRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncRegister")
            .field("auto_sync", &self.auto_sync())
            .field("paused", &self.paused())
            .field("synced_time", &self.synced_time())
            .finish()
    }
}
