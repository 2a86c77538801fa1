//! Persistence collaborators for history storage.
//!
//! Storage is best-effort from the session's point of view: the in-memory
//! history is authoritative, and a failed write costs at most data on exit.
//! A missing or corrupt store loads as an empty history, never as an error.
//!
//! Two adapters ship with the crate: [`MemoryStorage`] for tests and
//! ephemeral sessions, and [`JsonFileStorage`] for a device-local file. The
//! on-disk format is a bare JSON array of outcome values (`[1,2,3,0]`).

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RouletteError};
use crate::outcome::TableVariant;

/// Load/save contract consumed by the history store.
///
/// `append`/`append_many` exist so remote backends can send deltas instead
/// of rewriting the whole history; the file adapter implements them as
/// load-modify-save, exactly like the original local store did.
pub trait StorageAdapter: Send {
    /// The stored history, oldest first. Absence or corruption yields empty.
    fn load(&self) -> Result<Vec<u8>>;

    /// Overwrite the stored history.
    fn save_all(&mut self, history: &[u8]) -> Result<()>;

    /// Append a single outcome to the stored history.
    fn append(&mut self, n: u8) -> Result<()> {
        self.append_many(std::slice::from_ref(&n))
    }

    /// Append a batch of outcomes to the stored history.
    fn append_many(&mut self, outcomes: &[u8]) -> Result<()> {
        let mut hist = self.load()?;
        hist.extend_from_slice(outcomes);
        self.save_all(&hist)
    }

    /// Drop the stored history entirely.
    fn reset(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory adapter
// ---------------------------------------------------------------------------

/// In-memory store. Holds the history for the process lifetime only.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Vec<u8>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStorage {
    fn load(&self) -> Result<Vec<u8>> {
        Ok(self.data.clone())
    }

    fn save_all(&mut self, history: &[u8]) -> Result<()> {
        self.data = history.to_vec();
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.data.clear();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file adapter
// ---------------------------------------------------------------------------

/// File-backed store, one file per table variant under a data directory.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Store for `variant` under `dir`. The file name matches the original
    /// storage keys: `european_roulette_v1.json` / `american_roulette_v1.json`.
    pub fn new(dir: impl AsRef<Path>, variant: TableVariant) -> Self {
        let file = match variant {
            TableVariant::European => "european_roulette_v1.json",
            TableVariant::American => "american_roulette_v1.json",
        };
        Self {
            path: dir.as_ref().join(file),
        }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StorageAdapter for JsonFileStorage {
    fn load(&self) -> Result<Vec<u8>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(_) => return Ok(Vec::new()),
        };
        // Corrupt content loads as empty rather than failing the session.
        Ok(serde_json::from_str(&raw).unwrap_or_default())
    }

    fn save_all(&mut self, history: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(RouletteError::persistence)?;
        }
        let json = serde_json::to_string(history).map_err(RouletteError::persistence)?;
        fs::write(&self.path, json).map_err(RouletteError::persistence)
    }

    fn reset(&mut self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RouletteError::persistence(e)),
        }
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Storage selection for [`create_storage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    Memory,
    File,
}

/// Build a storage adapter. `File` mode persists under `dir`.
pub fn create_storage(
    mode: StorageMode,
    variant: TableVariant,
    dir: impl AsRef<Path>,
) -> Box<dyn StorageAdapter> {
    match mode {
        StorageMode::Memory => Box::new(MemoryStorage::new()),
        StorageMode::File => Box::new(JsonFileStorage::new(dir, variant)),
    }
}
