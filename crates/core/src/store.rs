//! Flat-file document storage for the two kiosk collections.
//!
//! Surveys and responses each live in a single JSON document holding the
//! whole collection. There are no partial updates: every mutation loads the
//! full collection, rewrites it in memory, and saves the full collection
//! back. Saves go through a sibling temporary file that is renamed into
//! place, so a crash mid-write never leaves a truncated document behind.
//!
//! ## Write serialisation
//!
//! The store exposes a single write lock. Every mutating operation holds the
//! lock across its whole load, modify, save cycle, which serialises writers
//! within the process and removes the lost-update race between concurrent
//! admin operations. Cross-process writers are out of scope: the kiosk runs
//! one process.

use crate::config::KioskConfig;
use crate::error::{KioskError, KioskResult};
use crate::model::{Response, Survey};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Store for the surveys and responses collection documents.
#[derive(Debug)]
pub struct DataStore {
    cfg: Arc<KioskConfig>,
    write_lock: Mutex<()>,
}

impl DataStore {
    /// Creates a store over the configured data directory, creating the
    /// directory if it does not yet exist.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::DataDirCreation` if the directory cannot be
    /// created.
    pub fn new(cfg: Arc<KioskConfig>) -> KioskResult<Self> {
        fs::create_dir_all(cfg.data_dir()).map_err(KioskError::DataDirCreation)?;

        Ok(Self {
            cfg,
            write_lock: Mutex::new(()),
        })
    }

    /// Acquires the store's write lock.
    ///
    /// Mutating operations hold the returned guard across their whole
    /// load-modify-save cycle. Read-only operations do not take the lock;
    /// they observe whichever complete document was last renamed into place.
    pub fn lock_for_write(&self) -> MutexGuard<'_, ()> {
        // A poisoned lock only means another writer panicked mid-operation;
        // the on-disk documents are still whole files.
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the surveys collection.
    ///
    /// Returns an empty vector when the document does not yet exist
    /// (first-run case).
    pub fn load_surveys(&self) -> KioskResult<Vec<Survey>> {
        load_collection(&self.cfg.surveys_path())
    }

    /// Rewrites the surveys collection document.
    pub fn save_surveys(&self, surveys: &[Survey]) -> KioskResult<()> {
        save_collection(&self.cfg.surveys_path(), surveys)
    }

    /// Loads the responses collection.
    ///
    /// Returns an empty vector when the document does not yet exist.
    pub fn load_responses(&self) -> KioskResult<Vec<Response>> {
        load_collection(&self.cfg.responses_path())
    }

    /// Rewrites the responses collection document.
    pub fn save_responses(&self, responses: &[Response]) -> KioskResult<()> {
        save_collection(&self.cfg.responses_path(), responses)
    }

    /// Returns the configuration this store was built from.
    pub fn config(&self) -> &Arc<KioskConfig> {
        &self.cfg
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> KioskResult<Vec<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(KioskError::CollectionRead(e)),
    };

    serde_json::from_str(&contents).map_err(KioskError::Deserialization)
}

fn save_collection<T: Serialize>(path: &Path, collection: &[T]) -> KioskResult<()> {
    let json = serde_json::to_vec_pretty(collection).map_err(KioskError::Serialization)?;

    // Write to a sibling temp file and rename it into place so readers never
    // observe a half-written document.
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(KioskError::CollectionWrite)?;
    fs::rename(&tmp_path, path).map_err(KioskError::CollectionReplace)?;

    Ok(())
}
