//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::constants::{
    DEFAULT_ADMIN_PASSWORD, DEFAULT_DATA_DIR, IMAGES_DIR_NAME, RESPONSES_FILENAME,
    SURVEYS_FILENAME,
};
use crate::{KioskError, KioskResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct KioskConfig {
    data_dir: PathBuf,
    admin_password: String,
}

impl std::fmt::Debug for KioskConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The admin password stays out of debug output and logs.
        f.debug_struct("KioskConfig")
            .field("data_dir", &self.data_dir)
            .finish_non_exhaustive()
    }
}

impl KioskConfig {
    /// Create a new `KioskConfig`.
    pub fn new(data_dir: PathBuf, admin_password: String) -> KioskResult<Self> {
        if admin_password.trim().is_empty() {
            return Err(KioskError::MalformedInput(
                "admin password cannot be empty".into(),
            ));
        }

        Ok(Self {
            data_dir,
            admin_password,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn surveys_path(&self) -> PathBuf {
        self.data_dir.join(SURVEYS_FILENAME)
    }

    pub fn responses_path(&self) -> PathBuf {
        self.data_dir.join(RESPONSES_FILENAME)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.data_dir.join(IMAGES_DIR_NAME)
    }

    pub fn admin_password(&self) -> &str {
        &self.admin_password
    }
}

/// Resolve the data directory from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the default `data/` directory
/// relative to the working directory is used.
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
}

/// Resolve the admin password from an optional environment value.
///
/// If `value` is `None` or empty/whitespace, the built-in development
/// password is used. Deployments are expected to override it.
pub fn admin_password_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ADMIN_PASSWORD.to_string())
}
