//! Constants used throughout the kiosk core crate.
//!
//! This module contains all path and filename constants to ensure
//! consistency across the codebase and make maintenance easier.

/// Filename of the surveys collection document.
pub const SURVEYS_FILENAME: &str = "surveys.json";

/// Filename of the responses collection document.
pub const RESPONSES_FILENAME: &str = "responses.json";

/// Directory name for image blobs, relative to the data directory.
pub const IMAGES_DIR_NAME: &str = "images";

/// Default directory for kiosk data when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default admin password used when none is configured.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
