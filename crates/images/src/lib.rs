//! Kiosk image storage
//!
//! This crate provides the image blob store for the survey kiosk.
//!
//! ## Design
//!
//! - Survey documents (JSON) and image bytes are deliberately separated
//! - Images live in a single flat directory, addressed by filename
//! - Filenames are validated at the type level ([`kiosk_types::ImageName`])
//!   so no path can escape the images directory
//! - References from survey items to images are plain filenames, making the
//!   documents valid even when an image file is absent
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── surveys.json       # owned by kiosk-core
//! ├── responses.json     # owned by kiosk-core
//! └── images/            # owned by this crate
//!     ├── 3_0_1719407000512.png
//!     └── pizza.jpg
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use kiosk_images::ImageStore;
//! use kiosk_types::ImageName;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = ImageStore::open(Path::new("data/images"))?;
//! let name = ImageName::new("pizza.jpg")?;
//! store.write(&name, &[0xff, 0xd8, 0xff])?;
//! let bytes = store.read(&name)?;
//! # Ok(())
//! # }
//! ```

mod store;

pub use kiosk_types::ImageName;
pub use store::{ImageMetadata, ImageStore};

/// Errors that can occur during image store operations
#[derive(Debug, thiserror::Error)]
pub enum ImagesError {
    /// Images directory could not be created or is not a directory
    #[error("Invalid images directory: {0}")]
    InvalidImagesDirectory(String),

    /// No image stored under the requested filename
    #[error("Image not found: {0}")]
    NotFound(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
