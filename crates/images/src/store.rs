//! Flat-directory image storage implementation.
//!
//! Images are written and served back by filename. The filename is chosen by
//! the caller (the admin upload form, or the survey duplication logic) and is
//! validated before it reaches this module, so every operation here is a
//! single path join inside the images directory.
//!
//! Unlike a content-addressed store, a second write to the same filename
//! replaces the previous bytes. That matches the survey edit flow, where an
//! item's image is re-uploaded under its existing name.

use crate::ImagesError;
use chrono::{DateTime, Utc};
use kiosk_types::ImageName;
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata for a stored image.
///
/// Returned by [`ImageStore::write`] so callers can log or audit what was
/// persisted without re-reading the file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Filename the image was stored under
    pub name: ImageName,

    /// Size of the image in bytes
    pub size_bytes: u64,

    /// Detected media type (MIME type), if available
    ///
    /// This is a best-effort detection from the leading bytes and should not
    /// be considered authoritative. May be `None` if the media type cannot
    /// be determined.
    pub media_type: Option<String>,

    /// UTC timestamp when the image was stored
    pub stored_at: DateTime<Utc>,
}

/// Store for survey item images.
///
/// Bound to a single images directory. The directory is created on `open` if
/// it does not yet exist (first-run case), and all operations resolve to
/// direct children of it.
#[derive(Debug)]
pub struct ImageStore {
    images_dir: PathBuf,
}

impl ImageStore {
    /// Opens the image store rooted at `images_dir`, creating the directory
    /// if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ImagesError::InvalidImagesDirectory` if the directory cannot
    /// be created or the path exists but is not a directory.
    pub fn open(images_dir: &Path) -> Result<Self, ImagesError> {
        if images_dir.exists() && !images_dir.is_dir() {
            return Err(ImagesError::InvalidImagesDirectory(format!(
                "Path is not a directory: {}",
                images_dir.display()
            )));
        }

        fs::create_dir_all(images_dir).map_err(|e| {
            ImagesError::InvalidImagesDirectory(format!(
                "Cannot create directory {}: {}",
                images_dir.display(),
                e
            ))
        })?;

        Ok(Self {
            images_dir: images_dir.to_path_buf(),
        })
    }

    /// Writes image bytes under the given filename, replacing any previous
    /// content stored under that name.
    ///
    /// # Returns
    ///
    /// [`ImageMetadata`] with the stored size, a best-effort sniffed media
    /// type, and the storage timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ImagesError::Io` if the file cannot be written.
    pub fn write(&self, name: &ImageName, bytes: &[u8]) -> Result<ImageMetadata, ImagesError> {
        let path = self.image_path(name);

        fs::write(&path, bytes).map_err(|e| {
            ImagesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write image to {}: {}", path.display(), e),
            ))
        })?;

        let media_type = infer::get(bytes).map(|kind| kind.mime_type().to_owned());

        Ok(ImageMetadata {
            name: name.clone(),
            size_bytes: bytes.len() as u64,
            media_type,
            stored_at: Utc::now(),
        })
    }

    /// Reads the image stored under the given filename.
    ///
    /// # Errors
    ///
    /// Returns `ImagesError::NotFound` if no image is stored under `name`,
    /// or `ImagesError::Io` if the file cannot be read.
    pub fn read(&self, name: &ImageName) -> Result<Vec<u8>, ImagesError> {
        let path = self.image_path(name);

        if !path.is_file() {
            return Err(ImagesError::NotFound(name.to_string()));
        }

        fs::read(&path).map_err(|e| {
            ImagesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read image from {}: {}", path.display(), e),
            ))
        })
    }

    /// Deletes the image stored under the given filename.
    ///
    /// A missing file is not an error: survey deletion removes whatever
    /// blobs still exist and carries on.
    ///
    /// # Returns
    ///
    /// `true` if an image was removed, `false` if none was stored.
    ///
    /// # Errors
    ///
    /// Returns `ImagesError::Io` if the file exists but cannot be removed.
    pub fn delete(&self, name: &ImageName) -> Result<bool, ImagesError> {
        let path = self.image_path(name);

        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| {
            ImagesError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete image {}: {}", path.display(), e),
            ))
        })?;

        Ok(true)
    }

    /// Copies the image stored under `src` to a new filename `dst`.
    ///
    /// Used by survey duplication, which gives each cloned item its own
    /// physical copy so the two surveys' image lifetimes stay independent.
    ///
    /// # Errors
    ///
    /// Returns `ImagesError::NotFound` if `src` is not stored, or
    /// `ImagesError::Io` if the copy fails.
    pub fn copy(&self, src: &ImageName, dst: &ImageName) -> Result<(), ImagesError> {
        let src_path = self.image_path(src);
        let dst_path = self.image_path(dst);

        if !src_path.is_file() {
            return Err(ImagesError::NotFound(src.to_string()));
        }

        fs::copy(&src_path, &dst_path).map_err(|e| {
            ImagesError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to copy image {} to {}: {}",
                    src_path.display(),
                    dst_path.display(),
                    e
                ),
            ))
        })?;

        Ok(())
    }

    /// Returns true if an image is stored under the given filename.
    pub fn exists(&self, name: &ImageName) -> bool {
        self.image_path(name).is_file()
    }

    /// Returns the directory this store is rooted at.
    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    fn image_path(&self, name: &ImageName) -> PathBuf {
        self.images_dir.join(name.as_str())
    }
}
