//! Photo acceptance rules for registration uploads.
//!
//! Rules apply in a fixed order and stop at the first failure:
//!
//! 1. a file is present;
//! 2. its MIME type or file name says JPEG;
//! 3. it is at most [`MAX_PHOTO_BYTES`];
//! 4. it decodes to at least [`MIN_PHOTO_SIDE`] pixels on both axes.
//!
//! The first three rules are synchronous; the image probe behind the last one
//! is only awaited once they pass.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{Dimensions, ImageProbe};

/// Largest accepted photo, in bytes (5 MiB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;
/// Smallest accepted width and height, in pixels.
pub const MIN_PHOTO_SIDE: u32 = 70;
/// MIME type sent with accepted photos.
pub const PHOTO_MIME_TYPE: &str = "image/jpeg";

/// Reasons a photo is not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PhotoRejection {
    /// No file was selected.
    #[error("Photo is required")]
    Missing,
    /// The file is not a JPEG.
    #[error("The photo format must be jpeg/jpg type.")]
    NotJpeg,
    /// The file exceeds [`MAX_PHOTO_BYTES`].
    #[error("The photo size must not be greater than 5 Mb.")]
    TooLarge,
    /// At least one side is shorter than [`MIN_PHOTO_SIDE`].
    #[error("Minimum size of photo 70x70px.")]
    TooSmall,
    /// The probe could not decode the file.
    #[error("The photo could not be read.")]
    Unreadable,
}

/// A file the user picked, before any validation.
#[derive(Clone, PartialEq, Eq)]
pub struct PhotoCandidate {
    file_name: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

impl PhotoCandidate {
    /// Wrap a picked file. `mime_type` is whatever the picker reported.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type,
            bytes: bytes.into(),
        }
    }

    /// Original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// MIME type reported by the picker, if any.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Raw file contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// File size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    fn looks_like_jpeg(&self) -> bool {
        let mime_says_jpeg = self.mime_type.as_deref().is_some_and(ends_with_jpeg);
        let name_says_jpeg = self
            .file_name
            .rsplit_once('.')
            .is_some_and(|(_, extension)| {
                extension.eq_ignore_ascii_case("jpg") || extension.eq_ignore_ascii_case("jpeg")
            });
        mime_says_jpeg || name_says_jpeg
    }
}

impl fmt::Debug for PhotoCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoCandidate")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn ends_with_jpeg(mime_type: &str) -> bool {
    let lowered = mime_type.to_ascii_lowercase();
    lowered.ends_with("jpeg") || lowered.ends_with("jpg")
}

/// A photo that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPhoto {
    candidate: PhotoCandidate,
    dimensions: Dimensions,
}

impl ValidatedPhoto {
    /// The accepted file.
    #[must_use]
    pub fn candidate(&self) -> &PhotoCandidate {
        &self.candidate
    }

    /// Decoded pixel dimensions.
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

/// A photo that failed a rule, kept so the selection can still be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedPhoto {
    /// First rule the file failed.
    pub reason: PhotoRejection,
    /// The rejected file.
    pub candidate: PhotoCandidate,
}

/// Applies the photo rules, using an [`ImageProbe`] for dimensions.
#[derive(Clone)]
pub struct PhotoValidator {
    probe: Arc<dyn ImageProbe>,
}

impl PhotoValidator {
    /// Build a validator around an image probe.
    pub fn new(probe: Arc<dyn ImageProbe>) -> Self {
        Self { probe }
    }

    /// Run every rule against an optional selection.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub async fn check(
        &self,
        candidate: Option<&PhotoCandidate>,
    ) -> Result<Dimensions, PhotoRejection> {
        let candidate = check_file(candidate)?;
        let dimensions = self
            .probe
            .dimensions(candidate.bytes())
            .await
            .map_err(|error| {
                debug!(file = candidate.file_name(), error = %error, "photo probe failed");
                PhotoRejection::Unreadable
            })?;
        if !dimensions.covers(MIN_PHOTO_SIDE) {
            return Err(PhotoRejection::TooSmall);
        }
        Ok(dimensions)
    }

    /// Validate a selected file, taking ownership of it either way.
    ///
    /// # Errors
    ///
    /// Returns the file together with the first rule it failed.
    pub async fn accept(&self, candidate: PhotoCandidate) -> Result<ValidatedPhoto, RejectedPhoto> {
        match self.check(Some(&candidate)).await {
            Ok(dimensions) => Ok(ValidatedPhoto {
                candidate,
                dimensions,
            }),
            Err(reason) => Err(RejectedPhoto { reason, candidate }),
        }
    }
}

impl fmt::Debug for PhotoValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhotoValidator").finish_non_exhaustive()
    }
}

/// Synchronous rules: presence, type, size.
fn check_file(candidate: Option<&PhotoCandidate>) -> Result<&PhotoCandidate, PhotoRejection> {
    let candidate = candidate.ok_or(PhotoRejection::Missing)?;
    if !candidate.looks_like_jpeg() {
        return Err(PhotoRejection::NotJpeg);
    }
    if candidate.size() > MAX_PHOTO_BYTES {
        return Err(PhotoRejection::TooLarge);
    }
    Ok(candidate)
}
