//! Driven port for reading pixel dimensions out of encoded image bytes.

use async_trait::async_trait;

use super::define_port_error;

/// Pixel dimensions of a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Whether both axes are at least `min` pixels.
    #[must_use]
    pub const fn covers(&self, min: u32) -> bool {
        self.width >= min && self.height >= min
    }
}

define_port_error! {
    /// Errors surfaced while probing an image.
    pub enum ImageProbeError {
        /// The bytes are not an image the probe understands.
        Unreadable => "image could not be decoded: {message}",
    }
}

/// Port for decoding image dimensions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageProbe: Send + Sync {
    /// Decode enough of `bytes` to report its pixel dimensions.
    async fn dimensions(&self, bytes: &[u8]) -> Result<Dimensions, ImageProbeError>;
}
