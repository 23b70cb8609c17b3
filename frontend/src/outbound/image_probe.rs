//! `image`-backed dimension probe.
//!
//! Only the image header is decoded, so probing a large file does not
//! allocate its pixel buffer.

use std::io::Cursor;

use async_trait::async_trait;
use image::io::Reader;
use tracing::debug;

use crate::domain::ports::{Dimensions, ImageProbe, ImageProbeError};

/// Probe that sniffs the format from the bytes and reads the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateProbe;

impl ImageCrateProbe {
    /// Build a probe.
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageProbe for ImageCrateProbe {
    async fn dimensions(&self, bytes: &[u8]) -> Result<Dimensions, ImageProbeError> {
        let reader = Reader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|error| ImageProbeError::unreadable(error.to_string()))?;
        let format = reader.format();
        let (width, height) = reader
            .into_dimensions()
            .map_err(|error| ImageProbeError::unreadable(error.to_string()))?;
        debug!(?format, width, height, "probed image");
        Ok(Dimensions { width, height })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use rstest::rstest;

    fn encode(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), format)
            .expect("encode test image");
        bytes
    }

    #[rstest]
    #[case::jpeg(encode(120, 80, ImageOutputFormat::Jpeg(80)), 120, 80)]
    #[case::png(encode(50, 50, ImageOutputFormat::Png), 50, 50)]
    #[tokio::test]
    async fn reads_dimensions_from_headers(
        #[case] bytes: Vec<u8>,
        #[case] width: u32,
        #[case] height: u32,
    ) {
        let dimensions = ImageCrateProbe::new()
            .dimensions(&bytes)
            .await
            .expect("dimensions");
        assert_eq!(dimensions, Dimensions { width, height });
    }

    #[rstest]
    #[tokio::test]
    async fn garbage_is_unreadable() {
        let error = ImageCrateProbe::new()
            .dimensions(b"definitely not an image")
            .await
            .expect_err("garbage");
        assert_eq!(error.kind(), "unreadable");
    }

    #[rstest]
    #[tokio::test]
    async fn truncated_jpeg_is_unreadable() {
        let bytes = encode(100, 100, ImageOutputFormat::Jpeg(80));
        let result = ImageCrateProbe::new().dimensions(&bytes[..4]).await;
        assert!(result.is_err());
    }
}
