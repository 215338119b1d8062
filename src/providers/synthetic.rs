use super::ImageGenerator;
use crate::error::{BotError, ComposeError};
use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use std::io::Cursor;
use tracing::info;

/// Dry-run stand-in for the image API: a flat dark frame at the same
/// dimensions the real model returns, so the compositor path runs unchanged.
pub struct SyntheticImage {
    width: u32,
    height: u32,
}

impl Default for SyntheticImage {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 1792,
        }
    }
}

impl SyntheticImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[async_trait]
impl ImageGenerator for SyntheticImage {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, BotError> {
        info!(chars = prompt.len(), "dry run: synthetic image instead of API call");
        let img = RgbImage::from_pixel(self.width, self.height, Rgb([50, 50, 50]));
        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, 95);
        img.write_with_encoder(encoder)
            .map_err(|e| ComposeError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}
