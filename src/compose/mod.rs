pub mod draw;
pub mod font;
pub mod layout;

pub use font::{ensure_font_exists, load_font};
pub use layout::Placement;

use crate::error::ComposeError;
use image::codecs::jpeg::JpegEncoder;
use layout::Region;
use rusttype::Font;
use std::io::Cursor;

/// Seam between the real compositor and test doubles: the pipeline only needs
/// "image bytes + text in, image bytes out".
pub trait Overlay {
    fn composite(
        &self,
        raw: &[u8],
        text: &str,
        placement: Placement,
    ) -> Result<Vec<u8>, ComposeError>;
}

/// The adaptive typography engine: crops the generated image, finds a visually
/// quiet zone, wraps and (if needed) shrinks the text, renders highlighted
/// lines in a contrast-safe palette, stamps the watermark, and re-encodes.
pub struct Compositor {
    font: Font<'static>,
    watermark: String,
}

impl Compositor {
    pub fn new(font: Font<'static>, watermark: impl Into<String>) -> Self {
        Self {
            font,
            watermark: watermark.into(),
        }
    }
}

impl Overlay for Compositor {
    fn composite(
        &self,
        raw: &[u8],
        text: &str,
        placement: Placement,
    ) -> Result<Vec<u8>, ComposeError> {
        let decoded =
            image::load_from_memory(raw).map_err(|e| ComposeError::Decode(e.to_string()))?;

        let crop = layout::crop_rect_4_5(decoded.width(), decoded.height());
        let mut img = decoded
            .crop_imm(crop.x, crop.y, crop.width, crop.height)
            .to_rgba8();
        let (width, height) = img.dimensions();

        let box_width = (width as f32 * layout::BOX_WIDTH_FRAC) as u32;
        let box_x = (width - box_width) / 2;
        let start_size = layout::font_size_for(text);
        let box_height = layout::line_height(start_size) * layout::BOX_LINES;

        let box_y = layout::pick_zone(&img, box_x, box_width, box_height, placement);
        let (mean_luma, _) = layout::luma_stats(
            &img,
            Region {
                x: box_x,
                y: box_y,
                width: box_width,
                height: box_height,
            },
        );
        let palette = layout::palette_for(mean_luma);

        let (size, lines) = layout::shrink_to_fit(
            text,
            box_width as f32,
            box_height,
            start_size,
            |s, px| draw::text_width(&self.font, px, s),
        );
        let line_height = layout::line_height(size);
        let block_height = lines.len() as u32 * line_height;

        // Vertically center the wrapped block inside the fixed box.
        let mut y = box_y as i32 + (box_height.saturating_sub(block_height) / 2) as i32;

        for line in &lines {
            let line_width = draw::text_width(&self.font, size, line);
            let x = ((width as f32 - line_width) / 2.0) as i32;

            draw::fill_rect(
                &mut img,
                x - layout::PAD_X,
                y - layout::PAD_Y,
                line_width as u32 + 2 * layout::PAD_X as u32,
                line_height + 2 * layout::PAD_Y as u32,
                palette.highlight,
            );
            draw::draw_text(&mut img, &self.font, size, x, y, palette.text, line);

            y += line_height as i32;
        }

        // Watermark: quiet, centered, independent of the block placement.
        let mark_width = draw::text_width(&self.font, layout::WATERMARK_SIZE, &self.watermark);
        draw::draw_text(
            &mut img,
            &self.font,
            layout::WATERMARK_SIZE,
            ((width as f32 - mark_width) / 2.0) as i32,
            (height - layout::WATERMARK_BOTTOM_MARGIN) as i32,
            [255, 255, 255, layout::WATERMARK_ALPHA],
            &self.watermark,
        );

        let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
        let mut out = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut out, 95);
        rgb.write_with_encoder(encoder)
            .map_err(|e| ComposeError::Encode(e.to_string()))?;
        Ok(out.into_inner())
    }
}
