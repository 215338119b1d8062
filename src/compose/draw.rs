use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};

/// Rendered pixel width of a string at the given size.
pub fn text_width(font: &Font<'_>, px: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut width = 0.0f32;
    for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
    }
    width
}

/// Rasterize `text` with its top-left corner at `(x, y)`, alpha-blending
/// glyph coverage into the image. The color's own alpha scales the coverage,
/// so a half-transparent color draws a half-transparent string.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &Font<'_>,
    px: f32,
    x: i32,
    y: i32,
    color: [u8; 4],
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;
    let color_alpha = f32::from(color[3]) / 255.0;

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= img.width() || py >= img.height() {
                    return;
                }
                let alpha = v * color_alpha;
                if alpha <= 0.0 {
                    return;
                }
                blend_pixel(img.get_pixel_mut(px, py), color, alpha);
            });
        }
    }
}

/// Fill a rectangle, alpha-blending the color over what is already there.
/// Used for the near-opaque line highlights behind the text.
pub fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, width: u32, height: u32, color: [u8; 4]) {
    let alpha = f32::from(color[3]) / 255.0;
    if alpha <= 0.0 {
        return;
    }
    for dy in 0..height as i32 {
        for dx in 0..width as i32 {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || py < 0 {
                continue;
            }
            let (px, py) = (px as u32, py as u32);
            if px >= img.width() || py >= img.height() {
                continue;
            }
            blend_pixel(img.get_pixel_mut(px, py), color, alpha);
        }
    }
}

fn blend_pixel(dst: &mut Rgba<u8>, color: [u8; 4], alpha: f32) {
    let inv = 1.0 - alpha;
    dst.0[0] = (f32::from(color[0]) * alpha + f32::from(dst.0[0]) * inv) as u8;
    dst.0[1] = (f32::from(color[1]) * alpha + f32::from(dst.0[1]) * inv) as u8;
    dst.0[2] = (f32::from(color[2]) * alpha + f32::from(dst.0[2]) * inv) as u8;
    dst.0[3] = 255;
}
