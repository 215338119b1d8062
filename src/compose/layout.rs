use image::RgbaImage;

// Typography scale, lifted from the tuned values of the production posts.
pub const FONT_LARGE: f32 = 38.0;
pub const FONT_SMALL: f32 = 34.0;
pub const FONT_FLOOR: f32 = 22.0;
pub const FONT_STEP: f32 = 2.0;
pub const LINE_HEIGHT_FACTOR: f32 = 1.35;
pub const SHORT_TEXT_CHARS: usize = 90;

pub const BOX_WIDTH_FRAC: f32 = 0.70;
pub const BOX_LINES: u32 = 4;
pub const PAD_X: i32 = 20;
pub const PAD_Y: i32 = 10;

/// Mean luminance below this reads as a dark region.
pub const DARK_THRESHOLD: f32 = 130.0;

pub const WATERMARK_SIZE: f32 = 26.0;
pub const WATERMARK_BOTTOM_MARGIN: u32 = 58;
pub const WATERMARK_ALPHA: u8 = 130;

/// Where the text block lands. `Auto` scores the candidate zones; the other
/// two are forced by a chat directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Auto,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Centered crop to a 4:5 frame, trimming equal margins from whichever
/// dimension overshoots the ratio.
pub fn crop_rect_4_5(width: u32, height: u32) -> Region {
    let target_height = width * 5 / 4;
    if height >= target_height {
        Region {
            x: 0,
            y: (height - target_height) / 2,
            width,
            height: target_height,
        }
    } else {
        let target_width = height * 4 / 5;
        Region {
            x: (width - target_width) / 2,
            y: 0,
            width: target_width,
            height,
        }
    }
}

/// Shorter strings get the larger size.
pub fn font_size_for(text: &str) -> f32 {
    if text.chars().count() <= SHORT_TEXT_CHARS {
        FONT_LARGE
    } else {
        FONT_SMALL
    }
}

pub fn line_height(font_size: f32) -> u32 {
    (font_size * LINE_HEIGHT_FACTOR) as u32
}

/// The two candidate block origins: high in the sky zone and low on the
/// body, skipping the subject-occupied middle band entirely.
pub fn candidate_offsets(image_height: u32) -> [u32; 2] {
    [
        (image_height as f32 * 0.10) as u32,
        (image_height as f32 * 0.75) as u32,
    ]
}

/// BT.601 luma.
fn luma(pixel: &image::Rgba<u8>) -> f32 {
    0.299 * f32::from(pixel.0[0]) + 0.587 * f32::from(pixel.0[1]) + 0.114 * f32::from(pixel.0[2])
}

/// Mean and standard deviation of luminance over a region, clamped to the
/// image bounds.
pub fn luma_stats(img: &RgbaImage, region: Region) -> (f32, f32) {
    let x_end = (region.x + region.width).min(img.width());
    let y_end = (region.y + region.height).min(img.height());
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut count = 0u64;

    for y in region.y.min(y_end)..y_end {
        for x in region.x.min(x_end)..x_end {
            let l = f64::from(luma(img.get_pixel(x, y)));
            sum += l;
            sum_sq += l * l;
            count += 1;
        }
    }
    if count == 0 {
        return (0.0, 0.0);
    }
    let mean = sum / count as f64;
    let variance = (sum_sq / count as f64 - mean * mean).max(0.0);
    (mean as f32, variance.sqrt() as f32)
}

/// Pick the flattest candidate zone (lowest luminance standard deviation)
/// for a text box of the given width/height, or honor a forced placement.
pub fn pick_zone(
    img: &RgbaImage,
    box_x: u32,
    box_width: u32,
    box_height: u32,
    placement: Placement,
) -> u32 {
    let [top, bottom] = candidate_offsets(img.height());
    match placement {
        Placement::Top => top,
        Placement::Bottom => bottom,
        Placement::Auto => {
            let score = |y: u32| {
                let (_, stddev) = luma_stats(
                    img,
                    Region {
                        x: box_x,
                        y,
                        width: box_width,
                        height: box_height,
                    },
                );
                stddev
            };
            if score(top) <= score(bottom) { top } else { bottom }
        }
    }
}

/// Contrast-safe palette chosen from the target region's mean luminance:
/// light text on a dark highlight over dark regions, inverted over bright
/// ones. Highlight is near-opaque so the line always reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: [u8; 4],
    pub highlight: [u8; 4],
}

pub fn palette_for(mean_luma: f32) -> Palette {
    if mean_luma < DARK_THRESHOLD {
        Palette {
            text: [255, 255, 255, 255],
            highlight: [0, 0, 0, 230],
        }
    } else {
        Palette {
            text: [0, 0, 0, 255],
            highlight: [255, 255, 255, 230],
        }
    }
}

/// Greedy word-wrap against rendered pixel width. No hyphenation and no
/// mid-word breaks; a word wider than the box gets a line of its own.
pub fn wrap(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if measure(&candidate) <= max_width || current.is_empty() {
            current = candidate;
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Wrap at the starting size, shrinking stepwise until the block fits the box
/// height. Words are never dropped; the floor size is the final fallback even
/// if the block still overflows there.
pub fn shrink_to_fit(
    text: &str,
    max_width: f32,
    box_height: u32,
    start_size: f32,
    measure: impl Fn(&str, f32) -> f32,
) -> (f32, Vec<String>) {
    let mut size = start_size;
    loop {
        let lines = wrap(text, max_width, |s| measure(s, size));
        let block_height = lines.len() as u32 * line_height(size);
        if block_height <= box_height || size <= FONT_FLOOR {
            return (size, lines);
        }
        size = (size - FONT_STEP).max(FONT_FLOOR);
    }
}
