//! Image optimization.
//!
//! Two profiles, matching the favicon/bulk split of the pipeline:
//!
//! - [`ImageProfile::Aggressive`]: PNG palette quantization (slowest
//!   imagequant speed, multi-pass) + indexed re-encode at best compression;
//!   JPEG re-encoded progressively with mozjpeg; SVG rewritten unindented
//!   via usvg. GIF has no optimizer in this stack and is copied verbatim.
//! - [`ImageProfile::Light`]: single-pass PNG re-encode at best
//!   compression, no quantization. Used for the favicon.

use std::fs;
use std::path::Path;

use image::DynamicImage;

use super::{Outcome, TransformError};

/// Optimization effort profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageProfile {
    /// Multi-pass, quantizing, progressive. For bulk image trees.
    Aggressive,
    /// Single-pass lossless re-encode. For the favicon.
    Light,
}

/// Per-step image settings.
#[derive(Debug, Clone, Copy)]
pub struct ImageOptions {
    pub profile: ImageProfile,
    /// JPEG re-encode quality (0-100), aggressive profile only.
    pub jpeg_quality: f32,
}

impl ImageOptions {
    pub fn aggressive(jpeg_quality: f32) -> Self {
        Self {
            profile: ImageProfile::Aggressive,
            jpeg_quality,
        }
    }

    pub fn light() -> Self {
        Self {
            profile: ImageProfile::Light,
            jpeg_quality: 80.0,
        }
    }
}

/// Optimize one image file, dispatching on its extension.
pub fn optimize(src: &Path, dest: &Path, options: &ImageOptions) -> Result<Outcome, TransformError> {
    let ext = src
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let encoded = match ext.as_str() {
        "png" => {
            let image = image::open(src)?;
            match options.profile {
                ImageProfile::Aggressive => quantize_png(image)?,
                ImageProfile::Light => reencode_png(image)?,
            }
        }
        "jpg" | "jpeg" => {
            let image = image::open(src)?;
            reencode_jpeg(image, options.jpeg_quality)?
        }
        "svg" => minify_svg(&fs::read(src)?)?,
        "gif" => {
            // No gif optimizer in the stack; pass through untouched.
            fs::copy(src, dest)?;
            return Ok(Outcome::Copied);
        }
        other => return Err(TransformError::UnsupportedImage(other.to_string())),
    };

    let from = fs::metadata(src)?.len();
    fs::write(dest, &encoded)?;
    Ok(Outcome::Minified {
        from,
        to: encoded.len() as u64,
    })
}

/// Palette-quantize and re-encode a PNG as indexed color.
fn quantize_png(image: DynamicImage) -> Result<Vec<u8>, TransformError> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let bitmap: Vec<imagequant::RGBA> = image
        .into_rgba8()
        .pixels()
        .map(|px| imagequant::RGBA::new(px[0], px[1], px[2], px[3]))
        .collect();

    let mut liq = imagequant::new();
    // Speed 1 = slowest, highest-effort multi-pass quantization
    liq.set_speed(1)?;
    liq.set_quality(0, 99)?;

    let mut img = liq.new_image(&bitmap[..], width, height, 0.0)?;
    let mut res = liq.quantize(&mut img)?;
    let (palette, pixels) = res.remapped(&mut img)?;

    let mut out = Vec::new();
    {
        #[allow(clippy::cast_possible_truncation)]
        let mut encoder = png::Encoder::new(&mut out, width as u32, height as u32);
        let mut flattened_palette = Vec::with_capacity(palette.len() * 3);
        let mut alpha_palette = Vec::with_capacity(palette.len());
        for px in &palette {
            flattened_palette.extend([px.r, px.g, px.b]);
            alpha_palette.push(px.a);
        }
        encoder.set_palette(flattened_palette);
        encoder.set_trns(alpha_palette);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_color(png::ColorType::Indexed);
        encoder.set_compression(png::Compression::Best);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&pixels)?;
        writer.finish()?;
    }
    Ok(out)
}

/// Re-encode a PNG at best compression without quantization.
fn reencode_png(image: DynamicImage) -> Result<Vec<u8>, TransformError> {
    let rgba = image.into_rgba8();
    let (width, height) = rgba.dimensions();

    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Best);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba.as_raw())?;
        writer.finish()?;
    }
    Ok(out)
}

/// Re-encode a JPEG progressively with mozjpeg.
fn reencode_jpeg(image: DynamicImage, quality: f32) -> Result<Vec<u8>, TransformError> {
    let width = image.width() as usize;
    let height = image.height() as usize;
    let rgba = image.to_rgba8();

    let mut comp = mozjpeg::Compress::new(mozjpeg::ColorSpace::JCS_EXT_RGBX);
    comp.set_size(width, height);
    comp.set_quality(quality);
    comp.set_progressive_mode();

    let mut started = comp
        .start_compress(Vec::new())
        .map_err(|e| TransformError::JpegEncode(e.to_string()))?;
    started
        .write_scanlines(rgba.as_raw())
        .map_err(|e| TransformError::JpegEncode(e.to_string()))?;
    started
        .finish()
        .map_err(|e| TransformError::JpegEncode(e.to_string()))
}

/// Rewrite an SVG without indentation.
fn minify_svg(content: &[u8]) -> Result<Vec<u8>, TransformError> {
    let tree = usvg::Tree::from_data(content, &usvg::Options::default())?;
    let write_options = usvg::WriteOptions {
        indent: usvg::Indent::None,
        ..usvg::WriteOptions::default()
    };
    Ok(tree.to_string(&write_options).into_bytes())
}
