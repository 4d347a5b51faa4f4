//! File transforms: minification, Sass compilation, image optimization.
//!
//! Every transform reads one source file and writes one destination file
//! (the Sass transform additionally writes an unminified intermediate).
//! Failures are reported as [`TransformError`] and handled non-fatally by
//! the pipeline runner.

pub mod image;
pub mod markup;
pub mod script;
pub mod style;

use std::fs;
use std::path::{Path, PathBuf};

use lightningcss::targets::Browsers;
use thiserror::Error;

use crate::transform::image::ImageOptions;

/// A failed file transform.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JavaScript parse failed: {0}")]
    JsParse(String),

    #[error("CSS processing failed: {0}")]
    Css(String),

    #[error("Sass compilation failed: {0}")]
    Sass(#[from] Box<grass::Error>),

    #[error("image decode failed: {0}")]
    ImageDecode(#[from] ::image::ImageError),

    #[error("PNG quantization failed: {0}")]
    Quantize(#[from] imagequant::Error),

    #[error("PNG encode failed: {0}")]
    PngEncode(#[from] png::EncodingError),

    #[error("JPEG encode failed: {0}")]
    JpegEncode(String),

    #[error("SVG parse failed: {0}")]
    Svg(#[from] usvg::Error),

    #[error("unsupported image extension: {0}")]
    UnsupportedImage(String),
}

/// What a transform did with a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Copied verbatim.
    Copied,
    /// Rewritten by a transform, with before/after sizes in bytes.
    Minified { from: u64, to: u64 },
}

/// The transform applied by one pipeline step.
#[derive(Debug, Clone)]
pub enum Action {
    /// Copy the file verbatim.
    Copy,
    /// Minify JavaScript with oxc.
    MinifyJs,
    /// Minify plain CSS with lightningcss (no prefixing, no intermediate).
    MinifyCss,
    /// Minify markup templates.
    MinifyMarkup,
    /// Optimize an image according to its extension.
    Optimize(ImageOptions),
    /// Compile Sass, vendor-prefix for `targets`, write the unminified
    /// intermediate below `temp_dest`, then minify.
    CompileSass {
        targets: Option<Browsers>,
        temp_dest: PathBuf,
    },
}

impl Action {
    /// Destination-relative path for a source-relative path.
    ///
    /// Identity for everything except Sass, which renames `*.scss` to
    /// `*.css`.
    pub fn dest_rel(&self, rel: &Path) -> PathBuf {
        match self {
            Self::CompileSass { .. } => rel.with_extension("css"),
            _ => rel.to_path_buf(),
        }
    }

    /// Run the transform for one file.
    ///
    /// `out_rel` is the destination-relative path (after [`Self::dest_rel`]),
    /// `dest` the resolved destination file path.
    pub fn apply(&self, src: &Path, out_rel: &Path, dest: &Path) -> Result<Outcome, TransformError> {
        match self {
            Self::Copy => {
                fs::copy(src, dest)?;
                Ok(Outcome::Copied)
            }
            Self::MinifyJs => {
                let source = fs::read_to_string(src)?;
                let minified = script::minify_js(&source)?;
                fs::write(dest, &minified)?;
                Ok(Outcome::Minified {
                    from: source.len() as u64,
                    to: minified.len() as u64,
                })
            }
            Self::MinifyCss => {
                let source = fs::read_to_string(src)?;
                let output = style::process_css(&source, None)?;
                fs::write(dest, &output.minified)?;
                Ok(Outcome::Minified {
                    from: source.len() as u64,
                    to: output.minified.len() as u64,
                })
            }
            Self::MinifyMarkup => {
                let source = fs::read(src)?;
                let minified = markup::minify_markup(&source);
                fs::write(dest, &minified)?;
                Ok(Outcome::Minified {
                    from: source.len() as u64,
                    to: minified.len() as u64,
                })
            }
            Self::Optimize(options) => image::optimize(src, dest, options),
            Self::CompileSass { targets, temp_dest } => {
                let css = style::compile_sass(src)?;
                let output = style::process_css(&css, targets.clone())?;

                let temp_path = temp_dest.join(out_rel);
                if let Some(parent) = temp_path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&temp_path, &output.expanded)?;

                fs::write(dest, &output.minified)?;
                Ok(Outcome::Minified {
                    from: css.len() as u64,
                    to: output.minified.len() as u64,
                })
            }
        }
    }
}
