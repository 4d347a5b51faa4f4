//! Configuration section definitions.
//!
//! Every section is optional in `wt-assets.toml`; defaults follow the
//! conventional Wt asset tree layout:
//!
//! ```text
//! <root>/
//! ├── favicon.ico        → output/www/
//! ├── favicon.png        → output/www/        (optimized)
//! ├── images/            → output/www/img/    (optimized)
//! ├── javascripts/       → output/www/js/     (minified)
//! ├── stylesheets/       → output/css-temp/ + output/www/css/
//! ├── templates/         → output/templates/  (minified)
//! └── resources/         → output/www/resources/
//! ```

use serde::Deserialize;
use std::path::PathBuf;

/// `[paths]` - source root and output root.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Output root, relative to the project root.
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("output"),
        }
    }
}

/// `[images]` - favicon handling and bulk image optimization.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    /// Bulk image source directory.
    pub source: PathBuf,
    /// Destination subpath for bulk images, relative to the output root.
    pub dest: PathBuf,
    /// Favicon copied verbatim.
    pub favicon_ico: PathBuf,
    /// Favicon optimized with the light profile.
    pub favicon_png: PathBuf,
    /// Destination subpath for both favicons.
    pub favicon_dest: PathBuf,
    /// JPEG re-encode quality (0-100).
    pub jpeg_quality: f32,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("images"),
            dest: PathBuf::from("www/img"),
            favicon_ico: PathBuf::from("favicon.ico"),
            favicon_png: PathBuf::from("favicon.png"),
            favicon_dest: PathBuf::from("www"),
            jpeg_quality: 80.0,
        }
    }
}

/// `[scripts]` - JavaScript minification.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("javascripts"),
            dest: PathBuf::from("www/js"),
        }
    }
}

/// `[styles]` - Sass compilation, vendor prefixing and CSS minification.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    pub source: PathBuf,
    /// Destination for the prefixed, unminified intermediate CSS.
    pub temp_dest: PathBuf,
    /// Destination for the final minified CSS.
    pub dest: PathBuf,
    /// browserslist queries used for vendor prefixing.
    pub browsers: Vec<String>,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("stylesheets"),
            temp_dest: PathBuf::from("css-temp"),
            dest: PathBuf::from("www/css"),
            browsers: vec!["last 2 versions".into()],
        }
    }
}

/// `[templates]` - markup template minification.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    pub source: PathBuf,
    pub dest: PathBuf,
    /// Template file extension (Wt XHTML templates use `wtml`).
    pub extension: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("templates"),
            dest: PathBuf::from("templates"),
            extension: "wtml".into(),
        }
    }
}

/// `[resources]` - the generic Wt resources tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    pub source: PathBuf,
    pub dest: PathBuf,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("resources"),
            dest: PathBuf::from("www/resources"),
        }
    }
}
