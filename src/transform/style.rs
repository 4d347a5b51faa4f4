//! Stylesheet processing: Sass compilation, vendor prefixing, minification.
//!
//! Sass is compiled with grass; lightningcss parses the result once and
//! prints two variants from the same browser-targeted stylesheet: the
//! expanded intermediate and the minified final CSS. Vendor prefixes for
//! the configured browserslist targets are added during the targeted
//! transform, which replaces a separate autoprefixer pass.

use std::path::Path;

use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use super::TransformError;

/// Both printings of a processed stylesheet.
#[derive(Debug)]
pub struct CssOutput {
    /// Vendor-prefixed, unminified CSS (the css-temp intermediate).
    pub expanded: String,
    /// Vendor-prefixed, minified CSS.
    pub minified: String,
}

/// Compile a Sass file to plain CSS.
///
/// `@use` / `@import` are resolved relative to the file, so partials are
/// pulled in without being selected themselves.
pub fn compile_sass(path: &Path) -> Result<String, TransformError> {
    let css = grass::from_path(path, &grass::Options::default())?;
    Ok(css)
}

/// Parse browserslist queries into lightningcss targets.
pub fn parse_browsers(queries: &[String]) -> Result<Option<Browsers>, TransformError> {
    Browsers::from_browserslist(queries).map_err(|e| TransformError::Css(e.to_string()))
}

/// Process plain CSS: apply browser-targeted transforms (vendor prefixing
/// when `targets` is set) and print expanded and minified variants.
pub fn process_css(source: &str, browsers: Option<Browsers>) -> Result<CssOutput, TransformError> {
    let targets = || Targets {
        browsers: browsers.clone(),
        ..Targets::default()
    };

    let mut stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| TransformError::Css(e.to_string()))?;

    stylesheet
        .minify(MinifyOptions {
            targets: targets(),
            ..MinifyOptions::default()
        })
        .map_err(|e| TransformError::Css(e.to_string()))?;

    let expanded = stylesheet
        .to_css(PrinterOptions {
            targets: targets(),
            ..PrinterOptions::default()
        })
        .map_err(|e| TransformError::Css(e.to_string()))?
        .code;

    let minified = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            targets: targets(),
            ..PrinterOptions::default()
        })
        .map_err(|e| TransformError::Css(e.to_string()))?
        .code;

    Ok(CssOutput { expanded, minified })
}
