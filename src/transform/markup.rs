//! Markup template minification.
//!
//! Wt templates (`.wtml`) are XHTML fragments with `${...}` substitution
//! placeholders. Minification collapses whitespace and strips comments but
//! must keep closing tags and the placeholder syntax intact.

use minify_html::{Cfg, minify};

/// Minify a markup template.
///
/// This transform is total: malformed markup comes out best-effort rather
/// than failing the file.
pub fn minify_markup(source: &[u8]) -> Vec<u8> {
    let cfg = Cfg {
        keep_closing_tags: true,
        keep_html_and_head_opening_tags: true,
        preserve_brace_template_syntax: true,
        ..Cfg::default()
    };
    minify(source, &cfg)
}
