//! The `styles` task.
//!
//! Compiles the Sass tree to CSS, vendor-prefixes for the configured
//! browsers, writes the prefixed intermediate below `css-temp/` and the
//! minified result below `www/css/`. Sass partials (leading `_`) are pulled
//! in by `@use`/`@import` rather than selected.

use anyhow::{Context, Result};
use std::fs;

use crate::config::PipelineConfig;
use crate::pipeline::{self, Selector, Step, TaskReport};
use crate::transform::Action;
use crate::transform::style::parse_browsers;

pub fn run(config: &PipelineConfig) -> Result<TaskReport> {
    let targets = parse_browsers(&config.styles.browsers)
        .with_context(|| format!("invalid [styles] browsers: {:?}", config.styles.browsers))?;

    // The compile step only writes into css-temp per file; create it here
    // so an empty stylesheet tree still yields the subpath.
    let temp_dest = config.output_join(&config.styles.temp_dest);
    fs::create_dir_all(&temp_dest)
        .with_context(|| format!("cannot create {}", temp_dest.display()))?;

    let steps = [Step {
        name: "compile",
        selector: Selector::tree(config.root_join(&config.styles.source))
            .with_exts(["scss"])
            .skip_partials(),
        action: Action::CompileSass { targets, temp_dest },
        dest: config.output_join(&config.styles.dest),
    }];
    Ok(pipeline::run("styles", &steps))
}
