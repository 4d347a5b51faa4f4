//! The `scripts` task.
//!
//! Minifies every script that is not already minified; `*.min.js` files are
//! copied through untouched.

use crate::config::PipelineConfig;
use crate::pipeline::{self, MinFilter, Selector, Step, TaskReport};
use crate::transform::Action;

pub fn run(config: &PipelineConfig) -> TaskReport {
    let source = config.root_join(&config.scripts.source);
    let dest = config.output_join(&config.scripts.dest);
    let steps = [
        Step {
            name: "minify",
            selector: Selector::tree(source.clone())
                .with_exts(["js"])
                .minified(MinFilter::Exclude),
            action: Action::MinifyJs,
            dest: dest.clone(),
        },
        Step {
            name: "copy",
            selector: Selector::tree(source)
                .with_exts(["js"])
                .minified(MinFilter::Only),
            action: Action::Copy,
            dest,
        },
    ];
    pipeline::run("scripts", &steps)
}
