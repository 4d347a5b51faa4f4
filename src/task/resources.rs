//! The `wt-resources` task.
//!
//! Applies the image/script/style treatments to the generic resources tree,
//! then copies everything else verbatim, then re-copies pre-minified files.
//! The step order is load-bearing: the generic copy excludes the handled
//! extension classes, and the final pass guarantees `*.min.js`/`*.min.css`
//! land in the output untouched by the minification steps before it.

use crate::config::PipelineConfig;
use crate::pipeline::{self, MinFilter, Selector, Step, TaskReport};
use crate::transform::Action;
use crate::transform::image::ImageOptions;

use super::IMAGE_EXTS;

/// Extension classes handled by the first three steps and therefore
/// excluded from the generic copy.
const HANDLED_EXTS: [&str; 6] = ["gif", "jpg", "png", "svg", "js", "css"];

pub fn run(config: &PipelineConfig) -> TaskReport {
    let source = config.root_join(&config.resources.source);
    let dest = config.output_join(&config.resources.dest);

    let steps = [
        Step {
            name: "images",
            selector: Selector::tree(source.clone()).with_exts(IMAGE_EXTS),
            action: Action::Optimize(ImageOptions::aggressive(config.images.jpeg_quality)),
            dest: dest.clone(),
        },
        Step {
            name: "scripts",
            selector: Selector::tree(source.clone())
                .with_exts(["js"])
                .minified(MinFilter::Exclude),
            action: Action::MinifyJs,
            dest: dest.clone(),
        },
        Step {
            name: "styles",
            selector: Selector::tree(source.clone())
                .with_exts(["css"])
                .minified(MinFilter::Exclude),
            action: Action::MinifyCss,
            dest: dest.clone(),
        },
        Step {
            name: "copy",
            selector: Selector::tree(source.clone()).without_exts(HANDLED_EXTS),
            action: Action::Copy,
            dest: dest.clone(),
        },
        // Last so the earlier optimization steps cannot overwrite them.
        Step {
            name: "minified",
            selector: Selector::tree(source)
                .with_exts(["js", "css"])
                .minified(MinFilter::Only),
            action: Action::Copy,
            dest,
        },
    ];
    pipeline::run("wt-resources", &steps)
}
