//! The `images` task.
//!
//! Copies `favicon.ico` verbatim, optimizes `favicon.png` with the light
//! profile, and optimizes the bulk image tree aggressively.

use crate::config::PipelineConfig;
use crate::pipeline::{self, Selector, Step, TaskReport};
use crate::transform::Action;
use crate::transform::image::ImageOptions;

use super::IMAGE_EXTS;

pub fn run(config: &PipelineConfig) -> TaskReport {
    let favicon_dest = config.output_join(&config.images.favicon_dest);
    let steps = [
        Step {
            name: "favicon.ico",
            selector: Selector::file(config.root_join(&config.images.favicon_ico)),
            action: Action::Copy,
            dest: favicon_dest.clone(),
        },
        Step {
            name: "favicon.png",
            selector: Selector::file(config.root_join(&config.images.favicon_png)),
            action: Action::Optimize(ImageOptions::light()),
            dest: favicon_dest,
        },
        Step {
            name: "optimize",
            selector: Selector::tree(config.root_join(&config.images.source)).with_exts(IMAGE_EXTS),
            action: Action::Optimize(ImageOptions::aggressive(config.images.jpeg_quality)),
            dest: config.output_join(&config.images.dest),
        },
    ];
    pipeline::run("images", &steps)
}
