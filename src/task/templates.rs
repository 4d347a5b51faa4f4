//! The `templates` task.
//!
//! Minifies the markup template tree (`*.wtml` by default).

use crate::config::PipelineConfig;
use crate::pipeline::{self, Selector, Step, TaskReport};
use crate::transform::Action;

pub fn run(config: &PipelineConfig) -> TaskReport {
    let steps = [Step {
        name: "minify",
        selector: Selector::tree(config.root_join(&config.templates.source))
            .with_exts([config.templates.extension.as_str()]),
        action: Action::MinifyMarkup,
        dest: config.output_join(&config.templates.dest),
    }];
    pipeline::run("templates", &steps)
}
