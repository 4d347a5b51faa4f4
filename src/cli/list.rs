//! The `list` subcommand: show the known tasks and what they do.

use owo_colors::OwoColorize;

use crate::task::Task;

/// Task name plus a one-line pipeline description.
const TASKS: &[(Task, &str)] = &[
    (
        Task::Images,
        "copy favicon.ico, optimize favicon.png, optimize images/ -> www/, www/img/",
    ),
    (
        Task::Scripts,
        "minify javascripts/ (pre-minified copied) -> www/js/",
    ),
    (
        Task::Styles,
        "compile stylesheets/, prefix, write css-temp/, minify -> www/css/",
    ),
    (Task::Templates, "minify templates/ -> templates/"),
    (
        Task::WtResources,
        "optimize/minify resources/, copy the rest, re-copy pre-minified -> www/resources/",
    ),
    (Task::Default, "all of the above, in declared order"),
];

pub fn print_tasks() {
    for (task, description) in TASKS {
        println!("{:<14} {}", task.name().bold(), description.dimmed());
    }
}
