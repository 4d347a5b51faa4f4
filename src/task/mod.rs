//! Build task definitions and ordering.
//!
//! Six named tasks mirror the build surface: `images`, `scripts`, `styles`,
//! `templates`, `wt-resources` and the `default` aggregate. Each concrete
//! task is an ordered step list over one source tree; `default` expands to
//! the declared list of all five. Output subpaths are disjoint, so the
//! order among the five carries no semantics beyond reproducible logs.

mod images;
mod resources;
mod scripts;
mod styles;
mod templates;

use anyhow::Result;
use clap::ValueEnum;
use rustc_hash::FxHashSet;
use std::fmt;

use crate::config::PipelineConfig;
use crate::pipeline::TaskReport;

/// Extensions handled by the image optimizer steps.
///
/// `jpeg` is deliberately absent: the historical pipeline only matched
/// `jpg`, leaving `.jpeg` files to the generic resource copy.
pub const IMAGE_EXTS: [&str; 4] = ["gif", "jpg", "png", "svg"];

/// A named unit of work in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Task {
    Templates,
    Scripts,
    Styles,
    Images,
    WtResources,
    /// All five tasks in declared order.
    Default,
}

impl Task {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Templates => "templates",
            Self::Scripts => "scripts",
            Self::Styles => "styles",
            Self::Images => "images",
            Self::WtResources => "wt-resources",
            Self::Default => "default",
        }
    }

    /// The expansion of the `default` aggregate, in declared order.
    pub const DEFAULT_ORDER: [Task; 5] = [
        Task::Templates,
        Task::Scripts,
        Task::Styles,
        Task::Images,
        Task::WtResources,
    ];
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expand and deduplicate the selected tasks, preserving first occurrence.
///
/// An empty selection means `default`.
pub fn resolve(selected: &[Task]) -> Vec<Task> {
    let selected: &[Task] = if selected.is_empty() {
        &[Task::Default]
    } else {
        selected
    };

    let mut seen = FxHashSet::default();
    let mut order = Vec::new();
    for &task in selected {
        match task {
            Task::Default => {
                for t in Task::DEFAULT_ORDER {
                    if seen.insert(t) {
                        order.push(t);
                    }
                }
            }
            t => {
                if seen.insert(t) {
                    order.push(t);
                }
            }
        }
    }
    order
}

/// Run one task against the configured tree.
pub fn run(task: Task, config: &PipelineConfig) -> Result<TaskReport> {
    match task {
        Task::Templates => Ok(templates::run(config)),
        Task::Scripts => Ok(scripts::run(config)),
        Task::Styles => styles::run(config),
        Task::Images => Ok(images::run(config)),
        Task::WtResources => Ok(resources::run(config)),
        Task::Default => {
            let mut total = TaskReport::default();
            for t in Task::DEFAULT_ORDER {
                total.merge(&run(t, config)?);
            }
            Ok(total)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &[u8]) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_resolve_empty_is_default() {
        assert_eq!(resolve(&[]), Task::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn test_resolve_dedups_preserving_order() {
        let order = resolve(&[Task::Styles, Task::Default, Task::Styles]);
        assert_eq!(order[0], Task::Styles);
        assert_eq!(order.len(), 5);
        assert_eq!(
            order.iter().filter(|t| **t == Task::Styles).count(),
            1
        );
    }

    #[test]
    fn test_scripts_minifies_and_passes_minified_through() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let source = "function add(first, second) {\n    return first + second;\n}\n";
        let pre_minified = b"var x=1;function f(){return x}";
        write(root, "javascripts/app.js", source.as_bytes());
        write(root, "javascripts/vendor/lib.min.js", pre_minified);

        let config = PipelineConfig::rooted(root);
        let report = run(Task::Scripts, &config).unwrap();

        assert_eq!(report.minified, 1);
        assert_eq!(report.copied, 1);
        assert_eq!(report.failed, 0);

        let out = config.output_join("www/js");
        let minified = fs::read_to_string(out.join("app.js")).unwrap();
        assert!(minified.len() < source.len());
        // pre-minified files must land byte-identical
        assert_eq!(
            fs::read(out.join("vendor/lib.min.js")).unwrap(),
            pre_minified
        );
    }

    #[test]
    fn test_styles_writes_intermediate_and_minified() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "stylesheets/site.scss",
            b"$fg: #222222;\nbody {\n    color: $fg;\n    p { margin: 0; }\n}\n",
        );

        let config = PipelineConfig::rooted(root);
        let report = run(Task::Styles, &config).unwrap();
        assert_eq!(report.minified, 1);
        assert_eq!(report.failed, 0);

        let temp = fs::read_to_string(config.output_join("css-temp/site.css")).unwrap();
        let minified = fs::read_to_string(config.output_join("www/css/site.css")).unwrap();
        assert!(temp.contains("body p"));
        assert!(minified.len() < temp.len());
    }

    #[test]
    fn test_styles_malformed_input_is_non_fatal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "stylesheets/bad.scss", b"body { color: $undefined; }");
        write(root, "stylesheets/good.scss", b"em { font-style: italic; }");

        let config = PipelineConfig::rooted(root);
        let report = run(Task::Styles, &config).unwrap();
        assert_eq!(report.failed, 1);
        assert_eq!(report.minified, 1);
        assert!(config.output_join("www/css/good.css").is_file());
        assert!(!config.output_join("www/css/bad.css").exists());
    }

    #[test]
    fn test_templates_minified() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(
            root,
            "templates/login.wtml",
            b"<div class=\"login\">\n    <!-- login box -->\n    ${username-field}\n</div>\n",
        );

        let config = PipelineConfig::rooted(root);
        let report = run(Task::Templates, &config).unwrap();
        assert_eq!(report.minified, 1);

        let out = fs::read_to_string(config.output_join("templates/login.wtml")).unwrap();
        assert!(out.contains("${username-field}"));
        assert!(!out.contains("login box"));
    }

    #[test]
    fn test_images_copies_ico_verbatim() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        write(root, "favicon.ico", b"\x00\x00\x01\x00fake-ico");

        let config = PipelineConfig::rooted(root);
        let report = run(Task::Images, &config).unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(
            fs::read(config.output_join("www/favicon.ico")).unwrap(),
            b"\x00\x00\x01\x00fake-ico"
        );
    }

    #[test]
    fn test_wt_resources_ordering_and_passthrough() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        let pre_minified = b"p{margin:0}";
        write(root, "resources/themes/base.css", b"p {\n    margin: 0px;\n}\n");
        write(root, "resources/themes/base.min.css", pre_minified);
        write(root, "resources/fonts/glyphs.woff", b"woff-data");
        write(root, "resources/plain.js", b"var a = 1 + 2;");

        let config = PipelineConfig::rooted(root);
        let report = run(Task::WtResources, &config).unwrap();
        assert_eq!(report.failed, 0);

        let out = config.output_join("www/resources");
        // unhandled extension: byte-identical at the mirrored path
        assert_eq!(fs::read(out.join("fonts/glyphs.woff")).unwrap(), b"woff-data");
        // pre-minified file survives the earlier steps untouched
        assert_eq!(
            fs::read(out.join("themes/base.min.css")).unwrap(),
            pre_minified
        );
        // regular css/js were minified
        assert!(
            fs::read(out.join("themes/base.css")).unwrap().len()
                < fs::metadata(root.join("resources/themes/base.css"))
                    .unwrap()
                    .len() as usize
        );
        assert!(out.join("plain.js").is_file());
    }

    #[test]
    fn test_default_creates_all_output_subpaths_on_empty_tree() {
        let dir = TempDir::new().unwrap();
        let config = PipelineConfig::rooted(dir.path());

        for task in resolve(&[Task::Default]) {
            let report = run(task, &config).unwrap();
            assert_eq!(report.failed, 0);
        }

        for subpath in [
            "www",
            "www/img",
            "www/js",
            "www/css",
            "css-temp",
            "templates",
            "www/resources",
        ] {
            assert!(
                config.output_join(subpath).is_dir(),
                "missing output subpath {subpath}"
            );
        }
    }
}
