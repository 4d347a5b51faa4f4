//! Step-based pipeline execution.
//!
//! A task is an explicit ordered list of [`Step`]s. Steps run sequentially -
//! the generic copy and the final pre-minified re-copy in the resources task
//! depend on that ordering. Files within a step are independent (each writes
//! only its own destination path) and are processed in parallel.
//!
//! A failing transform never aborts the run: the error is logged, the file
//! is counted as failed, and the remaining files and steps continue.

pub mod select;

pub use select::{MinFilter, Selector, is_minified};

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::logger::ProgressLine;
use crate::transform::{Action, Outcome, TransformError};
use crate::utils::plural_count;
use crate::{debug, log};

/// One filter/transform/copy stage of a task.
#[derive(Debug, Clone)]
pub struct Step {
    pub name: &'static str,
    pub selector: Selector,
    pub action: Action,
    /// Destination root; source-relative paths are preserved below it.
    pub dest: PathBuf,
}

/// Result of running a task's steps.
#[derive(Debug, Default, Clone, Copy)]
pub struct TaskReport {
    pub minified: usize,
    pub copied: usize,
    pub failed: usize,
}

impl TaskReport {
    pub fn merge(&mut self, other: &Self) {
        self.minified += other.minified;
        self.copied += other.copied;
        self.failed += other.failed;
    }

    pub fn summary(&self) -> String {
        let mut s = format!(
            "{} optimized, {} copied",
            plural_count(self.minified, "file"),
            self.copied
        );
        if self.failed > 0 {
            s.push_str(&format!(", {} FAILED", self.failed));
        }
        s
    }
}

/// Execute a task's steps in order.
///
/// Destination directories are created up front, so a selector matching
/// zero files still produces its output subpath.
pub fn run(task: &'static str, steps: &[Step]) -> TaskReport {
    let minified = AtomicUsize::new(0);
    let copied = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    for step in steps {
        if let Err(e) = fs::create_dir_all(&step.dest) {
            log!("error"; "{task}: cannot create {}: {e}", step.dest.display());
            failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    // Pre-select every step so the progress line knows its totals.
    // Selection is a read-only scan, so doing it before the first step
    // writes anything cannot observe partial output (dests are disjoint
    // from sources).
    let selected: Vec<Vec<PathBuf>> = steps.iter().map(|s| s.selector.select()).collect();
    let totals: Vec<(&'static str, usize)> = steps
        .iter()
        .zip(&selected)
        .map(|(s, files)| (s.name, files.len()))
        .collect();
    let total_files: usize = totals.iter().map(|(_, n)| n).sum();
    let progress = (total_files > 0).then(|| ProgressLine::new(task, &totals));

    for (step, files) in steps.iter().zip(&selected) {
        files.par_iter().for_each(|src| {
            match process_file(step, src) {
                Ok(Outcome::Copied) => {
                    copied.fetch_add(1, Ordering::Relaxed);
                }
                Ok(Outcome::Minified { from, to }) => {
                    minified.fetch_add(1, Ordering::Relaxed);
                    debug!(task; "{}: {} -> {} bytes", step.selector.relative(src).display(), from, to);
                }
                Err(e) => {
                    failed.fetch_add(1, Ordering::Relaxed);
                    log!("error"; "{task}/{}: {}: {e}", step.name, src.display());
                }
            }
            if let Some(p) = &progress {
                p.inc(step.name);
            }
        });
    }

    if let Some(p) = progress {
        p.finish();
    }

    TaskReport {
        minified: minified.into_inner(),
        copied: copied.into_inner(),
        failed: failed.into_inner(),
    }
}

fn process_file(step: &Step, src: &Path) -> Result<Outcome, TransformError> {
    let rel = step.selector.relative(src);
    let out_rel = step.action.dest_rel(&rel);
    let dest = step.dest.join(&out_rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    step.action.apply(src, &out_rel, &dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_selector_still_creates_dest() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out/www/js");
        let steps = vec![Step {
            name: "minify",
            selector: Selector::tree(dir.path().join("javascripts")).with_exts(["js"]),
            action: Action::MinifyJs,
            dest: dest.clone(),
        }];

        let report = run("scripts", &steps);
        assert_eq!(report.minified + report.copied + report.failed, 0);
        assert!(dest.is_dir());
    }

    #[test]
    fn test_copy_step_preserves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let src_root = dir.path().join("resources");
        fs::create_dir_all(src_root.join("fonts")).unwrap();
        fs::write(src_root.join("fonts/a.woff"), b"woff-bytes").unwrap();

        let dest = dir.path().join("out");
        let steps = vec![Step {
            name: "copy",
            selector: Selector::tree(src_root),
            action: Action::Copy,
            dest: dest.clone(),
        }];

        let report = run("wt-resources", &steps);
        assert_eq!(report.copied, 1);
        assert_eq!(fs::read(dest.join("fonts/a.woff")).unwrap(), b"woff-bytes");
    }

    #[test]
    fn test_failed_file_does_not_abort_step() {
        let dir = TempDir::new().unwrap();
        let src_root = dir.path().join("javascripts");
        fs::create_dir_all(&src_root).unwrap();
        fs::write(src_root.join("bad.js"), "function {").unwrap();
        fs::write(src_root.join("good.js"), "var answer = 40 + 2;").unwrap();

        let dest = dir.path().join("out");
        let steps = vec![Step {
            name: "minify",
            selector: Selector::tree(src_root).with_exts(["js"]),
            action: Action::MinifyJs,
            dest: dest.clone(),
        }];

        let report = run("scripts", &steps);
        assert_eq!(report.failed, 1);
        assert_eq!(report.minified, 1);
        assert!(dest.join("good.js").is_file());
        assert!(!dest.join("bad.js").exists());
    }
}
