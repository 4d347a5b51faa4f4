//! File selection for pipeline steps.
//!
//! A [`Selector`] is the crate's equivalent of a glob: a source root plus
//! extension classes, extension exclusions and a minified-name filter.
//! Selection walks the tree with jwalk and sorts the result so runs are
//! deterministic.

use jwalk::WalkDir;
use std::path::{Path, PathBuf};

/// Filter on the `*.min.*` naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    /// Keep everything.
    Any,
    /// Drop pre-minified files.
    Exclude,
    /// Keep only pre-minified files.
    Only,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    File,
    Tree,
}

/// Selects the input set of one pipeline step.
#[derive(Debug, Clone)]
pub struct Selector {
    source: PathBuf,
    kind: SourceKind,
    /// Extensions to include (lowercase, no dot). `None` selects any.
    exts: Option<Vec<String>>,
    /// Extensions to exclude (lowercase, no dot).
    exclude_exts: Vec<String>,
    minified: MinFilter,
    /// Skip files whose name starts with `_` (Sass partials).
    skip_partials: bool,
}

impl Selector {
    /// Select a single file (e.g. a favicon). Missing file selects nothing.
    pub fn file(path: PathBuf) -> Self {
        Self {
            source: path,
            kind: SourceKind::File,
            exts: None,
            exclude_exts: Vec::new(),
            minified: MinFilter::Any,
            skip_partials: false,
        }
    }

    /// Select files below a directory tree. Missing dir selects nothing.
    pub fn tree(dir: PathBuf) -> Self {
        Self {
            source: dir,
            kind: SourceKind::Tree,
            exts: None,
            exclude_exts: Vec::new(),
            minified: MinFilter::Any,
            skip_partials: false,
        }
    }

    pub fn with_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exts = Some(
            exts.into_iter()
                .map(|e| e.as_ref().to_ascii_lowercase())
                .collect(),
        );
        self
    }

    pub fn without_exts<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude_exts = exts
            .into_iter()
            .map(|e| e.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    pub fn minified(mut self, filter: MinFilter) -> Self {
        self.minified = filter;
        self
    }

    pub fn skip_partials(mut self) -> Self {
        self.skip_partials = true;
        self
    }

    /// Collect the selected files, sorted for determinism.
    pub fn select(&self) -> Vec<PathBuf> {
        match self.kind {
            SourceKind::File => {
                if self.source.is_file() {
                    vec![self.source.clone()]
                } else {
                    vec![]
                }
            }
            SourceKind::Tree => {
                let mut files: Vec<_> = WalkDir::new(&self.source)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.path())
                    .filter(|p| self.matches(p))
                    .collect();
                files.sort();
                files
            }
        }
    }

    /// Source-relative path of a selected file.
    pub fn relative(&self, path: &Path) -> PathBuf {
        match self.kind {
            SourceKind::File => PathBuf::from(path.file_name().unwrap_or_default()),
            SourceKind::Tree => path
                .strip_prefix(&self.source)
                .unwrap_or(path)
                .to_path_buf(),
        }
    }

    fn matches(&self, path: &Path) -> bool {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        if let Some(exts) = &self.exts
            && !exts.iter().any(|e| *e == ext)
        {
            return false;
        }
        if self.exclude_exts.iter().any(|e| *e == ext) {
            return false;
        }

        match self.minified {
            MinFilter::Any => {}
            MinFilter::Exclude => {
                if is_minified(path) {
                    return false;
                }
            }
            MinFilter::Only => {
                if !is_minified(path) {
                    return false;
                }
            }
        }

        if self.skip_partials
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('_'))
        {
            return false;
        }

        true
    }
}

/// Whether a file follows the `*.min.*` naming convention.
pub fn is_minified(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(".min"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, rel: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    #[test]
    fn test_is_minified() {
        assert!(is_minified(Path::new("lib/jquery.min.js")));
        assert!(is_minified(Path::new("style.min.css")));
        assert!(!is_minified(Path::new("app.js")));
        assert!(!is_minified(Path::new("minify.js")));
    }

    #[test]
    fn test_tree_selection_with_ext_classes() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.js");
        touch(dir.path(), "nested/b.js");
        touch(dir.path(), "nested/c.css");
        touch(dir.path(), "readme.txt");

        let selector = Selector::tree(dir.path().to_path_buf()).with_exts(["js"]);
        let files = selector.select();
        assert_eq!(files.len(), 2);
        assert_eq!(selector.relative(&files[0]), PathBuf::from("a.js"));
        assert_eq!(selector.relative(&files[1]), PathBuf::from("nested/b.js"));
    }

    #[test]
    fn test_min_filter_partitions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app.js");
        touch(dir.path(), "vendor/lib.min.js");

        let plain = Selector::tree(dir.path().to_path_buf())
            .with_exts(["js"])
            .minified(MinFilter::Exclude)
            .select();
        let min = Selector::tree(dir.path().to_path_buf())
            .with_exts(["js"])
            .minified(MinFilter::Only)
            .select();

        assert_eq!(plain.len(), 1);
        assert!(plain[0].ends_with("app.js"));
        assert_eq!(min.len(), 1);
        assert!(min[0].ends_with("lib.min.js"));
    }

    #[test]
    fn test_exclusions_and_partials() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "main.scss");
        touch(dir.path(), "_colors.scss");
        touch(dir.path(), "logo.png");
        touch(dir.path(), "data.json");

        let styles = Selector::tree(dir.path().to_path_buf())
            .with_exts(["scss"])
            .skip_partials()
            .select();
        assert_eq!(styles.len(), 1);
        assert!(styles[0].ends_with("main.scss"));

        let rest = Selector::tree(dir.path().to_path_buf())
            .without_exts(["scss", "png"])
            .select();
        assert_eq!(rest.len(), 1);
        assert!(rest[0].ends_with("data.json"));
    }

    #[test]
    fn test_missing_sources_select_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(Selector::tree(dir.path().join("nope")).select().is_empty());
        assert!(
            Selector::file(dir.path().join("favicon.ico"))
                .select()
                .is_empty()
        );
    }
}
