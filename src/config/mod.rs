//! Pipeline configuration management for `wt-assets.toml`.
//!
//! # Sections
//!
//! | Section       | Purpose                                            |
//! |---------------|----------------------------------------------------|
//! | `[paths]`     | Output root                                        |
//! | `[images]`    | Favicons, bulk image dir, JPEG quality             |
//! | `[scripts]`   | JavaScript source/destination                      |
//! | `[styles]`    | Sass source, intermediate/final dests, browsers    |
//! | `[templates]` | Template source/destination and file extension     |
//! | `[resources]` | Generic Wt resources tree                          |
//!
//! The config file is optional; a missing file yields the defaults rooted at
//! the current directory. Unknown keys are warned about, not rejected.

mod error;
mod section;

pub use error::ConfigError;
pub use section::{
    ImagesConfig, PathsConfig, ResourcesConfig, ScriptsConfig, StylesConfig, TemplatesConfig,
};

use crate::{debug, log};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing wt-assets.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub images: ImagesConfig,

    #[serde(default)]
    pub scripts: ScriptsConfig,

    #[serde(default)]
    pub styles: StylesConfig,

    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub resources: ResourcesConfig,
}

impl PipelineConfig {
    /// Load configuration from a config file path.
    ///
    /// A missing file is not an error: the defaults apply, rooted at the
    /// current directory. The project root is the config file's parent.
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            debug!("config"; "{} not found, using defaults", config_path.display());
            return Ok(Self::rooted(Path::new(".")));
        }

        let raw = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::Io(config_path.to_path_buf(), e))?;

        let de = toml::Deserializer::new(&raw);
        let mut unknown = Vec::new();
        let mut config: Self = serde_ignored::deserialize(de, |path| {
            unknown.push(path.to_string());
        })?;
        for key in unknown {
            log!("config"; "unknown key `{key}` ignored");
        }

        config.root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        Ok(config)
    }

    /// Defaults rooted at the given project directory.
    pub fn rooted(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            ..Self::default()
        }
    }

    /// Resolve a path relative to the project root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    /// The absolute output root.
    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.paths.output)
    }

    /// Resolve a destination subpath below the output root.
    pub fn output_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.output_dir().join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_conventions() {
        let config = PipelineConfig::rooted(Path::new("/site"));
        assert_eq!(config.output_dir(), PathBuf::from("/site/output"));
        assert_eq!(
            config.output_join(&config.scripts.dest),
            PathBuf::from("/site/output/www/js")
        );
        assert_eq!(config.styles.browsers, vec!["last 2 versions"]);
        assert_eq!(config.templates.extension, "wtml");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = PipelineConfig::load(Path::new("/nonexistent/wt-assets.toml")).unwrap();
        assert_eq!(config.root, PathBuf::from("."));
        assert_eq!(config.images.source, PathBuf::from("images"));
    }

    #[test]
    fn test_load_overrides_and_root() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wt-assets.toml");
        fs::write(
            &path,
            r#"
[paths]
output = "dist"

[styles]
browsers = ["last 1 version"]

[unknown_section]
whatever = true
"#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.root, dir.path());
        assert_eq!(config.paths.output, PathBuf::from("dist"));
        assert_eq!(config.styles.browsers, vec!["last 1 version"]);
        // untouched sections keep their defaults
        assert_eq!(config.scripts.source, PathBuf::from("javascripts"));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wt-assets.toml");
        fs::write(&path, "paths = not toml").unwrap();
        assert!(PipelineConfig::load(&path).is_err());
    }
}
