//! The `init` subcommand: scaffold the conventional asset tree.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::log;

/// Source directories of the conventional layout.
const SOURCE_DIRS: &[&str] = &[
    "images",
    "javascripts",
    "stylesheets",
    "templates",
    "resources",
];

const DEFAULT_CONFIG: &str = r#"# wt-assets pipeline configuration.
# Every section is optional; the values below are the defaults.

[paths]
output = "output"

[images]
source = "images"
dest = "www/img"
favicon_ico = "favicon.ico"
favicon_png = "favicon.png"
favicon_dest = "www"
jpeg_quality = 80.0

[scripts]
source = "javascripts"
dest = "www/js"

[styles]
source = "stylesheets"
temp_dest = "css-temp"
dest = "www/css"
browsers = ["last 2 versions"]

[templates]
source = "templates"
dest = "templates"
extension = "wtml"

[resources]
source = "resources"
dest = "www/resources"
"#;

/// Create the source tree and a default `wt-assets.toml` under `dir`.
///
/// Refuses to overwrite an existing config; existing directories are fine.
pub fn new_tree(dir: Option<&Path>) -> Result<()> {
    let root = dir.unwrap_or(Path::new("."));
    let config_path = root.join("wt-assets.toml");
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    for sub in SOURCE_DIRS {
        let path = root.join(sub);
        fs::create_dir_all(&path)
            .with_context(|| format!("cannot create {}", path.display()))?;
    }
    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("cannot write {}", config_path.display()))?;

    log!("init"; "created asset tree at {}", root.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use tempfile::TempDir;

    #[test]
    fn test_new_tree_scaffolds_and_config_parses() {
        let dir = TempDir::new().unwrap();
        new_tree(Some(dir.path())).unwrap();

        for sub in SOURCE_DIRS {
            assert!(dir.path().join(sub).is_dir());
        }

        // The generated config must round-trip through the loader and
        // agree with the built-in defaults.
        let config = PipelineConfig::load(&dir.path().join("wt-assets.toml")).unwrap();
        let defaults = PipelineConfig::rooted(dir.path());
        assert_eq!(config.paths.output, defaults.paths.output);
        assert_eq!(config.styles.browsers, defaults.styles.browsers);
        assert_eq!(config.templates.extension, defaults.templates.extension);
    }

    #[test]
    fn test_new_tree_refuses_existing_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("wt-assets.toml"), "").unwrap();
        assert!(new_tree(Some(dir.path())).is_err());
    }
}
