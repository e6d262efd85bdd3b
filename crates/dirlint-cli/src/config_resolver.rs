//! Locating and loading `dirlint.toml`.
//!
//! An explicit `--config` path is used as given. Otherwise the project
//! directory is searched for [`PROJECT_CONFIG_NAMES`] and then the global
//! directory for `config.toml`; the first regular file found wins. With
//! nothing found the built-in defaults apply.

use anyhow::{Context, Result};
use dirlint_core::Config;
use std::path::{Path, PathBuf};

/// Project-level config file names, in lookup order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["dirlint.toml", ".dirlint.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";
const GLOBAL_DIR_ENV: &str = "DIRLINT_CONFIG_DIR";

/// Where the configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`; not checked for existence.
    Explicit(PathBuf),
    /// A config file in the project directory.
    Project(PathBuf),
    /// `config.toml` in the global config directory.
    Global(PathBuf),
    /// Built-in defaults.
    Default,
}

impl ConfigSource {
    /// The file backing this source, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and parses the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be read or parsed.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            return Ok(Config::default());
        };
        if let Self::Global(_) = self {
            tracing::info!("Using global config: {}", path.display());
        }
        Config::from_file(path).with_context(|| format!("Failed to load config: {}", path.display()))
    }
}

/// Resolves the configuration for a check of `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    let search = Search {
        project_dir,
        global_dir: global_config_dir(),
    };
    let source = search.resolve(explicit);
    tracing::debug!("Config source: {:?}", source);
    source
}

/// `$DIRLINT_CONFIG_DIR` when set and non-empty, else `~/.dirlint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    std::env::var_os(GLOBAL_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".dirlint")))
}

struct Search<'a> {
    project_dir: &'a Path,
    global_dir: Option<PathBuf>,
}

impl Search<'_> {
    fn resolve(&self, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(path.to_path_buf());
        }
        let project = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| ConfigSource::Project(self.project_dir.join(name)));
        let global = self
            .global_dir
            .iter()
            .map(|dir| ConfigSource::Global(dir.join(GLOBAL_CONFIG_NAME)));

        project
            .chain(global)
            .find(|source| source.path().is_some_and(Path::is_file))
            .unwrap_or(ConfigSource::Default)
    }
}
