use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::util::xdg;

const CONFIG_FILE: &str = "cast.json";

/// Project path types
#[derive(Debug, Clone, Copy)]
pub enum ProjectPath {
    /// Project root being scaffolded
    Root,
    /// Package manifest inside the project root (e.g. `package.json`)
    Manifest(&'static str),
    /// Preset config file: default `$XDG_CONFIG_HOME/cast/cast.json`
    Config,
    /// Directory preset files are copied from: default `$XDG_CONFIG_HOME/cast`
    Templates,
}

/// Project - the paths one invocation works against
///
/// Resolved once at startup so nothing below the command layer reads the
/// current directory or the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    root: PathBuf,
    config_file: PathBuf,
    templates_dir: PathBuf,
}

impl Project {
    pub fn new(root: PathBuf, config_file: PathBuf, templates_dir: PathBuf) -> Self {
        Self {
            root,
            config_file,
            templates_dir,
        }
    }

    /// Resolve paths from CLI overrides, falling back to the current
    /// directory and the cast home.
    pub fn resolve(
        root: Option<&Path>,
        config_file: Option<&Path>,
        templates_dir: Option<&Path>,
    ) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to determine current directory")?;

        let root = match root {
            Some(path) => absolutize(&cwd, &xdg::expand_path(path)?),
            None => cwd.clone(),
        };

        let config_file = match config_file {
            Some(path) => absolutize(&cwd, &xdg::expand_path(path)?),
            None => xdg::config_dir()?.join(CONFIG_FILE),
        };

        let templates_dir = match templates_dir {
            Some(path) => absolutize(&cwd, &xdg::expand_path(path)?),
            None => xdg::config_dir()?,
        };

        tracing::debug!(
            root = %root.display(),
            config = %config_file.display(),
            templates = %templates_dir.display(),
            "resolved project paths"
        );

        Ok(Self::new(root, config_file, templates_dir))
    }

    /// Get a project path by type
    pub fn path(&self, path_type: ProjectPath) -> PathBuf {
        match path_type {
            ProjectPath::Root => self.root.clone(),
            ProjectPath::Manifest(name) => self.root.join(name),
            ProjectPath::Config => self.config_file.clone(),
            ProjectPath::Templates => self.templates_dir.clone(),
        }
    }
}

fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
