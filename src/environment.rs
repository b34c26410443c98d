use std::env;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::installers::PackageManager;
use crate::project::{Project, ProjectPath};

/// The project or machine is not set up for scaffolding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvironmentError {
    #[error("Unable to locate '{0}'")]
    MissingManifest(&'static str),

    #[error("Unable to locate '{0}'")]
    MissingPackageManager(&'static str),
}

/// Check the project manifest and package manager before anything is shown.
///
/// Returns the resolved package manager executable.
pub fn preflight(
    project: &Project,
    manager: PackageManager,
    search_path: Option<&OsStr>,
) -> Result<PathBuf, EnvironmentError> {
    let manifest = project.path(ProjectPath::Manifest(manager.manifest()));
    if !manifest.is_file() {
        return Err(EnvironmentError::MissingManifest(manager.manifest()));
    }

    let executable = search_path
        .and_then(|paths| find_executable(manager.executable(), paths))
        .ok_or(EnvironmentError::MissingPackageManager(manager.executable()))?;

    tracing::debug!(executable = %executable.display(), "found package manager");
    Ok(executable)
}

/// Look up `name` in a `PATH`-style list of directories.
pub fn find_executable(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    env::split_paths(search_path)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    ["", ".cmd", ".exe", ".bat"]
        .iter()
        .map(|ext| dir.join(format!("{name}{ext}")))
        .collect()
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
