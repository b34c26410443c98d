use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Which dependency list a package belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageKind {
    Dev,
    Regular,
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageKind::Dev => write!(f, "dev"),
            PackageKind::Regular => write!(f, "regular"),
        }
    }
}

/// Supported package manager backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub fn executable(self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }

    /// Project manifest the package manager writes dependencies to.
    pub fn manifest(self) -> &'static str {
        "package.json"
    }

    /// Arguments preceding the package names.
    pub fn install_args(self, kind: PackageKind) -> &'static [&'static str] {
        match (self, kind) {
            (PackageManager::Npm, PackageKind::Dev) => &["install", "--save-dev"],
            (PackageManager::Npm, PackageKind::Regular) => &["install", "--save"],
            (PackageManager::Yarn, PackageKind::Dev) => &["add", "--dev"],
            (PackageManager::Yarn, PackageKind::Regular) => &["add"],
            (PackageManager::Pnpm, PackageKind::Dev) => &["add", "--save-dev"],
            (PackageManager::Pnpm, PackageKind::Regular) => &["add", "--save-prod"],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.executable())
    }
}

/// Outcome of one package manager run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallStatus {
    Succeeded,
    /// The package manager exited unsuccessfully; `None` when killed by a signal.
    Failed(Option<i32>),
}

impl InstallStatus {
    pub fn success(self) -> bool {
        self == InstallStatus::Succeeded
    }
}

impl fmt::Display for InstallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallStatus::Succeeded => write!(f, "succeeded"),
            InstallStatus::Failed(Some(code)) => write!(f, "exited with status {code}"),
            InstallStatus::Failed(None) => write!(f, "terminated by signal"),
        }
    }
}

pub trait PackageInstaller {
    fn install(&self, kind: PackageKind, packages: &[String]) -> Result<InstallStatus>;
}

/// Installs packages by running the package manager in the project root.
///
/// Output is inherited so the package manager reports its own progress and
/// failures.
#[derive(Debug, Clone)]
pub struct CommandInstaller {
    manager: PackageManager,
    executable: PathBuf,
    project_dir: PathBuf,
}

impl CommandInstaller {
    pub fn new(manager: PackageManager, executable: PathBuf, project_dir: PathBuf) -> Self {
        Self {
            manager,
            executable,
            project_dir,
        }
    }

    fn command(&self, kind: PackageKind, packages: &[String]) -> Command {
        let mut command = Command::new(&self.executable);
        command
            .args(self.manager.install_args(kind))
            .args(packages)
            .current_dir(&self.project_dir);
        command
    }
}

impl PackageInstaller for CommandInstaller {
    fn install(&self, kind: PackageKind, packages: &[String]) -> Result<InstallStatus> {
        let mut command = self.command(kind, packages);
        tracing::debug!(?command, "running package manager");

        let status = command.status().with_context(|| {
            format!(
                "Failed to run {} ({})",
                self.manager,
                self.executable.display()
            )
        })?;

        if status.success() {
            Ok(InstallStatus::Succeeded)
        } else {
            Ok(InstallStatus::Failed(status.code()))
        }
    }
}
