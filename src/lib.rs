// Public API
pub mod cli;
pub mod commands;
pub mod ui;

// Core domain types
mod config;
mod dispatch;
mod environment;
mod installers;
mod project;
mod prompt;
mod provision;
mod selection;
mod util;

// Re-export main types
pub use config::{ConfigError, Preset, PresetConfig};
pub use dispatch::{DispatchSummary, Dispatcher};
pub use environment::{find_executable, preflight, EnvironmentError};
pub use installers::{
    CommandInstaller, InstallStatus, PackageInstaller, PackageKind, PackageManager,
};
pub use project::{Project, ProjectPath};
pub use prompt::{is_affirmative, AnswerPolicy, ConfirmState, Confirmer, Decision};
pub use provision::{CopyLayout, FileProvisioner, ProvisionReport, TemplateProvisioner};
pub use selection::{DuplicatePolicy, Selection};
