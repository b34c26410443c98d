use clap::Parser;
use std::path::PathBuf;

use crate::installers::PackageManager;

/// Cast - apply project presets
///
/// cast reads presets from `cast.json`, previews the packages and
/// configuration files they bring, and after confirmation installs the
/// packages and copies the files into the current project. Existing files
/// are never overwritten.
// A value from CAST_CONFIG or CAST_TEMPLATES counts as a supplied argument,
// so a bare `cast` then reports the missing PRESET instead of the full help.
#[derive(Parser, Debug)]
#[command(name = "cast", author, version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Presets to apply, in order
    #[arg(value_name = "PRESET", required_unless_present = "list")]
    pub presets: Vec<String>,

    /// Config file (defaults to $XDG_CONFIG_HOME/cast/cast.json)
    #[arg(short, long, value_name = "FILE", env = "CAST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory the preset files are copied from (defaults to the cast home)
    #[arg(short, long, value_name = "DIR", env = "CAST_TEMPLATES")]
    pub templates: Option<PathBuf>,

    /// Project directory to scaffold (defaults to the current directory)
    #[arg(short = 'C', long = "project", value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Package manager used to install dependencies
    #[arg(short = 'm', long, value_enum, default_value_t = PackageManager::Npm)]
    pub package_manager: PackageManager,

    /// Keep template subdirectories instead of copying into the project root
    #[arg(long)]
    pub keep_paths: bool,

    /// Drop repeated packages and files shared between presets
    #[arg(long)]
    pub unique: bool,

    /// Only accept "y" or "yes" as a confirmation
    #[arg(long)]
    pub strict: bool,

    /// List the presets available in the config file
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
