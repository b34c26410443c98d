use crate::cli::Cli;
use crate::Project;
use anyhow::Result;

mod apply;
mod list;

pub use apply::{apply, ApplyOptions};

pub fn execute(cli: Cli) -> Result<()> {
    // Resolve every path up front; nothing below reads the process environment.
    let project = Project::resolve(
        cli.project.as_deref(),
        cli.config.as_deref(),
        cli.templates.as_deref(),
    )?;

    if cli.list {
        return list::execute(&project);
    }

    apply::execute(&project, &cli)
}
