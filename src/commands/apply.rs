use crate::cli::Cli;
use crate::{
    preflight, ui, AnswerPolicy, CommandInstaller, Confirmer, CopyLayout, DispatchSummary,
    Dispatcher, DuplicatePolicy, PresetConfig, Project, ProjectPath, Selection,
    TemplateProvisioner,
};
use anyhow::Result;
use std::env;
use std::io::{self, BufRead, Write};

/// Knobs for how presets are merged and answers are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplyOptions {
    pub duplicates: DuplicatePolicy,
    pub answers: AnswerPolicy,
}

impl ApplyOptions {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            duplicates: if cli.unique {
                DuplicatePolicy::Collapse
            } else {
                DuplicatePolicy::Keep
            },
            answers: if cli.strict {
                AnswerPolicy::Strict
            } else {
                AnswerPolicy::Permissive
            },
        }
    }
}

pub fn execute(project: &Project, cli: &Cli) -> Result<()> {
    // Environment problems surface before any prompt is shown.
    let path_var = env::var_os("PATH");
    let executable = preflight(project, cli.package_manager, path_var.as_deref())?;
    let config = PresetConfig::load(&project.path(ProjectPath::Config))?;

    let installer = CommandInstaller::new(
        cli.package_manager,
        executable,
        project.path(ProjectPath::Root),
    );
    let provisioner = TemplateProvisioner::new(
        project.path(ProjectPath::Templates),
        project.path(ProjectPath::Root),
        if cli.keep_paths {
            CopyLayout::KeepPaths
        } else {
            CopyLayout::Flat
        },
    );
    let dispatcher = Dispatcher::new(&installer, &provisioner);

    let summary = apply(
        &cli.presets,
        &config,
        ApplyOptions::from_cli(cli),
        io::stdin().lock(),
        io::stdout(),
        &dispatcher,
    )?;

    report(&summary);
    Ok(())
}

/// Aggregate the named presets, ask for confirmation, then act on it.
pub fn apply<R: BufRead, W: Write>(
    names: &[String],
    config: &PresetConfig,
    options: ApplyOptions,
    input: R,
    output: W,
    dispatcher: &Dispatcher<'_>,
) -> Result<DispatchSummary> {
    let selection = Selection::aggregate(names, config, options.duplicates);
    let decision = Confirmer::new(input, output, options.answers).run(&selection)?;
    Ok(dispatcher.dispatch(decision, &selection))
}

fn report(summary: &DispatchSummary) {
    if summary.failed_installs > 0 {
        ui::warn(format!(
            "{} of {} package install(s) failed",
            summary.failed_installs, summary.install_runs
        ));
    }

    if let Some(files) = &summary.provisioned {
        let mut message = format!(
            "{} file(s) copied, {} already present",
            files.copied.len(),
            files.skipped.len()
        );
        if !files.failed.is_empty() {
            message.push_str(&format!(", {} failed", files.failed.len()));
        }
        ui::success("Files", message);
    }
}
