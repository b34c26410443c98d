use crate::{ui, PresetConfig, Project, ProjectPath};
use anyhow::Result;
use std::io::{self, Write};

pub fn execute(project: &Project) -> Result<()> {
    let config = PresetConfig::load(&project.path(ProjectPath::Config))?;

    if config.is_empty() {
        ui::info("No presets defined.");
        return Ok(());
    }

    let mut stdout = io::stdout().lock();
    write_listing(&config, &mut stdout)?;
    Ok(())
}

fn write_listing(config: &PresetConfig, out: &mut impl Write) -> io::Result<()> {
    let width = config.iter().map(|(name, _)| name.len()).max().unwrap_or(0);

    for (name, preset) in config.iter() {
        writeln!(
            out,
            "{name:<width$}  {} package(s), {} file(s)",
            preset.package_count(),
            preset.files.len()
        )?;
    }
    out.flush()
}
