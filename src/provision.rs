use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::ui;

/// Result of copying preset files into a project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub copied: Vec<PathBuf>,
    /// Destinations that already existed and were left alone.
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<String>,
}

/// Where a template lands inside the project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CopyLayout {
    /// Project root, under the template's file name.
    #[default]
    Flat,
    /// Same relative path as under the templates directory.
    KeepPaths,
}

pub trait FileProvisioner {
    fn provision(&self, files: &[String]) -> Result<ProvisionReport>;
}

/// Copies files from a templates directory into a project, never
/// overwriting what is already there.
#[derive(Debug, Clone)]
pub struct TemplateProvisioner {
    source_root: PathBuf,
    dest_root: PathBuf,
    layout: CopyLayout,
}

impl TemplateProvisioner {
    pub fn new(source_root: PathBuf, dest_root: PathBuf, layout: CopyLayout) -> Self {
        Self {
            source_root,
            dest_root,
            layout,
        }
    }

    /// Destination of `relative`, relative to the project root.
    fn target(&self, relative: &Path) -> Result<PathBuf> {
        match self.layout {
            CopyLayout::KeepPaths => Ok(relative.to_path_buf()),
            CopyLayout::Flat => relative
                .file_name()
                .map(PathBuf::from)
                .with_context(|| format!("'{}' has no file name", relative.display())),
        }
    }

    /// Copy one file. Returns `false` when the destination already exists.
    fn copy_file(&self, relative: &Path, target: &Path) -> Result<bool> {
        let source = self.source_root.join(relative);
        let dest = self.dest_root.join(target);

        if !source.is_file() {
            bail!("Template {} not found", source.display());
        }

        let mut reader = fs::File::open(&source)
            .with_context(|| format!("Failed to open template {}", source.display()))?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let mut writer = match OpenOptions::new().write(true).create_new(true).open(&dest) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to create {}", dest.display()));
            }
        };

        io::copy(&mut reader, &mut writer)
            .with_context(|| format!("Failed to copy {} to {}", source.display(), dest.display()))?;

        Ok(true)
    }
}

impl FileProvisioner for TemplateProvisioner {
    fn provision(&self, files: &[String]) -> Result<ProvisionReport> {
        let mut report = ProvisionReport::default();

        for file in files {
            let resolved = validate_relative(file)
                .and_then(|relative| Ok((self.target(&relative)?, relative)));
            let (target, relative) = match resolved {
                Ok(paths) => paths,
                Err(err) => {
                    ui::warn(format!("{err:#}"));
                    report.failed.push(file.clone());
                    continue;
                }
            };

            match self.copy_file(&relative, &target) {
                Ok(true) => {
                    ui::status("Copied", target.display());
                    report.copied.push(target);
                }
                Ok(false) => {
                    ui::status("Skipped", format!("{} (already exists)", target.display()));
                    report.skipped.push(target);
                }
                Err(err) => {
                    ui::warn(format!("{err:#}"));
                    report.failed.push(file.clone());
                }
            }
        }

        tracing::debug!(
            copied = report.copied.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "provisioned files"
        );
        Ok(report)
    }
}

/// Accept only plain relative paths that stay inside their root.
fn validate_relative(file: &str) -> Result<PathBuf> {
    let path = Path::new(file);
    if file.is_empty() {
        bail!("Refusing to copy an empty path");
    }

    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                bail!("Refusing to copy '{file}': path must be relative to the templates directory");
            }
        }
    }

    Ok(path.to_path_buf())
}
