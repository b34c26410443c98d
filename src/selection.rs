use std::collections::HashSet;

use crate::config::PresetConfig;

/// How repeated entries across the selected presets are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep every entry, so a preset selected twice contributes twice.
    #[default]
    Keep,
    /// Keep the first occurrence of each entry.
    Collapse,
}

/// Packages and files gathered from the selected presets, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub dev_dependencies: Vec<String>,
    pub dependencies: Vec<String>,
    pub files: Vec<String>,
}

impl Selection {
    /// Merge the presets named in `names`.
    ///
    /// Names missing from `config` contribute nothing.
    pub fn aggregate<S: AsRef<str>>(
        names: &[S],
        config: &PresetConfig,
        policy: DuplicatePolicy,
    ) -> Self {
        let mut selection = Self::default();

        for name in names {
            let name = name.as_ref();
            let Some(preset) = config.get(name) else {
                tracing::debug!(preset = name, "preset not found in config, skipping");
                continue;
            };

            selection
                .dev_dependencies
                .extend(preset.dev_dependencies.iter().cloned());
            selection
                .dependencies
                .extend(preset.dependencies.iter().cloned());
            selection.files.extend(preset.files.iter().cloned());
        }

        if policy == DuplicatePolicy::Collapse {
            collapse(&mut selection.dev_dependencies);
            collapse(&mut selection.dependencies);
            collapse(&mut selection.files);
        }

        tracing::debug!(
            dev = selection.dev_dependencies.len(),
            regular = selection.dependencies.len(),
            files = selection.files.len(),
            "aggregated presets"
        );

        selection
    }

    /// Dev and regular packages together, sorted for display.
    pub fn display_packages(&self) -> Vec<&str> {
        let mut packages: Vec<&str> = self
            .dev_dependencies
            .iter()
            .chain(self.dependencies.iter())
            .map(String::as_str)
            .collect();
        packages.sort_unstable();
        packages
    }

    /// Files sorted for display.
    pub fn display_files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = self.files.iter().map(String::as_str).collect();
        files.sort_unstable();
        files
    }

    pub fn has_packages(&self) -> bool {
        !self.dev_dependencies.is_empty() || !self.dependencies.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_packages() && self.files.is_empty()
    }
}

fn collapse(entries: &mut Vec<String>) {
    let mut seen = HashSet::new();
    entries.retain(|entry| seen.insert(entry.clone()));
}
