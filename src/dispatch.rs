use crate::installers::{PackageInstaller, PackageKind};
use crate::prompt::Decision;
use crate::provision::{FileProvisioner, ProvisionReport};
use crate::selection::Selection;
use crate::ui::{self, Progress};

/// What happened during dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub install_runs: usize,
    pub failed_installs: usize,
    pub provisioned: Option<ProvisionReport>,
}

/// Runs the actions the operator agreed to.
///
/// Best effort: a failed install is reported and the remaining steps still
/// run. Nothing is rolled back.
pub struct Dispatcher<'a> {
    installer: &'a dyn PackageInstaller,
    provisioner: &'a dyn FileProvisioner,
}

impl<'a> Dispatcher<'a> {
    pub fn new(installer: &'a dyn PackageInstaller, provisioner: &'a dyn FileProvisioner) -> Self {
        Self {
            installer,
            provisioner,
        }
    }

    pub fn dispatch(&self, decision: Decision, selection: &Selection) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        if decision.install_packages {
            for (kind, packages) in [
                (PackageKind::Dev, &selection.dev_dependencies),
                (PackageKind::Regular, &selection.dependencies),
            ] {
                if packages.is_empty() {
                    continue;
                }
                summary.install_runs += 1;
                if !self.install(kind, packages) {
                    summary.failed_installs += 1;
                }
            }
        }

        if decision.add_files && !selection.files.is_empty() {
            let files: Vec<String> = selection
                .display_files()
                .into_iter()
                .map(str::to_string)
                .collect();
            match self.provisioner.provision(&files) {
                Ok(report) => summary.provisioned = Some(report),
                Err(err) => ui::warn(format!("Failed to add files: {err:#}")),
            }
        }

        summary
    }

    fn install(&self, kind: PackageKind, packages: &[String]) -> bool {
        let progress = Progress::new("Installing", format!("{kind} packages: {}", packages.join(" ")));

        match self.installer.install(kind, packages) {
            Ok(status) if status.success() => {
                progress.success("Installed");
                true
            }
            Ok(status) => {
                tracing::warn!(%kind, %status, "package install failed");
                progress.fail("Failed", status);
                false
            }
            Err(err) => {
                tracing::warn!(%kind, error = %err, "package manager could not be started");
                progress.fail("Failed", format!("{err:#}"));
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::installers::InstallStatus;
    use anyhow::{anyhow, Result};
    use std::cell::{Cell, RefCell};

    /// Records every install call and answers with a fixed status.
    #[derive(Default)]
    pub(crate) struct RecordingInstaller {
        pub calls: RefCell<Vec<(PackageKind, Vec<String>)>>,
        pub fail_dev: Cell<bool>,
        pub spawn_error: Cell<bool>,
    }

    impl PackageInstaller for RecordingInstaller {
        fn install(&self, kind: PackageKind, packages: &[String]) -> Result<InstallStatus> {
            self.calls.borrow_mut().push((kind, packages.to_vec()));
            if self.spawn_error.get() {
                return Err(anyhow!("npm went missing"));
            }
            if kind == PackageKind::Dev && self.fail_dev.get() {
                return Ok(InstallStatus::Failed(Some(1)));
            }
            Ok(InstallStatus::Succeeded)
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingProvisioner {
        pub calls: RefCell<Vec<Vec<String>>>,
    }

    impl FileProvisioner for RecordingProvisioner {
        fn provision(&self, files: &[String]) -> Result<ProvisionReport> {
            self.calls.borrow_mut().push(files.to_vec());
            Ok(ProvisionReport {
                copied: files.iter().map(Into::into).collect(),
                ..ProvisionReport::default()
            })
        }
    }

    fn selection() -> Selection {
        Selection {
            dev_dependencies: vec!["eslint".to_string()],
            dependencies: vec!["lodash".to_string()],
            files: vec!["x.json".to_string()],
        }
    }

    const YES: Decision = Decision {
        install_packages: true,
        add_files: true,
    };

    #[test]
    fn test_dispatch_everything() {
        let installer = RecordingInstaller::default();
        let provisioner = RecordingProvisioner::default();

        let summary = Dispatcher::new(&installer, &provisioner).dispatch(YES, &selection());

        assert_eq!(
            *installer.calls.borrow(),
            vec![
                (PackageKind::Dev, vec!["eslint".to_string()]),
                (PackageKind::Regular, vec!["lodash".to_string()]),
            ]
        );
        assert_eq!(*provisioner.calls.borrow(), vec![vec!["x.json".to_string()]]);
        assert_eq!(summary.install_runs, 2);
        assert_eq!(summary.failed_installs, 0);
        assert!(summary.provisioned.is_some());
    }

    #[test]
    fn test_declined_does_nothing() {
        let installer = RecordingInstaller::default();
        let provisioner = RecordingProvisioner::default();

        let summary =
            Dispatcher::new(&installer, &provisioner).dispatch(Decision::default(), &selection());

        assert!(installer.calls.borrow().is_empty());
        assert!(provisioner.calls.borrow().is_empty());
        assert_eq!(summary, DispatchSummary::default());
    }

    #[test]
    fn test_empty_lists_are_skipped() {
        let installer = RecordingInstaller::default();
        let provisioner = RecordingProvisioner::default();
        let only_regular = Selection {
            dependencies: vec!["lodash".to_string()],
            ..Selection::default()
        };

        Dispatcher::new(&installer, &provisioner).dispatch(YES, &only_regular);

        assert_eq!(
            *installer.calls.borrow(),
            vec![(PackageKind::Regular, vec!["lodash".to_string()])]
        );
        assert!(provisioner.calls.borrow().is_empty());
    }

    #[test]
    fn test_failed_install_does_not_stop_dispatch() {
        let installer = RecordingInstaller::default();
        installer.fail_dev.set(true);
        let provisioner = RecordingProvisioner::default();

        let summary = Dispatcher::new(&installer, &provisioner).dispatch(YES, &selection());

        assert_eq!(installer.calls.borrow().len(), 2);
        assert_eq!(provisioner.calls.borrow().len(), 1);
        assert_eq!(summary.failed_installs, 1);
    }

    #[test]
    fn test_spawn_error_does_not_stop_dispatch() {
        let installer = RecordingInstaller::default();
        installer.spawn_error.set(true);
        let provisioner = RecordingProvisioner::default();

        let summary = Dispatcher::new(&installer, &provisioner).dispatch(YES, &selection());

        assert_eq!(summary.failed_installs, 2);
        assert_eq!(provisioner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_files_provisioned_in_sorted_order() {
        let installer = RecordingInstaller::default();
        let provisioner = RecordingProvisioner::default();
        let unsorted = Selection {
            files: vec![
                "x.json".to_string(),
                ".babelrc".to_string(),
                "tsconfig.json".to_string(),
            ],
            ..Selection::default()
        };

        Dispatcher::new(&installer, &provisioner).dispatch(YES, &unsorted);

        assert_eq!(
            *provisioner.calls.borrow(),
            vec![vec![
                ".babelrc".to_string(),
                "tsconfig.json".to_string(),
                "x.json".to_string(),
            ]]
        );
    }

    #[test]
    fn test_files_only() {
        let installer = RecordingInstaller::default();
        let provisioner = RecordingProvisioner::default();
        let decision = Decision {
            install_packages: false,
            add_files: true,
        };

        Dispatcher::new(&installer, &provisioner).dispatch(decision, &selection());

        assert!(installer.calls.borrow().is_empty());
        assert_eq!(provisioner.calls.borrow().len(), 1);
    }
}
