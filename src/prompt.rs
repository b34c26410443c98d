use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::selection::Selection;

const PACKAGE_PROMPT: &str = "Install packages [y/N]? ";
const FILE_PROMPT: &str = "Add configuration files [y/N]? ";

/// How a free-text answer is judged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerPolicy {
    /// Any answer containing `y` or `Y` counts, including "nay".
    #[default]
    Permissive,
    /// Only `y` or `yes`, case-insensitive, surrounding whitespace ignored.
    Strict,
}

pub fn is_affirmative(answer: &str, policy: AnswerPolicy) -> bool {
    match policy {
        AnswerPolicy::Permissive => answer.contains(['y', 'Y']),
        AnswerPolicy::Strict => {
            let answer = answer.trim();
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        }
    }
}

/// What the operator agreed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decision {
    pub install_packages: bool,
    pub add_files: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmState {
    AwaitingPackageConfirmation,
    AwaitingFileConfirmation { install_packages: bool },
    Done(Decision),
}

/// Two-question prompt session over an injected reader and writer.
///
/// The session is consumed by [`Confirmer::run`], so no further questions
/// can be asked once both answers are in.
pub struct Confirmer<R, W> {
    input: R,
    output: W,
    policy: AnswerPolicy,
    state: ConfirmState,
}

impl<R: BufRead, W: Write> Confirmer<R, W> {
    pub fn new(input: R, output: W, policy: AnswerPolicy) -> Self {
        Self {
            input,
            output,
            policy,
            state: ConfirmState::AwaitingPackageConfirmation,
        }
    }

    /// Ask the current question and move to the next state.
    pub fn step(&mut self, selection: &Selection) -> Result<ConfirmState> {
        self.state = match self.state {
            ConfirmState::AwaitingPackageConfirmation => {
                writeln!(self.output, "Packages:")?;
                for package in selection.display_packages() {
                    writeln!(self.output, "  {package}")?;
                }
                writeln!(self.output)?;

                let install_packages = self.ask(PACKAGE_PROMPT)?;
                ConfirmState::AwaitingFileConfirmation { install_packages }
            }
            ConfirmState::AwaitingFileConfirmation { install_packages } => {
                writeln!(self.output)?;
                writeln!(self.output, "Files:")?;
                for file in selection.display_files() {
                    writeln!(self.output, "  {file}")?;
                }
                writeln!(self.output)?;

                let add_files = self.ask(FILE_PROMPT)?;
                ConfirmState::Done(Decision {
                    install_packages,
                    add_files,
                })
            }
            done @ ConfirmState::Done(_) => done,
        };

        Ok(self.state)
    }

    /// Drive the session to completion and close it.
    pub fn run(mut self, selection: &Selection) -> Result<Decision> {
        loop {
            if let ConfirmState::Done(decision) = self.step(selection)? {
                tracing::debug!(?decision, "prompt session closed");
                return Ok(decision);
            }
        }
    }

    fn ask(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        // End of input reads as an empty answer; undecodable bytes never match.
        let mut raw = Vec::new();
        self.input
            .read_until(b'\n', &mut raw)
            .context("Failed to read answer from input")?;
        let answer = String::from_utf8_lossy(&raw);

        Ok(is_affirmative(&answer, self.policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn sample_selection() -> Selection {
        Selection {
            dev_dependencies: vec!["prettier".to_string(), "eslint".to_string()],
            dependencies: vec!["lodash".to_string()],
            files: vec!["x.json".to_string(), ".babelrc".to_string()],
        }
    }

    fn run_session(input: &str, policy: AnswerPolicy) -> (Decision, String) {
        let mut output = Vec::new();
        let decision = Confirmer::new(Cursor::new(input.as_bytes()), &mut output, policy)
            .run(&sample_selection())
            .unwrap();
        (decision, String::from_utf8(output).unwrap())
    }

    #[rstest]
    #[case("y", true)]
    #[case("Y", true)]
    #[case("yes", true)]
    #[case("nay", true)]
    #[case("", false)]
    #[case("n", false)]
    #[case("no", false)]
    fn test_permissive_answers(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_affirmative(answer, AnswerPolicy::Permissive), expected);
    }

    #[rstest]
    #[case("y", true)]
    #[case("YES", true)]
    #[case(" yes \n", true)]
    #[case("nay", false)]
    #[case("yep", false)]
    #[case("", false)]
    #[case("n", false)]
    fn test_strict_answers(#[case] answer: &str, #[case] expected: bool) {
        assert_eq!(is_affirmative(answer, AnswerPolicy::Strict), expected);
    }

    #[test]
    fn test_session_output() {
        let (decision, output) = run_session("y\nn\n", AnswerPolicy::Permissive);

        assert_eq!(
            decision,
            Decision {
                install_packages: true,
                add_files: false,
            }
        );
        assert_eq!(
            output,
            "Packages:\n  eslint\n  lodash\n  prettier\n\nInstall packages [y/N]? \
             \nFiles:\n  .babelrc\n  x.json\n\nAdd configuration files [y/N]? "
        );
    }

    #[test]
    fn test_state_transitions() {
        let selection = sample_selection();
        let mut output = Vec::new();
        let mut confirmer =
            Confirmer::new(Cursor::new("n\nyes\n"), &mut output, AnswerPolicy::Strict);
        assert_eq!(
            confirmer.step(&selection).unwrap(),
            ConfirmState::AwaitingFileConfirmation {
                install_packages: false
            }
        );

        let done = ConfirmState::Done(Decision {
            install_packages: false,
            add_files: true,
        });
        assert_eq!(confirmer.step(&selection).unwrap(), done);
        // Stepping a finished session asks nothing more.
        assert_eq!(confirmer.step(&selection).unwrap(), done);
    }

    #[test]
    fn test_invalid_utf8_answer_declines() {
        let mut output = Vec::new();
        let decision = Confirmer::new(
            Cursor::new(&b"y\n\xff\xfe\n"[..]),
            &mut output,
            AnswerPolicy::Permissive,
        )
        .run(&sample_selection())
        .unwrap();

        assert_eq!(
            decision,
            Decision {
                install_packages: true,
                add_files: false,
            }
        );
    }

    #[test]
    fn test_end_of_input_declines() {
        let (decision, output) = run_session("", AnswerPolicy::Permissive);
        assert_eq!(decision, Decision::default());
        assert!(output.contains("Add configuration files [y/N]? "));
    }

    #[test]
    fn test_only_first_answer_given() {
        let (decision, _) = run_session("yes\n", AnswerPolicy::Permissive);
        assert!(decision.install_packages);
        assert!(!decision.add_files);
    }

    #[test]
    fn test_empty_selection_still_prompts() {
        let mut output = Vec::new();
        let decision = Confirmer::new(Cursor::new("y\ny\n"), &mut output, AnswerPolicy::Permissive)
            .run(&Selection::default())
            .unwrap();
        assert!(decision.install_packages && decision.add_files);

        let output = String::from_utf8(output).unwrap();
        assert!(output.starts_with("Packages:\n\nInstall packages"));
    }
}
