//! External process invocation.
//!
//! Every menu command ends in one or more `Invocation`s handed to a
//! `CommandRunner`. The runner blocks until the child exits. Exit status is
//! reported back for logging only; callers never branch on it.

use std::process::{Command, Stdio};

use crate::errors::DevvyError;

/// A program plus its fixed argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run this invocation inside another launcher, e.g. `alacritty -e <self>`.
    pub fn wrapped_in(self, launcher: &str, launcher_args: &[String]) -> Self {
        Invocation::new(launcher, launcher_args.iter().cloned())
            .arg(self.program)
            .args(self.args)
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Abstraction over process execution for testability.
/// Real implementation: `SystemRunner`. Test double: `RecordingRunner`.
pub trait CommandRunner {
    /// Run `invocation` to completion. `Ok` carries the exit code when the
    /// platform reports one; `Err` means the process never started.
    fn run(&mut self, invocation: &Invocation) -> Result<Option<i32>, DevvyError>;
}

/// Spawns real processes that inherit this process's stdio.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<Option<i32>, DevvyError> {
        tracing::info!(program = %invocation.program, args = ?invocation.args, "running command");

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| DevvyError::SpawnFailed {
                program: invocation.program.clone(),
                source,
            })?;

        tracing::debug!(command = %invocation, code = ?status.code(), "command finished");
        Ok(status.code())
    }
}

/// Runner that records invocations instead of spawning them.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub invocations: Vec<Invocation>,
    /// Programs that fail to launch, to exercise the spawn error path.
    pub missing: Vec<String>,
}

#[cfg(test)]
impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<Option<i32>, DevvyError> {
        self.invocations.push(invocation.clone());
        if self.missing.contains(&invocation.program) {
            return Err(DevvyError::SpawnFailed {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }
        Ok(Some(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builders() {
        let inv = Invocation::new("cargo", ["build"]).arg("--release");
        assert_eq!(inv.program, "cargo");
        assert_eq!(inv.args, vec!["build", "--release"]);

        let inv = Invocation::new("rye", ["add"]).args(["requests", "flask"]);
        assert_eq!(inv.args, vec!["add", "requests", "flask"]);
    }

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("bunx", ["--bun", "astro", "dev"]);
        assert_eq!(inv.to_string(), "bunx --bun astro dev");
        assert_eq!(Invocation::new("rye", Vec::<String>::new()).to_string(), "rye");
    }

    #[test]
    fn test_wrapped_in_launcher() {
        let inv = Invocation::new("nix", ["shell", "-p", "hello"])
            .wrapped_in("alacritty", &["-e".to_string()]);
        assert_eq!(inv.program, "alacritty");
        assert_eq!(inv.args, vec!["-e", "nix", "shell", "-p", "hello"]);
    }

    #[test]
    fn test_system_runner_reports_missing_program() {
        let mut runner = SystemRunner;
        let inv = Invocation::new("devvy-definitely-not-installed-xyz", ["--version"]);
        let err = runner.run(&inv).unwrap_err();
        match err {
            DevvyError::SpawnFailed { program, source } => {
                assert_eq!(program, "devvy-definitely-not-installed-xyz");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected SpawnFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_passes_through_exit_code() {
        let mut runner = SystemRunner;
        let code = runner
            .run(&Invocation::new("sh", ["-c", "exit 3"]))
            .unwrap();
        assert_eq!(code, Some(3));
    }
}
