//! process
//!
//! The process-execution seam.
//!
//! # Design
//!
//! Traversals describe what to run as an [`Invocation`] and hand it to an
//! [`Invoker`]. The invoker blocks until the process exits. With
//! `check` set, a non-zero exit becomes [`ProcessError::Failed`]; without it
//! the status is reported back and the caller decides.
//!
//! [`ShellInvoker`] runs shell-string commands through `sh -c` (or
//! `cmd /C` on Windows) and argv commands directly.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::core::types::{CommandLine, EnvMap};

/// Errors from running external commands.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The process could not be started.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// The process exited unsuccessfully under checked mode.
    #[error("`{command}` exited with {}", describe_status(.status))]
    Failed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

/// What to run, where, and how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: CommandLine,
    pub cwd: PathBuf,
    /// Variables set for the child on top of the inherited environment.
    pub env: Option<EnvMap>,
    /// Capture stdout instead of letting it through.
    pub capture: bool,
    /// Fail on non-zero exit.
    pub check: bool,
}

impl Invocation {
    /// Run `command` in `cwd` with the inherited environment.
    pub fn new(command: CommandLine, cwd: impl Into<PathBuf>) -> Self {
        Self {
            command,
            cwd: cwd.into(),
            env: None,
            capture: false,
            check: false,
        }
    }

    /// Run a program with arguments, no shell.
    pub fn argv<I, S>(args: I, cwd: &Path) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(CommandLine::Argv(args.into_iter().map(Into::into).collect()), cwd)
    }

    /// Set `env` for the child, overriding inherited values of the same name.
    pub fn with_env(mut self, env: EnvMap) -> Self {
        self.env = Some(env);
        self
    }

    pub fn capture(mut self) -> Self {
        self.capture = true;
        self
    }

    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }
}

/// Result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationOutput {
    /// Exit code; `None` if terminated by a signal.
    pub status: Option<i32>,
    /// Captured stdout, if capture was requested.
    pub stdout: Option<String>,
}

impl InvocationOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs external commands.
pub trait Invoker {
    /// Run to completion.
    fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, ProcessError>;
}

/// Invoker backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInvoker;

impl ShellInvoker {
    fn command(line: &CommandLine) -> Command {
        match line {
            CommandLine::Shell(script) => {
                let mut cmd = if cfg!(windows) {
                    let mut c = Command::new("cmd");
                    c.arg("/C");
                    c
                } else {
                    let mut c = Command::new("sh");
                    c.arg("-c");
                    c
                };
                cmd.arg(script);
                cmd
            }
            CommandLine::Argv(args) => {
                let (program, rest) = args.split_first().map_or(("", &[][..]), |(p, r)| (p.as_str(), r));
                let mut cmd = Command::new(program);
                cmd.args(rest);
                cmd
            }
        }
    }
}

impl Invoker for ShellInvoker {
    fn run(&self, invocation: &Invocation) -> Result<InvocationOutput, ProcessError> {
        let shown = invocation.command.to_string();
        if matches!(&invocation.command, CommandLine::Argv(args) if args.is_empty()) {
            return Err(ProcessError::Spawn {
                command: shown,
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty argument list"),
            });
        }
        let mut cmd = Self::command(&invocation.command);
        cmd.current_dir(&invocation.cwd);
        if let Some(env) = &invocation.env {
            cmd.envs(env);
        }

        let spawn_error = |source: std::io::Error| ProcessError::Spawn {
            command: shown.clone(),
            source,
        };

        let (status, stdout, stderr) = if invocation.capture {
            let output = cmd
                .stdin(Stdio::null())
                .output()
                .map_err(spawn_error)?;
            (
                output.status,
                Some(String::from_utf8_lossy(&output.stdout).into_owned()),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        } else {
            (cmd.status().map_err(spawn_error)?, None, String::new())
        };

        if invocation.check && !status.success() {
            return Err(ProcessError::Failed {
                command: shown,
                status: status.code(),
                stderr,
            });
        }

        Ok(InvocationOutput {
            status: status.code(),
            stdout,
        })
    }
}
