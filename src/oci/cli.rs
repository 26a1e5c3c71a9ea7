//! OCI CLI command execution.
//!
//! Commands are structured program + argument lists handed straight to the
//! process launcher, so identifiers and item names never pass through a shell.

use crate::error::{ExportError, Result};
use colored::Colorize;
use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory, inherited from this process when `None`.
    pub current_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new<P, I, S>(program: P, args: I) -> Self
    where
        P: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            current_dir: None,
        }
    }

    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Split a configured command string, keeping 'quoted sub' strings together.
    ///
    /// Returns `None` for a blank string.
    pub fn parse(input: &str) -> Option<Self> {
        let parts = split_and_strip(input.trim());
        let (program, args) = parts.split_first()?;
        if program.is_empty() {
            return None;
        }
        Some(CommandLine::new(*program, args.iter().copied()))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{arg}'")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Everything a finished process reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs commands. The only failure is not being able to start the process.
pub trait CommandExecutor: Send + Sync {
    fn execute(&self, command: &CommandLine) -> Result<CommandOutput>;
}

/// Launches real subprocesses.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, command: &CommandLine) -> Result<CommandOutput> {
        log::debug!("run({cmd})", cmd = command.to_string().on_blue());

        let mut process = Command::new(&command.program);
        process.args(&command.args);
        if let Some(dir) = &command.current_dir {
            process.current_dir(dir);
        }

        let output = process.output().map_err(|e| {
            log::error!("Command execution failed: {}", e);
            ExportError::Execution {
                command: command.to_string(),
                source: e,
            }
        })?;

        log::debug!("output.stdout.len(): {}", output.stdout.len());
        log::debug!("output.status.code(): {:?}", output.status.code());

        Ok(CommandOutput {
            code: output.status.code(),
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Run a command without judging its outcome.
///
/// A non-zero exit is logged and handed back for the caller to inspect.
pub fn run(executor: &dyn CommandExecutor, command: &CommandLine) -> Result<CommandOutput> {
    let output = executor.execute(command)?;
    if !output.success {
        log_failure(command, &output);
    }
    Ok(output)
}

/// Run a command and parse its stdout as JSON, whatever the exit status was.
///
/// # Arguments
/// * `executor` - Runs the process (a real one or a test double)
/// * `command` - The command to execute
///
/// # Returns
/// * `Ok(Value)` - The parsed stdout
/// * `Err` - If the process cannot start, or stdout is empty or not JSON.
///   The CLI's stderr is part of the error text.
pub fn run_capturing(executor: &dyn CommandExecutor, command: &CommandLine) -> Result<Value> {
    let output = run(executor, command)?;

    if output.stdout.trim().is_empty() {
        return Err(ExportError::Parse {
            command: command.to_string(),
            reason: with_stderr("empty output".to_string(), &output),
        });
    }

    serde_json::from_str(&output.stdout).map_err(|e| {
        log::error!("OUTPUT START:\n\n{}\n\nOUTPUT END\n", output.stdout);
        ExportError::Parse {
            command: command.to_string(),
            reason: with_stderr(e.to_string(), &output),
        }
    })
}

fn log_failure(command: &CommandLine, output: &CommandOutput) {
    log::trace!(
        "code={code:?}\n┎######\nstderr=\n{stderr}\n┖######",
        code = output.code,
        stderr = output.stderr.red()
    );
    log::warn!(
        "{failed} to run {cmd}: {detail}",
        failed = "failed".on_red(),
        cmd = command.to_string().on_blue(),
        detail = failure_detail(output),
    );
}

/// Exit code plus whatever the CLI printed on stderr.
fn failure_detail(output: &CommandOutput) -> String {
    with_stderr(format!("exit code {:?}", output.code), output)
}

fn with_stderr(reason: String, output: &CommandOutput) -> String {
    match output.stderr.trim() {
        "" => reason,
        stderr => format!("{reason} (stderr: {stderr})"),
    }
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    get_command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}
