//! External command execution with captured output.
//!
//! All external invocations go through the [`CommandRunner`] trait so that
//! lock orchestration can be exercised without spawning processes. The
//! process-backed implementation is [`ShellRunner`].
//!
//! Failure to run a command is never an error at this layer: an unparseable
//! command line or a program that cannot be spawned yields empty output, and
//! callers infer failure from the absence of an expected success marker.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, ChildStdout, Command, Stdio};
use tracing::{debug, warn};

/// Maximum number of bytes captured by [`CommandRunner::run_capture`].
pub const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Maximum length of a single line captured by [`CommandRunner::run_capture_lines`].
pub const MAX_LINE_BYTES: usize = 4 * 1024;

/// Runs one external command to completion and returns what it printed.
pub trait CommandRunner: Send + Sync {
    /// Run `command` and return its standard output as text.
    ///
    /// Output past [`MAX_OUTPUT_BYTES`] is dropped. Returns an empty string
    /// if the command cannot be started.
    fn run_capture(&self, command: &str) -> String;

    /// Run `command` and return its standard output split into lines.
    ///
    /// Each line keeps its trailing newline. Lines longer than
    /// [`MAX_LINE_BYTES`] are cut short. Returns an empty vector if the
    /// command cannot be started.
    fn run_capture_lines(&self, command: &str) -> Vec<String>;
}

/// Process-backed runner.
///
/// The rendered command string is tokenized with shell-like rules
/// (`shell-words`) and executed directly, without an intermediate shell.
/// Only standard output is captured. Standard error is inherited, so warnings
/// and failure text from the child reach the terminal without ever being
/// mistaken for a success marker or a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    fn spawn(&self, command: &str) -> Option<(Child, ChildStdout)> {
        let args = match shell_words::split(command) {
            Ok(args) => args,
            Err(e) => {
                warn!(command, error = %e, "failed to parse command line");
                return None;
            }
        };

        let Some((program, rest)) = args.split_first() else {
            warn!(command, "command is empty after parsing");
            return None;
        };

        debug!(command, "spawning");
        let mut child = match Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                warn!(program = program.as_str(), error = %e, "failed to execute command");
                return None;
            }
        };

        let Some(stdout) = child.stdout.take() else {
            warn!(command, "child has no stdout pipe");
            reap(child, command);
            return None;
        };

        Some((child, stdout))
    }
}

fn reap(mut child: Child, command: &str) {
    match child.wait() {
        Ok(status) => debug!(command, ?status, "command exited"),
        Err(e) => warn!(command, error = %e, "failed to wait for command"),
    }
}

impl CommandRunner for ShellRunner {
    fn run_capture(&self, command: &str) -> String {
        let Some((child, reader)) = self.spawn(command) else {
            return String::new();
        };

        let mut buffer = Vec::new();
        if let Err(e) = reader
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buffer)
        {
            warn!(command, error = %e, "failed to read command output");
        }
        if buffer.len() >= MAX_OUTPUT_BYTES {
            debug!(command, limit = MAX_OUTPUT_BYTES, "command output truncated");
        }

        reap(child, command);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    fn run_capture_lines(&self, command: &str) -> Vec<String> {
        let Some((child, reader)) = self.spawn(command) else {
            return Vec::new();
        };

        let mut reader = BufReader::new(reader);
        let mut lines = Vec::new();

        loop {
            let mut line = Vec::new();
            match reader
                .by_ref()
                .take(MAX_LINE_BYTES as u64)
                .read_until(b'\n', &mut line)
            {
                Ok(0) => break,
                Ok(_) => {
                    if line.len() >= MAX_LINE_BYTES && line.last() != Some(&b'\n') {
                        debug!(command, limit = MAX_LINE_BYTES, "output line truncated");
                        if let Err(e) = reader.skip_until(b'\n') {
                            warn!(command, error = %e, "failed to read command output");
                            lines.push(String::from_utf8_lossy(&line).into_owned());
                            break;
                        }
                    }
                    lines.push(String::from_utf8_lossy(&line).into_owned());
                }
                Err(e) => {
                    warn!(command, error = %e, "failed to read command output");
                    break;
                }
            }
        }

        drop(reader);
        reap(child, command);
        lines
    }
}
