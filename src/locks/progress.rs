//! Console sink for per-file progress text.
//!
//! Worker threads report concurrently, so each write takes the sink's lock
//! for its whole duration. A failure headline and the raw output that follows
//! it are written under a single acquisition and never interleave with
//! another file's lines.

use super::types::Operation;
use std::io::Write;
use std::sync::Mutex;
use tracing::debug;

pub struct Progress {
    sink: Mutex<Box<dyn Write + Send>>,
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

impl Progress {
    pub fn new<W: Write + Send + 'static>(sink: W) -> Self {
        Self {
            sink: Mutex::new(Box::new(sink)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }

    /// Write one line.
    pub fn line(&self, message: &str) {
        self.write_with(|sink| writeln!(sink, "{}", message));
    }

    /// Report how one file fared: `Locked File: <path>` on success, otherwise
    /// `Lock Failed: <path>` followed by the command output.
    pub fn outcome(&self, operation: Operation, path: &str, succeeded: bool, output: &str) {
        if succeeded {
            self.line(&format!("{} File: {}", operation.past_tense(), path));
        } else {
            self.failure(&format!("{} Failed: {}", operation.verb(), path), output);
        }
    }

    /// Write a headline followed by the raw command output that explains it.
    pub fn failure(&self, headline: &str, output: &str) {
        self.write_with(|sink| {
            writeln!(sink, "{}", headline)?;
            if !output.is_empty() {
                sink.write_all(output.as_bytes())?;
                if !output.ends_with('\n') {
                    writeln!(sink)?;
                }
            }
            Ok(())
        });
    }

    fn write_with<F>(&self, write: F)
    where
        F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
    {
        let mut sink = self
            .sink
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        if let Err(e) = write(&mut **sink).and_then(|()| sink.flush()) {
            debug!(error = %e, "failed to write progress output");
        }
    }
}
