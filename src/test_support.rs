use crate::runner::CommandRunner;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// Scripted [`CommandRunner`] keyed by the exact rendered command.
///
/// Unknown commands behave like a program that could not be started and
/// produce empty output. Every command issued is recorded in order of arrival.
#[derive(Debug, Default)]
pub(crate) struct FakeRunner {
    responses: HashMap<String, String>,
    issued: Mutex<Vec<String>>,
}

impl FakeRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, command: &str, output: &str) -> Self {
        self.responses.insert(command.to_string(), output.to_string());
        self
    }

    /// Commands issued so far, sorted so concurrent dispatch is comparable.
    pub(crate) fn issued_sorted(&self) -> Vec<String> {
        let mut issued = lock(&self.issued).clone();
        issued.sort();
        issued
    }

    pub(crate) fn issued_count(&self) -> usize {
        lock(&self.issued).len()
    }
}

impl CommandRunner for FakeRunner {
    fn run_capture(&self, command: &str) -> String {
        lock(&self.issued).push(command.to_string());
        self.responses.get(command).cloned().unwrap_or_default()
    }

    fn run_capture_lines(&self, command: &str) -> Vec<String> {
        self.run_capture(command)
            .split_inclusive('\n')
            .map(str::to_string)
            .collect()
    }
}

/// In-memory progress sink that can be inspected after a batch.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&lock(&self.0)).into_owned()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        lock(&self.0).extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
