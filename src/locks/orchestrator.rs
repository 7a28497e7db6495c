//! Lock orchestration: templating, dispatch, classification, aggregation.

use super::progress::Progress;
use super::types::{BatchResult, Operation};
use crate::config::{CommandTemplates, Config, DispatchPolicy};
use crate::error::Result;
use crate::fs::{expand_files, relative_to_root};
use crate::pool::TaskPool;
use crate::runner::CommandRunner;
use crate::status::{LockRecord, parse_lock_listing};
use crate::template::{FILE_PATH, ROOT_PATH, render};
use globset::GlobSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;

/// Façade over the lock, unlock, listing, and query commands.
///
/// Operations never fail: outcomes are reported as booleans and counts, and
/// per-file detail goes to the [`Progress`] sink.
pub struct LockOrchestrator {
    commands: Arc<CommandTemplates>,
    runner: Arc<dyn CommandRunner>,
    progress: Arc<Progress>,
    pool_capacity: usize,
    dispatch: DispatchPolicy,
    exclude: GlobSet,
}

impl LockOrchestrator {
    /// Build an orchestrator from a loaded config, reporting to stdout.
    pub fn new(config: &Config, runner: Arc<dyn CommandRunner>) -> Result<Self> {
        Ok(Self {
            commands: Arc::new(config.commands.clone()),
            runner,
            progress: Arc::new(Progress::stdout()),
            pool_capacity: config.pool_capacity,
            dispatch: config.dispatch,
            exclude: config.exclude_set()?,
        })
    }

    /// Replace the progress sink.
    pub fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = Arc::new(progress);
        self
    }

    /// Lock every path. True iff all of them were locked.
    pub fn lock(&self, root: &str, forced: bool, paths: &[String]) -> bool {
        self.run_batch(Operation::Lock, root, forced, paths)
            .is_success()
    }

    /// Unlock every path. True iff all of them were unlocked.
    pub fn unlock(&self, root: &str, forced: bool, paths: &[String]) -> bool {
        self.run_batch(Operation::Unlock, root, forced, paths)
            .is_success()
    }

    /// Expand `path` (recursively, if it is a directory) and lock the result.
    pub fn lock_path(&self, root: &str, forced: bool, path: &str) -> bool {
        let files = expand_files(root, path, &self.exclude);
        self.lock(root, forced, &files)
    }

    /// Expand `path` (recursively, if it is a directory) and unlock the result.
    pub fn unlock_path(&self, root: &str, forced: bool, path: &str) -> bool {
        let files = expand_files(root, path, &self.exclude);
        self.unlock(root, forced, &files)
    }

    /// Unlock every currently locked file. Returns how many were unlocked.
    pub fn unlock_all(&self, root: &str, forced: bool) -> usize {
        self.unlock_matching(root, forced, |_| true)
    }

    /// Unlock every file locked by `owner`. Returns how many were unlocked.
    pub fn unlock_all_by_owner(&self, root: &str, forced: bool, owner: &str) -> usize {
        self.unlock_matching(root, forced, |record| record.owner == owner)
    }

    fn unlock_matching<F>(&self, root: &str, forced: bool, keep: F) -> usize
    where
        F: Fn(&LockRecord) -> bool,
    {
        let paths: Vec<String> = self
            .locked_files(root)
            .into_iter()
            .filter(|record| keep(record))
            .map(|record| record.file_path)
            .collect();

        self.run_batch(Operation::Unlock, root, forced, &paths)
            .succeeded
    }

    /// Current locks, with malformed listing lines dropped.
    pub fn locked_files(&self, root: &str) -> Vec<LockRecord> {
        let command = render(&self.commands.list_locks, &[(ROOT_PATH, root)]);
        let lines = self.runner.run_capture_lines(&command);

        let records = parse_lock_listing(&lines);
        let total = records.len();
        let valid: Vec<LockRecord> = records.into_iter().filter(|r| !r.is_empty()).collect();
        if valid.len() < total {
            debug!(skipped = total - valid.len(), "ignored malformed lock lines");
        }
        valid
    }

    /// Point query: true iff the query output starts with the file's path.
    ///
    /// A command that cannot run reports "not locked".
    pub fn is_locked(&self, root: &str, path: &str) -> bool {
        let file_path = relative_to_root(root, path);
        if file_path.is_empty() {
            return false;
        }

        let command = render(
            &self.commands.query_lock,
            &[(ROOT_PATH, root), (FILE_PATH, file_path)],
        );
        let output = self.runner.run_capture(&command);
        output.trim().starts_with(file_path)
    }

    /// Dispatch `operation` for every path through a bounded pool and tally
    /// the outcome.
    pub fn run_batch(
        &self,
        operation: Operation,
        root: &str,
        forced: bool,
        paths: &[String],
    ) -> BatchResult {
        for path in paths {
            self.progress
                .line(&format!("{} List: {}", operation.verb(), path));
        }

        let pool = TaskPool::with_policy(self.pool_capacity, self.dispatch);
        let succeeded = Arc::new(AtomicUsize::new(0));
        let template: Arc<str> = Arc::from(operation.template(&self.commands, forced));
        let root: Arc<str> = Arc::from(root);

        for path in paths {
            let template = Arc::clone(&template);
            let root = Arc::clone(&root);
            let runner = Arc::clone(&self.runner);
            let progress = Arc::clone(&self.progress);
            let succeeded = Arc::clone(&succeeded);

            let started = pool.submit(path.as_str(), move |full_path| {
                let file_path = relative_to_root(&root, full_path);
                let command = render(&template, &[(ROOT_PATH, &*root), (FILE_PATH, file_path)]);
                let output = runner.run_capture(&command);

                let ok = operation.succeeded(&output);
                if ok {
                    succeeded.fetch_add(1, Ordering::SeqCst);
                }
                progress.outcome(operation, full_path, ok, &output);
                ok
            });

            if !started {
                self.progress.outcome(operation, path, false, "");
            }
        }

        pool.await_all();

        let result = BatchResult {
            total: paths.len(),
            succeeded: succeeded.load(Ordering::SeqCst),
        };
        self.progress.line(&format!(
            "{} Result: {} / {}",
            operation.verb(),
            result.total,
            result.succeeded
        ));
        debug!(
            operation = operation.verb(),
            total = result.total,
            succeeded = result.succeeded,
            failed = result.failed(),
            waves = pool.barrier_waits(),
            "batch finished"
        );

        result
    }
}
