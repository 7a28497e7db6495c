//! Bounded thread-per-item task pool.
//!
//! Every submitted work item runs on its own OS thread. The pool caps how many
//! of those threads exist at once, using one of two policies:
//!
//! - [`DispatchPolicy::WaveBarrier`] (default): once `capacity` items are
//!   outstanding, the next `submit` joins *all* of them before accepting the
//!   new item. Work therefore proceeds in waves of up to `capacity` items with
//!   a full barrier between waves.
//! - [`DispatchPolicy::SlidingWindow`]: `submit` waits only until a single
//!   slot frees up, keeping up to `capacity` items running continuously.
//!
//! The pool never looks at the boolean a work item returns. Callers capture
//! results themselves (usually through a shared counter) before returning.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use tracing::{debug, warn};

/// How a full pool makes room for the next submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Drain every outstanding item when the pool is full.
    #[default]
    WaveBarrier,
    /// Wait for one item to finish when the pool is full.
    SlidingWindow,
}

/// Counting semaphore used by the sliding-window policy.
#[derive(Debug, Default)]
struct Slots {
    in_flight: Mutex<usize>,
    freed: Condvar,
}

impl Slots {
    fn acquire(self: &Arc<Self>, capacity: usize) -> SlotGuard {
        let mut in_flight = lock(&self.in_flight);
        while *in_flight >= capacity {
            in_flight = self
                .freed
                .wait(in_flight)
                .unwrap_or_else(|poison| poison.into_inner());
        }
        *in_flight += 1;
        SlotGuard {
            slots: Arc::clone(self),
        }
    }
}

/// Releases its slot when dropped, including when the work item panics.
struct SlotGuard {
    slots: Arc<Slots>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let mut in_flight = lock(&self.slots.in_flight);
        *in_flight = in_flight.saturating_sub(1);
        self.slots.freed.notify_one();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// Thread-per-item pool with a fixed capacity.
#[derive(Debug)]
pub struct TaskPool {
    capacity: usize,
    policy: DispatchPolicy,
    outstanding: Mutex<Vec<JoinHandle<()>>>,
    slots: Arc<Slots>,
    barrier_waits: AtomicUsize,
}

impl TaskPool {
    /// Create a pool. A capacity of zero is treated as one.
    pub fn with_policy(capacity: usize, policy: DispatchPolicy) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            policy,
            outstanding: Mutex::new(Vec::with_capacity(capacity)),
            slots: Arc::new(Slots::default()),
            barrier_waits: AtomicUsize::new(0),
        }
    }

    /// Number of barriers that actually joined at least one item.
    pub fn barrier_waits(&self) -> usize {
        self.barrier_waits.load(Ordering::SeqCst)
    }

    /// Run `work(arg)` on a new thread, blocking first if the pool is full.
    ///
    /// Returns false if the worker thread could not be started. The work is
    /// then dropped without running, and reporting it is up to the caller.
    pub fn submit<F>(&self, arg: impl Into<String>, work: F) -> bool
    where
        F: FnOnce(&str) -> bool + Send + 'static,
    {
        let arg = arg.into();

        match self.policy {
            DispatchPolicy::WaveBarrier => {
                let mut outstanding = lock(&self.outstanding);
                if outstanding.len() >= self.capacity {
                    self.drain(&mut outstanding);
                }
                match spawn_item(arg, work, None) {
                    Some(handle) => {
                        outstanding.push(handle);
                        true
                    }
                    None => false,
                }
            }
            DispatchPolicy::SlidingWindow => {
                let slot = self.slots.acquire(self.capacity);
                let handle = spawn_item(arg, work, Some(slot));

                let mut outstanding = lock(&self.outstanding);
                outstanding.retain(|h| !h.is_finished());
                match handle {
                    Some(handle) => {
                        outstanding.push(handle);
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Join every outstanding item, leaving the pool idle.
    pub fn await_all(&self) {
        let mut outstanding = lock(&self.outstanding);
        self.drain(&mut outstanding);
    }

    fn drain(&self, outstanding: &mut Vec<JoinHandle<()>>) {
        if outstanding.is_empty() {
            return;
        }

        debug!(items = outstanding.len(), "waiting for outstanding work");
        for handle in outstanding.drain(..) {
            if handle.join().is_err() {
                warn!("work item panicked");
            }
        }
        self.barrier_waits.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for TaskPool {
    fn drop(&mut self) {
        self.await_all();
    }
}

fn spawn_item<F>(arg: String, work: F, slot: Option<SlotGuard>) -> Option<JoinHandle<()>>
where
    F: FnOnce(&str) -> bool + Send + 'static,
{
    let label = arg.clone();
    let spawned = std::thread::Builder::new()
        .name("lfslock-worker".to_string())
        .spawn(move || {
            let _slot = slot;
            let _ = work(&arg);
        });

    match spawned {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!(item = label.as_str(), error = %e, "failed to spawn worker thread");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicBool;
    use std::time::Duration;

    fn waves(capacity: usize) -> TaskPool {
        TaskPool::with_policy(capacity, DispatchPolicy::WaveBarrier)
    }

    fn outstanding(pool: &TaskPool) -> usize {
        lock(&pool.outstanding).len()
    }

    #[test]
    fn runs_every_item_and_counts_barriers() {
        for (items, capacity) in [(10, 3), (6, 3), (1, 128), (128, 128), (129, 128), (5, 1)] {
            let pool = waves(capacity);
            let done = Arc::new(AtomicUsize::new(0));

            for i in 0..items {
                let done = Arc::clone(&done);
                pool.submit(i.to_string(), move |_| {
                    done.fetch_add(1, Ordering::SeqCst);
                    true
                });
            }
            pool.await_all();

            assert_eq!(done.load(Ordering::SeqCst), items);
            assert_eq!(outstanding(&pool), 0);
            assert_eq!(
                pool.barrier_waits(),
                items.div_ceil(capacity),
                "items={items} capacity={capacity}"
            );
        }
    }

    #[test]
    fn await_all_on_idle_pool_is_a_no_op() {
        let pool = waves(4);
        pool.await_all();
        assert_eq!(pool.barrier_waits(), 0);
        assert_eq!(outstanding(&pool), 0);
    }

    #[test]
    fn zero_capacity_runs_one_item_per_wave() {
        let pool = waves(0);
        let done = Arc::new(AtomicUsize::new(0));
        for i in 0..3 {
            let done = Arc::clone(&done);
            pool.submit(i.to_string(), move |_| {
                done.fetch_add(1, Ordering::SeqCst);
                true
            });
        }
        pool.await_all();

        assert_eq!(done.load(Ordering::SeqCst), 3);
        assert_eq!(pool.barrier_waits(), 3);
    }

    #[test]
    fn submit_reports_started_workers() {
        for policy in [DispatchPolicy::WaveBarrier, DispatchPolicy::SlidingWindow] {
            let pool = TaskPool::with_policy(2, policy);
            assert!(pool.submit("a.png", |_| true));
            assert!(pool.submit("b.png", |_| false));
            pool.await_all();
        }
    }

    #[test]
    fn passes_argument_to_work() {
        let pool = waves(2);
        let seen = Arc::new(Mutex::new(Vec::new()));
        for name in ["a.png", "b.psd"] {
            let seen = Arc::clone(&seen);
            pool.submit(name, move |arg| {
                lock(&seen).push(arg.to_string());
                true
            });
        }
        pool.await_all();

        let mut seen = lock(&seen).clone();
        seen.sort();
        assert_eq!(seen, vec!["a.png", "b.psd"]);
    }

    #[test]
    fn failing_work_still_completes() {
        let pool = waves(2);
        let ran = Arc::new(AtomicUsize::new(0));
        for i in 0..3 {
            let ran = Arc::clone(&ran);
            pool.submit(i.to_string(), move |_| {
                ran.fetch_add(1, Ordering::SeqCst);
                false
            });
        }
        pool.await_all();
        assert_eq!(ran.load(Ordering::SeqCst), 3);
        assert_eq!(outstanding(&pool), 0);
    }

    #[test]
    fn panicking_work_does_not_break_the_pool() {
        let pool = waves(2);
        pool.submit("boom", |_| panic!("work item failure"));
        pool.await_all();

        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        pool.submit("after", move |_| {
            flag.store(true, Ordering::SeqCst);
            true
        });
        pool.await_all();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn wave_barrier_never_exceeds_capacity() {
        let capacity = 3;
        let pool = waves(capacity);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        for i in 0..10 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            pool.submit(i.to_string(), move |_| {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(10));
                running.fetch_sub(1, Ordering::SeqCst);
                true
            });
        }
        pool.await_all();

        assert!(peak.load(Ordering::SeqCst) <= capacity);
    }

    #[test]
    fn next_wave_starts_after_previous_wave_finishes() {
        let capacity = 2;
        let pool = waves(capacity);
        let finished = Arc::new(AtomicUsize::new(0));
        let starts = Arc::new(Mutex::new(Vec::new()));

        for i in 0..6usize {
            let finished = Arc::clone(&finished);
            let starts = Arc::clone(&starts);
            pool.submit(i.to_string(), move |arg| {
                let index: usize = arg.parse().unwrap_or_default();
                lock(&starts).push((index, finished.load(Ordering::SeqCst)));
                std::thread::sleep(Duration::from_millis(5));
                finished.fetch_add(1, Ordering::SeqCst);
                true
            });
        }
        pool.await_all();

        for (index, finished_before_start) in lock(&starts).iter() {
            let wave = index / capacity;
            assert!(
                *finished_before_start >= wave * capacity,
                "item {index} started before wave {wave} was released"
            );
        }
    }

    #[test]
    fn sliding_window_refills_without_waiting_for_the_whole_wave() {
        let pool = TaskPool::with_policy(2, DispatchPolicy::SlidingWindow);
        let slow_done = Arc::new(AtomicBool::new(false));
        let overlapped = Arc::new(AtomicBool::new(false));

        {
            let slow_done = Arc::clone(&slow_done);
            pool.submit("slow", move |_| {
                std::thread::sleep(Duration::from_millis(300));
                slow_done.store(true, Ordering::SeqCst);
                true
            });
        }
        pool.submit("quick", |_| true);
        {
            let slow_done = Arc::clone(&slow_done);
            let overlapped = Arc::clone(&overlapped);
            pool.submit("third", move |_| {
                overlapped.store(!slow_done.load(Ordering::SeqCst), Ordering::SeqCst);
                true
            });
        }
        pool.await_all();

        assert!(overlapped.load(Ordering::SeqCst));
        assert_eq!(outstanding(&pool), 0);
    }

    #[test]
    fn sliding_window_never_exceeds_capacity() {
        let capacity = 3;
        let pool = TaskPool::with_policy(capacity, DispatchPolicy::SlidingWindow);
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));
        let done = Arc::new(AtomicUsize::new(0));

        for i in 0..12 {
            let running = Arc::clone(&running);
            let peak = Arc::clone(&peak);
            let done = Arc::clone(&done);
            pool.submit(i.to_string(), move |_| {
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(5));
                running.fetch_sub(1, Ordering::SeqCst);
                done.fetch_add(1, Ordering::SeqCst);
                true
            });
        }
        pool.await_all();

        assert!(peak.load(Ordering::SeqCst) <= capacity);
        assert_eq!(done.load(Ordering::SeqCst), 12);
    }
}
