//! Keyed delayed execution.
//!
//! `schedule(key, delay, task)` runs `task` once `delay` has elapsed, unless
//! another call for the same key arrives first, in which case the earlier
//! one is dropped. This gives trailing-edge debounce for input handling and
//! "replace the pending clear" semantics for transient messages.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

pub struct Scheduler<K> {
    pending: Mutex<HashMap<K, JoinHandle<()>>>,
}

impl<K> Scheduler<K>
where
    K: Eq + Hash + std::fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `task` after `delay`, cancelling any pending task for `key`.
    ///
    /// Only the wait is cancellable. Once the delay has elapsed the task
    /// runs detached, so a later call never interrupts work in progress.
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(
        &self,
        key: K,
        delay: Duration,
        task: F,
    ) where
        F: Future<Output = ()> + Send + 'static,
    {
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tokio::spawn(task);
        });

        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.retain(|_, handle| !handle.is_finished());
        if let Some(previous) = pending.insert(key, timer) {
            previous.abort();
        }
        debug!(?delay, pending = pending.len(), "scheduled delayed task");
    }

    /// Drops the pending task for `key`. Returns whether one was waiting.
    pub fn cancel(&self, key: &K) -> bool {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        match pending.remove(key) {
            Some(handle) => {
                let waiting = !handle.is_finished();
                handle.abort();
                waiting
            }
            None => false,
        }
    }

    /// Whether a task for `key` is still waiting for its delay.
    pub fn is_pending(&self, key: &K) -> bool {
        let pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.get(key).is_some_and(|handle| !handle.is_finished())
    }
}

impl<K> Default for Scheduler<K>
where
    K: Eq + Hash + std::fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Scheduler<K> {
    fn drop(&mut self) {
        let pending = self.pending.get_mut().unwrap_or_else(PoisonError::into_inner);
        for (_, handle) in pending.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Lets spawned tasks observe the advanced clock.
    async fn settle() {
        for _ in 0..5 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn runs_after_the_delay() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("k", Duration::from_millis(500), counter_task(&runs));
        tokio::time::sleep(Duration::from_millis(499)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
        assert!(scheduler.is_pending(&"k"));

        tokio::time::sleep(Duration::from_millis(2)).await;
        settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!scheduler.is_pending(&"k"));
    }

    #[tokio::test(start_paused = true)]
    async fn rescheduling_the_same_key_keeps_only_the_last() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        for _ in 0..5 {
            scheduler.schedule("k", Duration::from_millis(500), counter_task(&runs));
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        tokio::time::sleep(Duration::from_millis(1000)).await;
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn different_keys_do_not_interfere() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("a", Duration::from_millis(100), counter_task(&runs));
        scheduler.schedule("b", Duration::from_millis(100), counter_task(&runs));
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_prevents_the_run() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));

        scheduler.schedule("k", Duration::from_millis(100), counter_task(&runs));
        assert!(scheduler.cancel(&"k"));
        assert!(!scheduler.cancel(&"k"));
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_scheduler_cancels_pending_tasks() {
        let runs = Arc::new(AtomicUsize::new(0));
        {
            let scheduler = Scheduler::new();
            scheduler.schedule("k", Duration::from_millis(100), counter_task(&runs));
        }
        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn started_task_survives_rescheduling() {
        let scheduler = Scheduler::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let slow = {
            let runs = Arc::clone(&runs);
            async move {
                tokio::time::sleep(Duration::from_millis(300)).await;
                runs.fetch_add(1, Ordering::SeqCst);
            }
        };

        scheduler.schedule("k", Duration::from_millis(100), slow);
        tokio::time::sleep(Duration::from_millis(150)).await;
        settle().await;
        scheduler.schedule("k", Duration::from_millis(10_000), counter_task(&runs));
        tokio::time::sleep(Duration::from_millis(400)).await;
        settle().await;

        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
