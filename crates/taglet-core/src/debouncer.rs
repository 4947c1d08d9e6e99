// ABOUTME: Debouncing for suggestion fetches on top of a pluggable timer scheduler
// ABOUTME: Starting a new window cancels the pending timer but never a fired task

use futures::future::BoxFuture;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::error::AutocompleteError;

/// Handle to a scheduled task. Cancelling only affects a timer that has not fired yet.
pub trait ScheduledTask: Send {
    fn cancel(&self);

    /// The delay elapsed and the task was handed off
    fn has_fired(&self) -> bool;
}

/// Runs a future after a delay
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> Box<dyn ScheduledTask>;
}

/// Scheduler backed by tokio timers on an existing runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Use the runtime the caller is running on
    pub fn current() -> Result<Self, AutocompleteError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| AutocompleteError::NoRuntime)
    }
}

struct TokioTimer(JoinHandle<()>);

impl ScheduledTask for TokioTimer {
    fn cancel(&self) {
        self.0.abort();
    }

    fn has_fired(&self) -> bool {
        self.0.is_finished()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: BoxFuture<'static, ()>) -> Box<dyn ScheduledTask> {
        let handle = self.handle.clone();
        let timer = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            // Detach so aborting the timer cannot cancel the work itself
            handle.spawn(task);
        });
        Box::new(TokioTimer(timer))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceConfig {
    /// How long to wait after the last input before firing
    pub delay: Duration,
    /// Fire anyway once a burst has lasted this long
    pub max_delay: Option<Duration>,
    /// Fire the first input of a burst right away
    pub immediate: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(500),
            max_delay: None,
            immediate: false,
        }
    }
}

/// Owns at most one pending timer
pub struct Debouncer {
    config: DebounceConfig,
    scheduler: Box<dyn Scheduler>,
    pending: Option<Box<dyn ScheduledTask>>,
    burst_start: Option<Instant>,
    last_input: Option<Instant>,
}

impl Debouncer {
    pub fn new(config: DebounceConfig, scheduler: Box<dyn Scheduler>) -> Self {
        Self {
            config,
            scheduler,
            pending: None,
            burst_start: None,
            last_input: None,
        }
    }

    /// Replace any pending task with `task`, to run once input goes quiet
    pub fn debounce(&mut self, task: BoxFuture<'static, ()>) {
        let now = Instant::now();

        // A gap of at least one delay means the previous timer already fired
        let new_burst = self
            .last_input
            .is_none_or(|last| now.duration_since(last) >= self.config.delay);
        if new_burst {
            self.burst_start = Some(now);
        }
        self.last_input = Some(now);

        self.cancel();

        if self.config.immediate && new_burst {
            self.pending = Some(self.scheduler.schedule(Duration::ZERO, task));
            return;
        }

        if let (Some(max_delay), Some(start)) = (self.config.max_delay, self.burst_start)
            && now.duration_since(start) >= max_delay
        {
            self.reset();
            self.pending = Some(self.scheduler.schedule(Duration::ZERO, task));
            return;
        }

        self.pending = Some(self.scheduler.schedule(self.config.delay, task));
    }

    /// Cancel the pending timer, if it has not fired yet
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    /// Cancel and forget the current burst
    pub fn reset(&mut self) {
        self.cancel();
        self.burst_start = None;
        self.last_input = None;
    }

    /// A timer is scheduled and has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.has_fired())
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
