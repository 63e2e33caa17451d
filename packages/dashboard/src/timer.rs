//! Cancelable periodic ticks.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

/// Callback run on every tick.
pub type TickFn = Arc<dyn Fn() + Send + Sync>;

/// Starts periodic timers.
pub trait Scheduler: Send + Sync {
    /// Run `tick` every `period`, first after one full period.
    fn every(&self, period: Duration, tick: TickFn) -> TimerHandle;
}

/// Handle to a running timer. Cancels on drop.
pub struct TimerHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl TimerHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop the timer. Returns false if it was already cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.cancel.take() {
            Some(cancel) => {
                cancel();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Scheduler backed by a tokio task per timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn every(&self, period: Duration, tick: TickFn) -> TimerHandle {
        // tokio rejects a zero period
        let period = period.max(Duration::from_millis(1));
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                tick();
            }
        });
        TimerHandle::new(move || task.abort())
    }
}

/// A poll loop started once and stopped at most once.
///
/// `stop` is safe before `start` and safe to repeat.
#[derive(Debug)]
pub struct PollTimer {
    period: Duration,
    handle: Option<TimerHandle>,
}

impl PollTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            handle: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start ticking. Does nothing if already running.
    pub fn start(&mut self, scheduler: &dyn Scheduler, tick: TickFn) -> bool {
        if self.handle.is_some() {
            return false;
        }
        self.handle = Some(scheduler.every(self.period, tick));
        true
    }

    /// Cancel the timer. Returns true only for the call that actually stopped it.
    pub fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(mut handle) => handle.cancel(),
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_tick() -> (TickFn, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let tick: TickFn = Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (tick, count)
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_ticks_each_period() {
        let (tick, count) = counting_tick();
        let mut timer = PollTimer::new(Duration::from_millis(5000));
        assert!(timer.start(&TokioScheduler, tick));

        tokio::time::sleep(Duration::from_millis(4999)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(10_002)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        assert!(timer.stop());
        tokio::time::sleep(Duration::from_millis(20_000)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_still_ticks() {
        let (tick, count) = counting_tick();
        let mut timer = PollTimer::new(Duration::ZERO);
        assert!(timer.start(&TokioScheduler, tick));

        tokio::time::sleep(Duration::from_millis(3)).await;
        assert!(count.load(Ordering::SeqCst) >= 2);
        assert!(timer.stop());
    }

    #[test]
    fn stop_is_idempotent_and_safe_before_start() {
        let mut timer = PollTimer::new(Duration::from_secs(5));
        assert!(!timer.stop());
        assert!(!timer.stop());
        assert!(!timer.is_running());
    }

    #[tokio::test]
    async fn start_twice_keeps_first_timer() {
        let (tick, _) = counting_tick();
        let mut timer = PollTimer::new(Duration::from_secs(5));
        assert!(timer.start(&TokioScheduler, tick.clone()));
        assert!(!timer.start(&TokioScheduler, tick));
        assert!(timer.stop());
        assert!(!timer.stop());
    }

    #[test]
    fn handle_cancels_once() {
        let cancels = Arc::new(AtomicUsize::new(0));
        let counter = cancels.clone();
        let mut handle = TimerHandle::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(handle.cancel());
        assert!(!handle.cancel());
        drop(handle);
        assert_eq!(cancels.load(Ordering::SeqCst), 1);
    }
}
