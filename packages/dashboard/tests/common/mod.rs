#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use api::{ApiError, QueueService, SystemService};
use async_trait::async_trait;
use dashboard::{Navigator, Scheduler, TickFn, TimerHandle};
use garden_core::{QueueRow, SystemSummary};

#[derive(Default)]
pub struct FakeQueueService {
    rows: Mutex<Vec<QueueRow>>,
    list_error: Mutex<Option<ApiError>>,
    clear_error: Mutex<Option<ApiError>>,
    list_calls: AtomicUsize,
    clear_all_calls: AtomicUsize,
    cleared: Mutex<Vec<String>>,
}

impl FakeQueueService {
    pub fn with_rows(rows: Vec<QueueRow>) -> Arc<Self> {
        let service = Self::default();
        *service.rows.lock().unwrap() = rows;
        Arc::new(service)
    }

    pub fn fail_list(&self, err: ApiError) {
        *self.list_error.lock().unwrap() = Some(err);
    }

    pub fn succeed_list(&self) {
        *self.list_error.lock().unwrap() = None;
    }

    pub fn fail_clear(&self, err: ApiError) {
        *self.clear_error.lock().unwrap() = Some(err);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn clear_all_calls(&self) -> usize {
        self.clear_all_calls.load(Ordering::SeqCst)
    }

    pub fn cleared(&self) -> Vec<String> {
        self.cleared.lock().unwrap().clone()
    }
}

#[async_trait]
impl QueueService for FakeQueueService {
    async fn list_queues(&self) -> Result<Vec<QueueRow>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match self.list_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self.rows.lock().unwrap().clone()),
        }
    }

    async fn clear_queue(&self, name: &str) -> Result<(), ApiError> {
        if let Some(err) = self.clear_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.cleared.lock().unwrap().push(name.to_string());
        Ok(())
    }

    async fn clear_all_queues(&self) -> Result<(), ApiError> {
        if let Some(err) = self.clear_error.lock().unwrap().clone() {
            return Err(err);
        }
        self.clear_all_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSystemService {
    systems: Mutex<Vec<SystemSummary>>,
    error: Mutex<Option<ApiError>>,
    calls: AtomicUsize,
    grouped: Mutex<Vec<bool>>,
}

impl FakeSystemService {
    pub fn with_systems(systems: Vec<SystemSummary>) -> Arc<Self> {
        let service = Self::default();
        *service.systems.lock().unwrap() = systems;
        Arc::new(service)
    }

    pub fn fail(&self, err: ApiError) {
        *self.error.lock().unwrap() = Some(err);
    }

    pub fn succeed(&self) {
        *self.error.lock().unwrap() = None;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn grouped_flags(&self) -> Vec<bool> {
        self.grouped.lock().unwrap().clone()
    }
}

#[async_trait]
impl SystemService for FakeSystemService {
    async fn list_systems(&self, grouped: bool) -> Result<Vec<SystemSummary>, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.grouped.lock().unwrap().push(grouped);
        match self.error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(self.systems.lock().unwrap().clone()),
        }
    }
}

struct ManualTimer {
    period: Duration,
    tick: TickFn,
    cancelled: Arc<AtomicBool>,
}

/// Scheduler whose timers only tick when the test calls `fire`.
#[derive(Default)]
pub struct ManualScheduler {
    timers: Mutex<Vec<ManualTimer>>,
}

impl ManualScheduler {
    /// Tick every live timer once. Returns how many ticked.
    pub fn fire(&self) -> usize {
        let timers = self.timers.lock().unwrap();
        let mut fired = 0;
        for timer in timers.iter().filter(|t| !t.cancelled.load(Ordering::SeqCst)) {
            (timer.tick)();
            fired += 1;
        }
        fired
    }

    pub fn periods(&self) -> Vec<Duration> {
        self.timers.lock().unwrap().iter().map(|t| t.period).collect()
    }

    pub fn cancelled(&self) -> usize {
        self.timers
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.cancelled.load(Ordering::SeqCst))
            .count()
    }
}

impl Scheduler for ManualScheduler {
    fn every(&self, period: Duration, tick: TickFn) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.timers.lock().unwrap().push(ManualTimer {
            period,
            tick,
            cancelled: cancelled.clone(),
        });
        TimerHandle::new(move || cancelled.store(true, Ordering::SeqCst))
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    paths: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Yield to spawned tasks until `cond` holds or roughly a second passes.
pub async fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    for _ in 0..500 {
        if cond() {
            return true;
        }
        tokio::task::yield_now().await;
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    cond()
}

/// Let any already-spawned work run to completion.
pub async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}
