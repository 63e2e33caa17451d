//! Application event broadcasting.

use std::future::Future;

use garden_core::AppEvent;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

/// Broadcasts [`AppEvent`]s to every subscribed controller.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Send an event. Returns how many subscribers will see it.
    pub fn emit(&self, event: AppEvent) -> usize {
        tracing::debug!("Emitting event: {}", event.description());
        self.tx.send(event).unwrap_or(0)
    }

    /// Raw receiver for callers that drive their own loop.
    pub fn subscribe(&self) -> broadcast::Receiver<AppEvent> {
        self.tx.subscribe()
    }

    /// Run `handler` for every event emitted after this call.
    ///
    /// Delivery stops when the returned [`Subscription`] is disposed or dropped.
    pub fn on<F, Fut>(&self, handler: F) -> Subscription
    where
        F: Fn(AppEvent) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => handler(event).await,
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!("Event subscriber lagged, {} events dropped", missed);
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Subscription { task: Some(task) }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration of an event handler. Released on `dispose` or drop.
#[derive(Debug)]
pub struct Subscription {
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop delivering events. Returns false if already disposed.
    pub fn dispose(&mut self) -> bool {
        match self.task.take() {
            Some(task) => {
                task.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}
