//! Queue dashboard controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use api::{ApiError, QueueService};
use futures_util::FutureExt;
use garden_core::{Alert, AlertList, AppEvent, LoadState, QueueRow};
use tokio::sync::watch;

use crate::app_state::{AppState, ReadySignal, compare_versions};
use crate::events::{EventBus, Subscription};
use crate::table::{Column, DataSource, Sort, TableParams};
use crate::timer::{PollTimer, Scheduler, TickFn};
use crate::DashboardConfig;

const TITLE: &str = "Queues";
const DEFAULT_SORT: &str = "size";
const COUNTS_DELAY_HINT: &str = "Please allow 5 seconds for counts to update.";

/// Collaborators the queue dashboard is built from.
#[derive(Clone)]
pub struct QueueDashboardDeps {
    pub queues: Arc<dyn QueueService>,
    pub app_state: Arc<dyn AppState>,
    pub events: EventBus,
    pub scheduler: Arc<dyn Scheduler>,
    pub config: DashboardConfig,
}

/// Link from a queue row to its owning system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemLink {
    pub href: String,
    pub label: String,
}

/// Render-ready form of a [`QueueRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueRowView {
    pub system_link: SystemLink,
    pub version: String,
    pub instance: String,
    pub name: String,
    pub size: u64,
    /// Queue name the row's "Clear Queue" button targets.
    pub clear_target: String,
}

/// Snapshot of everything the queue page renders.
#[derive(Debug, Clone, PartialEq)]
pub struct QueueDashboardView {
    pub title: String,
    pub load_state: LoadState,
    /// Rows on the current page.
    pub rows: Vec<QueueRowView>,
    pub total: usize,
    pub page: usize,
    pub page_count: usize,
    pub sort: Sort,
    pub alerts: AlertList,
    /// Message of the last failed fetch.
    pub error: Option<String>,
}

impl Default for QueueDashboardView {
    fn default() -> Self {
        Self {
            title: TITLE.to_string(),
            load_state: LoadState::Idle,
            rows: Vec::new(),
            total: 0,
            page: 1,
            page_count: 1,
            sort: Sort::ascending(DEFAULT_SORT),
            alerts: AlertList::new(),
            error: None,
        }
    }
}

/// Label for a system link: the display name when non-empty, else the cell data.
pub fn link_label(display: Option<&str>, data: &str) -> String {
    match display {
        Some(display) if !display.is_empty() => display.to_string(),
        _ => data.to_string(),
    }
}

/// Map a row to its rendered form.
///
/// Rows whose system id is unknown to the registry still get a link, built
/// from the row's own system name and version.
pub fn row_view(app_state: &dyn AppState, row: &QueueRow) -> QueueRowView {
    let href = row
        .system_id
        .as_ref()
        .filter(|id| app_state.find_system_by_id(id).is_some())
        .map(|id| app_state.build_system_url(id))
        .unwrap_or_else(|| format!("/systems/{}/{}", row.system, row.version));

    QueueRowView {
        system_link: SystemLink {
            href,
            label: link_label(row.display.as_deref(), &row.system),
        },
        version: row.version.clone(),
        instance: row.instance.clone(),
        name: row.name.clone(),
        size: row.size,
        clear_target: row.name.clone(),
    }
}

type QueueColumn = Column<QueueRow>;

/// The six queue table columns; only `actions` is unsortable.
pub fn queue_columns() -> Vec<QueueColumn> {
    vec![
        QueueColumn::sortable("system", "System", |a, b| a.system.cmp(&b.system)),
        QueueColumn::sortable("version", "Version", |a, b| {
            compare_versions(&a.version, &b.version)
        }),
        QueueColumn::sortable("instance", "Instance", |a, b| a.instance.cmp(&b.instance)),
        QueueColumn::sortable("name", "Queue Name", |a, b| a.name.cmp(&b.name)),
        QueueColumn::sortable("size", "Queued Messages", |a, b| a.size.cmp(&b.size)),
        QueueColumn::fixed("actions", "Actions"),
    ]
}

struct QueueDashboardState {
    title: String,
    response: Option<Result<Vec<QueueRow>, ApiError>>,
    precondition: ReadySignal,
    alerts: AlertList,
    load_state: LoadState,
}

/// State reachable from the table's data source and the event handler.
struct Shared {
    queues: Arc<dyn QueueService>,
    app_state: Arc<dyn AppState>,
    state: Mutex<QueueDashboardState>,
    view_tx: watch::Sender<QueueDashboardView>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, QueueDashboardState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_load_state(&self, load_state: LoadState) {
        self.lock().load_state = load_state;
        self.view_tx.send_modify(|view| view.load_state = load_state);
    }

    fn push_alert(&self, alert: Alert) {
        let alerts = {
            let mut state = self.lock();
            state.alerts.push(alert);
            state.alerts.clone()
        };
        self.view_tx.send_modify(|view| view.alerts = alerts);
    }

    /// Data source body: wait for the registry, then fetch queues.
    async fn fetch(&self) -> Vec<QueueRow> {
        let precondition = self.lock().precondition.clone();
        self.set_load_state(LoadState::Loading);

        if !precondition.wait().await {
            tracing::warn!("System registry went away before loading; showing no queues");
            self.set_load_state(LoadState::Failed);
            return Vec::new();
        }

        match self.queues.list_queues().await {
            Ok(rows) => {
                tracing::debug!("Loaded {} queues", rows.len());
                self.store_response(Ok(rows.clone()));
                self.set_load_state(LoadState::Loaded);
                rows
            }
            Err(e) => {
                tracing::warn!("Failed to load queues: {}", e);
                self.store_response(Err(e));
                self.set_load_state(LoadState::Failed);
                Vec::new()
            }
        }
    }

    fn store_response(&self, response: Result<Vec<QueueRow>, ApiError>) {
        let error = response.as_ref().err().map(ApiError::to_string);
        self.lock().response = Some(response);
        self.view_tx.send_modify(|view| view.error = error);
    }

    /// Forget the last response and pick up the current ready signal.
    fn reset_for_user_change(&self) {
        let precondition = self.app_state.systems_ready();
        {
            let mut state = self.lock();
            state.response = None;
            state.precondition = precondition;
        }
        self.view_tx.send_modify(|view| view.error = None);
    }

    fn publish(&self, table: &TableParams<QueueRow>) {
        let rows = table
            .page_rows()
            .iter()
            .map(|row| row_view(self.app_state.as_ref(), row))
            .collect();
        let (title, load_state, alerts, error) = {
            let state = self.lock();
            let error = match &state.response {
                Some(Err(e)) => Some(e.to_string()),
                _ => None,
            };
            (state.title.clone(), state.load_state, state.alerts.clone(), error)
        };
        self.view_tx.send_replace(QueueDashboardView {
            title,
            load_state,
            rows,
            total: table.total(),
            page: table.page(),
            page_count: table.page_count(),
            sort: table.sort(),
            alerts,
            error,
        });
    }
}

async fn silent_reload(shared: &Shared, table: &TableParams<QueueRow>) {
    table.reload().await;
    shared.publish(table);
}

fn failure_detail(err: &ApiError) -> String {
    err.detail()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string())
}

struct Inner {
    shared: Arc<Shared>,
    table: TableParams<QueueRow>,
    poll: Mutex<PollTimer>,
    subscription: Mutex<Option<Subscription>>,
}

impl Inner {
    fn destroy(&self) -> bool {
        let stopped = self
            .poll
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .stop();
        let disposed = self
            .subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some_and(|mut sub| sub.dispose());
        if stopped || disposed {
            tracing::info!("Queue dashboard torn down");
        }
        stopped || disposed
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Controller for the queue management page.
///
/// Cloning shares the same controller. Teardown happens on `destroy` or
/// when the last clone is dropped.
#[derive(Clone)]
pub struct QueueDashboard {
    inner: Arc<Inner>,
}

impl QueueDashboard {
    /// Build the controller, subscribe to user changes and start polling.
    ///
    /// Nothing is fetched until the table is reloaded.
    pub fn init(deps: QueueDashboardDeps) -> Self {
        let QueueDashboardDeps {
            queues,
            app_state,
            events,
            scheduler,
            config,
        } = deps;

        let precondition = app_state.systems_ready();
        let (view_tx, _) = watch::channel(QueueDashboardView::default());
        let shared = Arc::new(Shared {
            queues,
            app_state,
            state: Mutex::new(QueueDashboardState {
                title: TITLE.to_string(),
                response: None,
                precondition,
                alerts: AlertList::new(),
                load_state: LoadState::Idle,
            }),
            view_tx,
        });

        let source: DataSource<QueueRow> = {
            let shared = shared.clone();
            Arc::new(move || {
                let shared = shared.clone();
                async move { shared.fetch().await }.boxed()
            })
        };
        let table = TableParams::new(
            queue_columns(),
            Sort::ascending(DEFAULT_SORT),
            config.page_size,
            source,
        );

        let subscription = events.on({
            let shared = shared.clone();
            let table = table.clone();
            move |event| {
                let shared = shared.clone();
                let table = table.clone();
                async move {
                    match event {
                        AppEvent::UserChanged => {
                            tracing::info!("User changed, reloading queues");
                            shared.reset_for_user_change();
                            silent_reload(&shared, &table).await;
                        }
                    }
                }
            }
        });

        let tick: TickFn = {
            let shared = shared.clone();
            let table = table.clone();
            Arc::new(move || {
                tracing::debug!("Queue poll tick");
                let shared = shared.clone();
                let table = table.clone();
                tokio::spawn(async move { silent_reload(&shared, &table).await });
            })
        };
        let mut poll = PollTimer::new(config.poll_interval);
        poll.start(scheduler.as_ref(), tick);
        tracing::info!(
            "Queue dashboard initialized, polling every {:?}",
            config.poll_interval
        );

        Self {
            inner: Arc::new(Inner {
                shared,
                table,
                poll: Mutex::new(poll),
                subscription: Mutex::new(Some(subscription)),
            }),
        }
    }

    fn shared(&self) -> &Shared {
        &self.inner.shared
    }

    /// The table the page renders; it pulls rows through this controller.
    pub fn table(&self) -> &TableParams<QueueRow> {
        &self.inner.table
    }

    /// Ask the table to reload without resetting sort or page.
    pub async fn reload(&self) {
        silent_reload(self.shared(), self.table()).await;
    }

    /// Sort by a column key; the active column flips direction.
    pub fn sort_by(&self, key: &str) -> bool {
        let changed = self.table().set_sort(key);
        if changed {
            self.shared().publish(self.table());
        }
        changed
    }

    /// Move the table to `page` (1-based).
    pub fn set_page(&self, page: usize) -> usize {
        let page = self.table().set_page(page);
        self.shared().publish(self.table());
        page
    }

    /// Clear one queue and report the outcome as an alert.
    pub async fn clear_queue(&self, name: &str) -> Alert {
        let alert = match self.shared().queues.clear_queue(name).await {
            Ok(()) => {
                tracing::info!("Cleared queue {}", name);
                Alert::success(format!("Queue '{}' cleared. {}", name, COUNTS_DELAY_HINT))
            }
            Err(e) => {
                tracing::warn!("Failed to clear queue {}: {}", name, e);
                Alert::danger(format!(
                    "Failed to clear queue '{}': {}",
                    name,
                    failure_detail(&e)
                ))
            }
        };
        self.shared().push_alert(alert.clone());
        alert
    }

    /// Clear every queue and report the outcome as an alert.
    pub async fn clear_all_queues(&self) -> Alert {
        let alert = match self.shared().queues.clear_all_queues().await {
            Ok(()) => {
                tracing::info!("Cleared all queues");
                Alert::success(format!("All queues cleared. {}", COUNTS_DELAY_HINT))
            }
            Err(e) => {
                tracing::warn!("Failed to clear all queues: {}", e);
                Alert::danger(format!("Failed to clear all queues: {}", failure_detail(&e)))
            }
        };
        self.shared().push_alert(alert.clone());
        alert
    }

    /// Remove the alert at `index`; out-of-range indices are ignored.
    pub fn dismiss_alert(&self, index: usize) -> Option<Alert> {
        let (removed, alerts) = {
            let mut state = self.shared().lock();
            let removed = state.alerts.dismiss(index);
            (removed, state.alerts.clone())
        };
        if removed.is_some() {
            self.shared().view_tx.send_modify(|view| view.alerts = alerts);
        }
        removed
    }

    pub fn alerts(&self) -> AlertList {
        self.shared().lock().alerts.clone()
    }

    /// Last raw fetch outcome, `None` before the first fetch or after a user change.
    pub fn response(&self) -> Option<Result<Vec<QueueRow>, ApiError>> {
        self.shared().lock().response.clone()
    }

    pub fn title(&self) -> String {
        self.shared().lock().title.clone()
    }

    pub fn load_state(&self) -> LoadState {
        self.shared().lock().load_state
    }

    /// The ready signal the next fetch will wait on.
    pub fn precondition(&self) -> ReadySignal {
        self.shared().lock().precondition.clone()
    }

    pub fn row_view(&self, row: &QueueRow) -> QueueRowView {
        row_view(self.shared().app_state.as_ref(), row)
    }

    /// Current view snapshot.
    pub fn view(&self) -> QueueDashboardView {
        self.shared().view_tx.borrow().clone()
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<QueueDashboardView> {
        self.shared().view_tx.subscribe()
    }

    pub fn is_polling(&self) -> bool {
        self.inner
            .poll
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_running()
    }

    /// Stop polling and drop the user-change subscription.
    ///
    /// Returns true only for the call that tore something down.
    pub fn destroy(&self) -> bool {
        self.inner.destroy()
    }
}
