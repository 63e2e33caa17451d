//! Queues page - live queue table with clear actions.

use dioxus::prelude::*;
use dashboard::QueueDashboard;
use garden_core::LoadState;

use crate::AppServices;
use crate::admin::{AlertBanner, Pagination, SortHeader};

/// Queues page component.
///
/// Owns a [`QueueDashboard`] for as long as the page is mounted.
#[component]
pub fn QueuesPage() -> Element {
    let services = use_context::<AppServices>();
    let controller = use_hook(|| QueueDashboard::init(services.queue_deps()));
    let mut view = use_signal(|| controller.view());

    // Mirror controller snapshots into the signal
    use_future({
        let controller = controller.clone();
        move || {
            let mut rx = controller.subscribe();
            async move {
                while rx.changed().await.is_ok() {
                    let snapshot = rx.borrow_and_update().clone();
                    view.set(snapshot);
                }
            }
        }
    });

    // First pull; later ones come from the poll timer
    use_future({
        let controller = controller.clone();
        move || {
            let controller = controller.clone();
            async move { controller.reload().await }
        }
    });

    use_drop({
        let controller = controller.clone();
        move || {
            controller.destroy();
        }
    });

    let clear_queue = {
        let controller = controller.clone();
        move |name: String| {
            let controller = controller.clone();
            spawn(async move {
                controller.clear_queue(&name).await;
            });
        }
    };

    let clear_all = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            spawn(async move {
                controller.clear_all_queues().await;
            });
        }
    };

    let on_sort = {
        let controller = controller.clone();
        move |key: &'static str| {
            controller.sort_by(key);
        }
    };

    let on_page = {
        let controller = controller.clone();
        move |page: usize| {
            controller.set_page(page);
        }
    };

    let on_dismiss = {
        let controller = controller.clone();
        move |index: usize| {
            controller.dismiss_alert(index);
        }
    };

    let snapshot = view();
    let columns = controller.table().columns().to_vec();

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "{snapshot.title}" }
                    p { class: "page-description", "Message queues for every running system instance" }
                }
                button {
                    class: "btn btn-danger",
                    onclick: clear_all,
                    "Clear All Queues"
                }
            }

            for (index, alert) in snapshot.alerts.iter().enumerate() {
                {
                    let on_dismiss = on_dismiss.clone();
                    rsx! {
                        AlertBanner {
                            key: "{alert.id}",
                            alert: alert.clone(),
                            on_dismiss: move |_| on_dismiss(index),
                        }
                    }
                }
            }

            if let Some(err) = snapshot.error.clone() {
                div { class: "error-banner",
                    span { "Could not load queues: {err}" }
                }
            }

            div { class: "card",
                if snapshot.load_state == LoadState::Loading && snapshot.rows.is_empty() {
                    div { class: "loading-state", "Loading queues…" }
                } else if snapshot.rows.is_empty() {
                    div { class: "empty-state",
                        div { class: "empty-state-icon", "▦" }
                        p { "No queues found" }
                    }
                } else {
                    div { class: "table-container",
                        table { class: "data-table",
                            thead {
                                tr {
                                    for column in columns.iter() {
                                        SortHeader {
                                            key: "{column.key}",
                                            key_name: column.key,
                                            title: column.title,
                                            sortable: column.is_sortable(),
                                            sort: snapshot.sort,
                                            on_sort: on_sort.clone(),
                                        }
                                    }
                                }
                            }
                            tbody {
                                for row in snapshot.rows.iter() {
                                    {
                                        let clear_queue = clear_queue.clone();
                                        let target = row.clear_target.clone();

                                        rsx! {
                                            tr { key: "{row.name}", class: "data-row",
                                                td {
                                                    Link {
                                                        to: row.system_link.href.clone(),
                                                        class: "queue-link",
                                                        "{row.system_link.label}"
                                                    }
                                                }
                                                td { "{row.version}" }
                                                td { "{row.instance}" }
                                                td { class: "mono", "{row.name}" }
                                                td { class: "text-right tabular-nums", "{row.size}" }
                                                td { class: "text-right",
                                                    button {
                                                        class: "btn btn-small btn-danger",
                                                        onclick: move |_| clear_queue(target.clone()),
                                                        "Clear Queue"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Pagination {
                        page: snapshot.page,
                        page_count: snapshot.page_count,
                        total: snapshot.total,
                        on_page: on_page,
                    }
                }
            }
        }
    }
}
