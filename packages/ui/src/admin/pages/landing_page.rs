//! Landing page - registered systems.

use std::sync::Arc;

use dioxus::prelude::*;
use dashboard::{LandingPage as LandingController, Navigator};
use futures_util::StreamExt;
use garden_core::{LoadState, SystemSummary};

use crate::AppServices;
use crate::admin::SystemCard;

/// Forwards controller navigation to the router task.
struct RouteNavigator<F>(F);

impl<F> Navigator for RouteNavigator<F>
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, path: &str) {
        (self.0)(path)
    }
}

#[component]
pub fn LandingPage() -> Element {
    let services = use_context::<AppServices>();
    let router = use_navigator();

    // The controller may navigate from any thread; the router lives here.
    let routes = use_coroutine(move |mut rx: UnboundedReceiver<String>| async move {
        while let Some(path) = rx.next().await {
            router.push(path);
        }
    });

    let controller = use_hook(|| {
        let tx = routes.tx();
        let navigator = RouteNavigator(move |path: &str| {
            if tx.unbounded_send(path.to_string()).is_err() {
                tracing::warn!("Router gone, dropping navigation to {}", path);
            }
        });
        LandingController::init(services.landing_deps(Arc::new(navigator)))
    });
    let mut view = use_signal(|| controller.view());

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

    use_drop({
        let controller = controller.clone();
        move || {
            controller.destroy();
        }
    });

    let on_explore = {
        let controller = controller.clone();
        move |system: SystemSummary| {
            controller.explore_system(&system);
        }
    };

    let reload = {
        let controller = controller.clone();
        move |_| {
            let controller = controller.clone();
            spawn(async move {
                controller.load_systems().await;
            });
        }
    };

    let snapshot = view();

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "Systems" }
                    p { class: "page-description", "Every registered system version" }
                }
                button {
                    class: "btn",
                    disabled: snapshot.load_state == LoadState::Loading,
                    onclick: reload,
                    "Refresh"
                }
            }

            if let Some(err) = snapshot.error.clone() {
                div { class: "error-banner",
                    span { "Could not load systems: {err}" }
                }
            }

            match snapshot.load_state {
                LoadState::Idle | LoadState::Loading => rsx! {
                    div { class: "loading-state", "Loading systems…" }
                },
                _ if snapshot.systems.is_empty() => rsx! {
                    div { class: "empty-state",
                        div { class: "empty-state-icon", "▦" }
                        p { "No systems registered" }
                    }
                },
                _ => rsx! {
                    div { class: "systems-grid",
                        for system in snapshot.systems.iter() {
                            SystemCard {
                                key: "{system.id}",
                                system: system.clone(),
                                on_explore: on_explore.clone(),
                            }
                        }
                    }
                },
            }
        }
    }
}
