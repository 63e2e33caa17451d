// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use api::{ApiConfig, BeerGardenClient};
use dashboard::{AppState, DashboardConfig};
use dioxus::prelude::*;
use garden_core::SystemId;
use ui::AppServices;
use ui::admin::pages::{LandingPage, QueuesPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AdminLayout)]
        #[route("/")]
        Landing {},
        #[route("/queues")]
        Queues {},
        #[route("/systems/:name/:version")]
        SystemVersion { name: String, version: String },
        #[route("/systems/:id")]
        SystemById { id: String },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let api_config = ApiConfig::from_env();
    let client = match BeerGardenClient::new(&api_config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Invalid Beer-Garden configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Using Beer-Garden at {}", client.base_url());

    let services = AppServices::new(client, DashboardConfig::from_env());
    dioxus::LaunchBuilder::new()
        .with_context(services)
        .launch(App);
}

#[component]
fn App() -> Element {
    let services = use_context::<AppServices>();

    // Pages wait on the registry before their first fetch
    use_future(move || {
        let services = services.clone();
        async move {
            services.refresh_systems().await.ok();
        }
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// Layout for every route with sidebar navigation.
#[component]
fn AdminLayout() -> Element {
    rsx! {
        div { class: "admin-layout",
            aside { class: "admin-sidebar",
                div { class: "sidebar-header",
                    h1 { class: "sidebar-logo", "Beer Garden" }
                }
                nav { class: "sidebar-nav",
                    div { class: "nav-section",
                        span { class: "nav-section-title", "Menu" }
                        Link {
                            to: Route::Landing {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "◉" }
                            span { "Systems" }
                        }
                        Link {
                            to: Route::Queues {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "▦" }
                            span { "Queues" }
                        }
                    }
                }
            }

            main { class: "admin-main",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Landing() -> Element {
    rsx! {
        LandingPage {}
    }
}

#[component]
fn Queues() -> Element {
    rsx! {
        QueuesPage {}
    }
}

/// Summary of one system version from the registry.
#[component]
fn SystemVersion(name: String, version: String) -> Element {
    let services = use_context::<AppServices>();
    let system = services.app_state.systems().into_iter().find(|s| {
        s.name == name && (s.version == version || services.app_state.resolve_version(s) == version)
    });

    rsx! {
        div { class: "page-container",
            div { class: "page-header",
                div { class: "page-header-content",
                    h1 { class: "page-title", "{name}" }
                    p { class: "page-description", "Version {version}" }
                }
            }
            match system {
                Some(system) => rsx! {
                    div { class: "card",
                        if let Some(desc) = system.description.clone() {
                            p { "{desc}" }
                        }
                        ul { class: "instance-list",
                            for instance in system.instances.iter() {
                                li { key: "{instance.name}",
                                    span { class: "instance-name", "{instance.name}" }
                                    span { class: "instance-status", "{instance.status}" }
                                }
                            }
                        }
                    }
                },
                None => rsx! {
                    div { class: "empty-state",
                        p { "System not found" }
                    }
                },
            }
            Link { to: Route::Landing {}, class: "nav-link nav-link-muted", "← All systems" }
        }
    }
}

/// Redirect a registry id to its name/version route.
#[component]
fn SystemById(id: String) -> Element {
    let services = use_context::<AppServices>();
    let nav = use_navigator();
    let system_id = SystemId::from(id.clone());
    let known = services.app_state.find_system_by_id(&system_id);

    use_effect(move || {
        if let Some(system) = known.clone() {
            let version = services.app_state.resolve_version(&system);
            nav.replace(Route::SystemVersion {
                name: system.name,
                version,
            });
        }
    });

    rsx! {
        div { class: "page-container",
            div { class: "empty-state",
                p { "Unknown system {id}" }
            }
        }
    }
}
