//! Card for one registered system on the landing page.

use dioxus::prelude::*;
use garden_core::SystemSummary;

/// Props for SystemCard component.
#[derive(Props, Clone, PartialEq)]
pub struct SystemCardProps {
    pub system: SystemSummary,
    /// Callback when the card's explore button is clicked.
    pub on_explore: EventHandler<SystemSummary>,
}

#[component]
pub fn SystemCard(props: SystemCardProps) -> Element {
    let system = props.system.clone();
    let running = system.running_instances();
    let total = system.instances.len();
    let status_class = if total > 0 && running == total {
        "badge-running"
    } else if running > 0 {
        "badge-partial"
    } else {
        "badge-stopped"
    };
    let system_for_explore = system.clone();

    rsx! {
        div { class: "system-card",
            div { class: "system-card-header",
                h3 { class: "system-name", "{system.label()}" }
                span { class: "system-version", "{system.version}" }
            }

            if let Some(ref desc) = system.description {
                p { class: "system-description", "{desc}" }
            }

            div { class: "system-card-footer",
                span { class: "state-badge {status_class}", "{running}/{total} running" }
                button {
                    class: "btn btn-primary btn-small",
                    onclick: move |_| props.on_explore.call(system_for_explore.clone()),
                    "Explore"
                }
            }
        }
    }
}
