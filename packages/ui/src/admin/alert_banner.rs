//! Dismissible alert banner.

use dioxus::prelude::*;
use garden_core::{Alert, AlertKind};

/// Banner for a single action outcome.
#[component]
pub fn AlertBanner(alert: Alert, on_dismiss: EventHandler<()>) -> Element {
    let kind_class = match alert.kind {
        AlertKind::Success => "alert-success",
        AlertKind::Danger => "alert-danger",
    };
    let time = alert.created_at.format("%H:%M:%S").to_string();

    rsx! {
        div { class: "alert {kind_class}", role: "alert",
            span { class: "alert-time", "{time}" }
            span { class: "alert-message", "{alert.msg}" }
            button {
                class: "alert-close",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}
