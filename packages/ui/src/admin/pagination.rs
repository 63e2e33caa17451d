//! Page controls for the queue table.

use dioxus::prelude::*;

/// Props for Pagination component.
#[derive(Props, Clone, PartialEq)]
pub struct PaginationProps {
    /// Current page, 1-based.
    pub page: usize,
    pub page_count: usize,
    /// Total rows across all pages.
    pub total: usize,
    /// Called with the requested page.
    pub on_page: EventHandler<usize>,
}

#[component]
pub fn Pagination(props: PaginationProps) -> Element {
    let page = props.page;
    let has_prev = page > 1;
    let has_next = page < props.page_count;

    rsx! {
        div { class: "pagination",
            span { class: "pagination-info",
                "Page {page} of {props.page_count} ({props.total} queues)"
            }
            div { class: "pagination-buttons",
                button {
                    class: "btn btn-small",
                    disabled: !has_prev,
                    onclick: move |_| props.on_page.call(page.saturating_sub(1)),
                    "← Previous"
                }
                button {
                    class: "btn btn-small",
                    disabled: !has_next,
                    onclick: move |_| props.on_page.call(page + 1),
                    "Next →"
                }
            }
        }
    }
}
