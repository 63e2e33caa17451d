//! Clickable table header cell.

use dioxus::prelude::*;
use dashboard::{Sort, SortDirection};

/// Header cell that requests sorting by its column.
///
/// Unsortable columns render as plain text.
#[component]
pub fn SortHeader(
    key_name: &'static str,
    title: &'static str,
    sortable: bool,
    sort: Sort,
    on_sort: EventHandler<&'static str>,
) -> Element {
    if !sortable {
        return rsx! {
            th { class: "text-right", "{title}" }
        };
    }

    let active = sort.key == key_name;
    let indicator = match (active, sort.direction) {
        (false, _) => "",
        (true, SortDirection::Ascending) => " ▲",
        (true, SortDirection::Descending) => " ▼",
    };
    let aria_sort = if active { sort.direction.as_str() } else { "none" };

    rsx! {
        th {
            class: "sortable",
            "aria-sort": aria_sort,
            onclick: move |_| on_sort.call(key_name),
            "{title}{indicator}"
        }
    }
}
