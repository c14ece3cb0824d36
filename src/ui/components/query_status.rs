use dioxus::prelude::*;

use crate::ui::theme;

/// Loading count and per-key failures of a query set.
#[component]
pub fn QueryStatus(what: &'static str, loading: usize, errors: Vec<(String, String)>) -> Element {
    rsx! {
        if loading > 0 {
            p { class: theme::TEXT_MUTED, "Loading {what} ({loading} pending)..." }
        }
        for (source, message) in errors {
            div { class: theme::NOTICE_ERROR, "{what} for {source} unavailable: {message}" }
        }
    }
}
