use dioxus::prelude::*;

use crate::domain::{QueryState, User};
use crate::ui::theme;
use crate::util::format_credits;

#[component]
pub fn KpiCard(title: String, value: String, description: Option<String>) -> Element {
    rsx! {
        div {
            class: theme::PANEL,
            h3 { class: theme::LABEL, "{title}" }
            p { class: "kpi-value", "{value}" }
            if let Some(desc) = description {
                p { class: theme::TEXT_MUTED, "{desc}" }
            }
        }
    }
}

/// Credits and fleet counts from the account query.
#[component]
pub fn UserPanel(user: QueryState<User>) -> Element {
    match user {
        QueryState::Ready(user) => {
            let joined = user
                .joined_at
                .map(|at| format!("Joined {}", at.date()));
            rsx! {
                div { class: "kpi-row",
                    KpiCard {
                        title: "Credits".to_string(),
                        value: format_credits(user.credits),
                        description: Some(user.username.clone()),
                    }
                    KpiCard {
                        title: "Ships".to_string(),
                        value: user.ship_count.to_string(),
                        description: joined,
                    }
                    KpiCard {
                        title: "Structures".to_string(),
                        value: user.structure_count.to_string(),
                        description: None,
                    }
                }
            }
        }
        QueryState::Loading => rsx! {
            p { class: theme::TEXT_MUTED, "Loading account..." }
        },
        QueryState::Failed(message) => rsx! {
            div { class: theme::NOTICE_ERROR, "Account unavailable: {message}" }
        },
    }
}
