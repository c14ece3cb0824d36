use dioxus::prelude::*;

use crate::app::Route;
use crate::infra::SpaceTradersClient;
use crate::ui::{components::kpi_card::UserPanel, hooks::use_user, theme};
use crate::util::{persistence::TOKEN_ENV, version::{version_label, APP_NAME}};

#[component]
pub fn Shell(children: Element) -> Element {
    let client = use_context::<SpaceTradersClient>();
    let user = use_user();
    let current_route = use_route::<Route>();
    let nav = use_navigator();

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                div {
                    h1 { class: "app-title", "{APP_NAME}" }
                    p { class: theme::TEXT_MUTED, "{version_label()}" }
                }
                nav { class: "nav",
                    NavButton {
                        active: matches!(current_route, Route::Marketplace {}),
                        onclick: move |_| { nav.push(Route::Marketplace {}); },
                        label: "Marketplace",
                    }
                    NavButton {
                        active: matches!(current_route, Route::Structures {}),
                        onclick: move |_| { nav.push(Route::Structures {}); },
                        label: "Structures",
                    }
                }
            }
            main { class: "app-main",
                if !client.has_token() {
                    div { class: theme::NOTICE_WARNING,
                        "No API token configured. Set {TOKEN_ENV} or add a token to the settings file."
                    }
                }
                UserPanel { user: user.state() }
                {children}
            }
        }
    }
}

#[component]
fn NavButton(active: bool, onclick: EventHandler<()>, label: &'static str) -> Element {
    rsx! {
        button {
            class: theme::nav_link(active),
            onclick: move |_| onclick.call(()),
            "{label}"
        }
    }
}
