use dioxus::prelude::*;
use tracing::{error, info};

use crate::{
    domain::QueryCache,
    infra::{RetryPolicy, SpaceTradersClient},
    ui::{
        components::toast::{Toast, ToastMessage},
        pages::{MarketplacePage, StructuresPage},
        shell::Shell,
        theme,
    },
    util::{assets, persistence::load_settings},
};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    #[redirect("/marketplace", || Route::Marketplace {})]
    Marketplace {},
    #[route("/structures")]
    Structures {},
}

#[component]
pub fn App() -> Element {
    let settings = use_hook(load_settings);
    let client = use_hook(|| {
        SpaceTradersClient::new(&settings).map_err(|err| {
            error!("failed to initialise API client: {err}");
            err.to_string()
        })
    });

    let client = match client {
        Ok(client) => client,
        Err(message) => {
            return rsx! {
                document::Style { "{assets::main_css()}" }
                div { class: "app-main",
                    div { class: theme::NOTICE_ERROR, "Invalid API settings: {message}" }
                }
            };
        }
    };

    info!(base_url = %settings.base_url, "trader console ready");
    rsx! {
        ConnectedApp { client, policy: RetryPolicy::from_settings(&settings) }
    }
}

#[component]
fn ConnectedApp(client: SpaceTradersClient, policy: RetryPolicy) -> Element {
    use_context_provider(|| client.clone());
    use_context_provider(|| policy);

    let cache = use_signal(QueryCache::default);
    use_context_provider(|| cache);

    let toasts = use_signal(Vec::<ToastMessage>::new);
    use_context_provider(|| toasts);

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
        Toast {}
    }
}

#[component]
pub fn Marketplace() -> Element {
    rsx! { Shell { MarketplacePage {} } }
}

#[component]
pub fn Structures() -> Element {
    rsx! { Shell { StructuresPage {} } }
}
