use dioxus::prelude::*;

use crate::ui::theme;

/// Dialog frame with a title bar; `on_close` is ignored while `busy`.
#[component]
pub fn ModalFrame(title: String, busy: bool, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal",
                div { class: "modal-header",
                    h3 { "{title}" }
                    button {
                        class: theme::btn_small(false),
                        disabled: busy,
                        onclick: move |_| {
                            if !busy {
                                on_close.call(());
                            }
                        },
                        "Close"
                    }
                }
                {children}
            }
        }
    }
}
