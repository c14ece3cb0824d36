use std::time::Duration;

use dioxus::prelude::*;

use crate::domain::{Notification, NotificationKind};
use crate::util::generate_id;

const TOAST_AUTO_DISMISS: Duration = Duration::from_secs(6);
const MAX_TOASTS: usize = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub text: String,
}

impl From<Notification> for ToastMessage {
    fn from(notification: Notification) -> Self {
        Self {
            id: generate_id("toast"),
            kind: notification.kind,
            title: notification.title,
            text: notification.message,
        }
    }
}

pub fn push_toast(mut toasts: Signal<Vec<ToastMessage>>, notification: Notification) {
    toasts.with_mut(|entries| push_capped(entries, notification.into()));
}

/// Oldest entries are dropped first.
fn push_capped(entries: &mut Vec<ToastMessage>, message: ToastMessage) {
    if entries.len() >= MAX_TOASTS {
        entries.remove(0);
    }
    entries.push(message);
}

#[component]
pub fn Toast() -> Element {
    let toasts = use_context::<Signal<Vec<ToastMessage>>>();
    let messages = toasts();

    if messages.is_empty() {
        return rsx! { Fragment {} };
    }

    rsx! {
        div { class: "toast-stack",
            ul {
                for message in messages {
                    ToastCard { key: "{message.id}", message, toasts }
                }
            }
        }
    }
}

#[component]
fn ToastCard(message: ToastMessage, toasts: Signal<Vec<ToastMessage>>) -> Element {
    let toast_id = message.id.clone();
    let _auto_dismiss = use_future(move || {
        let id = toast_id.clone();
        async move {
            tokio::time::sleep(TOAST_AUTO_DISMISS).await;
            toasts.with_mut(|items| items.retain(|toast| toast.id != id));
        }
    });

    let (class, icon) = match message.kind {
        NotificationKind::Success => ("toast toast-success", "✅"),
        NotificationKind::Warning => ("toast toast-warning", "⚠️"),
        NotificationKind::Error => ("toast toast-error", "⛔"),
    };

    rsx! {
        li { class: class,
            span { "{icon}" }
            div {
                p { class: "toast-title", "{message.title}" }
                p { class: "toast-text", "{message.text}" }
            }
            button {
                class: "toast-dismiss",
                onclick: move |_| {
                    let target = message.id.clone();
                    toasts.with_mut(|items| items.retain(|toast| toast.id != target));
                },
                "Dismiss"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_list_keeps_the_newest_five() {
        let mut entries = Vec::new();
        for n in 0..7 {
            push_capped(
                &mut entries,
                Notification::success("Purchase", format!("order {n}")).into(),
            );
        }

        let texts: Vec<_> = entries.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["order 2", "order 3", "order 4", "order 5", "order 6"]);
    }

    #[test]
    fn notification_title_and_message_are_kept() {
        let toast: ToastMessage = Notification::error("Sale failed", "Not enough cargo.").into();

        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.title, "Sale failed");
        assert_eq!(toast.text, "Not enough cargo.");
        assert!(toast.id.starts_with("toast-"));
    }
}
