use api::models::{unread_badge, unread_count, Notification, NotificationKind, NotificationTarget};
use dioxus::prelude::*;

use crate::client::use_client;
use crate::components::Spinner;
use crate::icons::{FaAward, FaBell, FaBookOpen, FaClipboardList};
use crate::time::{now, time_ago};
use crate::Icon;

/// Route a notification click leads to.
pub fn notification_path(target: NotificationTarget) -> String {
    match target {
        NotificationTarget::Topic(id) => format!("/topics/{id}"),
        NotificationTarget::Quiz(id) => format!("/quiz/{id}"),
        NotificationTarget::Dashboard => "/dashboard".to_string(),
    }
}

#[component]
fn KindIcon(kind: NotificationKind) -> Element {
    match kind {
        NotificationKind::NewTopic => rsx! { Icon { icon: FaBookOpen, width: 16, height: 16 } },
        NotificationKind::NewQuiz => rsx! { Icon { icon: FaClipboardList, width: 16, height: 16 } },
        NotificationKind::QuizResult => rsx! { Icon { icon: FaAward, width: 16, height: 16 } },
        NotificationKind::Announcement => rsx! { Icon { icon: FaBell, width: 16, height: 16 } },
    }
}

/// Bell with an unread counter and a dropdown list. The list is reloaded
/// every time the dropdown opens.
#[component]
pub fn NotificationBell(user_id: i64, on_navigate: EventHandler<String>) -> Element {
    let client = use_client();
    let mut open = use_signal(|| false);
    let mut notifications = use_signal(Vec::<Notification>::new);
    let mut loading = use_signal(|| false);

    let loader_client = client.clone();
    let _loader = use_resource(move || {
        let client = loader_client.clone();
        let is_open = open();
        async move {
            loading.set(is_open);
            match client.notifications().for_user(user_id).await {
                Ok(list) => notifications.set(list),
                Err(e) => tracing::warn!("Failed to load notifications: {}", e),
            }
            loading.set(false);
        }
    });

    let on_select = move |notification: Notification| {
        open.set(false);
        if !notification.read {
            let client = client.clone();
            let id = notification.id;
            spawn(async move {
                match client.notifications().mark_read(id).await {
                    Ok(()) => {
                        for n in notifications.write().iter_mut().filter(|n| n.id == id) {
                            n.read = true;
                        }
                    }
                    Err(e) => tracing::warn!("Failed to mark notification {} read: {}", id, e),
                }
            });
        }
        on_navigate.call(notification_path(notification.target()));
    };

    let list = notifications();
    let unread = unread_count(&list);
    let reference = now();

    rsx! {
        div {
            class: "notification-bell",
            button {
                class: "btn btn--ghost bell-button",
                title: "Notifications",
                onclick: move |_| open.toggle(),
                Icon { icon: FaBell, width: 18, height: 18 }
                if let Some(badge) = unread_badge(unread) {
                    span { class: "bell-count", "{badge}" }
                }
            }

            if open() {
                div {
                    class: "bell-dropdown",
                    div {
                        class: "bell-header",
                        h3 { "Notifications" }
                        if unread > 0 {
                            span { class: "badge", "{unread} new" }
                        }
                    }
                    if loading() {
                        Spinner {}
                    } else if list.is_empty() {
                        div {
                            class: "bell-empty",
                            p { "No notifications" }
                            p { class: "muted", "You're all caught up!" }
                        }
                    } else {
                        ul {
                            class: "bell-list",
                            for notification in list {
                                li {
                                    key: "{notification.id}",
                                    class: if notification.read { "bell-item" } else { "bell-item bell-item--unread" },
                                    onclick: {
                                        let notification = notification.clone();
                                        let mut on_select = on_select.clone();
                                        move |_| on_select(notification.clone())
                                    },
                                    KindIcon { kind: notification.kind }
                                    div {
                                        class: "bell-item-text",
                                        p { class: "bell-item-title", "{notification.title}" }
                                        if !notification.message.is_empty() {
                                            p { class: "bell-item-message", "{notification.message}" }
                                        }
                                        if let Some(created) = notification.created_at {
                                            p { class: "bell-item-time", "{time_ago(created, reference)}" }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_by_target() {
        assert_eq!(notification_path(NotificationTarget::Topic(3)), "/topics/3");
        assert_eq!(notification_path(NotificationTarget::Quiz(8)), "/quiz/8");
        assert_eq!(notification_path(NotificationTarget::Dashboard), "/dashboard");
    }
}
