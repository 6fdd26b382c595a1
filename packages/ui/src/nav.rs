//! Application navigation: which pages a role sees and the chrome around them.

use api::models::{Role, User};
use dioxus::prelude::*;

use crate::components::{Badge, BadgeVariant};
use crate::icons::{
    FaBars, FaBookOpen, FaChartBar, FaCircleQuestion, FaClipboardList, FaFileLines, FaGear,
    FaGraduationCap, FaHouse, FaPlus, FaRightFromBracket, FaSquarePollVertical, FaUsers,
};
use crate::notification_bell::NotificationBell;
use crate::Icon;

const EVERYONE: &[Role] = &[Role::Admin, Role::Moderator, Role::User, Role::Guest];
const STAFF: &[Role] = &[Role::Admin, Role::Moderator];
const ADMIN: &[Role] = &[Role::Admin];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Home,
    Topics,
    Quizzes,
    ManageTopics,
    Resources,
    ManageQuizzes,
    Questions,
    Users,
    Analytics,
    Results,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: NavIcon,
    pub roles: &'static [Role],
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { path: "/dashboard", label: "Dashboard", icon: NavIcon::Home, roles: EVERYONE },
    NavItem { path: "/topics", label: "Topics", icon: NavIcon::Topics, roles: EVERYONE },
    NavItem { path: "/quizzes", label: "Quizzes", icon: NavIcon::Quizzes, roles: EVERYONE },
    NavItem { path: "/moderator/topics", label: "Manage Topics", icon: NavIcon::ManageTopics, roles: STAFF },
    NavItem { path: "/moderator/resources", label: "Manage Resources", icon: NavIcon::Resources, roles: STAFF },
    NavItem { path: "/moderator/quizzes", label: "Manage Quizzes", icon: NavIcon::ManageQuizzes, roles: STAFF },
    NavItem { path: "/moderator/questions", label: "Question Bank", icon: NavIcon::Questions, roles: STAFF },
    NavItem { path: "/admin/users", label: "User Management", icon: NavIcon::Users, roles: ADMIN },
    NavItem { path: "/admin/analytics", label: "Quiz Analytics", icon: NavIcon::Analytics, roles: ADMIN },
    NavItem { path: "/admin/quiz-results", label: "Quiz Results", icon: NavIcon::Results, roles: STAFF },
];

/// Entries visible to `role`, in menu order.
pub fn nav_items_for(role: Role) -> Vec<NavItem> {
    NAV_ITEMS
        .iter()
        .filter(|item| role.is_any_of(item.roles))
        .copied()
        .collect()
}

/// Exact path match, like the highlighted entry in the menu.
pub fn is_active(current_path: &str, item: &NavItem) -> bool {
    current_path.trim_end_matches('/') == item.path
}

#[component]
fn NavIconView(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Home => rsx! { Icon { icon: FaHouse, width: 16, height: 16 } },
        NavIcon::Topics => rsx! { Icon { icon: FaBookOpen, width: 16, height: 16 } },
        NavIcon::Quizzes => rsx! { Icon { icon: FaClipboardList, width: 16, height: 16 } },
        NavIcon::ManageTopics => rsx! { Icon { icon: FaGear, width: 16, height: 16 } },
        NavIcon::Resources => rsx! { Icon { icon: FaFileLines, width: 16, height: 16 } },
        NavIcon::ManageQuizzes => rsx! { Icon { icon: FaPlus, width: 16, height: 16 } },
        NavIcon::Questions => rsx! { Icon { icon: FaCircleQuestion, width: 16, height: 16 } },
        NavIcon::Users => rsx! { Icon { icon: FaUsers, width: 16, height: 16 } },
        NavIcon::Analytics => rsx! { Icon { icon: FaChartBar, width: 16, height: 16 } },
        NavIcon::Results => rsx! { Icon { icon: FaSquarePollVertical, width: 16, height: 16 } },
    }
}

/// Sidebar menu for the signed-in user.
#[component]
pub fn NavMenu(role: Role, current_path: String, on_navigate: EventHandler<String>) -> Element {
    let items = nav_items_for(role);

    rsx! {
        nav {
            class: "nav-menu",
            for item in items {
                button {
                    key: "{item.path}",
                    class: if is_active(&current_path, &item) { "nav-link nav-link--active" } else { "nav-link" },
                    onclick: move |_| on_navigate.call(item.path.to_string()),
                    NavIconView { icon: item.icon }
                    span { "{item.label}" }
                }
            }
        }
    }
}

/// Name and role of the signed-in user.
#[component]
pub fn UserBadge(user: User) -> Element {
    rsx! {
        div {
            class: "user-badge",
            span { class: "user-avatar", "{user.initials()}" }
            div {
                class: "user-badge-text",
                span { class: "user-name", "{user.full_name()}" }
                Badge { variant: BadgeVariant::for_role(user.role), "{user.role.label()}" }
            }
        }
    }
}

/// Top bar: brand, menu toggle for narrow screens, notifications, user, logout.
#[component]
pub fn TopBar(
    user: User,
    on_toggle_menu: EventHandler<()>,
    on_navigate: EventHandler<String>,
    on_logout: EventHandler<()>,
) -> Element {
    rsx! {
        header {
            class: "top-bar",
            div {
                class: "top-bar-start",
                button {
                    class: "btn btn--ghost menu-toggle",
                    title: "Menu",
                    onclick: move |_| on_toggle_menu.call(()),
                    Icon { icon: FaBars, width: 18, height: 18 }
                }
                button {
                    class: "brand",
                    onclick: move |_| on_navigate.call("/dashboard".to_string()),
                    span { class: "brand-mark", Icon { icon: FaGraduationCap, width: 18, height: 18 } }
                    span { class: "brand-name", "LearnHub" }
                }
            }
            div {
                class: "top-bar-end",
                NotificationBell { user_id: user.id, on_navigate }
                UserBadge { user: user.clone() }
                button {
                    class: "btn btn--ghost",
                    title: "Logout",
                    onclick: move |_| on_logout.call(()),
                    Icon { icon: FaRightFromBracket, width: 16, height: 16 }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(role: Role) -> Vec<&'static str> {
        nav_items_for(role).iter().map(|i| i.label).collect()
    }

    #[test]
    fn test_learners_see_only_public_pages() {
        assert_eq!(labels(Role::User), vec!["Dashboard", "Topics", "Quizzes"]);
        assert_eq!(labels(Role::Guest), labels(Role::User));
    }

    #[test]
    fn test_moderators_get_management_but_not_admin_pages() {
        let items = labels(Role::Moderator);
        assert!(items.contains(&"Question Bank"));
        assert!(items.contains(&"Quiz Results"));
        assert!(!items.contains(&"User Management"));
        assert!(!items.contains(&"Quiz Analytics"));
    }

    #[test]
    fn test_admins_see_everything() {
        assert_eq!(nav_items_for(Role::Admin).len(), NAV_ITEMS.len());
    }

    #[test]
    fn test_active_match_is_exact() {
        let topics = NAV_ITEMS[1];
        assert!(is_active("/topics", &topics));
        assert!(is_active("/topics/", &topics));
        assert!(!is_active("/topics/4", &topics));
        assert!(!is_active("/moderator/topics", &topics));
    }
}
