use api::models::{Role, User, UserCreate, UserUpdate};
use dioxus::prelude::*;
use ui::components::{
    Badge, BadgeVariant, Button, ButtonVariant, ConfirmDialog, EmptyState, Input, Label,
    LoadingScreen, ModalOverlay, Select,
};
use ui::icons::{FaKey, FaMagnifyingGlass, FaPen, FaPlus, FaTrash, FaUserCheck, FaUserXmark};
use ui::time::format_date_time;
use ui::{use_auth, use_client, use_error_reporter, use_toast, Icon};

use crate::views::filters::StatusFilter;

const MIN_PASSWORD_LEN: usize = 6;

/// Fields of the create and edit dialogs.
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone_number: String,
    pub role: Role,
    pub password: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            username: String::new(),
            phone_number: String::new(),
            role: Role::User,
            password: String::new(),
        }
    }
}

impl UserForm {
    pub fn for_user(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            phone_number: user.phone_number.clone().unwrap_or_default(),
            role: user.role,
            password: String::new(),
        }
    }

    fn has_profile(&self) -> bool {
        [&self.email, &self.first_name, &self.last_name]
            .iter()
            .all(|f| !f.trim().is_empty())
    }

    pub fn to_create(&self) -> Result<UserCreate, String> {
        if !self.has_profile() || self.username.trim().is_empty() || self.password.is_empty() {
            return Err("Please fill in all required fields".to_string());
        }
        Ok(UserCreate {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            role: self.role,
            password: self.password.clone(),
        })
    }

    pub fn to_update(&self) -> Result<UserUpdate, String> {
        if !self.has_profile() {
            return Err("Please fill in all required fields".to_string());
        }
        Ok(UserUpdate {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            role: self.role,
        })
    }
}

pub fn check_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password != confirm {
        return Err("Passwords do not match");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters long");
    }
    Ok(())
}

pub fn filter_by_role(users: &[User], role: Option<Role>) -> Vec<User> {
    users
        .iter()
        .filter(|u| role.is_none_or(|r| u.role == r))
        .cloned()
        .collect()
}

fn role_options() -> Vec<(String, String)> {
    Role::ALL
        .into_iter()
        .map(|r| (r.as_str().to_string(), r.label().to_string()))
        .collect()
}

/// Which dialog is open.
#[derive(Debug, Clone, PartialEq)]
enum UserDialog {
    Create,
    Edit(User),
    ResetPassword(User),
    Delete(User),
}

#[component]
pub fn UserManagement() -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();
    let auth = use_auth();

    let mut query = use_signal(String::new);
    let mut keyword = use_signal(String::new);
    let mut status = use_signal(StatusFilter::default);
    let mut role = use_signal(|| Option::<Role>::None);
    let mut dialog = use_signal(|| Option::<UserDialog>::None);
    let mut busy = use_signal(|| false);

    let load_client = client.clone();
    let mut users = use_resource(move || {
        let client = load_client.clone();
        let status = status();
        let keyword = keyword();
        async move {
            let users = client.users();
            let (loaded, fallback) = if !keyword.trim().is_empty() {
                let active_only = status == StatusFilter::Active;
                (users.search(keyword.trim(), active_only).await, "Failed to search users")
            } else {
                let loaded = match status {
                    StatusFilter::All => users.list().await,
                    StatusFilter::Active => users.active().await,
                    StatusFilter::Inactive => users.inactive().await,
                };
                (loaded, "Failed to load users")
            };
            loaded.unwrap_or_else(|e| {
                reporter.report(&e, fallback);
                Vec::new()
            })
        }
    });

    let toggle_client = client.clone();
    let on_toggle = use_callback(move |user: User| {
        let client = toggle_client.clone();
        spawn(async move {
            let result = if user.active {
                client.users().deactivate(user.id).await
            } else {
                client.users().activate(user.id).await
            };
            match result {
                Ok(()) => {
                    let done = if user.active { "deactivated" } else { "activated" };
                    toast.success(format!("User {done} successfully"));
                    users.restart();
                }
                Err(e) => reporter.report(&e, "Failed to update user status"),
            }
        });
    });

    let on_delete = move |_| {
        let Some(UserDialog::Delete(user)) = dialog() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            busy.set(true);
            match client.users().delete(user.id).await {
                Ok(()) => {
                    tracing::info!("Deleted user {}", user.id);
                    toast.success("User deleted successfully");
                    users.restart();
                }
                Err(e) => reporter.report(&e, "Failed to delete user"),
            }
            busy.set(false);
            dialog.set(None);
        });
    };

    let Some(loaded) = users() else {
        return rsx! { LoadingScreen {} };
    };
    let visible = filter_by_role(&loaded, role());
    let me = auth.read().user_id();

    let mut role_filter_options = vec![("all".to_string(), "All Roles".to_string())];
    role_filter_options.extend(role_options());
    let role_value = role()
        .map(|r| r.as_str().to_string())
        .unwrap_or_else(|| "all".to_string());
    let status_options = vec![
        ("all".to_string(), "All Users".to_string()),
        ("active".to_string(), "Active Only".to_string()),
        ("inactive".to_string(), "Inactive Only".to_string()),
    ];
    let searching = !keyword().is_empty();

    rsx! {
        div {
            class: "page",
            header {
                class: "page-header page-header--actions",
                h1 { "User Management" }
                Button {
                    onclick: move |_| dialog.set(Some(UserDialog::Create)),
                    Icon { icon: FaPlus, width: 14, height: 14 }
                    " Create User"
                }
            }

            form {
                class: "filter-bar",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    keyword.set(query().trim().to_string());
                },
                div {
                    class: "search-box",
                    Icon { icon: FaMagnifyingGlass, width: 14, height: 14 }
                    Input {
                        placeholder: "Search by name, username, or email...",
                        value: query(),
                        oninput: move |e: FormEvent| query.set(e.value()),
                    }
                }
                Button { submit: true, variant: ButtonVariant::Outline, "Search" }
                Select {
                    value: role_value,
                    options: role_filter_options,
                    onchange: move |e: FormEvent| role.set(Role::parse(&e.value())),
                }
                Select {
                    value: "{status().key()}",
                    options: status_options,
                    onchange: move |e: FormEvent| status.set(StatusFilter::from_key(&e.value())),
                }
            }

            if visible.is_empty() {
                EmptyState { title: "No users found" }
                if searching {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            query.set(String::new());
                            keyword.set(String::new());
                        },
                        "Clear search"
                    }
                }
            } else {
                div {
                    class: "card table-card",
                    table {
                        class: "data-table",
                        thead {
                            tr {
                                th { "User" }
                                th { "Email" }
                                th { "Role" }
                                th { "Status" }
                                th { "Last Login" }
                                th { class: "text-right", "Actions" }
                            }
                        }
                        tbody {
                            for user in visible {
                                UserRow {
                                    key: "{user.id}",
                                    is_self: me == Some(user.id),
                                    user,
                                    on_edit: move |u| dialog.set(Some(UserDialog::Edit(u))),
                                    on_reset: move |u| dialog.set(Some(UserDialog::ResetPassword(u))),
                                    on_toggle: move |u| on_toggle.call(u),
                                    on_delete: move |u| dialog.set(Some(UserDialog::Delete(u))),
                                }
                            }
                        }
                    }
                }
            }

            {match dialog() {
                Some(UserDialog::Create) => rsx! {
                    UserFormDialog {
                        editing: None,
                        on_close: move |_| dialog.set(None),
                        on_saved: move |_| {
                            dialog.set(None);
                            users.restart();
                        },
                    }
                },
                Some(UserDialog::Edit(user)) => rsx! {
                    UserFormDialog {
                        editing: Some(user),
                        on_close: move |_| dialog.set(None),
                        on_saved: move |_| {
                            dialog.set(None);
                            users.restart();
                        },
                    }
                },
                Some(UserDialog::ResetPassword(user)) => rsx! {
                    ResetPasswordDialog { user, on_close: move |_| dialog.set(None) }
                },
                Some(UserDialog::Delete(user)) => {
                    let message = format!(
                        "This will permanently delete {} ({}). This action cannot be undone.",
                        user.full_name(),
                        user.username
                    );
                    rsx! {
                        ConfirmDialog {
                            title: "Delete User?",
                            message,
                            confirm_label: "Delete",
                            destructive: true,
                            busy: busy(),
                            on_confirm: on_delete,
                            on_cancel: move |_| dialog.set(None),
                        }
                    }
                }
                None => rsx! {},
            }}
        }
    }
}

#[component]
fn UserRow(
    user: User,
    is_self: bool,
    on_edit: EventHandler<User>,
    on_reset: EventHandler<User>,
    on_toggle: EventHandler<User>,
    on_delete: EventHandler<User>,
) -> Element {
    let active = user.active;
    let last_login = user
        .last_login_at
        .map(format_date_time)
        .unwrap_or_else(|| "Never".to_string());
    let toggle_title = if active { "Deactivate" } else { "Activate" };
    let (edit_target, reset_target, toggle_target, delete_target) =
        (user.clone(), user.clone(), user.clone(), user.clone());

    rsx! {
        tr {
            td {
                p { strong { "{user.username}" } }
                p { class: "muted", "{user.full_name()}" }
            }
            td { "{user.email}" }
            td { Badge { variant: BadgeVariant::for_role(user.role), "{user.role.label()}" } }
            td {
                if active {
                    Badge { variant: BadgeVariant::Success, "Active" }
                } else {
                    Badge { variant: BadgeVariant::Outline, "Inactive" }
                }
            }
            td { "{last_login}" }
            td {
                class: "item-actions item-actions--row text-right",
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Edit User",
                    onclick: move |_| on_edit.call(edit_target.clone()),
                    Icon { icon: FaPen, width: 14, height: 14 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Reset Password",
                    onclick: move |_| on_reset.call(reset_target.clone()),
                    Icon { icon: FaKey, width: 14, height: 14 }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "{toggle_title}",
                    disabled: is_self,
                    onclick: move |_| on_toggle.call(toggle_target.clone()),
                    if active {
                        Icon { icon: FaUserXmark, width: 14, height: 14 }
                    } else {
                        Icon { icon: FaUserCheck, width: 14, height: 14 }
                    }
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    title: "Delete User",
                    disabled: is_self,
                    onclick: move |_| on_delete.call(delete_target.clone()),
                    Icon { icon: FaTrash, width: 14, height: 14 }
                }
            }
        }
    }
}

#[component]
fn UserFormDialog(
    editing: Option<User>,
    on_close: EventHandler<()>,
    on_saved: EventHandler<()>,
) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();

    let editing_id = editing.as_ref().map(|u| u.id);
    let initial = editing.as_ref().map(UserForm::for_user).unwrap_or_default();
    let mut form = use_signal(move || initial);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let current = form();
        let client = client.clone();
        match editing_id {
            Some(id) => {
                let body = match current.to_update() {
                    Ok(body) => body,
                    Err(message) => {
                        toast.error(message);
                        return;
                    }
                };
                spawn(async move {
                    saving.set(true);
                    match client.users().update(id, &body).await {
                        Ok(_) => {
                            toast.success("User updated successfully");
                            on_saved.call(());
                        }
                        Err(e) => reporter.report(&e, "Failed to update user"),
                    }
                    saving.set(false);
                });
            }
            None => {
                let body = match current.to_create() {
                    Ok(body) => body,
                    Err(message) => {
                        toast.error(message);
                        return;
                    }
                };
                spawn(async move {
                    saving.set(true);
                    match client.users().create(&body).await {
                        Ok(user) => {
                            tracing::info!("Created user {}", user.id);
                            toast.success("User created successfully");
                            on_saved.call(());
                        }
                        Err(e) => reporter.report(&e, "Failed to create user"),
                    }
                    saving.set(false);
                });
            }
        }
    };

    let current = form();
    let creating = editing_id.is_none();
    let (title, description, action) = if creating {
        ("Create New User", "Add a new user to the system", "Create User")
    } else {
        ("Edit User", "Update user information", "Save Changes")
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            form {
                class: "form modal-body",
                onsubmit,
                h2 { class: "modal-title", "{title}" }
                p { class: "muted", "{description}" }
                div {
                    class: "form-row",
                    div {
                        class: "field",
                        Label { html_for: "user-first-name", "First Name *" }
                        Input {
                            id: "user-first-name",
                            value: current.first_name.clone(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| form.write().first_name = e.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "user-last-name", "Last Name *" }
                        Input {
                            id: "user-last-name",
                            value: current.last_name.clone(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| form.write().last_name = e.value(),
                        }
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-username", "Username *" }
                    Input {
                        id: "user-username",
                        value: current.username.clone(),
                        disabled: saving() || !creating,
                        oninput: move |e: FormEvent| form.write().username = e.value(),
                    }
                    if !creating {
                        p { class: "muted", "Username cannot be changed" }
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-email", "Email *" }
                    Input {
                        id: "user-email",
                        input_type: "email",
                        value: current.email.clone(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| form.write().email = e.value(),
                    }
                }
                if creating {
                    div {
                        class: "field",
                        Label { html_for: "user-phone", "Phone Number" }
                        Input {
                            id: "user-phone",
                            input_type: "tel",
                            value: current.phone_number.clone(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| form.write().phone_number = e.value(),
                        }
                    }
                    div {
                        class: "field",
                        Label { html_for: "user-password", "Password *" }
                        Input {
                            id: "user-password",
                            input_type: "password",
                            value: current.password.clone(),
                            disabled: saving(),
                            oninput: move |e: FormEvent| form.write().password = e.value(),
                        }
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "user-role", "Role *" }
                    Select {
                        id: "user-role",
                        value: "{current.role.as_str()}",
                        options: role_options(),
                        disabled: saving(),
                        onchange: move |e: FormEvent| {
                            if let Some(role) = Role::parse(&e.value()) {
                                form.write().role = role;
                            }
                        },
                    }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: saving(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        submit: true,
                        disabled: saving(),
                        if saving() { "Saving..." } else { "{action}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ResetPasswordDialog(user: User, on_close: EventHandler<()>) -> Element {
    let client = use_client();
    let reporter = use_error_reporter();
    let toast = use_toast();

    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let id = user.id;

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let new_password = password();
        if let Err(message) = check_new_password(&new_password, &confirm()) {
            toast.error(message);
            return;
        }
        let client = client.clone();
        spawn(async move {
            saving.set(true);
            match client.users().reset_password(id, &new_password).await {
                Ok(()) => {
                    toast.success("Password reset successfully");
                    on_close.call(());
                }
                Err(e) => reporter.report(&e, "Failed to reset password"),
            }
            saving.set(false);
        });
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| on_close.call(()),
            form {
                class: "form modal-body",
                onsubmit,
                h2 { class: "modal-title", "Reset Password" }
                p { class: "muted", "Set a new password for {user.username}" }
                div {
                    class: "field",
                    Label { html_for: "new-password", "New Password *" }
                    Input {
                        id: "new-password",
                        input_type: "password",
                        placeholder: "At least 6 characters",
                        value: password(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| password.set(e.value()),
                    }
                }
                div {
                    class: "field",
                    Label { html_for: "confirm-password", "Confirm Password *" }
                    Input {
                        id: "confirm-password",
                        input_type: "password",
                        value: confirm(),
                        disabled: saving(),
                        oninput: move |e: FormEvent| confirm.set(e.value()),
                    }
                }
                div {
                    class: "modal-actions",
                    Button {
                        variant: ButtonVariant::Outline,
                        disabled: saving(),
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    Button {
                        submit: true,
                        disabled: saving(),
                        if saving() { "Resetting..." } else { "Reset Password" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "email": "root@learnhub.dev", "username": "root", "firstName": "Rae",
             "lastName": "Root", "role": "ADMIN", "active": true},
            {"id": 2, "email": "mod@learnhub.dev", "username": "mod", "firstName": "Mo",
             "lastName": "Derator", "role": "MODERATOR", "active": true, "phoneNumber": "555-0101"},
            {"id": 3, "email": "kim@learnhub.dev", "username": "kim", "firstName": "Kim",
             "lastName": "Learner", "role": "USER", "active": false}
        ]))
        .unwrap()
    }

    #[test]
    fn test_role_filter() {
        let all = users();
        assert_eq!(filter_by_role(&all, None).len(), 3);
        let mods = filter_by_role(&all, Some(Role::Moderator));
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].username, "mod");
        assert!(filter_by_role(&all, Some(Role::Guest)).is_empty());
    }

    #[test]
    fn test_create_requires_credentials() {
        let mut form = UserForm {
            email: "new@learnhub.dev".to_string(),
            first_name: "New".to_string(),
            last_name: "Person".to_string(),
            ..UserForm::default()
        };
        assert_eq!(form.to_create().unwrap_err(), "Please fill in all required fields");

        form.username = " newbie ".to_string();
        form.password = "hunter22".to_string();
        let body = form.to_create().unwrap();
        assert_eq!(body.username, "newbie");
        assert_eq!(body.role, Role::User);
    }

    #[test]
    fn test_edit_form_keeps_profile() {
        let user = &users()[1];
        let form = UserForm::for_user(user);
        assert_eq!(form.phone_number, "555-0101");
        assert!(form.password.is_empty());

        let update = form.to_update().unwrap();
        assert_eq!(update.role, Role::Moderator);
        assert_eq!(update.email, "mod@learnhub.dev");

        let blank = UserForm { email: " ".to_string(), ..form };
        assert!(blank.to_update().is_err());
    }

    #[test]
    fn test_new_password_rules() {
        assert_eq!(check_new_password("secret1", "secret2"), Err("Passwords do not match"));
        assert_eq!(
            check_new_password("abc", "abc"),
            Err("Password must be at least 6 characters long")
        );
        assert!(check_new_password("abcdef", "abcdef").is_ok());
    }
}
