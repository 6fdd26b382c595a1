use api::models::{AttemptStatus, QuizStatus, Role};
use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BadgeVariant {
    #[default]
    Neutral,
    Success,
    Warning,
    Danger,
    Info,
    Outline,
}

impl BadgeVariant {
    fn class(self) -> &'static str {
        match self {
            BadgeVariant::Neutral => "badge",
            BadgeVariant::Success => "badge badge--success",
            BadgeVariant::Warning => "badge badge--warning",
            BadgeVariant::Danger => "badge badge--danger",
            BadgeVariant::Info => "badge badge--info",
            BadgeVariant::Outline => "badge badge--outline",
        }
    }

    pub fn for_quiz_status(status: QuizStatus) -> Self {
        match status {
            QuizStatus::Active => BadgeVariant::Success,
            QuizStatus::Upcoming => BadgeVariant::Info,
            QuizStatus::Expired => BadgeVariant::Neutral,
            QuizStatus::Inactive => BadgeVariant::Outline,
        }
    }

    pub fn for_attempt_status(status: AttemptStatus) -> Self {
        match status {
            AttemptStatus::Completed => BadgeVariant::Success,
            AttemptStatus::InProgress => BadgeVariant::Info,
            AttemptStatus::Expired => BadgeVariant::Warning,
            AttemptStatus::Abandoned => BadgeVariant::Outline,
        }
    }

    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => BadgeVariant::Danger,
            Role::Moderator => BadgeVariant::Info,
            Role::User => BadgeVariant::Neutral,
            Role::Guest => BadgeVariant::Outline,
        }
    }

    pub fn for_result(passed: bool) -> Self {
        if passed {
            BadgeVariant::Success
        } else {
            BadgeVariant::Danger
        }
    }
}

#[component]
pub fn Badge(#[props(default)] variant: BadgeVariant, children: Element) -> Element {
    rsx! {
        span { class: variant.class(), {children} }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_variants() {
        assert_eq!(BadgeVariant::for_quiz_status(QuizStatus::Active), BadgeVariant::Success);
        assert_eq!(BadgeVariant::for_quiz_status(QuizStatus::Inactive), BadgeVariant::Outline);
        assert_eq!(BadgeVariant::for_result(false), BadgeVariant::Danger);
        assert_eq!(BadgeVariant::for_role(Role::Admin).class(), "badge badge--danger");
    }
}
