use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewTopic,
    NewQuiz,
    QuizResult,
    Announcement,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub related_id: Option<i64>,
}

/// Where clicking a notification leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationTarget {
    Topic(i64),
    Quiz(i64),
    Dashboard,
}

impl Notification {
    pub fn target(&self) -> NotificationTarget {
        match (self.kind, self.related_id) {
            (NotificationKind::NewTopic, Some(id)) => NotificationTarget::Topic(id),
            (NotificationKind::NewQuiz, Some(id)) => NotificationTarget::Quiz(id),
            _ => NotificationTarget::Dashboard,
        }
    }
}

pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

/// Text of the bell badge: `None` when nothing is unread, `"9+"` past nine.
pub fn unread_badge(count: usize) -> Option<String> {
    match count {
        0 => None,
        1..=9 => Some(count.to_string()),
        _ => Some("9+".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notifications() -> Vec<Notification> {
        serde_json::from_str(
            r#"[
            {"id":1,"userId":7,"title":"New topic","message":"Traits","type":"NEW_TOPIC",
             "read":false,"createdAt":"2024-05-01T10:00:00","relatedId":3},
            {"id":2,"userId":7,"title":"New quiz","message":"","type":"NEW_QUIZ","read":true},
            {"id":3,"userId":7,"title":"Scored","message":"","type":"QUIZ_RESULT",
             "read":false,"relatedId":9}
        ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_targets_by_kind() {
        let list = notifications();
        assert_eq!(list[0].target(), NotificationTarget::Topic(3));
        // A quiz notification without an id has nowhere specific to go.
        assert_eq!(list[1].target(), NotificationTarget::Dashboard);
        assert_eq!(list[2].target(), NotificationTarget::Dashboard);
    }

    #[test]
    fn test_badge_caps_at_nine() {
        assert_eq!(unread_count(&notifications()), 2);
        assert_eq!(unread_badge(0), None);
        assert_eq!(unread_badge(9).as_deref(), Some("9"));
        assert_eq!(unread_badge(12).as_deref(), Some("9+"));
    }
}
