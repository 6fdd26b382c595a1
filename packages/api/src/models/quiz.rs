//! Quizzes and their scheduling window.
//!
//! A quiz is open when it is active and `now` falls inside the optional
//! `[startTime, endTime]` window. [`Quiz::status`] evaluates that at a given
//! instant so callers (and tests) control the clock.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::question::Question;

/// Format of `<input type="datetime-local">` values.
pub const DATETIME_LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub topic_id: Option<i64>,
    #[serde(default)]
    pub topic_title: Option<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub passing_score: u32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub show_results_immediately: bool,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub total_points: u32,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuizStatus {
    Inactive,
    Upcoming,
    Active,
    Expired,
}

impl QuizStatus {
    pub const ALL: [QuizStatus; 4] = [
        QuizStatus::Inactive,
        QuizStatus::Upcoming,
        QuizStatus::Active,
        QuizStatus::Expired,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuizStatus::Inactive => "Inactive",
            QuizStatus::Upcoming => "Upcoming",
            QuizStatus::Active => "Active",
            QuizStatus::Expired => "Expired",
        }
    }

    /// Lowercase key used by filter selects.
    pub fn key(self) -> &'static str {
        match self {
            QuizStatus::Inactive => "inactive",
            QuizStatus::Upcoming => "upcoming",
            QuizStatus::Active => "active",
            QuizStatus::Expired => "expired",
        }
    }

    pub fn from_key(key: &str) -> Option<QuizStatus> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

impl Quiz {
    pub fn status(&self, now: NaiveDateTime) -> QuizStatus {
        quiz_status(self.active, self.start_time, self.end_time, now)
    }

    pub fn can_start(&self, now: NaiveDateTime) -> bool {
        self.status(now) == QuizStatus::Active
    }

    /// Number of questions, preferring the embedded list when present.
    pub fn total_questions(&self) -> usize {
        if self.questions.is_empty() {
            self.question_count as usize
        } else {
            self.questions.len()
        }
    }
}

fn quiz_status(
    active: bool,
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
    now: NaiveDateTime,
) -> QuizStatus {
    if !active {
        return QuizStatus::Inactive;
    }
    if start.is_some_and(|s| s > now) {
        return QuizStatus::Upcoming;
    }
    if end.is_some_and(|e| now > e) {
        return QuizStatus::Expired;
    }
    QuizStatus::Active
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub topic_title: Option<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub passing_score: u32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub question_count: u32,
    #[serde(default)]
    pub is_available: bool,
}

impl QuizSummary {
    pub fn status(&self, now: NaiveDateTime) -> QuizStatus {
        quiz_status(self.active, self.start_time, self.end_time, now)
    }
}

/// Body of quiz create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
    pub title: String,
    pub description: String,
    pub topic_id: i64,
    pub duration_minutes: u32,
    pub passing_score: u32,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDateTime>,
    pub shuffle_questions: bool,
    pub show_results_immediately: bool,
}

impl Default for QuizDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            topic_id: 0,
            duration_minutes: 30,
            passing_score: 70,
            active: true,
            start_time: None,
            end_time: None,
            shuffle_questions: false,
            show_results_immediately: true,
        }
    }
}

impl QuizDraft {
    pub fn from_quiz(quiz: &Quiz) -> Self {
        Self {
            title: quiz.title.clone(),
            description: quiz.description.clone(),
            topic_id: quiz.topic_id.unwrap_or_default(),
            duration_minutes: quiz.duration_minutes,
            passing_score: quiz.passing_score,
            active: quiz.active,
            start_time: quiz.start_time,
            end_time: quiz.end_time,
            shuffle_questions: quiz.shuffle_questions,
            show_results_immediately: quiz.show_results_immediately,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Quiz title is required".to_string());
        }
        if self.duration_minutes == 0 {
            return Err("Duration must be a positive number".to_string());
        }
        if self.passing_score > 100 {
            return Err("Passing score must be between 0 and 100".to_string());
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                return Err("Start time must be before end time".to_string());
            }
        }
        Ok(())
    }
}

/// Parse a `datetime-local` input value. Empty input means "not set".
pub fn parse_datetime_local(value: &str) -> Result<Option<NaiveDateTime>, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDateTime::parse_from_str(value, DATETIME_LOCAL_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map(Some)
        .map_err(|_| format!("Invalid date and time: {value}"))
}

pub fn format_datetime_local(value: Option<NaiveDateTime>) -> String {
    value
        .map(|v| v.format(DATETIME_LOCAL_FORMAT).to_string())
        .unwrap_or_default()
}

/// Search and status filter of the quiz list.
pub fn filter_quizzes(
    quizzes: &[Quiz],
    query: &str,
    status: Option<QuizStatus>,
    now: NaiveDateTime,
) -> Vec<Quiz> {
    let query = query.trim().to_lowercase();
    quizzes
        .iter()
        .filter(|q| {
            query.is_empty()
                || q.title.to_lowercase().contains(&query)
                || q.description.to_lowercase().contains(&query)
                || q
                    .topic_title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&query))
        })
        .filter(|q| status.is_none_or(|s| q.status(now) == s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn quiz(id: i64, title: &str) -> Quiz {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": "",
            "topicTitle": "Systems",
            "durationMinutes": 15,
            "passingScore": 60,
            "active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_status_window() {
        let mut q = quiz(1, "Ownership");
        assert_eq!(q.status(now()), QuizStatus::Active);
        assert!(q.can_start(now()));

        q.start_time = Some(now() + Duration::hours(1));
        assert_eq!(q.status(now()), QuizStatus::Upcoming);

        q.start_time = Some(now() - Duration::hours(2));
        q.end_time = Some(now() - Duration::hours(1));
        assert_eq!(q.status(now()), QuizStatus::Expired);
        assert!(!q.can_start(now()));

        q.active = false;
        assert_eq!(q.status(now()), QuizStatus::Inactive);
    }

    #[test]
    fn test_end_time_is_inclusive() {
        let mut q = quiz(1, "Edge");
        q.end_time = Some(now());
        assert_eq!(q.status(now()), QuizStatus::Active);
    }

    #[test]
    fn test_decode_with_questions() {
        let json = r#"{
            "id": 4, "title": "Lifetimes", "description": "d", "topicId": 2,
            "topicTitle": "Rust", "durationMinutes": 20, "passingScore": 70,
            "active": true, "startTime": "2024-05-01T09:00:00", "endTime": null,
            "shuffleQuestions": false, "showResultsImmediately": true,
            "questionCount": 1, "totalPoints": 5,
            "questions": [{"id": 10, "questionText": "What is 'a?", "quizId": 4,
                "points": 5, "displayOrder": 0, "active": true,
                "answers": [{"id": 100, "answerText": "A lifetime", "correct": true,
                    "questionId": 10, "displayOrder": 0}]}]
        }"#;
        let q: Quiz = serde_json::from_str(json).unwrap();
        assert_eq!(q.total_questions(), 1);
        assert_eq!(q.questions[0].answers[0].id, 100);
        assert!(q.end_time.is_none());
    }

    #[test]
    fn test_filter_by_query_and_status() {
        let mut a = quiz(1, "Borrow checker");
        let b = quiz(2, "Async");
        a.start_time = Some(now() + Duration::days(1));
        let all = vec![a, b];
        assert_eq!(filter_quizzes(&all, "systems", None, now()).len(), 2);
        assert_eq!(filter_quizzes(&all, "borrow", None, now())[0].id, 1);
        let upcoming = filter_quizzes(&all, "", Some(QuizStatus::Upcoming), now());
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, 1);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = QuizDraft {
            title: "Quiz".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());
        draft.duration_minutes = 0;
        assert_eq!(draft.validate().unwrap_err(), "Duration must be a positive number");
        draft.duration_minutes = 10;
        draft.start_time = Some(now());
        draft.end_time = Some(now());
        assert_eq!(draft.validate().unwrap_err(), "Start time must be before end time");
        draft.end_time = None;
        draft.passing_score = 101;
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_datetime_local_inputs() {
        assert_eq!(parse_datetime_local("").unwrap(), None);
        let parsed = parse_datetime_local("2024-05-01T12:00").unwrap();
        assert_eq!(parsed, Some(now()));
        assert_eq!(format_datetime_local(parsed), "2024-05-01T12:00");
        assert!(parse_datetime_local("tomorrow").is_err());
    }

    #[test]
    fn test_status_keys() {
        for status in QuizStatus::ALL {
            assert_eq!(QuizStatus::from_key(status.key()), Some(status));
        }
    }
}
