//! Quiz attempts and the answers recorded in them.
//!
//! Attempts are owned by the backend: it creates them, scores them on submit
//! and expires them when their time runs out. The client only reads them and
//! reports answer choices.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::question::Question;
use super::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttemptStatus {
    InProgress,
    Completed,
    Expired,
    Abandoned,
}

impl AttemptStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AttemptStatus::InProgress => "IN_PROGRESS",
            AttemptStatus::Completed => "COMPLETED",
            AttemptStatus::Expired => "EXPIRED",
            AttemptStatus::Abandoned => "ABANDONED",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AttemptStatus::InProgress => "In progress",
            AttemptStatus::Completed => "Completed",
            AttemptStatus::Expired => "Expired",
            AttemptStatus::Abandoned => "Abandoned",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizAttempt {
    pub id: i64,
    pub quiz_id: i64,
    #[serde(default)]
    pub quiz_title: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub user_full_name: Option<String>,
    pub status: AttemptStatus,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total_points: Option<u32>,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub remaining_seconds: Option<i64>,
    #[serde(default)]
    pub user_answers: Vec<UserAnswer>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl QuizAttempt {
    pub fn is_in_progress(&self) -> bool {
        self.status == AttemptStatus::InProgress
    }

    /// Seconds between start and completion, if both are known.
    pub fn time_taken_secs(&self) -> Option<i64> {
        elapsed_secs(self.started_at, self.completed_at)
    }
}

/// Row of the attempt summary endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptSummary {
    pub id: i64,
    pub quiz_id: i64,
    #[serde(default)]
    pub quiz_title: String,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub user_full_name: String,
    #[serde(default)]
    pub user: Option<User>,
    pub status: AttemptStatus,
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub total_points: Option<u32>,
    #[serde(default)]
    pub passed: Option<bool>,
    #[serde(default)]
    pub correct_answers: Option<u32>,
    #[serde(default)]
    pub total_questions: Option<u32>,
}

impl AttemptSummary {
    pub fn is_completed(&self) -> bool {
        self.status == AttemptStatus::Completed
    }

    pub fn time_taken_secs(&self) -> Option<i64> {
        elapsed_secs(self.started_at, self.completed_at)
    }

    /// Score rounded for display; missing scores show as zero.
    pub fn display_score(&self) -> i64 {
        self.score.map(|s| s.round() as i64).unwrap_or(0)
    }
}

fn elapsed_secs(start: Option<NaiveDateTime>, end: Option<NaiveDateTime>) -> Option<i64> {
    let secs = (end? - start?).num_seconds();
    (secs >= 0).then_some(secs)
}

/// Body of `POST /api/quiz-attempts`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptCreate {
    pub quiz_id: i64,
    pub user_id: i64,
}

/// Body of `PUT /api/quiz-attempts/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttemptStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<NaiveDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passed: Option<bool>,
}

/// One recorded choice within an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: i64,
    #[serde(default)]
    pub quiz_attempt_id: Option<i64>,
    pub question_id: i64,
    #[serde(default)]
    pub question_text: Option<String>,
    #[serde(default)]
    pub selected_answer_id: Option<i64>,
    #[serde(default)]
    pub selected_answer_text: Option<String>,
    #[serde(default)]
    pub correct: bool,
    #[serde(default)]
    pub points_earned: f64,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of `POST /api/user-answers`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswerCreate {
    pub quiz_attempt_id: i64,
    pub question_id: i64,
    pub selected_answer_id: i64,
}

/// Body of `PUT /api/user-answers/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswerUpdate {
    pub selected_answer_id: i64,
}

/// Counts shown on the result page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ResultTally {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
    pub points_earned: f64,
    pub total_points: u32,
}

impl ResultTally {
    pub fn new(questions: &[Question], answers: &[UserAnswer]) -> Self {
        let correct = answers.iter().filter(|a| a.correct).count();
        let incorrect = answers.len() - correct;
        Self {
            correct,
            incorrect,
            unanswered: questions.len().saturating_sub(answers.len()),
            points_earned: answers.iter().map(|a| a.points_earned).sum(),
            total_points: questions.iter().map(|q| q.points).sum(),
        }
    }

    /// Earned points as a rounded percentage of the total.
    pub fn percentage(&self) -> u32 {
        if self.total_points == 0 {
            return 0;
        }
        (self.points_earned / self.total_points as f64 * 100.0).round() as u32
    }
}

/// Score to show for a finished attempt. The server's score wins; the local
/// tally only fills in when the server sent none.
pub fn result_score(attempt: &QuizAttempt, tally: &ResultTally) -> u32 {
    attempt
        .score
        .map(|s| s.round().max(0.0) as u32)
        .unwrap_or_else(|| tally.percentage())
}

pub fn result_passed(attempt: &QuizAttempt, tally: &ResultTally, passing_score: u32) -> bool {
    attempt
        .passed
        .unwrap_or_else(|| result_score(attempt, tally) >= passing_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTEMPT: &str = r#"{
        "id": 55, "quizId": 4, "quizTitle": "Lifetimes", "userId": 7,
        "userFullName": "Ada Lovelace", "status": "COMPLETED",
        "startedAt": "2024-05-01T10:00:00", "completedAt": "2024-05-01T10:07:30",
        "score": 66.67, "totalPoints": 3, "passed": false, "durationMinutes": 20,
        "userAnswers": [
            {"id": 1, "quizAttemptId": 55, "questionId": 10, "selectedAnswerId": 100,
             "correct": true, "pointsEarned": 1},
            {"id": 2, "quizAttemptId": 55, "questionId": 11, "selectedAnswerId": 104,
             "correct": false, "pointsEarned": 0}
        ]
    }"#;

    fn questions() -> Vec<Question> {
        serde_json::from_str(
            r#"[{"id":10,"questionText":"a","points":1},
                {"id":11,"questionText":"b","points":1},
                {"id":12,"questionText":"c","points":1}]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_decode_completed_attempt() {
        let attempt: QuizAttempt = serde_json::from_str(ATTEMPT).unwrap();
        assert_eq!(attempt.status, AttemptStatus::Completed);
        assert_eq!(attempt.time_taken_secs(), Some(450));
        assert_eq!(attempt.user_answers.len(), 2);
        assert!(!attempt.is_in_progress());
    }

    #[test]
    fn test_tally_counts_unanswered() {
        let attempt: QuizAttempt = serde_json::from_str(ATTEMPT).unwrap();
        let tally = ResultTally::new(&questions(), &attempt.user_answers);
        assert_eq!(tally.correct, 1);
        assert_eq!(tally.incorrect, 1);
        assert_eq!(tally.unanswered, 1);
        assert_eq!(tally.percentage(), 33);
    }

    #[test]
    fn test_server_score_wins() {
        let mut attempt: QuizAttempt = serde_json::from_str(ATTEMPT).unwrap();
        let tally = ResultTally::new(&questions(), &attempt.user_answers);
        assert_eq!(result_score(&attempt, &tally), 67);
        assert!(!result_passed(&attempt, &tally, 50));

        attempt.score = None;
        attempt.passed = None;
        assert_eq!(result_score(&attempt, &tally), 33);
        assert!(result_passed(&attempt, &tally, 30));
    }

    #[test]
    fn test_summary_defaults() {
        let s: AttemptSummary =
            serde_json::from_str(r#"{"id":1,"quizId":2,"status":"IN_PROGRESS"}"#).unwrap();
        assert!(!s.is_completed());
        assert_eq!(s.display_score(), 0);
        assert_eq!(s.time_taken_secs(), None);
    }

    #[test]
    fn test_answer_bodies() {
        let create = UserAnswerCreate {
            quiz_attempt_id: 5,
            question_id: 6,
            selected_answer_id: 7,
        };
        assert_eq!(
            serde_json::to_value(create).unwrap(),
            serde_json::json!({"quizAttemptId": 5, "questionId": 6, "selectedAnswerId": 7})
        );
        let update = AttemptUpdate {
            status: Some(AttemptStatus::Abandoned),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(update).unwrap(),
            serde_json::json!({"status": "ABANDONED"})
        );
    }
}
