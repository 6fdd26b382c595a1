//! # Quiz attempt workflow
//!
//! A [`QuizSession`] is the client-side view of one user working through one
//! quiz. It moves through
//!
//! ```text
//! Loading -> PreQuiz -> Taking -> Submitting -> Completed
//!                          ^           |
//!                          +-- failure-+
//! ```
//!
//! The backend owns the attempt. Every change the user makes is sent right
//! away and the local state only runs ahead of the server optimistically:
//!
//! 1. [`QuizSession::select_answer`] applies the choice locally, marks the
//!    question as in flight and returns an [`AnswerSave`] describing the
//!    request to make.
//! 2. The caller sends it with [`persist_answer`].
//! 3. [`QuizSession::resolve_answer`] confirms the record (keeping the
//!    returned user-answer id) or restores the previous one.
//!
//! Transitions are plain methods with no I/O. The async helpers at the bottom
//! do the requests and hand back values, so callers that keep the session in
//! a reactive cell never hold it across an `.await`.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDateTime;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{
    AttemptCreate, AttemptStatus, Question, Quiz, QuizAttempt, QuizStatus, UserAnswer,
    UserAnswerCreate, UserAnswerUpdate,
};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    PreQuiz,
    Taking,
    Submitting,
    Completed,
}

/// A choice stored for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Backend id of the user answer; `None` until the first save succeeds.
    pub user_answer_id: Option<i64>,
    pub answer_id: i64,
}

/// A pending answer request produced by [`QuizSession::select_answer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSave {
    pub question_id: i64,
    pub answer_id: i64,
    /// Record to restore if the save fails.
    pub previous: Option<AnswerRecord>,
}

impl AnswerSave {
    /// Existing user answer to update, if the question was answered before.
    pub fn existing_id(&self) -> Option<i64> {
        self.previous.and_then(|p| p.user_answer_id)
    }
}

/// Why the quiz cannot be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartBlocked {
    NotReady,
    /// A start request is already on its way.
    Starting,
    AlreadyCompleted,
    Unavailable(QuizStatus),
}

impl StartBlocked {
    pub fn message(self) -> &'static str {
        match self {
            StartBlocked::NotReady => "The quiz is not ready to start",
            StartBlocked::Starting => "The quiz is already starting",
            StartBlocked::AlreadyCompleted => "You have already completed this quiz",
            StartBlocked::Unavailable(QuizStatus::Upcoming) => "This quiz has not started yet",
            StartBlocked::Unavailable(QuizStatus::Expired) => "This quiz has ended",
            StartBlocked::Unavailable(_) => "This quiz is not available",
        }
    }
}

/// Result of one timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Not taking the quiz; nothing happened.
    Idle,
    Running,
    /// Time ran out. Reported once per attempt.
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerBand {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    phase: Phase,
    quiz: Option<Quiz>,
    attempt: Option<QuizAttempt>,
    questions: Vec<Question>,
    answers: HashMap<i64, AnswerRecord>,
    in_flight: HashSet<i64>,
    current: usize,
    remaining_secs: i64,
    total_secs: i64,
    expiry_reported: bool,
    completed_attempt_id: Option<i64>,
    resumed: bool,
    starting: bool,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::loading()
    }
}

impl QuizSession {
    pub fn loading() -> Self {
        Self {
            phase: Phase::Loading,
            quiz: None,
            attempt: None,
            questions: Vec::new(),
            answers: HashMap::new(),
            in_flight: HashSet::new(),
            current: 0,
            remaining_secs: 0,
            total_secs: 0,
            expiry_reported: false,
            completed_attempt_id: None,
            resumed: false,
            starting: false,
        }
    }

    /// Show the quiz overview. `completed_attempt_id` marks a quiz the user
    /// has already finished; it cannot be started again.
    pub fn preview(quiz: Quiz, completed_attempt_id: Option<i64>) -> Self {
        Self {
            phase: Phase::PreQuiz,
            quiz: Some(quiz),
            completed_attempt_id,
            ..Self::loading()
        }
    }

    /// Enter `Taking` for `attempt`, with any answers the backend already
    /// recorded for it.
    pub fn taking(
        quiz: Quiz,
        attempt: QuizAttempt,
        recorded: &[UserAnswer],
        now: NaiveDateTime,
        resumed: bool,
    ) -> Self {
        let total_secs = (quiz.duration_minutes as i64 * 60).max(1);
        let remaining_secs = seed_remaining_secs(&attempt, quiz.duration_minutes, now);
        let answers = recorded
            .iter()
            .filter_map(|ua| {
                ua.selected_answer_id.map(|answer_id| {
                    (
                        ua.question_id,
                        AnswerRecord {
                            user_answer_id: Some(ua.id),
                            answer_id,
                        },
                    )
                })
            })
            .collect();
        let mut questions = quiz.questions.clone();
        questions.sort_by_key(|q| q.display_order);
        Self {
            phase: Phase::Taking,
            quiz: Some(quiz),
            attempt: Some(attempt),
            questions,
            answers,
            remaining_secs,
            total_secs,
            resumed,
            ..Self::loading()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quiz(&self) -> Option<&Quiz> {
        self.quiz.as_ref()
    }

    pub fn attempt(&self) -> Option<&QuizAttempt> {
        self.attempt.as_ref()
    }

    pub fn attempt_id(&self) -> Option<i64> {
        self.attempt.as_ref().map(|a| a.id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn completed_attempt_id(&self) -> Option<i64> {
        self.completed_attempt_id
    }

    pub fn has_completed(&self) -> bool {
        self.completed_attempt_id.is_some()
    }

    /// Whether `Taking` was entered by resuming an existing attempt.
    pub fn was_resumed(&self) -> bool {
        self.resumed
    }

    /// Check that the quiz may be started at `now`.
    pub fn check_start(&self, now: NaiveDateTime) -> Result<(), StartBlocked> {
        let Some(quiz) = self.quiz.as_ref().filter(|_| self.phase == Phase::PreQuiz) else {
            return Err(StartBlocked::NotReady);
        };
        if self.starting {
            return Err(StartBlocked::Starting);
        }
        if self.has_completed() {
            return Err(StartBlocked::AlreadyCompleted);
        }
        match quiz.status(now) {
            QuizStatus::Active => Ok(()),
            other => Err(StartBlocked::Unavailable(other)),
        }
    }

    /// Claim the start: checks like [`check_start`](Self::check_start) and
    /// blocks further starts until the attempt arrives or
    /// [`start_failed`](Self::start_failed) is called.
    pub fn begin_start(&mut self, now: NaiveDateTime) -> Result<(), StartBlocked> {
        self.check_start(now)?;
        self.starting = true;
        Ok(())
    }

    pub fn start_failed(&mut self) {
        self.starting = false;
    }

    pub fn is_starting(&self) -> bool {
        self.starting
    }

    // -- answers --

    pub fn record(&self, question_id: i64) -> Option<AnswerRecord> {
        self.answers.get(&question_id).copied()
    }

    pub fn selected_answer(&self, question_id: i64) -> Option<i64> {
        self.record(question_id).map(|r| r.answer_id)
    }

    pub fn is_saving(&self, question_id: i64) -> bool {
        self.in_flight.contains(&question_id)
    }

    /// Apply a choice locally and describe the request that persists it.
    ///
    /// Returns `None` (and changes nothing) unless the quiz is being taken,
    /// when a save for the same question is still in flight, or when the
    /// choice is already the stored one.
    pub fn select_answer(&mut self, question_id: i64, answer_id: i64) -> Option<AnswerSave> {
        if self.phase != Phase::Taking || self.in_flight.contains(&question_id) {
            return None;
        }
        let previous = self.record(question_id);
        if previous.is_some_and(|p| p.answer_id == answer_id) {
            return None;
        }
        self.answers.insert(
            question_id,
            AnswerRecord {
                user_answer_id: previous.and_then(|p| p.user_answer_id),
                answer_id,
            },
        );
        self.in_flight.insert(question_id);
        Some(AnswerSave {
            question_id,
            answer_id,
            previous,
        })
    }

    /// Apply the outcome of a save. Returns the message to show the user, if
    /// any: failures are reported except when the backend says the attempt
    /// was already submitted.
    pub fn resolve_answer(
        &mut self,
        save: AnswerSave,
        outcome: Result<UserAnswer, ApiError>,
    ) -> Option<String> {
        self.in_flight.remove(&save.question_id);
        match outcome {
            Ok(saved) => {
                self.answers.insert(
                    save.question_id,
                    AnswerRecord {
                        user_answer_id: Some(saved.id),
                        answer_id: save.answer_id,
                    },
                );
                None
            }
            Err(e) => {
                match save.previous {
                    Some(previous) => {
                        self.answers.insert(save.question_id, previous);
                    }
                    None => {
                        self.answers.remove(&save.question_id);
                    }
                }
                if e.is_already_submitted() {
                    tracing::debug!("Ignoring answer save on submitted attempt");
                    None
                } else {
                    tracing::warn!("Failed to save answer for question {}: {}", save.question_id, e);
                    Some("Failed to save answer. Please try again.".to_string())
                }
            }
        }
    }

    pub fn answered_count(&self) -> usize {
        self.questions
            .iter()
            .filter(|q| self.answers.contains_key(&q.id))
            .count()
    }

    pub fn unanswered_count(&self) -> usize {
        self.questions.len() - self.answered_count()
    }

    /// Percentage of questions answered.
    pub fn progress_percent(&self) -> u32 {
        if self.questions.is_empty() {
            return 0;
        }
        (self.answered_count() * 100 / self.questions.len()) as u32
    }

    // -- navigation --

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.questions.len()
    }

    pub fn next(&mut self) {
        self.go_to(self.current.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.go_to(self.current.saturating_sub(1));
    }

    pub fn go_to(&mut self, index: usize) {
        self.current = index.min(self.questions.len().saturating_sub(1));
    }

    // -- timer --

    pub fn remaining_secs(&self) -> i64 {
        self.remaining_secs
    }

    /// Advance the countdown by one second.
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::Taking {
            return Tick::Idle;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
        }
        if self.remaining_secs > 0 {
            return Tick::Running;
        }
        if self.expiry_reported {
            Tick::Idle
        } else {
            self.expiry_reported = true;
            Tick::Expired
        }
    }

    /// Time already ran out when the attempt was entered, so it should be
    /// submitted without waiting for a tick.
    pub fn take_immediate_expiry(&mut self) -> bool {
        if self.phase == Phase::Taking && self.remaining_secs <= 0 && !self.expiry_reported {
            self.expiry_reported = true;
            return true;
        }
        false
    }

    /// `m:ss` of the remaining time.
    pub fn clock(&self) -> String {
        format_clock(self.remaining_secs)
    }

    pub fn timer_band(&self) -> TimerBand {
        timer_band(self.remaining_secs, self.total_secs)
    }

    // -- submit --

    /// Whether submitting should ask the user first.
    pub fn needs_submit_confirmation(&self) -> bool {
        self.unanswered_count() > 0
    }

    /// Move to `Submitting` and return the attempt to submit. `None` unless
    /// the quiz is being taken, which also makes a second submit a no-op.
    pub fn begin_submit(&mut self) -> Option<i64> {
        if self.phase != Phase::Taking {
            return None;
        }
        let id = self.attempt_id()?;
        self.phase = Phase::Submitting;
        Some(id)
    }

    pub fn finish_submit(&mut self, result: QuizAttempt) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Completed;
            self.attempt = Some(result);
        }
    }

    pub fn fail_submit(&mut self) {
        if self.phase == Phase::Submitting {
            self.phase = Phase::Taking;
        }
    }
}

/// Seconds left on an attempt: the server's `remainingSeconds`, else the
/// time until `expiresAt`, else the full duration.
pub fn seed_remaining_secs(attempt: &QuizAttempt, duration_minutes: u32, now: NaiveDateTime) -> i64 {
    if let Some(secs) = attempt.remaining_seconds {
        return secs.max(0);
    }
    if let Some(expires) = attempt.expires_at {
        return (expires - now).num_seconds().max(0);
    }
    duration_minutes as i64 * 60
}

pub fn format_clock(secs: i64) -> String {
    let secs = secs.max(0);
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Green above half the time, yellow above a fifth, red below.
pub fn timer_band(remaining_secs: i64, total_secs: i64) -> TimerBand {
    if total_secs <= 0 {
        return TimerBand::Red;
    }
    let ratio = remaining_secs as f64 / total_secs as f64;
    if ratio > 0.5 {
        TimerBand::Green
    } else if ratio > 0.2 {
        TimerBand::Yellow
    } else {
        TimerBand::Red
    }
}

// -- requests --

/// Build the initial session for `quiz_id`.
///
/// Resumes an in-progress attempt when there is one, otherwise previews the
/// quiz and flags it when the user already completed it. Failures while
/// looking for attempts are logged and treated as "no attempt"; failing to
/// load the quiz itself is an error.
pub async fn load_quiz_session<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    quiz_id: i64,
    user_id: i64,
    now: NaiveDateTime,
) -> Result<QuizSession, ApiError> {
    let in_progress = match client.attempts().in_progress(user_id, quiz_id).await {
        Ok(attempt) => attempt.filter(QuizAttempt::is_in_progress),
        Err(ApiError::SessionExpired) => return Err(ApiError::SessionExpired),
        Err(e) => {
            tracing::warn!("Could not check for a running attempt: {}", e);
            None
        }
    };

    if let Some(attempt) = in_progress {
        let quiz = client.quizzes().get_with_questions(quiz_id).await?;
        let recorded = match client.user_answers().by_attempt(attempt.id).await {
            Ok(answers) => answers,
            Err(e) => {
                tracing::warn!("Could not load recorded answers: {}", e);
                attempt.user_answers.clone()
            }
        };
        tracing::info!("Resuming attempt {} on quiz {}", attempt.id, quiz_id);
        return Ok(QuizSession::taking(quiz, attempt, &recorded, now, true));
    }

    let completed = match client.attempts().by_user_and_quiz(user_id, quiz_id).await {
        Ok(attempts) => attempts
            .into_iter()
            .find(|a| a.status == AttemptStatus::Completed)
            .map(|a| a.id),
        Err(ApiError::SessionExpired) => return Err(ApiError::SessionExpired),
        Err(e) => {
            tracing::warn!("Could not check for completed attempts: {}", e);
            None
        }
    };

    let quiz = client.quizzes().get(quiz_id).await?;
    Ok(QuizSession::preview(quiz, completed))
}

/// Create an attempt and fetch the questions. The caller claims the start
/// with [`QuizSession::begin_start`] first.
pub async fn start_attempt<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    quiz_id: i64,
    user_id: i64,
) -> Result<(Quiz, QuizAttempt), ApiError> {
    let attempt = client
        .attempts()
        .create(&AttemptCreate { quiz_id, user_id })
        .await?;
    let quiz = client.quizzes().get_with_questions(quiz_id).await?;
    tracing::info!("Started attempt {} on quiz {}", attempt.id, quiz_id);
    Ok((quiz, attempt))
}

/// Send an [`AnswerSave`]: a new answer is created, a changed one updated.
pub async fn persist_answer<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    attempt_id: i64,
    save: &AnswerSave,
) -> Result<UserAnswer, ApiError> {
    match save.existing_id() {
        Some(id) => {
            client
                .user_answers()
                .update(
                    id,
                    &UserAnswerUpdate {
                        selected_answer_id: save.answer_id,
                    },
                )
                .await
        }
        None => {
            client
                .user_answers()
                .submit(&UserAnswerCreate {
                    quiz_attempt_id: attempt_id,
                    question_id: save.question_id,
                    selected_answer_id: save.answer_id,
                })
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use chrono::{Duration, NaiveDate};
    use serde_json::json;
    use store::MemoryStore;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn quiz_json() -> serde_json::Value {
        json!({
            "id": 4, "title": "Lifetimes", "durationMinutes": 10, "passingScore": 50,
            "active": true,
            "questions": [
                {"id": 11, "questionText": "b", "displayOrder": 1,
                 "answers": [{"id": 110, "answerText": "x"}, {"id": 111, "answerText": "y"}]},
                {"id": 10, "questionText": "a", "displayOrder": 0,
                 "answers": [{"id": 100, "answerText": "x"}, {"id": 101, "answerText": "y"}]},
                {"id": 12, "questionText": "c", "displayOrder": 2,
                 "answers": [{"id": 120, "answerText": "x"}]}
            ]
        })
    }

    fn quiz() -> Quiz {
        serde_json::from_value(quiz_json()).unwrap()
    }

    fn attempt(remaining: Option<i64>) -> QuizAttempt {
        serde_json::from_value(json!({
            "id": 55, "quizId": 4, "status": "IN_PROGRESS", "remainingSeconds": remaining
        }))
        .unwrap()
    }

    fn user_answer(id: i64, question_id: i64, answer_id: i64) -> UserAnswer {
        serde_json::from_value(json!({
            "id": id, "questionId": question_id, "selectedAnswerId": answer_id
        }))
        .unwrap()
    }

    fn taking() -> QuizSession {
        QuizSession::taking(quiz(), attempt(None), &[], now(), false)
    }

    #[test]
    fn test_taking_orders_questions_and_seeds_timer() {
        let session = taking();
        let ids: Vec<i64> = session.questions().iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![10, 11, 12]);
        assert_eq!(session.remaining_secs(), 600);
        assert_eq!(session.clock(), "10:00");
        assert_eq!(session.unanswered_count(), 3);
    }

    #[test]
    fn test_timer_seed_sources() {
        let mut a = attempt(Some(125));
        assert_eq!(seed_remaining_secs(&a, 10, now()), 125);
        a.remaining_seconds = None;
        a.expires_at = Some(now() + Duration::seconds(90));
        assert_eq!(seed_remaining_secs(&a, 10, now()), 90);
        a.expires_at = Some(now() - Duration::seconds(5));
        assert_eq!(seed_remaining_secs(&a, 10, now()), 0);
        a.expires_at = None;
        assert_eq!(seed_remaining_secs(&a, 10, now()), 600);
    }

    #[test]
    fn test_resume_restores_recorded_answers() {
        let recorded = [user_answer(900, 10, 101)];
        let session = QuizSession::taking(quiz(), attempt(Some(30)), &recorded, now(), true);
        assert!(session.was_resumed());
        assert_eq!(
            session.record(10),
            Some(AnswerRecord {
                user_answer_id: Some(900),
                answer_id: 101
            })
        );
        assert_eq!(session.progress_percent(), 33);
    }

    #[test]
    fn test_select_answer_is_optimistic_and_guarded() {
        let mut session = taking();
        let save = session.select_answer(10, 100).unwrap();
        assert_eq!(save.previous, None);
        assert_eq!(save.existing_id(), None);
        assert_eq!(session.selected_answer(10), Some(100));
        assert!(session.is_saving(10));

        // Same question while in flight is ignored.
        assert!(session.select_answer(10, 101).is_none());
        assert_eq!(session.selected_answer(10), Some(100));

        // Other questions are independent.
        assert!(session.select_answer(11, 110).is_some());
    }

    #[test]
    fn test_confirm_then_change_uses_update() {
        let mut session = taking();
        let save = session.select_answer(10, 100).unwrap();
        assert!(session.resolve_answer(save, Ok(user_answer(900, 10, 100))).is_none());
        assert!(!session.is_saving(10));

        let change = session.select_answer(10, 101).unwrap();
        assert_eq!(change.existing_id(), Some(900));
        assert_eq!(session.record(10).unwrap().user_answer_id, Some(900));
    }

    #[test]
    fn test_reselecting_same_answer_is_noop() {
        let mut session = taking();
        let save = session.select_answer(10, 100).unwrap();
        session.resolve_answer(save, Ok(user_answer(900, 10, 100)));
        assert!(session.select_answer(10, 100).is_none());
    }

    #[test]
    fn test_failed_save_rolls_back() {
        let mut session = taking();
        let save = session.select_answer(10, 100).unwrap();
        let message = session.resolve_answer(save, Err(ApiError::Timeout));
        assert_eq!(message.as_deref(), Some("Failed to save answer. Please try again."));
        assert_eq!(session.selected_answer(10), None);

        let save = session.select_answer(10, 100).unwrap();
        session.resolve_answer(save, Ok(user_answer(900, 10, 100)));
        let change = session.select_answer(10, 101).unwrap();
        session.resolve_answer(change, Err(ApiError::Network("down".into())));
        assert_eq!(
            session.record(10),
            Some(AnswerRecord {
                user_answer_id: Some(900),
                answer_id: 100
            })
        );
    }

    #[test]
    fn test_already_submitted_failure_is_silent() {
        let mut session = taking();
        let save = session.select_answer(10, 100).unwrap();
        let err = ApiError::Status {
            status: 400,
            message: "Quiz attempt already submitted".into(),
        };
        assert!(session.resolve_answer(save, Err(err)).is_none());
        assert_eq!(session.selected_answer(10), None);
    }

    #[test]
    fn test_answers_ignored_outside_taking() {
        let mut session = QuizSession::preview(quiz(), None);
        assert!(session.select_answer(10, 100).is_none());
        let mut session = taking();
        session.begin_submit();
        assert!(session.select_answer(10, 100).is_none());
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut session = taking();
        session.previous();
        assert_eq!(session.current_index(), 0);
        assert!(session.is_first());
        session.next();
        session.next();
        session.next();
        assert_eq!(session.current_index(), 2);
        assert!(session.is_last());
        session.go_to(99);
        assert_eq!(session.current_question().map(|q| q.id), Some(12));
    }

    #[test]
    fn test_tick_reports_expiry_once() {
        let mut session = QuizSession::taking(quiz(), attempt(Some(2)), &[], now(), false);
        assert_eq!(session.tick(), Tick::Running);
        assert_eq!(session.clock(), "0:01");
        assert_eq!(session.tick(), Tick::Expired);
        assert_eq!(session.tick(), Tick::Idle);
        assert_eq!(session.remaining_secs(), 0);
    }

    #[test]
    fn test_resumed_with_no_time_left_expires_immediately() {
        let mut session = QuizSession::taking(quiz(), attempt(Some(0)), &[], now(), true);
        assert!(session.take_immediate_expiry());
        assert!(!session.take_immediate_expiry());
        assert_eq!(session.tick(), Tick::Idle);
    }

    #[test]
    fn test_tick_idle_when_not_taking() {
        let mut session = QuizSession::preview(quiz(), None);
        assert_eq!(session.tick(), Tick::Idle);
    }

    #[test]
    fn test_submit_transitions() {
        let mut session = taking();
        assert!(session.needs_submit_confirmation());
        assert_eq!(session.begin_submit(), Some(55));
        assert_eq!(session.phase(), Phase::Submitting);
        assert_eq!(session.begin_submit(), None);

        session.fail_submit();
        assert_eq!(session.phase(), Phase::Taking);

        session.begin_submit();
        let mut done = attempt(None);
        done.status = AttemptStatus::Completed;
        session.finish_submit(done);
        assert_eq!(session.phase(), Phase::Completed);
        assert_eq!(session.attempt().map(|a| a.status), Some(AttemptStatus::Completed));
    }

    #[test]
    fn test_start_checks() {
        let session = QuizSession::preview(quiz(), None);
        assert_eq!(session.check_start(now()), Ok(()));

        let done = QuizSession::preview(quiz(), Some(3));
        assert_eq!(done.check_start(now()), Err(StartBlocked::AlreadyCompleted));

        let mut later = quiz();
        later.start_time = Some(now() + Duration::hours(2));
        let session = QuizSession::preview(later, None);
        assert_eq!(
            session.check_start(now()),
            Err(StartBlocked::Unavailable(QuizStatus::Upcoming))
        );
        assert_eq!(QuizSession::loading().check_start(now()), Err(StartBlocked::NotReady));
        assert_eq!(taking().check_start(now()), Err(StartBlocked::NotReady));
    }

    #[test]
    fn test_second_start_blocked_while_first_in_flight() {
        let mut session = QuizSession::preview(quiz(), None);
        assert_eq!(session.begin_start(now()), Ok(()));
        assert!(session.is_starting());
        assert_eq!(session.begin_start(now()), Err(StartBlocked::Starting));

        session.start_failed();
        assert!(!session.is_starting());
        assert_eq!(session.begin_start(now()), Ok(()));

        let started = taking();
        assert!(!started.is_starting());
    }

    #[test]
    fn test_clock_and_band() {
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(-3), "0:00");
        assert_eq!(timer_band(301, 600), TimerBand::Green);
        assert_eq!(timer_band(300, 600), TimerBand::Yellow);
        assert_eq!(timer_band(120, 600), TimerBand::Red);
    }

    #[tokio::test]
    async fn test_load_resumes_in_progress() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": 55, "quizId": 4, "status": "IN_PROGRESS", "remainingSeconds": 42}));
        transport.push_json(200, quiz_json());
        transport.push_json(200, json!([{"id": 900, "questionId": 11, "selectedAnswerId": 110}]));
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let session = load_quiz_session(&client, 4, 7, now()).await.unwrap();
        assert_eq!(session.phase(), Phase::Taking);
        assert_eq!(session.remaining_secs(), 42);
        assert_eq!(session.selected_answer(11), Some(110));
        assert_eq!(
            transport.calls(),
            vec![
                "GET /api/quiz-attempts/user/7/quiz/4/in-progress",
                "GET /api/quizzes/4/with-questions",
                "GET /api/user-answers/quiz-attempt/55",
            ]
        );
    }

    #[tokio::test]
    async fn test_load_flags_completed_quiz() {
        let transport = ScriptedTransport::new();
        transport.push(404, "");
        transport.push_json(200, json!([
            {"id": 50, "quizId": 4, "status": "EXPIRED"},
            {"id": 51, "quizId": 4, "status": "COMPLETED"}
        ]));
        transport.push_json(200, json!({"id": 4, "title": "Lifetimes", "durationMinutes": 10, "active": true}));
        let client = ApiClient::new(transport, MemoryStore::new());

        let session = load_quiz_session(&client, 4, 7, now()).await.unwrap();
        assert_eq!(session.phase(), Phase::PreQuiz);
        assert_eq!(session.completed_attempt_id(), Some(51));
        assert_eq!(session.check_start(now()), Err(StartBlocked::AlreadyCompleted));
    }

    #[tokio::test]
    async fn test_load_treats_lookup_errors_as_none() {
        let transport = ScriptedTransport::new();
        transport.push(500, "");
        transport.push_error(ApiError::Timeout);
        transport.push_json(200, json!({"id": 4, "title": "Lifetimes", "durationMinutes": 10, "active": true}));
        let client = ApiClient::new(transport, MemoryStore::new());

        let session = load_quiz_session(&client, 4, 7, now()).await.unwrap();
        assert_eq!(session.phase(), Phase::PreQuiz);
        assert!(!session.has_completed());
    }

    #[tokio::test]
    async fn test_load_fails_when_quiz_missing() {
        let transport = ScriptedTransport::new();
        transport.push(200, "null");
        transport.push(200, "[]");
        transport.push(404, r#"{"message":"Quiz not found"}"#);
        let client = ApiClient::new(transport, MemoryStore::new());

        let err = load_quiz_session(&client, 4, 7, now()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_start_then_answer_then_change() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": 55, "quizId": 4, "status": "IN_PROGRESS"}));
        transport.push_json(200, quiz_json());
        transport.push_json(200, json!({"id": 900, "questionId": 10, "selectedAnswerId": 100}));
        transport.push_json(200, json!({"id": 900, "questionId": 10, "selectedAnswerId": 101}));
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let (quiz, attempt) = start_attempt(&client, 4, 7).await.unwrap();
        let mut session = QuizSession::taking(quiz, attempt, &[], now(), false);

        let save = session.select_answer(10, 100).unwrap();
        let outcome = persist_answer(&client, 55, &save).await;
        assert!(session.resolve_answer(save, outcome).is_none());

        let change = session.select_answer(10, 101).unwrap();
        let outcome = persist_answer(&client, 55, &change).await;
        session.resolve_answer(change, outcome);

        let sent = transport.requests();
        assert_eq!(sent[0].body, Some(json!({"quizId": 4, "userId": 7})));
        assert_eq!(sent[2].path, "/api/user-answers");
        assert_eq!(
            sent[2].body,
            Some(json!({"quizAttemptId": 55, "questionId": 10, "selectedAnswerId": 100}))
        );
        assert_eq!(sent[3].path, "/api/user-answers/900");
        assert_eq!(sent[3].body, Some(json!({"selectedAnswerId": 101})));
        assert_eq!(session.selected_answer(10), Some(101));
    }
}
