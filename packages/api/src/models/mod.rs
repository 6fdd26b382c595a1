//! Data models for the LMS backend.
//!
//! These mirror the backend's JSON shapes; the backend stays authoritative for
//! every field. Derived helpers (quiz status, topic trees, result tallies) are
//! pure functions over these types.

mod attempt;
mod notification;
mod question;
mod quiz;
mod resource;
mod topic;
mod user;

pub use attempt::{
    result_passed, result_score, AttemptCreate, AttemptStatus, AttemptSummary, AttemptUpdate,
    QuizAttempt, ResultTally, UserAnswer, UserAnswerCreate, UserAnswerUpdate,
};
pub use notification::{
    unread_badge, unread_count, Notification, NotificationKind, NotificationTarget,
};
pub use question::{Answer, AnswerDraft, AnswerSummary, Question, QuestionDraft, QuestionUpdate};
pub use quiz::{
    filter_quizzes, format_datetime_local, parse_datetime_local, Quiz, QuizDraft, QuizStatus,
    QuizSummary,
};
pub use resource::{visible_resources, Resource, ResourceDraft, ResourceType};
pub use topic::{build_topic_tree, filter_topics, Topic, TopicDraft, TopicNode, TopicSummary};
pub use user::{
    AuthResponse, LoginRequest, PasswordChange, PasswordReset, RefreshRequest, RefreshResponse,
    RegisterRequest, Role, User, UserCreate, UserUpdate,
};
