mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod layout;
pub use layout::{AdminOnly, AppLayout, StaffOnly};

mod dashboard;
pub use dashboard::Dashboard;

mod topics;
pub use topics::Topics;

mod topic_detail;
pub use topic_detail::TopicDetail;

mod quizzes;
pub use quizzes::Quizzes;

mod quiz_taking;
pub use quiz_taking::QuizTaking;

mod quiz_result;
pub use quiz_result::QuizResult;

mod moderator;
pub use moderator::{
    QuestionBank, QuizEdit, QuizManagement, QuizQuestions, ResourceManagement, TopicManagement,
};

mod admin;
pub use admin::{
    QuizAnalytics, QuizResultsDetail, QuizResultsOverview, UserManagement, UserResultDetail,
};

pub(crate) mod filters;
pub(crate) mod result_review;
