mod question_bank;
pub use question_bank::QuestionBank;

mod quiz_edit;
pub use quiz_edit::QuizEdit;

mod quiz_form;

mod quiz_questions;
pub use quiz_questions::QuizQuestions;

mod quizzes;
pub use quizzes::QuizManagement;

mod resources;
pub use resources::ResourceManagement;

mod topics;
pub use topics::TopicManagement;
