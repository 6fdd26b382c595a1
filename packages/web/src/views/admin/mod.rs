mod analytics;
pub use analytics::QuizAnalytics;

mod results_detail;
pub use results_detail::QuizResultsDetail;

mod results_overview;
pub use results_overview::QuizResultsOverview;

mod user_result;
pub use user_result::UserResultDetail;

mod users;
pub use users::UserManagement;
