use dioxus::prelude::*;

use ui::{use_config, AuthProvider, ToastProvider, UI_CSS};
use views::{
    AdminOnly, AppLayout, Dashboard, Login, QuestionBank, QuizAnalytics, QuizEdit, QuizManagement,
    QuizQuestions, QuizResult, QuizResultsDetail, QuizResultsOverview, QuizTaking, Quizzes,
    Register, ResourceManagement, StaffOnly, TopicDetail, TopicManagement, Topics,
    UserManagement, UserResultDetail,
};

mod download;
mod guard;
mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[layout(AppLayout)]
        #[route("/dashboard")]
        Dashboard {},
        #[route("/topics")]
        Topics {},
        #[route("/topics/:id")]
        TopicDetail { id: i64 },
        #[route("/quizzes")]
        Quizzes {},
        #[route("/quiz/:id")]
        QuizTaking { id: i64 },
        #[route("/quiz/:id/result")]
        QuizResultWithoutAttempt { id: i64 },
        #[route("/quiz/:id/result/:attempt_id")]
        QuizResult { id: i64, attempt_id: i64 },
        #[layout(StaffOnly)]
            #[route("/moderator/topics")]
            TopicManagement {},
            #[route("/moderator/resources")]
            ResourceManagement {},
            #[route("/moderator/quizzes")]
            QuizManagement {},
            #[route("/moderator/quiz/:id/edit")]
            QuizEdit { id: i64 },
            #[route("/moderator/quiz/:quiz_id/questions")]
            QuizQuestions { quiz_id: i64 },
            #[route("/moderator/questions")]
            QuestionBank {},
            #[route("/admin/quiz-results")]
            QuizResultsOverview {},
            #[route("/admin/quiz/:id/results")]
            QuizResultsDetail { id: i64 },
            #[route("/admin/quiz/:quiz_id/result/:attempt_id")]
            UserResultDetail { quiz_id: i64, attempt_id: i64 },
        #[end_layout]
        #[layout(AdminOnly)]
            #[route("/admin/users")]
            UserManagement {},
            #[route("/admin/analytics")]
            QuizAnalytics {},
        #[end_layout]
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const FAVICON: Asset = asset!("/assets/favicon.svg");
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "icon", href: FAVICON }
        document::Link { rel: "stylesheet", href: UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Shell {}
        }
    }
}

/// Toast host and router. Lives under [`AuthProvider`] so the loaded
/// configuration is available.
#[component]
fn Shell() -> Element {
    let config = use_config();

    rsx! {
        ToastProvider {
            duration_secs: config.ui.toast_duration_secs,
            Router::<Route> {}
        }
    }
}

/// Redirect `/` to `/dashboard`
#[component]
fn Root() -> Element {
    let nav = use_navigator();
    nav.replace(Route::Dashboard {});
    rsx! {}
}

/// A result link without an attempt goes back to the quiz page.
#[component]
fn QuizResultWithoutAttempt(id: i64) -> Element {
    let nav = use_navigator();
    nav.replace(Route::QuizTaking { id });
    rsx! {}
}

/// Unknown paths land on the dashboard.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let nav = use_navigator();
    tracing::debug!("No route for /{}", segments.join("/"));
    nav.replace(Route::Dashboard {});
    rsx! {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_path_without_attempt_has_its_own_route() {
        assert_eq!(
            "/quiz/5/result".parse::<Route>().ok(),
            Some(Route::QuizResultWithoutAttempt { id: 5 })
        );
        assert_eq!(
            "/quiz/5/result/9".parse::<Route>().ok(),
            Some(Route::QuizResult { id: 5, attempt_id: 9 })
        );
    }
}
