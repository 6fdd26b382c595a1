//! Endpoint groups.
//!
//! Each group borrows the client and maps one backend controller:
//!
//! ```ignore
//! let topics = client.topics().list(true).await?;
//! let attempt = client.attempts().submit(attempt_id).await?;
//! ```

mod answers;
mod attempts;
mod auth;
mod notifications;
mod questions;
mod quizzes;
mod resources;
mod topics;
mod user_answers;
mod users;

pub use answers::Answers;
pub use attempts::Attempts;
pub use auth::Auth;
pub use notifications::Notifications;
pub use questions::Questions;
pub use quizzes::Quizzes;
pub use resources::Resources;
pub use topics::Topics;
pub use user_answers::UserAnswers;
pub use users::Users;

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn auth(&self) -> Auth<'_, T, S> {
        Auth { client: self }
    }

    pub fn users(&self) -> Users<'_, T, S> {
        Users { client: self }
    }

    pub fn topics(&self) -> Topics<'_, T, S> {
        Topics { client: self }
    }

    pub fn resources(&self) -> Resources<'_, T, S> {
        Resources { client: self }
    }

    pub fn quizzes(&self) -> Quizzes<'_, T, S> {
        Quizzes { client: self }
    }

    pub fn questions(&self) -> Questions<'_, T, S> {
        Questions { client: self }
    }

    pub fn answers(&self) -> Answers<'_, T, S> {
        Answers { client: self }
    }

    pub fn attempts(&self) -> Attempts<'_, T, S> {
        Attempts { client: self }
    }

    pub fn user_answers(&self) -> UserAnswers<'_, T, S> {
        UserAnswers { client: self }
    }

    pub fn notifications(&self) -> Notifications<'_, T, S> {
        Notifications { client: self }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{AttemptCreate, QuizDraft, TopicDraft};
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_crud_paths() {
        let transport = ScriptedTransport::new();
        for _ in 0..3 {
            transport.push(200, "");
        }
        transport.push(200, r#"{"id":3,"title":"T"}"#);
        transport.push(200, r#"{"id":4,"title":"Q","durationMinutes":5}"#);
        transport.push(200, r#"{"id":5,"quizId":4,"status":"IN_PROGRESS"}"#);
        transport.push(200, "[]");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        client.quizzes().activate(4).await.unwrap();
        client.questions().delete(4, 10).await.unwrap();
        client.notifications().mark_read(8).await.unwrap();
        client
            .topics()
            .create(&TopicDraft {
                title: "T".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        client
            .quizzes()
            .update(
                4,
                &QuizDraft {
                    title: "Q".into(),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        client
            .attempts()
            .create(&AttemptCreate {
                quiz_id: 4,
                user_id: 1,
            })
            .await
            .unwrap();
        client.answers().correct(10).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                "PATCH /api/quizzes/4/activate",
                "DELETE /api/quizzes/4/questions/10",
                "PATCH /api/notifications/8/read",
                "POST /api/topics",
                "PUT /api/quizzes/4",
                "POST /api/quiz-attempts",
                "GET /api/questions/10/answers/correct",
            ]
        );
        assert_eq!(transport.remaining(), 0);
    }
}
