use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Quiz, QuizDraft, QuizSummary};
use crate::transport::Transport;

/// `/api/quizzes/*` and the topic-scoped `/api/topics/{id}/quizzes/*`.
pub struct Quizzes<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Quizzes<'_, T, S> {
    pub async fn create(&self, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.client.post("/api/quizzes").json(draft).send().await
    }

    pub async fn get(&self, id: i64) -> Result<Quiz, ApiError> {
        self.client.get(format!("/api/quizzes/{id}")).send().await
    }

    pub async fn get_with_questions(&self, id: i64) -> Result<Quiz, ApiError> {
        self.client
            .get(format!("/api/quizzes/{id}/with-questions"))
            .send()
            .await
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<Quiz>, ApiError> {
        self.client
            .get("/api/quizzes")
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn available(&self) -> Result<Vec<Quiz>, ApiError> {
        self.client.get("/api/quizzes/available").send().await
    }

    pub async fn scheduled(&self) -> Result<Vec<Quiz>, ApiError> {
        self.client.get("/api/quizzes/scheduled").send().await
    }

    pub async fn ended(&self) -> Result<Vec<Quiz>, ApiError> {
        self.client.get("/api/quizzes/ended").send().await
    }

    pub async fn search(&self, title: &str) -> Result<Vec<Quiz>, ApiError> {
        self.client
            .get("/api/quizzes/search")
            .query("title", title)
            .send()
            .await
    }

    pub async fn update(&self, id: i64, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.client
            .put(format!("/api/quizzes/{id}"))
            .json(draft)
            .send()
            .await
    }

    pub async fn activate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/quizzes/{id}/activate"))
            .json(&serde_json::json!({}))
            .send_empty()
            .await
    }

    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/quizzes/{id}/deactivate"))
            .json(&serde_json::json!({}))
            .send_empty()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/quizzes/{id}"))
            .send_empty()
            .await
    }

    pub async fn exists(&self, id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/quizzes/{id}/exists"))
            .send()
            .await
    }

    pub async fn is_available(&self, id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/quizzes/{id}/is-available"))
            .send()
            .await
    }

    pub async fn create_for_topic(&self, topic_id: i64, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        self.client
            .post(format!("/api/topics/{topic_id}/quizzes"))
            .json(draft)
            .send()
            .await
    }

    pub async fn get_for_topic(&self, topic_id: i64, id: i64) -> Result<Quiz, ApiError> {
        self.client
            .get(format!("/api/topics/{topic_id}/quizzes/{id}"))
            .send()
            .await
    }

    pub async fn by_topic(
        &self,
        topic_id: i64,
        active_only: bool,
        with_questions: bool,
    ) -> Result<Vec<Quiz>, ApiError> {
        self.client
            .get(format!("/api/topics/{topic_id}/quizzes"))
            .query("activeOnly", active_only)
            .query("withQuestions", with_questions)
            .send()
            .await
    }

    pub async fn summaries_by_topic(&self, topic_id: i64) -> Result<Vec<QuizSummary>, ApiError> {
        self.client
            .get(format!("/api/topics/{topic_id}/quizzes/summaries"))
            .send()
            .await
    }

    pub async fn available_by_topic(&self, topic_id: i64) -> Result<Vec<Quiz>, ApiError> {
        self.client
            .get(format!("/api/topics/{topic_id}/quizzes/available"))
            .send()
            .await
    }

    pub async fn update_for_topic(
        &self,
        topic_id: i64,
        id: i64,
        draft: &QuizDraft,
    ) -> Result<Quiz, ApiError> {
        self.client
            .put(format!("/api/topics/{topic_id}/quizzes/{id}"))
            .json(draft)
            .send()
            .await
    }

    pub async fn delete_for_topic(&self, topic_id: i64, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/topics/{topic_id}/quizzes/{id}"))
            .send_empty()
            .await
    }

    pub async fn delete_all_for_topic(&self, topic_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/topics/{topic_id}/quizzes"))
            .send_empty()
            .await
    }

    pub async fn count_by_topic(&self, topic_id: i64, active_only: bool) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/topics/{topic_id}/quizzes/count"))
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn exists_for_topic(&self, topic_id: i64, id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/topics/{topic_id}/quizzes/{id}/exists"))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_quiz_requests() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!({"id": 4, "title": "Traits", "durationMinutes": 20, "questions": []}),
        );
        transport.push_json(200, json!([]));
        transport.push(200, "");
        transport.push(200, "true");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let quiz = client.quizzes().get_with_questions(4).await.unwrap();
        assert_eq!(quiz.duration_minutes, 20);
        client.quizzes().by_topic(7, true, false).await.unwrap();
        client.quizzes().activate(4).await.unwrap();
        assert!(client.quizzes().is_available(4).await.unwrap());

        assert_eq!(
            transport.calls(),
            vec![
                "GET /api/quizzes/4/with-questions",
                "GET /api/topics/7/quizzes",
                "PATCH /api/quizzes/4/activate",
                "GET /api/quizzes/4/is-available"
            ]
        );
        let sent = transport.requests();
        assert_eq!(
            sent[1].query,
            vec![
                ("activeOnly".to_string(), "true".to_string()),
                ("withQuestions".to_string(), "false".to_string())
            ]
        );
        assert_eq!(sent[2].body, Some(json!({})));
    }
}
