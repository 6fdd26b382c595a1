use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Question, QuestionDraft, QuestionUpdate};
use crate::transport::Transport;

/// `/api/quizzes/{quizId}/questions/*`.
pub struct Questions<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Questions<'_, T, S> {
    pub async fn create(&self, quiz_id: i64, draft: &QuestionDraft) -> Result<Question, ApiError> {
        self.client
            .post(format!("/api/quizzes/{quiz_id}/questions"))
            .json(draft)
            .send()
            .await
    }

    pub async fn get(&self, quiz_id: i64, id: i64) -> Result<Question, ApiError> {
        self.client
            .get(format!("/api/quizzes/{quiz_id}/questions/{id}"))
            .send()
            .await
    }

    pub async fn list(&self, quiz_id: i64) -> Result<Vec<Question>, ApiError> {
        self.client
            .get(format!("/api/quizzes/{quiz_id}/questions"))
            .send()
            .await
    }

    /// Questions without answer options.
    pub async fn summaries(&self, quiz_id: i64) -> Result<Vec<Question>, ApiError> {
        self.client
            .get(format!("/api/quizzes/{quiz_id}/questions/summaries"))
            .send()
            .await
    }

    /// Updates the question fields only; answers go through
    /// [`Answers`](super::Answers).
    pub async fn update(
        &self,
        quiz_id: i64,
        id: i64,
        update: &QuestionUpdate,
    ) -> Result<Question, ApiError> {
        self.client
            .put(format!("/api/quizzes/{quiz_id}/questions/{id}"))
            .json(update)
            .send()
            .await
    }

    pub async fn delete(&self, quiz_id: i64, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/quizzes/{quiz_id}/questions/{id}"))
            .send_empty()
            .await
    }

    pub async fn delete_all(&self, quiz_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/quizzes/{quiz_id}/questions"))
            .send_empty()
            .await
    }

    pub async fn reorder(&self, quiz_id: i64, ids: &[i64]) -> Result<(), ApiError> {
        self.client
            .put(format!("/api/quizzes/{quiz_id}/questions/reorder"))
            .json(ids)
            .send_empty()
            .await
    }

    pub async fn count(&self, quiz_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/quizzes/{quiz_id}/questions/count"))
            .send()
            .await
    }

    pub async fn exists(&self, quiz_id: i64, id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/quizzes/{quiz_id}/questions/{id}/exists"))
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
    async fn test_question_requests() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!([{"id": 11, "questionText": "What does `Box` own?", "displayOrder": 1}]),
        );
        transport.push(204, "");
        transport.push(200, "");
        transport.push(200, "3");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let questions = client.questions().list(4).await.unwrap();
        assert_eq!(questions[0].points, 1);
        client.questions().reorder(4, &[12, 11]).await.unwrap();
        client.questions().delete(4, 11).await.unwrap();
        assert_eq!(client.questions().count(4).await.unwrap(), 3);

        assert_eq!(
            transport.calls(),
            vec![
                "GET /api/quizzes/4/questions",
                "PUT /api/quizzes/4/questions/reorder",
                "DELETE /api/quizzes/4/questions/11",
                "GET /api/quizzes/4/questions/count"
            ]
        );
        assert_eq!(transport.requests()[1].body, Some(json!([12, 11])));
    }
}
