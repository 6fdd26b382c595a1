use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Answer, AnswerDraft, AnswerSummary};
use crate::transport::Transport;

/// `/api/questions/{questionId}/answers/*`.
pub struct Answers<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Answers<'_, T, S> {
    pub async fn create(&self, question_id: i64, draft: &AnswerDraft) -> Result<Answer, ApiError> {
        self.client
            .post(format!("/api/questions/{question_id}/answers"))
            .json(draft)
            .send()
            .await
    }

    pub async fn get(&self, question_id: i64, id: i64) -> Result<Answer, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers/{id}"))
            .send()
            .await
    }

    pub async fn list(&self, question_id: i64) -> Result<Vec<Answer>, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers"))
            .send()
            .await
    }

    pub async fn summaries(&self, question_id: i64) -> Result<Vec<AnswerSummary>, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers/summaries"))
            .send()
            .await
    }

    pub async fn correct(&self, question_id: i64) -> Result<Vec<Answer>, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers/correct"))
            .send()
            .await
    }

    pub async fn update(&self, question_id: i64, id: i64, draft: &AnswerDraft) -> Result<Answer, ApiError> {
        self.client
            .put(format!("/api/questions/{question_id}/answers/{id}"))
            .json(draft)
            .send()
            .await
    }

    pub async fn delete(&self, question_id: i64, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/questions/{question_id}/answers/{id}"))
            .send_empty()
            .await
    }

    pub async fn delete_all(&self, question_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/questions/{question_id}/answers"))
            .send_empty()
            .await
    }

    pub async fn count(&self, question_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers/count"))
            .send()
            .await
    }

    pub async fn count_correct(&self, question_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers/count/correct"))
            .send()
            .await
    }

    pub async fn exists(&self, question_id: i64, id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/questions/{question_id}/answers/{id}/exists"))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::AnswerDraft;
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_answer_requests() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": 30, "answerText": "The heap value", "correct": true}));
        transport.push_json(200, json!([]));
        transport.push(200, "1");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let draft = AnswerDraft {
            answer_text: "The heap value".to_string(),
            correct: true,
            display_order: None,
        };
        let created = client.answers().create(11, &draft).await.unwrap();
        assert!(created.correct);
        client.answers().correct(11).await.unwrap();
        assert_eq!(client.answers().count_correct(11).await.unwrap(), 1);

        assert_eq!(
            transport.calls(),
            vec![
                "POST /api/questions/11/answers",
                "GET /api/questions/11/answers/correct",
                "GET /api/questions/11/answers/count/correct"
            ]
        );
        assert_eq!(
            transport.requests()[0].body,
            Some(json!({"answerText": "The heap value", "correct": true}))
        );
    }
}
