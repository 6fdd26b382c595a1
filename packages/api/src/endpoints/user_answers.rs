use serde_json::Value;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{UserAnswer, UserAnswerCreate, UserAnswerUpdate};
use crate::transport::Transport;

/// `/api/user-answers/*`.
pub struct UserAnswers<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> UserAnswers<'_, T, S> {
    pub async fn submit(&self, answer: &UserAnswerCreate) -> Result<UserAnswer, ApiError> {
        self.client
            .post("/api/user-answers")
            .json(answer)
            .send()
            .await
    }

    pub async fn get(&self, id: i64) -> Result<UserAnswer, ApiError> {
        self.client
            .get(format!("/api/user-answers/{id}"))
            .send()
            .await
    }

    pub async fn by_attempt(&self, attempt_id: i64) -> Result<Vec<UserAnswer>, ApiError> {
        self.client
            .get(format!("/api/user-answers/quiz-attempt/{attempt_id}"))
            .send()
            .await
    }

    pub async fn correct(&self, attempt_id: i64) -> Result<Vec<UserAnswer>, ApiError> {
        self.client
            .get(format!("/api/user-answers/quiz-attempt/{attempt_id}/correct"))
            .send()
            .await
    }

    pub async fn incorrect(&self, attempt_id: i64) -> Result<Vec<UserAnswer>, ApiError> {
        self.client
            .get(format!("/api/user-answers/quiz-attempt/{attempt_id}/incorrect"))
            .send()
            .await
    }

    /// Backend-defined statistics object, passed through untyped.
    pub async fn statistics(&self, attempt_id: i64) -> Result<Value, ApiError> {
        self.client
            .get(format!("/api/user-answers/quiz-attempt/{attempt_id}/statistics"))
            .send()
            .await
    }

    pub async fn for_question(
        &self,
        attempt_id: i64,
        question_id: i64,
    ) -> Result<Option<UserAnswer>, ApiError> {
        self.client
            .get(format!(
                "/api/user-answers/quiz-attempt/{attempt_id}/question/{question_id}"
            ))
            .send_optional()
            .await
    }

    pub async fn has_answered(&self, attempt_id: i64, question_id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!(
                "/api/user-answers/quiz-attempt/{attempt_id}/question/{question_id}/exists"
            ))
            .send()
            .await
    }

    pub async fn update(&self, id: i64, update: &UserAnswerUpdate) -> Result<UserAnswer, ApiError> {
        self.client
            .put(format!("/api/user-answers/{id}"))
            .json(update)
            .send()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/user-answers/{id}"))
            .send_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::{UserAnswerCreate, UserAnswerUpdate};
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_user_answer_requests() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!({"id": 50, "questionId": 11, "selectedAnswerId": 30}));
        transport.push_json(200, json!({"id": 50, "questionId": 11, "selectedAnswerId": 31}));
        transport.push(404, r#"{"message":"Not answered"}"#);
        transport.push(200, "false");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let create = UserAnswerCreate {
            quiz_attempt_id: 9,
            question_id: 11,
            selected_answer_id: 30,
        };
        assert_eq!(client.user_answers().submit(&create).await.unwrap().id, 50);
        let changed = client
            .user_answers()
            .update(50, &UserAnswerUpdate { selected_answer_id: 31 })
            .await
            .unwrap();
        assert_eq!(changed.selected_answer_id, Some(31));
        assert!(client.user_answers().for_question(9, 12).await.unwrap().is_none());
        assert!(!client.user_answers().has_answered(9, 12).await.unwrap());

        assert_eq!(
            transport.calls(),
            vec![
                "POST /api/user-answers",
                "PUT /api/user-answers/50",
                "GET /api/user-answers/quiz-attempt/9/question/12",
                "GET /api/user-answers/quiz-attempt/9/question/12/exists"
            ]
        );
        let sent = transport.requests();
        assert_eq!(
            sent[0].body,
            Some(json!({"quizAttemptId": 9, "questionId": 11, "selectedAnswerId": 30}))
        );
        assert_eq!(sent[1].body, Some(json!({"selectedAnswerId": 31})));
    }
}
