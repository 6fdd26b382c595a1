use chrono::NaiveDateTime;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AttemptCreate, AttemptStatus, AttemptSummary, AttemptUpdate, QuizAttempt};
use crate::transport::Transport;

const DATE_PARAM_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// `/api/quiz-attempts/*`.
pub struct Attempts<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Attempts<'_, T, S> {
    pub async fn create(&self, attempt: &AttemptCreate) -> Result<QuizAttempt, ApiError> {
        self.client
            .post("/api/quiz-attempts")
            .json(attempt)
            .send()
            .await
    }

    pub async fn get(&self, id: i64) -> Result<QuizAttempt, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/{id}"))
            .send()
            .await
    }

    pub async fn get_with_answers(&self, id: i64) -> Result<QuizAttempt, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/{id}/with-answers"))
            .send()
            .await
    }

    pub async fn update(&self, id: i64, update: &AttemptUpdate) -> Result<QuizAttempt, ApiError> {
        self.client
            .put(format!("/api/quiz-attempts/{id}"))
            .json(update)
            .send()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/quiz-attempts/{id}"))
            .send_empty()
            .await
    }

    pub async fn list(&self) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client.get("/api/quiz-attempts").send().await
    }

    pub async fn summaries(&self) -> Result<Vec<AttemptSummary>, ApiError> {
        self.client.get("/api/quiz-attempts/summary").send().await
    }

    pub async fn by_user(&self, user_id: i64) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}"))
            .send()
            .await
    }

    pub async fn summaries_by_user(&self, user_id: i64) -> Result<Vec<AttemptSummary>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/summary"))
            .send()
            .await
    }

    pub async fn by_quiz(&self, quiz_id: i64) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/quiz/{quiz_id}"))
            .send()
            .await
    }

    pub async fn summaries_by_quiz(&self, quiz_id: i64) -> Result<Vec<AttemptSummary>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/quiz/{quiz_id}/summary"))
            .send()
            .await
    }

    pub async fn by_user_and_quiz(&self, user_id: i64, quiz_id: i64) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/quiz/{quiz_id}"))
            .send()
            .await
    }

    /// The user's running attempt on a quiz. A 404 or empty reply means there
    /// is none.
    pub async fn in_progress(&self, user_id: i64, quiz_id: i64) -> Result<Option<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/quiz/{quiz_id}/in-progress"))
            .send_optional()
            .await
    }

    pub async fn latest(&self, user_id: i64, quiz_id: i64) -> Result<Option<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/quiz/{quiz_id}/latest"))
            .send_optional()
            .await
    }

    pub async fn by_status(&self, status: AttemptStatus) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/status/{}", status.as_str()))
            .send()
            .await
    }

    /// Finish an attempt. The backend scores it and returns the result.
    pub async fn submit(&self, id: i64) -> Result<QuizAttempt, ApiError> {
        self.client
            .post(format!("/api/quiz-attempts/{id}/submit"))
            .send()
            .await
    }

    pub async fn mark_expired(&self) -> Result<(), ApiError> {
        self.client
            .post("/api/quiz-attempts/mark-expired")
            .send_empty()
            .await
    }

    pub async fn in_date_range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client
            .get("/api/quiz-attempts/date-range")
            .query("startDate", start.format(DATE_PARAM_FORMAT))
            .query("endDate", end.format(DATE_PARAM_FORMAT))
            .send()
            .await
    }

    pub async fn user_in_date_range(
        &self,
        user_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<QuizAttempt>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/date-range"))
            .query("startDate", start.format(DATE_PARAM_FORMAT))
            .query("endDate", end.format(DATE_PARAM_FORMAT))
            .send()
            .await
    }

    pub async fn has_in_progress(&self, user_id: i64, quiz_id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/quiz/{quiz_id}/has-in-progress"))
            .send()
            .await
    }

    pub async fn user_count(&self, user_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/count"))
            .send()
            .await
    }

    pub async fn quiz_count(&self, quiz_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/quiz/{quiz_id}/count"))
            .send()
            .await
    }

    pub async fn user_passed_count(&self, user_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/passed-count"))
            .send()
            .await
    }

    pub async fn quiz_average_score(&self, quiz_id: i64) -> Result<Option<f64>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/quiz/{quiz_id}/average-score"))
            .send()
            .await
    }

    pub async fn user_best_score(&self, user_id: i64, quiz_id: i64) -> Result<Option<f64>, ApiError> {
        self.client
            .get(format!("/api/quiz-attempts/user/{user_id}/quiz/{quiz_id}/best-score"))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_in_progress_absent() {
        let transport = ScriptedTransport::new();
        transport.push(404, r#"{"message":"No in-progress attempt"}"#);
        transport.push(200, "");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        assert!(client.attempts().in_progress(1, 2).await.unwrap().is_none());
        assert!(client.attempts().latest(1, 2).await.unwrap().is_none());
        assert_eq!(
            transport.calls(),
            vec![
                "GET /api/quiz-attempts/user/1/quiz/2/in-progress",
                "GET /api/quiz-attempts/user/1/quiz/2/latest"
            ]
        );
    }

    #[tokio::test]
    async fn test_date_range_params() {
        let transport = ScriptedTransport::new();
        transport.push(200, "[]");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        client
            .attempts()
            .in_date_range(day.and_hms_opt(0, 0, 0).unwrap(), day.and_hms_opt(23, 59, 59).unwrap())
            .await
            .unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].query[0].1, "2024-05-01T00:00:00");
        assert_eq!(sent[0].query[1].1, "2024-05-01T23:59:59");
    }

    #[tokio::test]
    async fn test_average_score_null() {
        let transport = ScriptedTransport::new();
        transport.push(200, "null");
        transport.push(200, "72.5");
        let client = ApiClient::new(transport, MemoryStore::new());
        assert_eq!(client.attempts().quiz_average_score(3).await.unwrap(), None);
        assert_eq!(client.attempts().quiz_average_score(3).await.unwrap(), Some(72.5));
    }
}
