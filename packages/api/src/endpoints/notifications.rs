use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::Notification;
use crate::transport::Transport;

/// `/api/notifications/*`.
pub struct Notifications<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Notifications<'_, T, S> {
    pub async fn for_user(&self, user_id: i64) -> Result<Vec<Notification>, ApiError> {
        self.client
            .get(format!("/api/notifications/user/{user_id}"))
            .send()
            .await
    }

    pub async fn mark_read(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/notifications/{id}/read"))
            .send_empty()
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::NotificationKind;
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_notification_requests() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            json!([{"id": 3, "title": "New quiz", "type": "NEW_QUIZ", "relatedId": 4}]),
        );
        transport.push(200, "");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let list = client.notifications().for_user(8).await.unwrap();
        assert_eq!(list[0].kind, NotificationKind::NewQuiz);
        assert!(!list[0].read);
        client.notifications().mark_read(3).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec!["GET /api/notifications/user/8", "PATCH /api/notifications/3/read"]
        );
    }
}
