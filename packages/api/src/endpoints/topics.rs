use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Topic, TopicDraft};
use crate::transport::Transport;

/// `/api/topics/*`.
pub struct Topics<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Topics<'_, T, S> {
    pub async fn create(&self, draft: &TopicDraft) -> Result<Topic, ApiError> {
        self.client.post("/api/topics").json(draft).send().await
    }

    pub async fn get(&self, id: i64) -> Result<Topic, ApiError> {
        self.client.get(format!("/api/topics/{id}")).send().await
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<Topic>, ApiError> {
        self.client
            .get("/api/topics")
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn roots(&self, active_only: bool) -> Result<Vec<Topic>, ApiError> {
        self.client
            .get("/api/topics/root")
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn subtopics(&self, parent_id: i64, active_only: bool) -> Result<Vec<Topic>, ApiError> {
        self.client
            .get(format!("/api/topics/{parent_id}/subtopics"))
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn update(&self, id: i64, draft: &TopicDraft) -> Result<Topic, ApiError> {
        self.client
            .put(format!("/api/topics/{id}"))
            .json(draft)
            .send()
            .await
    }

    /// Hard delete.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/topics/{id}"))
            .send_empty()
            .await
    }

    /// Soft delete.
    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/topics/{id}/deactivate"))
            .send_empty()
            .await
    }

    pub async fn search(&self, title: &str, active_only: bool) -> Result<Vec<Topic>, ApiError> {
        self.client
            .get("/api/topics/search")
            .query("title", title)
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn exists(&self, id: i64) -> Result<bool, ApiError> {
        self.client
            .get(format!("/api/topics/{id}/exists"))
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::models::TopicDraft;
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_topic_requests() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, json!([{"id": 1, "title": "Rust", "active": true}]));
        transport.push_json(200, json!([]));
        transport.push_json(200, json!({"id": 2, "title": "Ownership", "parentTopicId": 1}));
        transport.push(200, "");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        let topics = client.topics().list(true).await.unwrap();
        assert_eq!(topics[0].title, "Rust");
        client.topics().search("own", false).await.unwrap();
        let draft = TopicDraft {
            title: "Ownership".to_string(),
            parent_topic_id: Some(1),
            ..TopicDraft::default()
        };
        client.topics().update(2, &draft).await.unwrap();
        client.topics().deactivate(2).await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![
                "GET /api/topics",
                "GET /api/topics/search",
                "PUT /api/topics/2",
                "PATCH /api/topics/2/deactivate"
            ]
        );
        let sent = transport.requests();
        assert_eq!(sent[0].query, vec![("activeOnly".to_string(), "true".to_string())]);
        assert_eq!(
            sent[1].query,
            vec![
                ("title".to_string(), "own".to_string()),
                ("activeOnly".to_string(), "false".to_string())
            ]
        );
        assert_eq!(sent[2].body, Some(json!({"title": "Ownership", "parentTopicId": 1})));
    }
}
