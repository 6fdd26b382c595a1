use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Resource, ResourceDraft, ResourceType};
use crate::transport::Transport;

/// `/api/resources/*`.
pub struct Resources<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Resources<'_, T, S> {
    pub async fn create(&self, draft: &ResourceDraft) -> Result<Resource, ApiError> {
        self.client.post("/api/resources").json(draft).send().await
    }

    pub async fn get(&self, id: i64, with_topic: bool) -> Result<Resource, ApiError> {
        self.client
            .get(format!("/api/resources/{id}"))
            .query("withTopic", with_topic)
            .send()
            .await
    }

    pub async fn update(&self, id: i64, draft: &ResourceDraft) -> Result<Resource, ApiError> {
        self.client
            .put(format!("/api/resources/{id}"))
            .json(draft)
            .send()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/resources/{id}"))
            .send_empty()
            .await
    }

    pub async fn list(&self, with_topic: bool, active_only: bool) -> Result<Vec<Resource>, ApiError> {
        self.client
            .get("/api/resources")
            .query("withTopic", with_topic)
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn by_topic(
        &self,
        topic_id: i64,
        active_only: bool,
        ordered: bool,
    ) -> Result<Vec<Resource>, ApiError> {
        self.client
            .get(format!("/api/resources/topic/{topic_id}"))
            .query("activeOnly", active_only)
            .query("ordered", ordered)
            .send()
            .await
    }

    pub async fn by_type(&self, kind: ResourceType, active_only: bool) -> Result<Vec<Resource>, ApiError> {
        self.client
            .get(format!("/api/resources/type/{}", kind.as_str()))
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn by_topic_and_type(
        &self,
        topic_id: i64,
        kind: ResourceType,
        active_only: bool,
    ) -> Result<Vec<Resource>, ApiError> {
        self.client
            .get(format!("/api/resources/topic/{topic_id}/type/{}", kind.as_str()))
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn search(&self, title: &str, active_only: bool) -> Result<Vec<Resource>, ApiError> {
        self.client
            .get("/api/resources/search")
            .query("title", title)
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn activate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/resources/{id}/activate"))
            .send_empty()
            .await
    }

    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/resources/{id}/deactivate"))
            .send_empty()
            .await
    }

    /// Set the display order of a topic's resources to the order of `ids`.
    pub async fn reorder(&self, topic_id: i64, ids: &[i64]) -> Result<(), ApiError> {
        self.client
            .put(format!("/api/resources/topic/{topic_id}/reorder"))
            .json(ids)
            .send_empty()
            .await
    }

    pub async fn count_by_topic(&self, topic_id: i64, active_only: bool) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/resources/topic/{topic_id}/count"))
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn count_by_type(&self, kind: ResourceType) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/resources/type/{}/count", kind.as_str()))
            .send()
            .await
    }

    pub async fn delete_by_topic(&self, topic_id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/resources/topic/{topic_id}"))
            .send_empty()
            .await
    }

    /// Whether no other resource uses `url`. Pass the edited resource's id to
    /// exclude it.
    pub async fn url_is_unique(&self, url: &str, exclude: Option<i64>) -> Result<bool, ApiError> {
        self.client
            .get("/api/resources/check-url")
            .query("url", url)
            .query_opt("id", exclude)
            .send()
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::ResourceType;
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_reorder_sends_id_array() {
        let transport = ScriptedTransport::new();
        transport.push(200, "");
        transport.push(200, "[]");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        client.resources().reorder(4, &[9, 7, 8]).await.unwrap();
        client
            .resources()
            .by_topic_and_type(4, ResourceType::Video, true)
            .await
            .unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].body, Some(serde_json::json!([9, 7, 8])));
        assert_eq!(sent[1].path, "/api/resources/topic/4/type/VIDEO");
    }
}
