use store::KeyValueStore;

use crate::client::{encode_segment, ApiClient};
use crate::error::ApiError;
use crate::models::{PasswordChange, PasswordReset, Role, User, UserCreate, UserUpdate};
use crate::transport::Transport;

/// `/api/users/*`.
pub struct Users<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Users<'_, T, S> {
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/api/users").send().await
    }

    pub async fn active(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/api/users/active").send().await
    }

    pub async fn inactive(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/api/users/inactive").send().await
    }

    pub async fn get(&self, id: i64) -> Result<User, ApiError> {
        self.client.get(format!("/api/users/{id}")).send().await
    }

    pub async fn by_email(&self, email: &str) -> Result<User, ApiError> {
        self.client
            .get(format!("/api/users/email/{}", encode_segment(email)))
            .send()
            .await
    }

    pub async fn search(&self, keyword: &str, active_only: bool) -> Result<Vec<User>, ApiError> {
        self.client
            .get("/api/users/search")
            .query("keyword", keyword)
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn by_role(&self, role: Role, active_only: bool) -> Result<Vec<User>, ApiError> {
        self.client
            .get(format!("/api/users/role/{}", role.as_str()))
            .query("activeOnly", active_only)
            .send()
            .await
    }

    pub async fn create(&self, user: &UserCreate) -> Result<User, ApiError> {
        self.client.post("/api/users").json(user).send().await
    }

    pub async fn update(&self, id: i64, user: &UserUpdate) -> Result<User, ApiError> {
        self.client
            .put(format!("/api/users/{id}"))
            .json(user)
            .send()
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .delete(format!("/api/users/{id}"))
            .send_empty()
            .await
    }

    pub async fn activate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/users/{id}/activate"))
            .send_empty()
            .await
    }

    pub async fn deactivate(&self, id: i64) -> Result<(), ApiError> {
        self.client
            .patch(format!("/api/users/{id}/deactivate"))
            .send_empty()
            .await
    }

    /// Admin reset; no old password required.
    pub async fn reset_password(&self, id: i64, new_password: &str) -> Result<(), ApiError> {
        self.client
            .post(format!("/api/users/{id}/reset-password"))
            .json(&PasswordReset {
                new_password: new_password.to_string(),
            })
            .send_empty()
            .await
    }

    pub async fn change_password(&self, id: i64, change: &PasswordChange) -> Result<(), ApiError> {
        self.client
            .post(format!("/api/users/{id}/change-password"))
            .json(change)
            .send_empty()
            .await
    }

    /// Whether another account already uses `email`. Pass the edited user's
    /// id to exclude it from the check.
    pub async fn email_exists(&self, email: &str, exclude: Option<i64>) -> Result<bool, ApiError> {
        self.client
            .get("/api/users/check-email")
            .query("email", email)
            .query_opt("id", exclude)
            .send()
            .await
    }

    pub async fn count_by_role(&self, role: Role) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/users/role/{}/count", role.as_str()))
            .send()
            .await
    }

    pub async fn count_active(&self) -> Result<u64, ApiError> {
        self.client.get("/api/users/active/count").send().await
    }

    pub async fn count_active_by_role(&self, role: Role) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/users/role/{}/active/count", role.as_str()))
            .send()
            .await
    }

    pub async fn with_quiz_attempts(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/api/users/with-quiz-attempts").send().await
    }

    pub async fn without_quiz_attempts(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/api/users/without-quiz-attempts").send().await
    }

    pub async fn quiz_attempt_count(&self, user_id: i64) -> Result<u64, ApiError> {
        self.client
            .get(format!("/api/users/{user_id}/quiz-attempts/count"))
            .send()
            .await
    }

    pub async fn top_by_quiz_attempts(&self) -> Result<Vec<User>, ApiError> {
        self.client.get("/api/users/top-by-quiz-attempts").send().await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::Role;
    use crate::testing::ScriptedTransport;
    use crate::ApiClient;
    use store::MemoryStore;

    #[tokio::test]
    async fn test_role_and_email_paths() {
        let transport = ScriptedTransport::new();
        transport.push(200, "[]");
        transport.push(200, r#"{"id":1,"email":"a@b.c","username":"a","role":"USER"}"#);
        transport.push(200, "false");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());

        client.users().by_role(Role::Moderator, true).await.unwrap();
        client.users().by_email("a@b.c").await.unwrap();
        let exists = client.users().email_exists("a@b.c", Some(4)).await.unwrap();
        assert!(!exists);

        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/users/role/MODERATOR");
        assert_eq!(sent[0].query[0], ("activeOnly".to_string(), "true".to_string()));
        assert_eq!(sent[1].path, "/api/users/email/a%40b.c");
        assert_eq!(sent[2].query.len(), 2);
    }
}
