use serde_json::Value;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{AuthResponse, LoginRequest, PasswordReset, RefreshRequest, RefreshResponse, RegisterRequest};
use crate::transport::Transport;

/// `/api/auth/*`. Login and register persist the returned session.
pub struct Auth<'a, T, S> {
    pub(crate) client: &'a ApiClient<T, S>,
}

impl<T: Transport, S: KeyValueStore> Auth<'_, T, S> {
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .client
            .post("/api/auth/login")
            .json(credentials)
            .send()
            .await?;
        self.client.session().save_login(&auth)?;
        tracing::info!("Signed in as {}", auth.user.username);
        Ok(auth)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = self
            .client
            .post("/api/auth/register")
            .json(request)
            .send()
            .await?;
        self.client.session().save_login(&auth)?;
        tracing::info!("Registered {}", auth.user.username);
        Ok(auth)
    }

    /// Exchange a refresh token without touching the stored session.
    pub async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, ApiError> {
        self.client
            .post("/api/auth/refresh-token")
            .json(&RefreshRequest {
                refresh_token: refresh_token.to_string(),
            })
            .send()
            .await
    }

    pub async fn verify_email(&self, token: &str) -> Result<Value, ApiError> {
        self.client
            .get("/api/auth/verify-email")
            .query("token", token)
            .send()
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<(), ApiError> {
        self.client
            .post("/api/auth/forgot-password")
            .query("email", email)
            .send_empty()
            .await
    }

    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), ApiError> {
        self.client
            .post("/api/auth/reset-password")
            .query("token", token)
            .json(&PasswordReset {
                new_password: new_password.to_string(),
            })
            .send_empty()
            .await
    }

    pub async fn resend_verification(&self, email: &str) -> Result<(), ApiError> {
        self.client
            .post("/api/auth/resend-verification")
            .query("email", email)
            .send_empty()
            .await
    }

    /// Forget the stored session. The backend keeps no server-side state to
    /// revoke.
    pub fn logout(&self) -> Result<(), ApiError> {
        self.client.session().clear()?;
        tracing::info!("Signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::ScriptedTransport;
    use crate::models::LoginRequest;
    use crate::ApiClient;
    use store::{KeyValueStore, MemoryStore};

    #[tokio::test]
    async fn test_login_persists_session() {
        let transport = ScriptedTransport::new();
        transport.push_json(
            200,
            serde_json::json!({
                "accessToken": "a1",
                "refreshToken": "r1",
                "user": {"id": 2, "email": "s@x.io", "username": "sam", "role": "USER"}
            }),
        );
        let store = MemoryStore::new();
        let client = ApiClient::new(transport.clone(), store.clone());

        let auth = client
            .auth()
            .login(&LoginRequest {
                username: "sam".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();
        assert_eq!(auth.user.id, 2);
        assert_eq!(store.get("authToken").as_deref(), Some("a1"));
        assert_eq!(transport.calls(), vec!["POST /api/auth/login"]);

        client.auth().logout().unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_nothing() {
        let transport = ScriptedTransport::new();
        transport.push(401, r#"{"message":"Bad credentials"}"#);
        let store = MemoryStore::new();
        let client = ApiClient::new(transport, store.clone());
        let err = client
            .auth()
            .login(&LoginRequest {
                username: "sam".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_forgot_password_uses_query() {
        let transport = ScriptedTransport::new();
        transport.push(200, "");
        let client = ApiClient::new(transport.clone(), MemoryStore::new());
        client.auth().forgot_password("a+b@x.io").await.unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].path, "/api/auth/forgot-password");
        assert_eq!(sent[0].query, vec![("email".to_string(), "a+b@x.io".to_string())]);
    }
}
