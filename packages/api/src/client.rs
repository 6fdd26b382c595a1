//! Authenticated JSON client.
//!
//! [`ApiClient`] attaches the stored bearer token to every request and turns
//! responses into typed results. A 401 from a non-auth endpoint triggers one
//! refresh through `/api/auth/refresh-token`; if that succeeds the original
//! request is retried once with the new token, otherwise the stored session is
//! cleared and the call fails with [`ApiError::SessionExpired`].

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use store::KeyValueStore;

use crate::error::ApiError;
use crate::models::{RefreshRequest, RefreshResponse};
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

pub const REFRESH_PATH: &str = "/api/auth/refresh-token";

#[derive(Debug, Clone)]
pub struct ApiClient<T, S> {
    transport: T,
    session: Session<S>,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            session: Session::new(store),
        }
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get(&self, path: impl Into<String>) -> Call<'_, T, S> {
        self.call(Method::Get, path)
    }

    pub fn post(&self, path: impl Into<String>) -> Call<'_, T, S> {
        self.call(Method::Post, path)
    }

    pub fn put(&self, path: impl Into<String>) -> Call<'_, T, S> {
        self.call(Method::Put, path)
    }

    pub fn patch(&self, path: impl Into<String>) -> Call<'_, T, S> {
        self.call(Method::Patch, path)
    }

    pub fn delete(&self, path: impl Into<String>) -> Call<'_, T, S> {
        self.call(Method::Delete, path)
    }

    fn call(&self, method: Method, path: impl Into<String>) -> Call<'_, T, S> {
        Call {
            client: self,
            request: ApiRequest::new(method, path),
            error: None,
        }
    }

    /// Send with the stored token, refreshing once on 401.
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse, ApiError> {
        request.bearer = self.session.access_token();
        let response = self.transport.send(&request).await?;
        if response.status != 401 || request.is_auth_endpoint() {
            return check_status(&request, response);
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            tracing::info!("{} {} was unauthorized, signing out", request.method.as_str(), request.path);
            self.expire_session();
            return Err(ApiError::SessionExpired);
        };

        match self.refresh(refresh_token).await {
            Ok(token) => {
                request.bearer = Some(token);
                let retried = self.transport.send(&request).await?;
                if retried.status == 401 {
                    tracing::info!("Retry of {} still unauthorized, signing out", request.path);
                    self.expire_session();
                    return Err(ApiError::SessionExpired);
                }
                check_status(&request, retried)
            }
            Err(e) => {
                tracing::info!("Token refresh failed ({}), signing out", e);
                self.expire_session();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn refresh(&self, refresh_token: String) -> Result<String, ApiError> {
        let mut request = ApiRequest::new(Method::Post, REFRESH_PATH);
        request.body = Some(to_json(&RefreshRequest { refresh_token })?);
        let response = self.transport.send(&request).await?;
        let response = check_status(&request, response)?;
        let refreshed: RefreshResponse = decode(REFRESH_PATH, &response)?;

        self.session.update_access_token(&refreshed.token)?;
        if let Some(next) = refreshed.refresh_token.as_deref() {
            self.session.update_refresh_token(next)?;
        }
        if let Some(user) = &refreshed.user {
            self.session.set_user(user)?;
        }
        tracing::debug!("Access token refreshed");
        Ok(refreshed.token)
    }

    fn expire_session(&self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!("Failed to clear stored session: {}", e);
        }
    }
}

/// One request being assembled. Finish with [`Call::send`] or
/// [`Call::send_empty`].
pub struct Call<'a, T, S> {
    client: &'a ApiClient<T, S>,
    request: ApiRequest,
    error: Option<ApiError>,
}

impl<T: Transport, S: KeyValueStore> Call<'_, T, S> {
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.request.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match to_json(body) {
            Ok(value) => self.request.body = Some(value),
            Err(e) => self.error = Some(e),
        }
        self
    }

    pub async fn send<R: DeserializeOwned>(self) -> Result<R, ApiError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        let path = self.request.path.clone();
        let response = self.client.execute(self.request).await?;
        decode(&path, &response)
    }

    /// Send and ignore the response body.
    pub async fn send_empty(self) -> Result<(), ApiError> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.client.execute(self.request).await.map(|_| ())
    }

    /// Like [`Call::send`], but a 404 or a `null` body mean "nothing".
    pub async fn send_optional<R: DeserializeOwned>(self) -> Result<Option<R>, ApiError> {
        match self.send::<Option<R>>().await {
            Ok(value) => Ok(value),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn to_json<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Invalid(e.to_string()))
}

fn check_status(request: &ApiRequest, response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    let message = error_message(&response.body);
    tracing::warn!(
        "{} {} failed with {}: {}",
        request.method.as_str(),
        request.path,
        response.status,
        message
    );
    Err(ApiError::Status {
        status: response.status,
        message,
    })
}

/// The backend puts a human-readable reason in `message` or `error`.
pub fn error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_default()
}

fn decode<R: DeserializeOwned>(path: &str, response: &ApiResponse) -> Result<R, ApiError> {
    let body = response.body.trim();
    let result = if body.is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        serde_json::from_str(body)
    };
    result.map_err(|e| {
        tracing::error!("Unexpected response from {}: {}", path, e);
        ApiError::Decode(e.to_string())
    })
}

/// Percent-encode a single path segment or query value.
pub fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::testing::ScriptedTransport;
    use crate::session::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};
    use store::MemoryStore;

    fn signed_in(refresh: Option<&str>) -> MemoryStore {
        let store = MemoryStore::new();
        store.set(ACCESS_TOKEN_KEY, "old-token").unwrap();
        store
            .set(USER_KEY, r#"{"id":1,"email":"a@b.c","username":"a","role":"USER"}"#)
            .unwrap();
        if let Some(r) = refresh {
            store.set(REFRESH_TOKEN_KEY, r).unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_bearer_and_query_are_sent() {
        let transport = ScriptedTransport::new();
        transport.push(200, r#"[]"#);
        let client = ApiClient::new(transport.clone(), signed_in(None));

        let topics: Vec<Value> = client
            .get("/api/topics")
            .query("activeOnly", true)
            .send()
            .await
            .unwrap();
        assert!(topics.is_empty());

        let sent = transport.requests();
        assert_eq!(sent[0].bearer.as_deref(), Some("old-token"));
        assert_eq!(sent[0].query, vec![("activeOnly".to_string(), "true".to_string())]);
    }

    #[tokio::test]
    async fn test_refresh_then_retry_once() {
        let transport = ScriptedTransport::new();
        transport.push(401, "");
        transport.push(200, r#"{"token":"new-token"}"#);
        transport.push(200, r#"{"id":9,"email":"z@z.z","username":"z","role":"ADMIN"}"#);
        let store = signed_in(Some("refresh-1"));
        let client = ApiClient::new(transport.clone(), store.clone());

        let user: User = client.get("/api/users/9").send().await.unwrap();
        assert_eq!(user.id, 9);

        let sent = transport.requests();
        assert_eq!(sent.len(), 3);
        assert_eq!(sent[1].path, REFRESH_PATH);
        assert!(sent[1].bearer.is_none());
        assert_eq!(sent[1].body, Some(serde_json::json!({"refreshToken": "refresh-1"})));
        assert_eq!(sent[2].bearer.as_deref(), Some("new-token"));
        assert_eq!(store.get(ACCESS_TOKEN_KEY).as_deref(), Some("new-token"));
    }

    #[tokio::test]
    async fn test_missing_refresh_token_expires_session() {
        let transport = ScriptedTransport::new();
        transport.push(401, "");
        let store = signed_in(None);
        let client = ApiClient::new(transport.clone(), store.clone());

        let err = client.get("/api/topics").send::<Value>().await.unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert!(store.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_expires_session() {
        let transport = ScriptedTransport::new();
        transport.push(401, "");
        transport.push(403, r#"{"message":"refresh token revoked"}"#);
        let store = signed_in(Some("refresh-1"));
        let client = ApiClient::new(transport.clone(), store.clone());

        let err = client.get("/api/topics").send::<Value>().await.unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert!(store.get(REFRESH_TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_second_401_does_not_refresh_again() {
        let transport = ScriptedTransport::new();
        transport.push(401, "");
        transport.push(200, r#"{"accessToken":"new-token"}"#);
        transport.push(401, "");
        let store = signed_in(Some("refresh-1"));
        let client = ApiClient::new(transport.clone(), store.clone());

        let err = client.get("/api/topics").send::<Value>().await.unwrap_err();
        assert_eq!(err, ApiError::SessionExpired);
        assert_eq!(transport.requests().len(), 3);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_login_401_is_plain_status() {
        let transport = ScriptedTransport::new();
        transport.push(401, r#"{"error":"Bad credentials"}"#);
        let store = signed_in(Some("refresh-1"));
        let client = ApiClient::new(transport.clone(), store.clone());

        let err = client
            .post("/api/auth/login")
            .json(&serde_json::json!({"username": "u", "password": "p"}))
            .send::<Value>()
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 401,
                message: "Bad credentials".into()
            }
        );
        assert_eq!(transport.requests().len(), 1);
        assert!(store.get(ACCESS_TOKEN_KEY).is_some());
    }

    #[tokio::test]
    async fn test_empty_body_and_optional() {
        let transport = ScriptedTransport::new();
        transport.push(200, "Topic deleted");
        transport.push(404, r#"{"message":"No attempt"}"#);
        transport.push(200, "null");
        let client = ApiClient::new(transport, signed_in(None));

        client.delete("/api/topics/1").send_empty().await.unwrap();
        let none: Option<Value> = client.get("/api/x").send_optional().await.unwrap();
        assert!(none.is_none());
        let none: Option<Value> = client.get("/api/y").send_optional().await.unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let transport = ScriptedTransport::new();
        transport.push(200, r#"{"unexpected": true}"#);
        let client = ApiClient::new(transport, MemoryStore::new());
        let err = client.get("/api/users/1").send::<User>().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(error_message(r#"{"message":"Nope","error":"x"}"#), "Nope");
        assert_eq!(error_message(r#"{"error":"Forbidden"}"#), "Forbidden");
        assert_eq!(error_message("<html>"), "");
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("ada+1@example.com"), "ada%2B1%40example.com");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }
}
