//! # User accounts and authentication payloads
//!
//! [`User`] mirrors the backend's user record as it appears in responses. The
//! backend never sends the password hash; the token fields that exist on the
//! server entity are omitted here because the client has no use for them.
//!
//! [`Role`] drives navigation and route guards on the client. Enforcement
//! happens on the server; the client only hides what a role cannot use.
//!
//! The request/response types ([`LoginRequest`], [`AuthResponse`], …) are the
//! bodies of the `/api/auth/*` and `/api/users/*` endpoints.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Account role as sent by the backend (`"ADMIN"`, `"MODERATOR"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Moderator,
    User,
    Guest,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Moderator, Role::User, Role::Guest];

    /// Roles allowed on moderation screens.
    pub const STAFF: [Role; 2] = [Role::Moderator, Role::Admin];

    pub fn is_any_of(self, roles: &[Role]) -> bool {
        roles.contains(&self)
    }

    pub fn is_staff(self) -> bool {
        self.is_any_of(&Self::STAFF)
    }

    /// Wire name, also used in role-scoped URLs.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::User => "USER",
            Role::Guest => "GUEST",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Moderator => "Moderator",
            Role::User => "User",
            Role::Guest => "Guest",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|r| r.as_str().eq_ignore_ascii_case(s))
    }
}

/// User record as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub role: Role,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub login_attempts: u32,
    #[serde(default)]
    pub last_login_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

fn default_true() -> bool {
    true
}

impl User {
    /// "First Last", falling back to the username when both are blank.
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }

    /// Up to two uppercase initials for avatars.
    pub fn initials(&self) -> String {
        let mut out: String = [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|s| s.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if out.is_empty() {
            out = self
                .username
                .chars()
                .next()
                .map(|c| c.to_uppercase().collect())
                .unwrap_or_default();
        }
        out
    }

    pub fn has_role(&self, roles: &[Role]) -> bool {
        self.role.is_any_of(roles)
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl RegisterRequest {
    /// Client-side checks before the form is sent.
    pub fn validate(&self, confirm_password: &str) -> Result<(), String> {
        if self.username.trim().is_empty() {
            return Err("Username is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Please enter a valid email".to_string());
        }
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("First and last name are required".to_string());
        }
        if self.password.len() < 6 {
            return Err("Password must be at least 6 characters".to_string());
        }
        if self.password != confirm_password {
            return Err("Passwords do not match".to_string());
        }
        Ok(())
    }
}

/// Response of login and register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

/// Body of `POST /api/auth/refresh-token`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Response of `POST /api/auth/refresh-token`.
///
/// Older backends answer with `token`, newer ones with `accessToken`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `POST /api/users` (admin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub phone_number: String,
    pub role: Role,
    pub password: String,
}

/// Body of `PUT /api/users/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

/// Body of `POST /api/users/{id}/change-password`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

/// Body of the admin and token-based password reset endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_user_payload() {
        let json = r#"{
            "id": 7,
            "email": "ada@example.com",
            "username": "ada",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "phoneNumber": "555-0100",
            "role": "MODERATOR",
            "active": true,
            "softDeleted": false,
            "verified": true,
            "loginAttempts": 0,
            "lastLoginAt": "2024-03-01T09:15:00",
            "createdAt": "2024-01-10T08:00:00.123",
            "updatedAt": "2024-03-01T09:15:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, Role::Moderator);
        assert_eq!(user.full_name(), "Ada Lovelace");
        assert_eq!(user.initials(), "AL");
        assert!(user.has_role(&Role::STAFF));
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_minimal_user_defaults() {
        let json = r#"{"id":1,"email":"g@x.io","username":"guest","role":"GUEST"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.active);
        assert_eq!(user.full_name(), "guest");
        assert_eq!(user.initials(), "G");
        assert!(!user.role.is_staff());
    }

    #[test]
    fn test_role_parse_and_wire_name() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("nobody"), None);
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
    }

    #[test]
    fn test_refresh_response_accepts_both_field_names() {
        let a: RefreshResponse = serde_json::from_str(r#"{"token":"t1"}"#).unwrap();
        let b: RefreshResponse = serde_json::from_str(r#"{"accessToken":"t2"}"#).unwrap();
        assert_eq!(a.token, "t1");
        assert_eq!(b.token, "t2");
        assert!(b.user.is_none());
    }

    #[test]
    fn test_register_validation() {
        let mut req = RegisterRequest {
            username: "sam".into(),
            email: "sam@example.com".into(),
            password: "secret1".into(),
            first_name: "Sam".into(),
            last_name: "Lee".into(),
            phone_number: String::new(),
        };
        assert!(req.validate("secret1").is_ok());
        assert_eq!(req.validate("other").unwrap_err(), "Passwords do not match");
        req.email = "nope".into();
        assert_eq!(req.validate("secret1").unwrap_err(), "Please enter a valid email");
    }

    #[test]
    fn test_login_request_wire_shape() {
        let body = serde_json::to_value(LoginRequest {
            username: "u".into(),
            password: "p".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username": "u", "password": "p"}));
    }
}
