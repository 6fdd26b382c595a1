//! # API crate: typed client for the LearnHub backend
//!
//! Every frontend package talks to the LMS backend through this crate. It owns
//! the JSON models, the HTTP boundary, the stored session and the quiz-attempt
//! workflow, and has no UI dependency so all of it is testable on its own.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`models`] | Backend JSON shapes (`User`, `Topic`, `Quiz`, `QuizAttempt`, ...) and pure helpers over them |
//! | [`transport`] | [`Transport`] trait and the `reqwest`-backed [`HttpTransport`] |
//! | [`session`] | Access/refresh tokens and the cached user on top of a [`store::KeyValueStore`] |
//! | [`client`] | [`ApiClient`]: bearer auth, one refresh-and-retry on 401, status mapping |
//! | [`endpoints`] | One accessor per resource group (`client.quizzes().get(id)`) |
//! | [`quiz_session`] | Attempt state machine: start, resume, answer, timer, submit |
//! | [`analytics`] | Per-quiz statistics, rankings, sorting and CSV export |
//!
//! ## Usage
//!
//! ```ignore
//! let transport = HttpTransport::new(&config.api)?;
//! let client = ApiClient::new(transport, LocalStore::new());
//! let auth = client.auth().login(&LoginRequest {
//!     username: "ada".into(),
//!     password: "secret".into(),
//! }).await?;
//! let topics = client.topics().list(true).await?;
//! ```

pub mod analytics;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod quiz_session;
pub mod session;
pub mod transport;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use error::{guest_login_error_message, login_error_message, ApiError, GENERIC_ERROR_MESSAGE};
pub use session::Session;
pub use transport::{HttpTransport, Transport};

pub use store::ClientConfig;
