//! Custom Axum extractors.

pub mod session_user;

pub use session_user::{session_token_from_headers, SessionUser, SESSION_TOKEN_HEADER};
