//! Business error taxonomy shared by services and the HTTP layer.

use thiserror::Error;

/// Errors a caller can act on. Each variant carries a stable numeric code
/// that clients use to branch on the failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusinessError {
    #[error("{0}")]
    ParameterValidation(String),

    #[error("Unknown error")]
    Unknown,

    #[error("User does not exist")]
    UserNotExist,

    #[error("Phone number or password is incorrect")]
    UserLoginFail,

    #[error("User is not logged in")]
    UserNotLogin,

    #[error("Stock is not enough")]
    StockNotEnough,
}

impl BusinessError {
    /// Shorthand for a parameter validation failure.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::ParameterValidation(msg.into())
    }

    /// Stable numeric code exposed to clients.
    pub fn code(&self) -> u32 {
        match self {
            BusinessError::ParameterValidation(_) => 10001,
            BusinessError::Unknown => 10002,
            BusinessError::UserNotExist => 20001,
            BusinessError::UserLoginFail => 20002,
            BusinessError::UserNotLogin => 20003,
            BusinessError::StockNotEnough => 30001,
        }
    }
}
