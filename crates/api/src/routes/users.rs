//! User routes: OTP issuance, registration, login and profile lookup.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::UserView;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::SessionUser;
use crate::services::users::{Registration, UserService, UserServiceError};

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Business(e) => ApiError::Business(e),
            UserServiceError::RateLimited(retry_after_secs) => {
                ApiError::RateLimited { retry_after_secs }
            }
            UserServiceError::PhoneTaken => {
                ApiError::Conflict("Phone number already registered".to_string())
            }
            UserServiceError::Database(e) => ApiError::from(e),
            UserServiceError::Password(e) => ApiError::Internal(format!("Password error: {}", e)),
        }
    }
}

fn user_service(state: &AppState) -> UserService {
    UserService::new(
        state.pool.clone(),
        state.sessions.clone(),
        state.otp_limiter.clone(),
        &state.config,
    )
}

/// Request body for an OTP.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpRequest {
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub telphone: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpResponse {
    pub telphone: String,
    /// Only present when `otp.expose_code` is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
}

/// Issue a registration code.
///
/// POST /api/v1/users/otp
pub async fn request_otp(
    State(state): State<AppState>,
    Json(request): Json<OtpRequest>,
) -> Result<Json<OtpResponse>, ApiError> {
    request.validate()?;

    let issued = user_service(&state).request_otp(&request.telphone).await?;

    Ok(Json(OtpResponse {
        telphone: issued.telphone,
        otp_code: state.config.otp.expose_code.then_some(issued.code),
    }))
}

/// Request body for registration.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(custom(function = "shared::validation::validate_phone"))]
    pub telphone: String,

    #[validate(custom(function = "shared::validation::validate_otp_code"))]
    pub otp_code: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i32,

    #[validate(custom(function = "shared::validation::validate_gender"))]
    pub gender: i16,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

impl From<RegisterRequest> for Registration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            telphone: request.telphone,
            otp_code: request.otp_code,
            name: request.name.trim().to_string(),
            gender: request.gender,
            age: request.age,
            password: request.password,
        }
    }
}

/// Register with a previously issued code.
///
/// POST /api/v1/users/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserView>), ApiError> {
    request.validate()?;

    let user = user_service(&state).register(request.into()).await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Request body for login. Emptiness is checked by the service so that
/// it reports the parameter-validation business code.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub telphone: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserView,
}

/// Log in with phone number and password.
///
/// POST /api/v1/users/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = user_service(&state)
        .login(&request.telphone, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        token: result.token.0,
        token_type: "Bearer".to_string(),
        expires_in: result.expires_in,
        user: result.user.into(),
    }))
}

/// End the caller's session.
///
/// POST /api/v1/users/logout
pub async fn logout(State(state): State<AppState>, user: SessionUser) -> StatusCode {
    user_service(&state).logout(&user.token).await;
    StatusCode::NO_CONTENT
}

/// GET /api/v1/users/me
pub async fn get_current_user(
    State(state): State<AppState>,
    user: SessionUser,
) -> Result<Json<UserView>, ApiError> {
    let user = user_service(&state).get_user(user.user_id).await?;
    Ok(Json(user.into()))
}

/// GET /api/v1/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserView>, ApiError> {
    let user = user_service(&state).get_user(id).await?;
    Ok(Json(user.into()))
}
