use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        jwt::{AuthUser, JwtKeys},
        password,
    },
    error::ApiError,
    state::AppState,
    users::dto::{
        DashboardResponse, LoginRequest, LoginResponse, MessageResponse, SignupRequest,
        UpdateRequest,
    },
    users::repo::User,
};

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/update", put(update_profile))
        .route("/delete", delete(delete_account))
}

fn required_field(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::MissingField(field)),
    }
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let name = required_field(payload.name, "name")?;
    let email = required_field(payload.email, "email")?;
    let password = required_field(payload.password, "password")?;

    let hash = password::hash_password(&password)?;

    // Email normalization and duplicate detection happen in the store.
    let user = User::create(&state.db, name.trim(), &email, &hash, payload.photo.as_deref())
        .await?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Account created, please log in".into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = payload.email.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    let user = match User::find_by_email(&state.db, &email).await? {
        Some(u) => u,
        None => {
            warn!("login with unknown email");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !password::verify_password(&password, &user.password_hash)? {
        warn!(user_id = %user.id, "login with wrong password");
        return Err(ApiError::InvalidCredentials);
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id)?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(LoginResponse {
        token,
        name: user.name,
    }))
}

#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "token references a deleted user");
            ApiError::NotFound
        })?;

    Ok(Json(DashboardResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        photo: user.photo,
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    // A stale token pointing at a deleted user updates zero rows; the
    // response is still 200.
    User::update_profile(
        &state.db,
        user_id,
        payload.name.as_deref(),
        payload.photo.as_deref(),
    )
    .await?;

    info!(user_id = %user_id, "profile updated");
    Ok(Json(MessageResponse {
        message: "Profile updated".into(),
    }))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    User::delete(&state.db, user_id).await?;

    info!(user_id = %user_id, "account deleted");
    Ok(Json(MessageResponse {
        message: "Account deleted".into(),
    }))
}
