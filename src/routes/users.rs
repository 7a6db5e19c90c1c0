//! User route handlers
//!
//! One handler per verb and path, each backed by a single repository call.

use crate::error::{user_not_found, ApiResult, AppError};
use crate::models::{User, UserPayload};
use crate::state::SharedState;
use axum::{
    extract::{FromRequest, Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use axum_extra::extract::WithRejection;
use tracing::{debug, info};

type UserId = WithRejection<Path<i32>, AppError>;

/// JSON request body; a request that isn't JSON reads as `{}`
pub struct UserBody(pub UserPayload);

impl<S> FromRequest<S> for UserBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json(req.headers()) {
            return Ok(Self(UserPayload::default()));
        }

        let Json(payload) = Json::<UserPayload>::from_request(req, state).await?;
        Ok(Self(payload))
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// POST /users
pub async fn create_user(
    State(state): State<SharedState>,
    UserBody(payload): UserBody,
) -> ApiResult<(StatusCode, Json<User>)> {
    debug!("Creating user: {:?}", payload.name);

    let user = state
        .users
        .create(payload.name.as_deref(), payload.profession.as_deref())
        .await?;

    info!("User created (id: {})", user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /users
///
/// An empty table answers 404, same as a missing row.
pub async fn list_users(State(state): State<SharedState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    debug!("Found {} users", users.len());

    if users.is_empty() {
        return Err(user_not_found());
    }
    Ok(Json(users))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<SharedState>,
    WithRejection(Path(id), _): UserId,
) -> ApiResult<Json<User>> {
    debug!("Getting user: {}", id);

    state
        .users
        .find_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(user_not_found)
}

/// PUT /users/{id}
pub async fn update_user(
    State(state): State<SharedState>,
    WithRejection(Path(id), _): UserId,
    UserBody(payload): UserBody,
) -> ApiResult<Json<User>> {
    debug!("Updating user: {}", id);

    let user = state
        .users
        .update(id, payload.name.as_deref(), payload.profession.as_deref())
        .await?
        .ok_or_else(user_not_found)?;

    info!("User updated (id: {})", user.id);
    Ok(Json(user))
}

/// DELETE /users/{id}
pub async fn delete_user(
    State(state): State<SharedState>,
    WithRejection(Path(id), _): UserId,
) -> ApiResult<Json<User>> {
    debug!("Deleting user: {}", id);

    let user = state
        .users
        .delete(id)
        .await?
        .ok_or_else(user_not_found)?;

    info!("User deleted (id: {})", user.id);
    Ok(Json(user))
}
