//! User CRUD HTTP handlers.
//!
//! ```text
//! GET    /api/users
//! GET    /api/users/{id}
//! POST   /api/users
//! PUT    /api/users/{id}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::{User, UserId};
use crate::inbound::http::error::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_payload;

/// Request payload for creating or updating a user.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    /// The user's name; required, validated server-side.
    pub name: Option<String>,
    /// The user's email address; required, validated server-side.
    pub email: Option<String>,
}

/// List all users in insertion order.
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<User>>> {
    Ok(web::Json(state.users.list().await))
}

/// Fetch a single user by id.
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    let user = state.users.find(id).await?;
    Ok(web::Json(user))
}

/// Create a user from a validated name/email pair.
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let UserPayload { name, email } = payload.into_inner();
    let draft = parse_user_payload(name, email)?;
    let user = state.users.create(draft).await;
    Ok(HttpResponse::Created().json(user))
}

/// Replace an existing user's name and email.
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
    payload: web::Json<UserPayload>,
) -> ApiResult<web::Json<User>> {
    let id = UserId::new(path.into_inner());
    let UserPayload { name, email } = payload.into_inner();
    let draft = parse_user_payload(name, email)?;
    let user = state.users.update(id, draft).await?;
    Ok(web::Json(user))
}

/// Delete a user by id.
///
/// Deleting an id that no longer exists returns 404 rather than succeeding
/// silently, so repeated deletes are observable to clients.
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let id = UserId::new(path.into_inner());
    state.users.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
