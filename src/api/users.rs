//! User administration and technician listing.

use actix_web::{HttpResponse, get, post, web};
use tracing::info;

use crate::auth::password::hash_password_blocking;
use crate::auth::{CoordinatorAuth, SessionAuth};
use crate::db::{DbPool, profiles};
use crate::error::AppResult;
use crate::models::profile::{CreateUserRequest, normalize_email};
use crate::models::{Profile, TechnicianOption};

/// Configure user routes.
pub fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_users)
        .service(create_user)
        .service(list_technicians);
}

/// Every profile, by name.
///
/// GET /api/v1/users
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    responses(
        (status = 200, description = "All profiles", body = Vec<Profile>),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/users")]
pub async fn list_users(_auth: CoordinatorAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let users = profiles::list_all(pool.connection()).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Create a user (technician unless another role is given).
///
/// POST /api/v1/users
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = Profile),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 409, description = "E-mail already registered", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/users")]
pub async fn create_user(
    auth: CoordinatorAuth,
    body: web::Json<CreateUserRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    body.validate()?;

    let email = normalize_email(&body.email);
    let hash = hash_password_blocking(body.password.clone()).await?;
    let profile = profiles::insert(pool.connection(), &email, &body.full_name, body.role, &hash)
        .await?;

    info!(
        user_id = %profile.id,
        role = %profile.role,
        created_by = %auth.ctx.user_id,
        "User created"
    );
    Ok(HttpResponse::Created().json(profile))
}

/// Technicians for assignment dropdowns.
///
/// GET /api/v1/technicians
#[utoipa::path(
    get,
    path = "/api/v1/technicians",
    tag = "Users",
    responses(
        (status = 200, description = "Technicians by name", body = Vec<TechnicianOption>)
    ),
    security(("session" = []))
)]
#[get("/technicians")]
pub async fn list_technicians(
    _auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let technicians: Vec<TechnicianOption> = profiles::list_technicians(pool.connection())
        .await?
        .into_iter()
        .map(TechnicianOption::from)
        .collect();
    Ok(HttpResponse::Ok().json(technicians))
}
