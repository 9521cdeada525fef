//! Sign-up, login, logout and current-user endpoints.

use actix_web::cookie::{Cookie, SameSite, time::Duration as CookieDuration};
use actix_web::{HttpResponse, get, post, web};
use tracing::{info, warn};

use crate::auth::password::{dummy_hash, hash_password_blocking, verify_password_blocking};
use crate::auth::{RequestContext, SessionAuth, SessionKeys};
use crate::config::{Config, SESSION_COOKIE};
use crate::db::{DbPool, profiles};
use crate::error::{AppError, AppResult};
use crate::models::profile::{LoginRequest, LoginResponse, SignupRequest, normalize_email};
use crate::models::{MessageResponse, Profile, Role};

const BAD_CREDENTIALS: &str = "Correo o contraseña incorrectos.";

/// Configure auth routes.
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup)
        .service(login)
        .service(logout)
        .service(me);
}

fn session_cookie(value: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(secure);
    cookie.set_max_age(CookieDuration::seconds(max_age_secs));
    cookie
}

/// Create a coordinator account.
///
/// POST /api/v1/auth/signup
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = Profile),
        (status = 403, description = "Sign-up disabled", body = crate::error::ErrorResponse),
        (status = 409, description = "E-mail already registered", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/signup")]
pub async fn signup(
    config: web::Data<Config>,
    body: web::Json<SignupRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    if !config.allow_signup {
        return Err(AppError::Forbidden(
            "El registro público está deshabilitado.".to_string(),
        ));
    }
    body.validate()?;

    let email = normalize_email(&body.email);
    let hash = hash_password_blocking(body.password.clone()).await?;
    let profile = profiles::insert(
        pool.connection(),
        &email,
        &body.full_name,
        Role::Coordinator,
        &hash,
    )
    .await?;

    info!(user_id = %profile.id, role = %profile.role, "Account signed up");
    Ok(HttpResponse::Created().json(profile))
}

/// Exchange e-mail and password for a session.
///
/// POST /api/v1/auth/login
///
/// The token is returned in the body and set as an HttpOnly cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 401, description = "Bad credentials", body = crate::error::ErrorResponse)
    )
)]
#[post("/auth/login")]
pub async fn login(
    config: web::Data<Config>,
    keys: web::Data<SessionKeys>,
    body: web::Json<LoginRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let email = normalize_email(&body.email);
    let credentials = profiles::find_credentials_by_email(pool.connection(), &email).await?;

    // Unknown e-mails still pay for one key derivation.
    let stored = credentials
        .as_ref()
        .map(|c| c.password_hash.clone())
        .unwrap_or_else(dummy_hash);
    let password_ok = verify_password_blocking(body.password.clone(), stored).await?;

    let credentials = match credentials {
        Some(c) if password_ok => c,
        Some(c) => {
            warn!(user_id = %c.profile.id, "Login rejected: wrong password");
            return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string()));
        }
        None => return Err(AppError::Unauthorized(BAD_CREDENTIALS.to_string())),
    };

    let profile = credentials.profile;
    let ctx = RequestContext {
        user_id: profile.id,
        full_name: profile.full_name.clone(),
        role: profile.role,
    };
    let (token, expires_at) = keys.issue(&ctx)?;

    info!(user_id = %profile.id, role = %profile.role, "Session started");

    let cookie = session_cookie(
        token.clone(),
        keys.ttl_secs() as i64,
        config.environment.is_production(),
    );
    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        token,
        expires_at,
        profile,
    }))
}

/// Clear the session cookie.
///
/// POST /api/v1/auth/logout
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
#[post("/auth/logout")]
pub async fn logout(config: web::Data<Config>) -> HttpResponse {
    let cookie = session_cookie(String::new(), 0, config.environment.is_production());
    HttpResponse::Ok()
        .cookie(cookie)
        .json(MessageResponse::new("Sesión cerrada."))
}

/// Profile of the caller.
///
/// GET /api/v1/auth/me
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Caller profile", body = Profile),
        (status = 401, description = "No session", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/auth/me")]
pub async fn me(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let profile = profiles::find_by_id(pool.connection(), auth.ctx.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("La sesión ya no es válida.".to_string()))?;
    Ok(HttpResponse::Ok().json(profile))
}
