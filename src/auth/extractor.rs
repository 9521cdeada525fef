//! Actix-web extractors for session authentication.
//!
//! The session token is read from `Authorization: Bearer <token>` first and
//! from the session cookie second. Place these extractors before any
//! `web::Data<DbPool>` argument so unauthenticated requests are rejected
//! without touching the database.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use std::future::{Ready, ready};

use super::{RequestContext, SessionKeys};
use crate::config::SESSION_COOKIE;
use crate::error::ErrorResponse;

/// Session token carried by the request, if any.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    bearer.or_else(|| {
        req.cookie(SESSION_COOKIE)
            .map(|c| c.value().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Authentication error for extractors.
#[derive(Debug)]
pub struct AuthError {
    status: StatusCode,
    message: String,
}

impl AuthError {
    fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let code = if self.status == StatusCode::FORBIDDEN {
            "FORBIDDEN"
        } else {
            "UNAUTHORIZED"
        };
        HttpResponse::build(self.status).json(ErrorResponse::new(code, self.message.clone()))
    }
}

fn authenticate(req: &HttpRequest) -> Result<RequestContext, AuthError> {
    let keys = req
        .app_data::<web::Data<SessionKeys>>()
        .ok_or_else(|| AuthError::unauthorized("Internal configuration error"))?;

    let token = session_token(req)
        .ok_or_else(|| AuthError::unauthorized("No autenticado. Inicie sesión."))?;

    keys.verify(&token).map_err(AuthError::unauthorized)
}

/// Extractor that requires a valid session.
///
/// ```ignore
/// async fn handler(auth: SessionAuth) -> impl Responder {
///     // auth.ctx identifies the caller
/// }
/// ```
pub struct SessionAuth {
    pub ctx: RequestContext,
}

impl FromRequest for SessionAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(|ctx| SessionAuth { ctx }))
    }
}

/// Extractor that requires a coordinator session.
pub struct CoordinatorAuth {
    pub ctx: RequestContext,
}

impl FromRequest for CoordinatorAuth {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|ctx| {
            if ctx.is_coordinator() {
                Ok(CoordinatorAuth { ctx })
            } else {
                Err(AuthError::forbidden("Acción reservada a coordinadores."))
            }
        });
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use secrecy::SecretString;
    use uuid::Uuid;

    use crate::models::Role;

    fn keys() -> SessionKeys {
        SessionKeys::new(SecretString::from("extractor-secret".to_string()), 600)
    }

    fn token(role: Role) -> String {
        let ctx = RequestContext {
            user_id: Uuid::new_v4(),
            full_name: Some("Luis".to_string()),
            role,
        };
        keys().issue(&ctx).unwrap().0
    }

    #[test]
    fn test_bearer_preferred_over_cookie() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer header-token"))
            .cookie(Cookie::new(SESSION_COOKIE, "cookie-token"))
            .to_http_request();
        assert_eq!(session_token(&req).as_deref(), Some("header-token"));

        let req = TestRequest::default()
            .cookie(Cookie::new(SESSION_COOKIE, "cookie-token"))
            .to_http_request();
        assert_eq!(session_token(&req).as_deref(), Some("cookie-token"));

        let req = TestRequest::default().to_http_request();
        assert_eq!(session_token(&req), None);
    }

    #[test]
    fn test_missing_session_is_unauthorized() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .to_http_request();
        let err = authenticate(&req).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[actix_rt::test]
    async fn test_coordinator_extractor_rejects_technician() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .insert_header((AUTHORIZATION, format!("Bearer {}", token(Role::Technician))))
            .to_http_request();

        let err = CoordinatorAuth::extract(&req).await.err().unwrap();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let auth = SessionAuth::extract(&req).await.ok().unwrap();
        assert_eq!(auth.ctx.role, Role::Technician);
    }

    #[actix_rt::test]
    async fn test_coordinator_extractor_accepts_coordinator() {
        let req = TestRequest::default()
            .app_data(web::Data::new(keys()))
            .insert_header((AUTHORIZATION, format!("Bearer {}", token(Role::Coordinator))))
            .to_http_request();

        let auth = CoordinatorAuth::extract(&req).await.ok().unwrap();
        assert!(auth.ctx.is_coordinator());
    }
}
