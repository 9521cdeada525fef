//! Session and role checks that run before any database access.

use actix_web::cookie::Cookie;
use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use field_service_lib::auth::{RequestContext, SessionKeys};
use field_service_lib::config::SESSION_COOKIE;
use field_service_lib::models::Role;
use secrecy::SecretString;
use serde_json::{Value, json};
use uuid::Uuid;

use super::test_helpers::{bearer, bearer_with, create_test_app, session_keys};

#[actix_rt::test]
async fn test_requests_without_session_get_401() {
    let app = create_test_app().await;

    for uri in [
        "/api/v1/assignments",
        "/api/v1/technicians",
        "/api/v1/reports",
        "/api/v1/dashboard",
        "/api/v1/calendar/month",
        "/api/v1/library",
        "/api/v1/checklists",
        "/api/v1/auth/me",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 401, "expected 401 for {}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
    }
}

#[actix_rt::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = create_test_app().await;
    let foreign = SessionKeys::new(SecretString::from("some-other-secret".to_string()), 3600);

    let req = test::TestRequest::get()
        .uri("/api/v1/checklists")
        .insert_header((AUTHORIZATION, bearer_with(&foreign, Role::Coordinator)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 401);
}

#[actix_rt::test]
async fn test_session_cookie_is_accepted() {
    let app = create_test_app().await;
    let ctx = RequestContext {
        user_id: Uuid::new_v4(),
        full_name: None,
        role: Role::Technician,
    };
    let (token, _) = session_keys().issue(&ctx).unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/checklists")
        .cookie(Cookie::new(SESSION_COOKIE, token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_rt::test]
async fn test_technician_gets_403_on_coordinator_routes() {
    let app = create_test_app().await;
    let id = Uuid::new_v4();

    let requests = vec![
        test::TestRequest::get().uri("/api/v1/users"),
        test::TestRequest::post().uri("/api/v1/users").set_json(json!({
            "email": "nuevo@crucianelli.com",
            "fullName": "Nuevo Técnico",
            "password": "secreto1"
        })),
        test::TestRequest::post()
            .uri("/api/v1/assignments")
            .set_json(json!({})),
        test::TestRequest::put()
            .uri(&format!("/api/v1/assignments/{}", id))
            .set_json(json!({})),
        test::TestRequest::post().uri(&format!("/api/v1/assignments/{}/cancel", id)),
        test::TestRequest::post()
            .uri("/api/v1/library")
            .set_json(json!({ "name": "Manuales", "type": "folder" })),
        test::TestRequest::patch()
            .uri(&format!("/api/v1/library/{}", id))
            .set_json(json!({ "name": "Otro nombre" })),
        test::TestRequest::delete().uri(&format!("/api/v1/library/{}", id)),
    ];

    for builder in requests {
        let req = builder
            .insert_header((AUTHORIZATION, bearer(Role::Technician)))
            .to_request();
        let path = req.uri().path().to_string();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 403, "expected 403 for {}", path);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "FORBIDDEN");
    }
}
