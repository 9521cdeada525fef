use actix_web::test;
use chrono::Utc;
use field_service_lib::auth::password::hash_password;
use field_service_lib::config::SESSION_COOKIE;
use field_service_lib::entity::profile;
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::{Value, json};
use uuid::Uuid;

use super::test_helpers::create_test_app_with_db;

fn technician(password: &str) -> profile::Model {
    let now = Utc::now();
    profile::Model {
        id: Uuid::new_v4(),
        email: "tecnico@crucianelli.com".to_string(),
        full_name: Some("Juan Pérez".to_string()),
        role: "mecanico".to_string(),
        password_hash: hash_password(password),
        created_at: now,
        updated_at: now,
    }
}

async fn login(rows: Vec<profile::Model>, email: &str, password: &str) -> (u16, Value, bool) {
    let conn = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([rows])
        .into_connection();
    let app = create_test_app_with_db(conn).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    let has_cookie = resp
        .response()
        .cookies()
        .any(|c| c.name() == SESSION_COOKIE && !c.value().is_empty());
    (status, test::read_body_json(resp).await, has_cookie)
}

#[actix_rt::test]
async fn test_login_sets_session_cookie() {
    let (status, body, has_cookie) = login(
        vec![technician("secreto1")],
        " Tecnico@Crucianelli.com ",
        "secreto1",
    )
    .await;

    assert_eq!(status, 200);
    assert!(body["token"].is_string());
    assert!(has_cookie);
}

#[actix_rt::test]
async fn test_unknown_email_and_wrong_password_look_the_same() {
    let (unknown_status, unknown_body, unknown_cookie) =
        login(vec![], "nadie@crucianelli.com", "secreto1").await;
    let (wrong_status, wrong_body, wrong_cookie) =
        login(vec![technician("secreto1")], "tecnico@crucianelli.com", "otra-clave").await;

    assert_eq!(unknown_status, 401);
    assert_eq!(wrong_status, 401);
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(unknown_body["error"], "UNAUTHORIZED");
    assert!(!unknown_cookie && !wrong_cookie);
}

#[actix_rt::test]
async fn test_signup_is_closed_by_default() {
    let conn = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let app = create_test_app_with_db(conn).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/signup")
        .set_json(json!({
            "email": "coordinacion@crucianelli.com",
            "password": "secreto1",
            "full_name": "Ana Gómez"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 403);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "FORBIDDEN");
}
