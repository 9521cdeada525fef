use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use field_service_lib::models::Role;
use serde_json::Value;

use super::test_helpers::{bearer, create_test_app};

async fn get_json(uri: &str) -> (u16, Value) {
    let app = create_test_app().await;
    let req = test::TestRequest::get()
        .uri(uri)
        .insert_header((AUTHORIZATION, bearer(Role::Technician)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    (status, test::read_body_json(resp).await)
}

#[actix_rt::test]
async fn test_list_checklists_returns_both_templates() {
    let (status, body) = get_json("/api/v1/checklists").await;
    assert_eq!(status, 200);

    let models: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["model"].as_str().unwrap())
        .collect();
    assert_eq!(models, vec!["drillor", "plantor"]);
}

#[actix_rt::test]
async fn test_machine_text_selects_template() {
    let (_, body) = get_json("/api/v1/checklists?machine=Drillor%2032").await;
    let templates = body.as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["model"], "drillor");

    let (_, body) = get_json("/api/v1/checklists?machine=Sembradora%20neum%C3%A1tica").await;
    assert_eq!(body[0]["model"], "plantor");
}

#[actix_rt::test]
async fn test_get_checklist_by_model() {
    let (status, body) = get_json("/api/v1/checklists/drillor").await;
    assert_eq!(status, 200);
    assert_eq!(body["model"], "drillor");
    assert_eq!(body["items"].as_array().unwrap().len(), 36);

    let (status, body) = get_json("/api/v1/checklists/plantor").await;
    assert_eq!(status, 200);
    assert_eq!(body["items"].as_array().unwrap().len(), 28);

    let first = &body["items"][0];
    assert!(first["id"].is_string());
    assert!(first["category"].is_string());
    assert!(first["label"].is_string());
}

#[actix_rt::test]
async fn test_unknown_checklist_model_is_404() {
    let (status, body) = get_json("/api/v1/checklists/sembradora").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}
