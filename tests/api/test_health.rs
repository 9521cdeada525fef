use actix_web::test;
use field_service_lib::api::ApiDoc;
use serde_json::Value;
use utoipa::OpenApi;

use super::test_helpers::create_test_app;

#[actix_rt::test]
async fn test_health_needs_no_session() {
    let app = create_test_app().await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

#[actix_rt::test]
async fn test_openapi_lists_workflow_routes() {
    let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
    let paths = &doc["paths"];

    for path in [
        "/api/v1/assignments",
        "/api/v1/assignments/{id}/start",
        "/api/v1/assignments/{id}/cancel",
        "/api/v1/assignments/{id}/complete",
        "/api/v1/calendar/month",
        "/api/v1/checklists/startup",
        "/api/v1/library/{id}",
        "/api/v1/calculators/speed-check",
    ] {
        assert!(paths[path].is_object(), "missing path {}", path);
    }
    assert!(doc["components"]["securitySchemes"]["session"].is_object());
}
