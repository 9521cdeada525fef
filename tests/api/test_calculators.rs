use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use field_service_lib::models::Role;
use serde_json::{Value, json};

use super::test_helpers::{bearer, create_test_app};

async fn post_density(body: Value) -> (u16, Value) {
    let app = create_test_app().await;
    let req = test::TestRequest::post()
        .uri("/api/v1/calculators/seed-density")
        .insert_header((AUTHORIZATION, bearer(Role::Technician)))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status().as_u16();
    (status, test::read_body_json(resp).await)
}

#[actix_rt::test]
async fn test_seed_density_to_hectare() {
    let (status, body) = post_density(json!({
        "mode": "to_hectare",
        "value": 5.0,
        "row_spacing_m": 0.5
    }))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["mode"], "to_hectare");
    assert_eq!(body["result"], 100000.0);
    assert_eq!(body["seed_distance_cm"], 20.0);
}

#[actix_rt::test]
async fn test_seed_density_to_meter() {
    let (status, body) = post_density(json!({
        "mode": "to_meter",
        "value": 100000.0,
        "row_spacing_m": 0.5
    }))
    .await;

    assert_eq!(status, 200);
    assert_eq!(body["result"], 5.0);
    assert_eq!(body["seed_distance_cm"], 20.0);
}

#[actix_rt::test]
async fn test_seed_density_rejects_non_positive_input() {
    let (status, body) = post_density(json!({
        "mode": "to_hectare",
        "value": 0.0,
        "row_spacing_m": -0.52
    }))
    .await;

    assert_eq!(status, 422);
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["errors"]["value"].is_array());
    assert!(body["errors"]["row_spacing_m"].is_array());
}

#[actix_rt::test]
async fn test_row_spacing_options() {
    let app = create_test_app().await;
    let req = test::TestRequest::get()
        .uri("/api/v1/calculators/row-spacings")
        .insert_header((AUTHORIZATION, bearer(Role::Technician)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Vec<f64> = test::read_body_json(resp).await;
    assert_eq!(body.len(), 5);
    assert!(body.windows(2).all(|w| w[0] < w[1]));
}
