use std::sync::Arc;

use actix_web::http::header::AUTHORIZATION;
use actix_web::test;
use field_service_lib::models::Role;
use field_service_lib::services::DistanceEstimator;
use field_service_lib::services::distance::{DistanceEstimate, SIMULATED_KM};
use serde_json::{Value, json};

use super::test_helpers::{bearer, create_test_app, create_test_app_with};

struct FixedDistance(u32);

impl DistanceEstimator for FixedDistance {
    fn estimate(&self, _origin: &str, _destination: &str) -> DistanceEstimate {
        DistanceEstimate {
            km: self.0,
            error: None,
            message: None,
        }
    }
}

#[actix_rt::test]
async fn test_simulated_distance_is_in_range() {
    let app = create_test_app().await;
    let req = test::TestRequest::post()
        .uri("/api/v1/logistics/distance")
        .insert_header((AUTHORIZATION, bearer(Role::Coordinator)))
        .set_json(json!({ "origin": "Armstrong", "destination": "Pergamino" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let body: Value = test::read_body_json(resp).await;
    let km = body["km"].as_u64().unwrap() as u32;
    assert!(SIMULATED_KM.contains(&km));
    assert!(body.get("error").is_none());
}

#[actix_rt::test]
async fn test_missing_destination_returns_zero() {
    let app = create_test_app().await;
    let req = test::TestRequest::post()
        .uri("/api/v1/logistics/distance")
        .insert_header((AUTHORIZATION, bearer(Role::Coordinator)))
        .set_json(json!({ "origin": "Armstrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["km"], 0);
    assert_eq!(body["error"], "Faltan ubicaciones para calcular.");
}

#[actix_rt::test]
async fn test_estimator_is_pluggable() {
    let app = create_test_app_with(Arc::new(FixedDistance(237))).await;
    let req = test::TestRequest::post()
        .uri("/api/v1/logistics/distance")
        .insert_header((AUTHORIZATION, bearer(Role::Technician)))
        .set_json(json!({ "origin": "Armstrong", "destination": "Rafaela" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["km"], 237);
}
