//! Travel distance estimation for the assignment form.

use actix_web::{HttpResponse, post, web};

use crate::auth::SessionAuth;
use crate::services::distance::{DistanceEstimate, DistanceRequest, estimate_request};
use crate::services::DistanceEstimator;

pub fn configure_logistics_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(estimate_distance);
}

/// Estimate the road distance between origin and destination.
///
/// With the built-in estimator the figure is simulated.
#[utoipa::path(
    post,
    path = "/api/v1/logistics/distance",
    tag = "Assignments",
    request_body = DistanceRequest,
    responses(
        (status = 200, description = "Estimated distance", body = DistanceEstimate)
    ),
    security(("session" = []))
)]
#[post("/logistics/distance")]
pub async fn estimate_distance(
    _auth: SessionAuth,
    estimator: web::Data<dyn DistanceEstimator>,
    body: web::Json<DistanceRequest>,
) -> HttpResponse {
    let estimate = estimate_request(estimator.get_ref(), &body);
    HttpResponse::Ok().json(estimate)
}
