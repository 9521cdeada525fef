//! Service type catalogue.

use actix_web::{HttpResponse, get, web};

use crate::auth::SessionAuth;
use crate::db::service_types::{self, ServiceTypeOption};
use crate::db::DbPool;
use crate::error::AppResult;

pub fn configure_service_type_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_service_types);
}

/// Active service types.
#[utoipa::path(
    get,
    path = "/api/v1/service-types",
    tag = "Assignments",
    responses(
        (status = 200, description = "Active service types", body = Vec<ServiceTypeOption>)
    ),
    security(("session" = []))
)]
#[get("/service-types")]
pub async fn list_service_types(
    _auth: SessionAuth,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let types = service_types::list_active(pool.connection()).await?;
    Ok(HttpResponse::Ok().json(types))
}
