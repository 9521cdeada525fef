//! Field calculators: seed density and the speed-limit lookup chain.

use actix_web::{HttpResponse, get, post, web};

use crate::auth::SessionAuth;
use crate::db::{DbPool, seed_lookup};
use crate::error::AppResult;
use crate::models::calculators::{
    LookupOption, PlatesQuery, PopulationsQuery, ROW_SPACING_OPTIONS, SeedDensityRequest,
    SeedDensityResult, SpacingsQuery, SpeedCheckRequest, SpeedVerdict, SpeedsQuery,
    speed_verdict,
};

/// Configure calculator routes.
pub fn configure_calculator_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(seed_density)
        .service(row_spacings)
        .service(list_crops)
        .service(list_plates)
        .service(list_spacings)
        .service(list_populations)
        .service(list_speeds)
        .service(speed_check);
}

/// Convert between seeds per metre and seeds per hectare.
#[utoipa::path(
    post,
    path = "/api/v1/calculators/seed-density",
    tag = "Calculators",
    request_body = SeedDensityRequest,
    responses(
        (status = 200, description = "Converted density", body = SeedDensityResult),
        (status = 422, description = "Non-positive input", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/calculators/seed-density")]
pub async fn seed_density(
    _auth: SessionAuth,
    body: web::Json<SeedDensityRequest>,
) -> AppResult<HttpResponse> {
    let result = body.calculate()?;
    Ok(HttpResponse::Ok().json(result))
}

/// Row spacings offered by the density calculator, in metres.
#[utoipa::path(
    get,
    path = "/api/v1/calculators/row-spacings",
    tag = "Calculators",
    responses(
        (status = 200, description = "Row spacings in metres", body = Vec<f64>)
    ),
    security(("session" = []))
)]
#[get("/calculators/row-spacings")]
pub async fn row_spacings(_auth: SessionAuth) -> HttpResponse {
    HttpResponse::Ok().json(ROW_SPACING_OPTIONS)
}

#[utoipa::path(
    get,
    path = "/api/v1/calculators/crops",
    tag = "Calculators",
    responses(
        (status = 200, description = "Crops", body = Vec<LookupOption>)
    ),
    security(("session" = []))
)]
#[get("/calculators/crops")]
pub async fn list_crops(_auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let crops = seed_lookup::crops(pool.connection()).await?;
    Ok(HttpResponse::Ok().json(crops))
}

#[utoipa::path(
    get,
    path = "/api/v1/calculators/plates",
    tag = "Calculators",
    params(("crop_id" = uuid::Uuid, Query, description = "Crop UUID")),
    responses(
        (status = 200, description = "Plates for the crop", body = Vec<LookupOption>)
    ),
    security(("session" = []))
)]
#[get("/calculators/plates")]
pub async fn list_plates(
    _auth: SessionAuth,
    query: web::Query<PlatesQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let plates = seed_lookup::plates(pool.connection(), query.crop_id).await?;
    Ok(HttpResponse::Ok().json(plates))
}

#[utoipa::path(
    get,
    path = "/api/v1/calculators/spacings",
    tag = "Calculators",
    params(("plate_id" = uuid::Uuid, Query, description = "Plate UUID")),
    responses(
        (status = 200, description = "Row spacings for the plate, narrowest first", body = Vec<LookupOption>)
    ),
    security(("session" = []))
)]
#[get("/calculators/spacings")]
pub async fn list_spacings(
    _auth: SessionAuth,
    query: web::Query<SpacingsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let spacings = seed_lookup::spacings(pool.connection(), query.plate_id).await?;
    Ok(HttpResponse::Ok().json(spacings))
}

#[utoipa::path(
    get,
    path = "/api/v1/calculators/populations",
    tag = "Calculators",
    params(
        ("spacing_id" = uuid::Uuid, Query, description = "Row spacing UUID"),
        ("plate_id" = uuid::Uuid, Query, description = "Plate UUID")
    ),
    responses(
        (status = 200, description = "Populations, lowest first", body = Vec<LookupOption>)
    ),
    security(("session" = []))
)]
#[get("/calculators/populations")]
pub async fn list_populations(
    _auth: SessionAuth,
    query: web::Query<PopulationsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let populations =
        seed_lookup::populations(pool.connection(), query.spacing_id, query.plate_id).await?;
    Ok(HttpResponse::Ok().json(populations))
}

#[utoipa::path(
    get,
    path = "/api/v1/calculators/speeds",
    tag = "Calculators",
    params(
        ("population_id" = uuid::Uuid, Query, description = "Population UUID"),
        ("spacing_id" = uuid::Uuid, Query, description = "Row spacing UUID")
    ),
    responses(
        (status = 200, description = "Speed values, slowest first", body = Vec<String>)
    ),
    security(("session" = []))
)]
#[get("/calculators/speeds")]
pub async fn list_speeds(
    _auth: SessionAuth,
    query: web::Query<SpeedsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let speeds =
        seed_lookup::speeds(pool.connection(), query.population_id, query.spacing_id).await?;
    Ok(HttpResponse::Ok().json(speeds))
}

/// Whether a working speed is within the limit for a configuration.
#[utoipa::path(
    post,
    path = "/api/v1/calculators/speed-check",
    tag = "Calculators",
    request_body = SpeedCheckRequest,
    responses(
        (status = 200, description = "Verdict", body = SpeedVerdict)
    ),
    security(("session" = []))
)]
#[post("/calculators/speed-check")]
pub async fn speed_check(
    _auth: SessionAuth,
    body: web::Json<SpeedCheckRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let result = seed_lookup::speed_result(
        pool.connection(),
        body.population_id,
        body.spacing_id,
        body.speed_value.trim(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(speed_verdict(result.as_deref())))
}
