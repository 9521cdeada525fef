//! Assignment endpoints: CRUD plus workflow actions.

use actix_web::{HttpResponse, get, post, put, web};
use uuid::Uuid;

use crate::auth::{CoordinatorAuth, SessionAuth};
use crate::config::Config;
use crate::db::DbPool;
use crate::db::assignments::{self, AssignmentFilter};
use crate::error::AppResult;
use crate::models::AssignmentView;
use crate::models::assignment::{
    AssignmentActionResponse, AssignmentInput, CompleteAssignmentRequest, ListAssignmentsQuery,
};
use crate::models::service_report::UnlinkedReport;
use crate::services::assignments::{self as workflow, ActionRequest};

/// Configure assignment routes.
pub fn configure_assignment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_assignments)
        .service(create_assignment)
        .service(start_assignment)
        .service(cancel_assignment)
        .service(complete_assignment)
        .service(list_unlinked_reports)
        .service(get_assignment)
        .service(update_assignment);
}

/// List assignments, latest start first.
///
/// GET /assignments?technician_id=
///
/// Technicians always get their own; coordinators may filter by technician.
#[utoipa::path(
    get,
    path = "/api/v1/assignments",
    tag = "Assignments",
    params(
        ("technician_id" = Option<Uuid>, Query, description = "Only this technician (coordinators)")
    ),
    responses(
        (status = 200, description = "Assignments", body = Vec<AssignmentView>),
        (status = 401, description = "No session", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/assignments")]
pub async fn list_assignments(
    auth: SessionAuth,
    query: web::Query<ListAssignmentsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let filter = AssignmentFilter {
        technician_id: auth.ctx.technician_scope(query.technician_id),
        statuses: Vec::new(),
    };
    let views = assignments::list_views(pool.connection(), &filter).await?;
    Ok(HttpResponse::Ok().json(views))
}

/// Create an assignment.
///
/// POST /assignments
#[utoipa::path(
    post,
    path = "/api/v1/assignments",
    tag = "Assignments",
    request_body = AssignmentInput,
    responses(
        (status = 201, description = "Assignment created", body = AssignmentActionResponse),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/assignments")]
pub async fn create_assignment(
    auth: CoordinatorAuth,
    body: web::Json<AssignmentInput>,
    config: web::Data<Config>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let response =
        workflow::create(pool.connection(), &auth.ctx, &body, &config.default_origin).await?;
    Ok(HttpResponse::Created().json(response))
}

/// Assignment details.
///
/// GET /assignments/{id}
#[utoipa::path(
    get,
    path = "/api/v1/assignments/{id}",
    tag = "Assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    responses(
        (status = 200, description = "Assignment", body = AssignmentView),
        (status = 403, description = "Assigned to another technician", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/assignments/{id}")]
pub async fn get_assignment(
    auth: SessionAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let view = workflow::view(pool.connection(), &auth.ctx, id).await?;
    Ok(HttpResponse::Ok().json(view))
}

/// Edit an assignment. Status and report link are not editable here.
///
/// PUT /assignments/{id}
#[utoipa::path(
    put,
    path = "/api/v1/assignments/{id}",
    tag = "Assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    request_body = AssignmentInput,
    responses(
        (status = 200, description = "Assignment updated", body = AssignmentActionResponse),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[put("/assignments/{id}")]
pub async fn update_assignment(
    auth: CoordinatorAuth,
    path: web::Path<String>,
    body: web::Json<AssignmentInput>,
    config: web::Data<Config>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let response =
        workflow::update(pool.connection(), &auth.ctx, id, &body, &config.default_origin).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Start work on an open assignment.
///
/// POST /assignments/{id}/start
#[utoipa::path(
    post,
    path = "/api/v1/assignments/{id}/start",
    tag = "Assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    responses(
        (status = 200, description = "Assignment in progress", body = AssignmentActionResponse),
        (status = 403, description = "Assigned to another technician", body = crate::error::ErrorResponse),
        (status = 409, description = "Not open, or changed concurrently", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/assignments/{id}/start")]
pub async fn start_assignment(
    auth: SessionAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let response =
        workflow::transition(pool.connection(), &auth.ctx, id, ActionRequest::Start).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Cancel an assignment that is not finished.
///
/// POST /assignments/{id}/cancel
#[utoipa::path(
    post,
    path = "/api/v1/assignments/{id}/cancel",
    tag = "Assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    responses(
        (status = 200, description = "Assignment cancelled", body = AssignmentActionResponse),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 409, description = "Already terminal, or changed concurrently", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/assignments/{id}/cancel")]
pub async fn cancel_assignment(
    auth: CoordinatorAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let response =
        workflow::transition(pool.connection(), &auth.ctx, id, ActionRequest::Cancel).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Close an in-progress assignment with a finished report.
///
/// POST /assignments/{id}/complete
#[utoipa::path(
    post,
    path = "/api/v1/assignments/{id}/complete",
    tag = "Assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    request_body = CompleteAssignmentRequest,
    responses(
        (status = 200, description = "Assignment finished", body = AssignmentActionResponse),
        (status = 403, description = "Assigned to another technician", body = crate::error::ErrorResponse),
        (status = 404, description = "Report not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Report rejected or illegal transition", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/assignments/{id}/complete")]
pub async fn complete_assignment(
    auth: SessionAuth,
    path: web::Path<String>,
    body: web::Json<CompleteAssignmentRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let request = ActionRequest::Complete {
        report_id: body.report_id,
    };
    let response = workflow::transition(pool.connection(), &auth.ctx, id, request).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Finished reports of the assigned technician not yet linked anywhere.
///
/// GET /assignments/{id}/unlinked-reports
#[utoipa::path(
    get,
    path = "/api/v1/assignments/{id}/unlinked-reports",
    tag = "Assignments",
    params(("id" = String, Path, description = "Assignment UUID")),
    responses(
        (status = 200, description = "Candidate reports", body = Vec<UnlinkedReport>),
        (status = 403, description = "Assigned to another technician", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/assignments/{id}/unlinked-reports")]
pub async fn list_unlinked_reports(
    auth: SessionAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let reports = workflow::unlinked_reports(pool.connection(), &auth.ctx, id).await?;
    Ok(HttpResponse::Ok().json(reports))
}
