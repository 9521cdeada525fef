//! Startup checklist templates and submission.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use tracing::info;
use utoipa::IntoParams;

use crate::auth::SessionAuth;
use crate::db::{DbPool, service_reports};
use crate::error::{AppError, AppResult};
use crate::models::checklist::{
    ChecklistTemplate, MachineModel, StartupChecklistInput, template_for_machine,
};
use crate::models::service_report::ReportCreatedResponse;

pub fn configure_checklist_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_checklists)
        .service(submit_startup)
        .service(get_checklist);
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChecklistsQuery {
    /// Free-text machine model; narrows the list to the matching template.
    pub machine: Option<String>,
}

/// Available checklist templates.
#[utoipa::path(
    get,
    path = "/api/v1/checklists",
    tag = "Checklists",
    params(ChecklistsQuery),
    responses(
        (status = 200, description = "Templates", body = Vec<ChecklistTemplate>)
    ),
    security(("session" = []))
)]
#[get("/checklists")]
pub async fn list_checklists(
    _auth: SessionAuth,
    query: web::Query<ChecklistsQuery>,
) -> HttpResponse {
    let templates = match query.machine.as_deref() {
        Some(machine) => vec![template_for_machine(machine)],
        None => vec![
            MachineModel::Drillor.template(),
            MachineModel::Plantor.template(),
        ],
    };
    HttpResponse::Ok().json(templates)
}

/// One template by model (`drillor` or `plantor`).
#[utoipa::path(
    get,
    path = "/api/v1/checklists/{model}",
    tag = "Checklists",
    params(("model" = String, Path, description = "drillor | plantor")),
    responses(
        (status = 200, description = "Template", body = ChecklistTemplate),
        (status = 404, description = "Unknown model", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/checklists/{model}")]
pub async fn get_checklist(_auth: SessionAuth, path: web::Path<String>) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let model = MachineModel::parse(&raw)
        .ok_or_else(|| AppError::NotFound(format!("Checklist '{}'", raw)))?;
    Ok(HttpResponse::Ok().json(model.template()))
}

/// Submit a startup checklist. Stored as a finished report of the caller.
#[utoipa::path(
    post,
    path = "/api/v1/checklists/startup",
    tag = "Checklists",
    request_body = StartupChecklistInput,
    responses(
        (status = 201, description = "Report stored", body = ReportCreatedResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/checklists/startup")]
pub async fn submit_startup(
    auth: SessionAuth,
    body: web::Json<StartupChecklistInput>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let checklist = body.validate()?;
    let report_id =
        service_reports::insert_startup(pool.connection(), auth.ctx.user_id, &checklist).await?;

    info!(
        report_id = %report_id,
        technician_id = %auth.ctx.user_id,
        machine_model = %checklist.machine_model,
        "Startup checklist submitted"
    );

    Ok(HttpResponse::Created().json(ReportCreatedResponse {
        message: "Reporte generado exitosamente.".to_string(),
        report_id,
    }))
}
