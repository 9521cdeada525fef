//! Service report endpoints and the dashboard summary.

use actix_web::{HttpResponse, get, web};
use chrono::{Datelike, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::{RequestContext, SessionAuth};
use crate::db::assignments::{self, AssignmentFilter};
use crate::db::{DbPool, profiles, service_reports};
use crate::error::{AppError, AppResult};
use crate::models::service_report::{
    DASHBOARD_REPORT_LIMIT, DashboardSummary, ListReportsQuery, MonthlyKpi, ReportDetail,
    month_bounds, spanish_month_name,
};
use crate::models::{AssignmentStatus, ServiceReport};

/// Configure report routes.
/// Note: `/reports/kpis` must be registered before `/reports/{id}`.
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_reports)
        .service(monthly_kpis)
        .service(get_report)
        .service(dashboard);
}

/// Reports newest first. Technicians only see their own.
#[utoipa::path(
    get,
    path = "/api/v1/reports",
    tag = "Reports",
    params(
        ("technician_id" = Option<Uuid>, Query, description = "Only this technician (coordinators)"),
        ("limit" = Option<u64>, Query, description = "Maximum number of reports")
    ),
    responses(
        (status = 200, description = "Reports", body = Vec<ServiceReport>)
    ),
    security(("session" = []))
)]
#[get("/reports")]
pub async fn list_reports(
    auth: SessionAuth,
    query: web::Query<ListReportsQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let scope = auth.ctx.technician_scope(query.technician_id);
    let reports = service_reports::list(pool.connection(), scope, query.limit).await?;
    Ok(HttpResponse::Ok().json(reports))
}

/// Reports created this calendar month.
#[utoipa::path(
    get,
    path = "/api/v1/reports/kpis",
    tag = "Reports",
    responses(
        (status = 200, description = "Monthly count", body = MonthlyKpi)
    ),
    security(("session" = []))
)]
#[get("/reports/kpis")]
pub async fn monthly_kpis(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let kpi = monthly_kpi(pool.connection(), &auth.ctx).await?;
    Ok(HttpResponse::Ok().json(kpi))
}

/// Report details with the technician's name.
#[utoipa::path(
    get,
    path = "/api/v1/reports/{id}",
    tag = "Reports",
    params(("id" = String, Path, description = "Report UUID")),
    responses(
        (status = 200, description = "Report", body = ReportDetail),
        (status = 403, description = "Another technician's report", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/reports/{id}")]
pub async fn get_report(
    auth: SessionAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let conn = pool.connection();

    let report = service_reports::find_by_id(conn, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {}", id)))?;
    auth.ctx.ensure_owner_or_coordinator(report.technician_id)?;

    let technician_name = profiles::find_by_id(conn, report.technician_id)
        .await?
        .and_then(|p| p.full_name);

    Ok(HttpResponse::Ok().json(ReportDetail {
        report,
        technician_name,
    }))
}

/// KPI, latest reports and the caller's active assignments.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "Reports",
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardSummary)
    ),
    security(("session" = []))
)]
#[get("/dashboard")]
pub async fn dashboard(auth: SessionAuth, pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let conn = pool.connection();
    let scope = auth.ctx.technician_scope(None);

    let kpi = monthly_kpi(conn, &auth.ctx).await?;
    let recent_reports = service_reports::list(conn, scope, Some(DASHBOARD_REPORT_LIMIT)).await?;
    let active_assignments = assignments::list_views(
        conn,
        &AssignmentFilter {
            technician_id: Some(auth.ctx.user_id),
            statuses: vec![AssignmentStatus::Open, AssignmentStatus::InProgress],
        },
    )
    .await?;

    Ok(HttpResponse::Ok().json(DashboardSummary {
        kpi,
        recent_reports,
        active_assignments,
    }))
}

async fn monthly_kpi(db: &DatabaseConnection, ctx: &RequestContext) -> AppResult<MonthlyKpi> {
    let now = Utc::now();
    let (start, end) = month_bounds(now);
    let monthly_count =
        service_reports::count_created_between(db, ctx.technician_scope(None), start, end).await?;
    Ok(MonthlyKpi {
        monthly_count,
        month_name: spanish_month_name(now.month()).to_string(),
    })
}
