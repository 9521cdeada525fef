//! Calendar of assignments: raw events, month grid and day details.

use actix_web::{HttpResponse, get, web};
use chrono::{NaiveDate, Utc};

use crate::auth::SessionAuth;
use crate::db::{DbPool, assignments};
use crate::error::{AppError, AppResult};
use crate::models::calendar::{
    CalendarEvent, CalendarQuery, DayDetails, MonthGrid, MonthView, events_for_day,
    parse_calendar_date, project_month,
};

pub fn configure_calendar_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_events).service(month_view).service(day_view);
}

/// `date` from the query, or today.
fn requested_day(query: &CalendarQuery) -> AppResult<NaiveDate> {
    match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => parse_calendar_date(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("Fecha inválida: {}", raw))),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Every non-cancelled assignment as an event, earliest first.
#[utoipa::path(
    get,
    path = "/api/v1/calendar/events",
    tag = "Calendar",
    params(
        ("technician_id" = Option<uuid::Uuid>, Query, description = "Only this technician (coordinators)")
    ),
    responses(
        (status = 200, description = "Calendar events", body = Vec<CalendarEvent>)
    ),
    security(("session" = []))
)]
#[get("/calendar/events")]
pub async fn list_events(
    auth: SessionAuth,
    query: web::Query<CalendarQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let scope = auth.ctx.technician_scope(query.technician_id);
    let events = assignments::list_calendar_events(pool.connection(), scope, None).await?;
    Ok(HttpResponse::Ok().json(events))
}

/// Month grid containing `date`, Monday to Sunday rows.
#[utoipa::path(
    get,
    path = "/api/v1/calendar/month",
    tag = "Calendar",
    params(
        ("date" = Option<String>, Query, description = "Any date in the month (default: today)"),
        ("technician_id" = Option<uuid::Uuid>, Query, description = "Only this technician (coordinators)")
    ),
    responses(
        (status = 200, description = "Month grid", body = MonthView),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/calendar/month")]
pub async fn month_view(
    auth: SessionAuth,
    query: web::Query<CalendarQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let grid = MonthGrid::containing(requested_day(&query)?);
    let scope = auth.ctx.technician_scope(query.technician_id);

    let events = assignments::list_calendar_events(
        pool.connection(),
        scope,
        Some((grid.first_day, grid.last_day)),
    )
    .await?;

    let view = project_month(&events, &grid, Utc::now().date_naive());
    Ok(HttpResponse::Ok().json(view))
}

/// Every event covering one day.
#[utoipa::path(
    get,
    path = "/api/v1/calendar/day",
    tag = "Calendar",
    params(
        ("date" = Option<String>, Query, description = "The day (default: today)"),
        ("technician_id" = Option<uuid::Uuid>, Query, description = "Only this technician (coordinators)")
    ),
    responses(
        (status = 200, description = "Events of the day", body = DayDetails),
        (status = 400, description = "Invalid date", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/calendar/day")]
pub async fn day_view(
    auth: SessionAuth,
    query: web::Query<CalendarQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let day = requested_day(&query)?;
    let scope = auth.ctx.technician_scope(query.technician_id);

    let events =
        assignments::list_calendar_events(pool.connection(), scope, Some((day, day))).await?;
    let events = events_for_day(&events, day).into_iter().cloned().collect();

    Ok(HttpResponse::Ok().json(DayDetails { date: day, events }))
}
