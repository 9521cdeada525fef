//! Database operations for assignments.

use chrono::{NaiveDate, Utc};
use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use super::{profiles, service_types};
use crate::entity::assignment;
use crate::error::{AppError, AppResult};
use crate::models::assignment::{AssignmentView, ValidAssignment};
use crate::models::calendar::CalendarEvent;
use crate::models::checklist::MachineModel;
use crate::models::workflow::{AssignmentState, AssignmentStatus, TransitionError};

pub async fn insert(db: &DatabaseConnection, input: &ValidAssignment) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let model = assignment::ActiveModel {
        id: Set(id),
        technician_id: Set(input.technician_id),
        service_type_id: Set(input.service_type_id),
        client_name: Set(input.client_name.clone()),
        client_location: Set(Some(input.client_location.clone())),
        origin_location: Set(Some(input.origin_location.clone())),
        distance_km: Set(Some(input.distance_km)),
        machine_model: Set(input.machine_model.clone()),
        machine_serial: Set(input.machine_serial.clone()),
        notes: Set(Some(input.notes.clone())),
        status: Set(AssignmentStatus::Open.as_str().to_string()),
        assigned_at: Set(input.assigned_at),
        due_date: Set(input.due_date),
        finished_report_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    assignment::Entity::insert(model).exec(db).await?;
    Ok(id)
}

/// Overwrite the editable fields. Status and report link are untouched.
pub async fn update_details(
    db: &DatabaseConnection,
    id: Uuid,
    input: &ValidAssignment,
) -> AppResult<()> {
    let existing = find(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment".to_string()))?;

    let mut active: assignment::ActiveModel = existing.into();
    active.technician_id = Set(input.technician_id);
    active.service_type_id = Set(input.service_type_id);
    active.client_name = Set(input.client_name.clone());
    active.client_location = Set(Some(input.client_location.clone()));
    active.origin_location = Set(Some(input.origin_location.clone()));
    active.distance_km = Set(Some(input.distance_km));
    active.machine_model = Set(input.machine_model.clone());
    active.machine_serial = Set(input.machine_serial.clone());
    active.notes = Set(Some(input.notes.clone()));
    active.assigned_at = Set(input.assigned_at);
    active.due_date = Set(input.due_date);
    active.updated_at = Set(Utc::now());
    active.update(db).await?;

    Ok(())
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<assignment::Model>> {
    Ok(assignment::Entity::find_by_id(id).one(db).await?)
}

/// Persist a transition, but only if the row still has `expected` status.
///
/// Returns `false` when another request changed the row first.
pub async fn apply_transition(
    db: &DatabaseConnection,
    id: Uuid,
    expected: AssignmentStatus,
    next: AssignmentState,
) -> AppResult<bool> {
    let result = assignment::Entity::update_many()
        .col_expr(
            assignment::Column::Status,
            Expr::value(next.status().as_str()),
        )
        .col_expr(
            assignment::Column::FinishedReportId,
            Expr::value(next.finished_report_id()),
        )
        .col_expr(assignment::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(assignment::Column::Id.eq(id))
        .filter(assignment::Column::Status.eq(expected.as_str()))
        .exec(db)
        .await;

    match result {
        Ok(r) => Ok(r.rows_affected == 1),
        Err(e) => Err(transition_write_error(e.sql_err(), e)),
    }
}

fn transition_write_error(sql_err: Option<SqlErr>, err: DbErr) -> AppError {
    match sql_err {
        // Another assignment linked the same report first.
        Some(SqlErr::UniqueConstraintViolation(_)) => TransitionError::ReportAlreadyLinked.into(),
        _ => err.into(),
    }
}

/// Filters for [`list_views`].
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub technician_id: Option<Uuid>,
    /// Only these statuses when non-empty.
    pub statuses: Vec<AssignmentStatus>,
}

/// Assignments with display names, latest start first.
pub async fn list_views(
    db: &DatabaseConnection,
    filter: &AssignmentFilter,
) -> AppResult<Vec<AssignmentView>> {
    let mut query = assignment::Entity::find();
    if let Some(tech) = filter.technician_id {
        query = query.filter(assignment::Column::TechnicianId.eq(tech));
    }
    if !filter.statuses.is_empty() {
        query = query.filter(
            assignment::Column::Status.is_in(filter.statuses.iter().map(|s| s.as_str())),
        );
    }
    let rows = query
        .order_by_desc(assignment::Column::AssignedAt)
        .order_by_desc(assignment::Column::CreatedAt)
        .all(db)
        .await?;

    to_views(db, rows).await
}

pub async fn find_view(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<AssignmentView>> {
    match find(db, id).await? {
        Some(row) => Ok(to_views(db, vec![row]).await?.into_iter().next()),
        None => Ok(None),
    }
}

/// Non-cancelled assignments as calendar events, earliest start first.
///
/// With `range`, only events overlapping `[first, last]` are loaded.
pub async fn list_calendar_events(
    db: &DatabaseConnection,
    technician_id: Option<Uuid>,
    range: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<CalendarEvent>> {
    let mut query = assignment::Entity::find()
        .filter(assignment::Column::Status.ne(AssignmentStatus::Cancelled.as_str()));
    if let Some(tech) = technician_id {
        query = query.filter(assignment::Column::TechnicianId.eq(tech));
    }
    if let Some((first, last)) = range {
        query = query.filter(assignment::Column::AssignedAt.lte(last)).filter(
            Condition::any()
                .add(assignment::Column::DueDate.gte(first))
                .add(
                    Condition::all()
                        .add(assignment::Column::DueDate.is_null())
                        .add(assignment::Column::AssignedAt.gte(first)),
                ),
        );
    }
    let rows = query
        .order_by_asc(assignment::Column::AssignedAt)
        .order_by_asc(assignment::Column::CreatedAt)
        .all(db)
        .await?;

    let views = to_views(db, rows).await?;
    Ok(views
        .into_iter()
        .map(|v| CalendarEvent {
            id: v.id,
            title: non_empty(v.client_name).unwrap_or_else(|| "Sin Cliente".to_string()),
            machine: non_empty(v.machine_model).unwrap_or_else(|| "N/A".to_string()),
            location: v.client_location,
            start: v.assigned_at,
            end: v.due_date.unwrap_or(v.assigned_at),
            status: v.status,
            technician_id: v.technician_id,
            technician_name: v
                .technician_name
                .unwrap_or_else(|| "Sin Técnico".to_string()),
            service_type: v
                .service_type_name
                .unwrap_or_else(|| "Servicio General".to_string()),
        })
        .collect())
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() { None } else { Some(s) }
}

async fn to_views(
    db: &DatabaseConnection,
    rows: Vec<assignment::Model>,
) -> AppResult<Vec<AssignmentView>> {
    let mut technician_ids: Vec<Uuid> = rows.iter().map(|r| r.technician_id).collect();
    technician_ids.sort();
    technician_ids.dedup();
    let mut type_ids: Vec<Uuid> = rows.iter().map(|r| r.service_type_id).collect();
    type_ids.sort();
    type_ids.dedup();

    let technicians = profiles::names_by_id(db, &technician_ids).await?;
    let types = service_types::names_by_id(db, &type_ids).await?;

    rows.into_iter()
        .map(|m| {
            let status = AssignmentStatus::parse(&m.status).ok_or_else(|| {
                AppError::Database(format!("Unknown status '{}' on assignment {}", m.status, m.id))
            })?;
            Ok(AssignmentView {
                technician_name: technicians.get(&m.technician_id).cloned().flatten(),
                service_type_name: types.get(&m.service_type_id).cloned(),
                checklist_model: MachineModel::from_machine_text(&m.machine_model),
                id: m.id,
                technician_id: m.technician_id,
                service_type_id: m.service_type_id,
                client_name: m.client_name,
                client_location: m.client_location,
                origin_location: m.origin_location,
                distance_km: m.distance_km,
                machine_model: m.machine_model,
                machine_serial: m.machine_serial,
                notes: m.notes,
                status,
                assigned_at: m.assigned_at,
                due_date: m.due_date,
                finished_report_id: m.finished_report_id,
                created_at: m.created_at,
            })
        })
        .collect()
}
