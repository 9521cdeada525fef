//! Assignment lifecycle: creation, edits and workflow transitions.
//!
//! Handlers authenticate the caller; this module decides whether the caller
//! may touch the assignment and drives [`AssignmentState::apply`].

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::auth::RequestContext;
use crate::db::{assignments, profiles, service_reports, service_types};
use crate::entity::assignment;
use crate::error::{AppError, AppResult};
use crate::models::assignment::{AssignmentActionResponse, AssignmentInput, ValidAssignment};
use crate::models::service_report::UnlinkedReport;
use crate::models::validation::FieldErrors;
use crate::models::workflow::{AssignmentState, AssignmentStatus, WorkflowAction};
use crate::models::{AssignmentView, Role};

/// Workflow action as requested over HTTP, before the report is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionRequest {
    Start,
    Complete { report_id: Uuid },
    Cancel,
}

const RACE_MESSAGE: &str =
    "La asignación fue modificada por otra operación. Recargue e intente nuevamente.";

/// Validate `input` and store a new open assignment.
pub async fn create(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    input: &AssignmentInput,
    default_origin: &str,
) -> AppResult<AssignmentActionResponse> {
    let valid = input.validate(Utc::now().date_naive(), default_origin)?;
    check_references(db, &valid).await?;

    let id = assignments::insert(db, &valid).await?;
    info!(
        assignment_id = %id,
        technician_id = %valid.technician_id,
        created_by = %ctx.user_id,
        "Assignment created"
    );

    Ok(AssignmentActionResponse {
        message: "Asignación creada correctamente.".to_string(),
        assignment: load_view(db, id).await?,
    })
}

/// Replace the editable fields of an existing assignment.
pub async fn update(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    id: Uuid,
    input: &AssignmentInput,
    default_origin: &str,
) -> AppResult<AssignmentActionResponse> {
    let row = load_row(db, id).await?;
    // The technician and the linked report must stay consistent once closed.
    let state = AssignmentState::from_row(parse_status(&row)?, row.finished_report_id)?;
    if state.is_terminal() {
        return Err(AppError::Conflict(format!(
            "No se puede editar una asignación en estado '{}'.",
            state.status()
        )));
    }

    let valid = input.validate(row.assigned_at, default_origin)?;
    check_references(db, &valid).await?;

    assignments::update_details(db, id, &valid).await?;
    info!(assignment_id = %id, updated_by = %ctx.user_id, "Assignment updated");

    Ok(AssignmentActionResponse {
        message: "Asignación actualizada correctamente.".to_string(),
        assignment: load_view(db, id).await?,
    })
}

/// Apply a workflow action to assignment `id` on behalf of `ctx`.
pub async fn transition(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    id: Uuid,
    request: ActionRequest,
) -> AppResult<AssignmentActionResponse> {
    let row = load_row(db, id).await?;

    match request {
        ActionRequest::Cancel if !ctx.is_coordinator() => {
            return Err(AppError::Forbidden(
                "Solo un coordinador puede cancelar una asignación.".to_string(),
            ));
        }
        _ => ctx.ensure_owner_or_coordinator(row.technician_id)?,
    }

    let status = parse_status(&row)?;
    let state = AssignmentState::from_row(status, row.finished_report_id)?;

    let action = match request {
        ActionRequest::Start => WorkflowAction::Start,
        ActionRequest::Cancel => WorkflowAction::Cancel,
        ActionRequest::Complete { report_id } => {
            let report = service_reports::find_candidate(db, report_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Reporte".to_string()))?;
            WorkflowAction::Complete { report }
        }
    };
    let action_name = action.name();

    let next = state.apply(action, row.technician_id)?;
    if !assignments::apply_transition(db, id, status, next).await? {
        return Err(AppError::Conflict(RACE_MESSAGE.to_string()));
    }

    info!(
        assignment_id = %id,
        action = action_name,
        from = %status,
        to = %next.status(),
        user_id = %ctx.user_id,
        "Assignment transition applied"
    );

    let message = match next {
        AssignmentState::InProgress => "Trabajo iniciado.",
        AssignmentState::Finished { .. } => "Asignación finalizada con el reporte enlazado.",
        AssignmentState::Cancelled => "Asignación cancelada.",
        AssignmentState::Open => "Asignación actualizada.",
    };

    Ok(AssignmentActionResponse {
        message: message.to_string(),
        assignment: load_view(db, id).await?,
    })
}

/// Finished reports of the assigned technician that can close assignment `id`.
pub async fn unlinked_reports(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    id: Uuid,
) -> AppResult<Vec<UnlinkedReport>> {
    let row = load_row(db, id).await?;
    ctx.ensure_owner_or_coordinator(row.technician_id)?;
    service_reports::list_unlinked(db, row.technician_id).await
}

/// Assignment details, visible to coordinators and the assigned technician.
pub async fn view(
    db: &DatabaseConnection,
    ctx: &RequestContext,
    id: Uuid,
) -> AppResult<AssignmentView> {
    let view = load_view(db, id).await?;
    ctx.ensure_owner_or_coordinator(view.technician_id)?;
    Ok(view)
}

async fn load_row(db: &DatabaseConnection, id: Uuid) -> AppResult<assignment::Model> {
    assignments::find(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment".to_string()))
}

async fn load_view(db: &DatabaseConnection, id: Uuid) -> AppResult<AssignmentView> {
    assignments::find_view(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Assignment".to_string()))
}

fn parse_status(row: &assignment::Model) -> AppResult<AssignmentStatus> {
    AssignmentStatus::parse(&row.status).ok_or_else(|| {
        AppError::Database(format!(
            "Unknown status '{}' on assignment {}",
            row.status, row.id
        ))
    })
}

/// The technician must be a technician profile and the service type must exist.
async fn check_references(db: &DatabaseConnection, valid: &ValidAssignment) -> AppResult<()> {
    let mut errors = FieldErrors::default();

    match profiles::find_by_id(db, valid.technician_id).await? {
        Some(p) if p.role == Role::Technician => {}
        _ => errors.add("technician_id", "Debe seleccionar un técnico válido."),
    }
    if !service_types::exists(db, valid.service_type_id).await? {
        errors.add("service_type_id", "Debe seleccionar un tipo de servicio.");
    }

    Ok(errors.finish()?)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    use super::*;
    use crate::entity::service_report;

    fn ctx(role: Role) -> RequestContext {
        RequestContext {
            user_id: Uuid::new_v4(),
            full_name: None,
            role,
        }
    }

    fn row(status: AssignmentStatus, technician_id: Uuid) -> assignment::Model {
        let now = Utc::now();
        assignment::Model {
            id: Uuid::new_v4(),
            technician_id,
            service_type_id: Uuid::new_v4(),
            client_name: "Agro Los Pinos".to_string(),
            client_location: Some("Rafaela".to_string()),
            origin_location: Some("Planta Crucianelli, Armstrong".to_string()),
            distance_km: Some(120.0),
            machine_model: "Drillor 32".to_string(),
            machine_serial: Some("DR-0042".to_string()),
            notes: None,
            status: status.as_str().to_string(),
            assigned_at: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            due_date: None,
            finished_report_id: match status {
                AssignmentStatus::Finished => Some(Uuid::new_v4()),
                _ => None,
            },
            created_at: now,
            updated_at: now,
        }
    }

    fn db_with(row: &assignment::Model) -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres).append_query_results([vec![row.clone()]])
    }

    #[actix_rt::test]
    async fn test_technician_cannot_cancel_own_assignment() {
        let tech = ctx(Role::Technician);
        let row = row(AssignmentStatus::Open, tech.user_id);
        let db = db_with(&row).into_connection();

        let err = transition(&db, &tech, row.id, ActionRequest::Cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[actix_rt::test]
    async fn test_technician_cannot_start_someone_elses_assignment() {
        let tech = ctx(Role::Technician);
        let row = row(AssignmentStatus::Open, Uuid::new_v4());
        let db = db_with(&row).into_connection();

        let err = transition(&db, &tech, row.id, ActionRequest::Start)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[actix_rt::test]
    async fn test_complete_with_missing_report_is_not_found() {
        let tech = ctx(Role::Technician);
        let row = row(AssignmentStatus::InProgress, tech.user_id);
        let db = db_with(&row)
            .append_query_results([Vec::<service_report::Model>::new()])
            .into_connection();

        let err = transition(
            &db,
            &tech,
            row.id,
            ActionRequest::Complete {
                report_id: Uuid::new_v4(),
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref what) if what == "Reporte"));
        // Nothing was written.
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[actix_rt::test]
    async fn test_illegal_transition_writes_nothing() {
        let coordinator = ctx(Role::Coordinator);
        let row = row(AssignmentStatus::Cancelled, Uuid::new_v4());
        let db = db_with(&row).into_connection();

        let err = transition(&db, &coordinator, row.id, ActionRequest::Start)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[actix_rt::test]
    async fn test_losing_a_race_is_a_conflict() {
        let coordinator = ctx(Role::Coordinator);
        let row = row(AssignmentStatus::Open, Uuid::new_v4());
        let db = db_with(&row)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = transition(&db, &coordinator, row.id, ActionRequest::Start)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref msg) if msg == RACE_MESSAGE));
        // Select plus the conditional update; the view is not reloaded.
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[actix_rt::test]
    async fn test_store_failure_during_transition_is_reported() {
        let coordinator = ctx(Role::Coordinator);
        let row = row(AssignmentStatus::InProgress, Uuid::new_v4());
        let db = db_with(&row)
            .append_exec_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let err = transition(&db, &coordinator, row.id, ActionRequest::Cancel)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Database(_)));
    }

    #[actix_rt::test]
    async fn test_closed_assignments_cannot_be_edited() {
        let coordinator = ctx(Role::Coordinator);

        for status in [AssignmentStatus::Finished, AssignmentStatus::Cancelled] {
            let row = row(status, Uuid::new_v4());
            let db = db_with(&row).into_connection();
            let input = AssignmentInput {
                technician_id: Uuid::new_v4().to_string(),
                ..AssignmentInput::default()
            };

            let err = update(&db, &coordinator, row.id, &input, "Armstrong")
                .await
                .unwrap_err();

            assert!(
                matches!(err, AppError::Conflict(ref msg) if msg.contains(status.as_str())),
                "expected conflict for {}",
                status
            );
            assert_eq!(db.into_transaction_log().len(), 1);
        }
    }
}
