//! Database operations for service reports.

use chrono::{DateTime, Utc};
use sea_orm::sea_query::Query;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::{assignment, service_report};
use crate::error::{AppError, AppResult};
use crate::models::checklist::{STARTUP_SERVICE_TYPE, ValidChecklist};
use crate::models::service_report::{ServiceReport, UnlinkedReport};
use crate::models::workflow::{FINISHED_REPORT_STATUS, ReportCandidate};

/// Store a submitted startup checklist as a finished report.
pub async fn insert_startup(
    db: &DatabaseConnection,
    technician_id: Uuid,
    checklist: &ValidChecklist,
) -> AppResult<Uuid> {
    let id = Uuid::new_v4();
    let model = service_report::ActiveModel {
        id: Set(id),
        technician_id: Set(technician_id),
        client_name: Set(checklist.client_name.clone()),
        machine_model: Set(checklist.machine_model.as_str().to_string()),
        machine_serial: Set(Some(checklist.machine_serial.clone())),
        report_type: Set(STARTUP_SERVICE_TYPE.to_string()),
        status: Set(FINISHED_REPORT_STATUS.to_string()),
        checklist_data: Set(serde_json::to_value(&checklist.responses)?),
        created_at: Set(Utc::now()),
    };

    service_report::Entity::insert(model).exec(db).await?;
    Ok(id)
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<ServiceReport>> {
    let result = service_report::Entity::find_by_id(id).one(db).await?;
    result.map(model_to_report).transpose()
}

/// Reports newest first, optionally for one technician.
pub async fn list(
    db: &DatabaseConnection,
    technician_id: Option<Uuid>,
    limit: Option<u64>,
) -> AppResult<Vec<ServiceReport>> {
    let mut query = service_report::Entity::find();
    if let Some(tech) = technician_id {
        query = query.filter(service_report::Column::TechnicianId.eq(tech));
    }
    let rows = query
        .order_by_desc(service_report::Column::CreatedAt)
        .limit(limit)
        .all(db)
        .await?;
    rows.into_iter().map(model_to_report).collect()
}

/// Finished reports of `technician_id` that no assignment links yet.
pub async fn list_unlinked(
    db: &DatabaseConnection,
    technician_id: Uuid,
) -> AppResult<Vec<UnlinkedReport>> {
    let linked = Query::select()
        .column(assignment::Column::FinishedReportId)
        .from(assignment::Entity)
        .and_where(assignment::Column::FinishedReportId.is_not_null())
        .to_owned();

    let rows = service_report::Entity::find()
        .filter(service_report::Column::TechnicianId.eq(technician_id))
        .filter(service_report::Column::Status.eq(FINISHED_REPORT_STATUS))
        .filter(service_report::Column::Id.not_in_subquery(linked))
        .order_by_desc(service_report::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|m| UnlinkedReport {
            id: m.id,
            client_name: m.client_name,
            machine_model: m.machine_model,
            created_at: m.created_at,
        })
        .collect())
}

/// Load a report as a completion candidate, including whether any assignment
/// already links it.
pub async fn find_candidate<C: ConnectionTrait>(
    db: &C,
    report_id: Uuid,
) -> AppResult<Option<ReportCandidate>> {
    let Some(report) = service_report::Entity::find_by_id(report_id).one(db).await? else {
        return Ok(None);
    };

    let links = assignment::Entity::find()
        .filter(assignment::Column::FinishedReportId.eq(report_id))
        .count(db)
        .await?;

    Ok(Some(ReportCandidate {
        id: report.id,
        technician_id: report.technician_id,
        status: report.status,
        already_linked: links > 0,
    }))
}

/// Number of reports created in `[start, end)`.
pub async fn count_created_between(
    db: &DatabaseConnection,
    technician_id: Option<Uuid>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> AppResult<u64> {
    let mut query = service_report::Entity::find()
        .filter(service_report::Column::CreatedAt.gte(start))
        .filter(service_report::Column::CreatedAt.lt(end));
    if let Some(tech) = technician_id {
        query = query.filter(service_report::Column::TechnicianId.eq(tech));
    }
    Ok(query.count(db).await?)
}

fn model_to_report(m: service_report::Model) -> AppResult<ServiceReport> {
    let checklist_data = serde_json::from_value(m.checklist_data).map_err(|e| {
        AppError::Database(format!("Corrupt checklist data on report {}: {}", m.id, e))
    })?;
    Ok(ServiceReport {
        id: m.id,
        technician_id: m.technician_id,
        client_name: m.client_name,
        machine_model: m.machine_model,
        machine_serial: m.machine_serial,
        report_type: m.report_type,
        status: m.status,
        checklist_data,
        created_at: m.created_at,
    })
}
