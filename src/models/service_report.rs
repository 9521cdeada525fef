//! Service reports and the dashboard summaries built on them.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::assignment::AssignmentView;
use super::checklist::ChecklistResponse;

/// Service report as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceReport {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub client_name: String,
    pub machine_model: String,
    pub machine_serial: Option<String>,
    #[serde(rename = "type")]
    pub report_type: String,
    pub status: String,
    #[schema(value_type = Object)]
    pub checklist_data: BTreeMap<String, ChecklistResponse>,
    pub created_at: DateTime<Utc>,
}

/// Report joined with the technician's display name.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportDetail {
    #[serde(flatten)]
    pub report: ServiceReport,
    pub technician_name: Option<String>,
}

/// Finished report not yet linked to any assignment.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UnlinkedReport {
    pub id: Uuid,
    pub client_name: String,
    pub machine_model: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportCreatedResponse {
    pub message: String,
    pub report_id: Uuid,
}

/// Reports created in the current calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthlyKpi {
    pub monthly_count: u64,
    pub month_name: String,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListReportsQuery {
    pub technician_id: Option<Uuid>,
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub kpi: MonthlyKpi,
    pub recent_reports: Vec<ServiceReport>,
    pub active_assignments: Vec<AssignmentView>,
}

/// Reports shown on the dashboard.
pub const DASHBOARD_REPORT_LIMIT: u64 = 5;

const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Spanish, lowercase month name (`1` → `enero`).
pub fn spanish_month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

/// `[start, end)` instants of the calendar month containing `now`.
pub fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap_or(now.date_naive());
    // The 1st plus 32 days always lands in the next month.
    let next = (first + Duration::days(32)).with_day(1).unwrap_or(first);
    (
        Utc.from_utc_datetime(&first.and_time(chrono::NaiveTime::MIN)),
        Utc.from_utc_datetime(&next.and_time(chrono::NaiveTime::MIN)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_month_name() {
        assert_eq!(spanish_month_name(1), "enero");
        assert_eq!(spanish_month_name(9), "septiembre");
        assert_eq!(spanish_month_name(12), "diciembre");
        assert_eq!(spanish_month_name(0), "");
        assert_eq!(spanish_month_name(13), "");
    }

    #[test]
    fn test_month_bounds() {
        let now = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();
        let (start, end) = month_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());

        let now = Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap();
        let (start, end) = month_bounds(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert_eq!(end, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_report_detail_flattens() {
        let detail = ReportDetail {
            report: ServiceReport {
                id: Uuid::nil(),
                technician_id: Uuid::nil(),
                client_name: "Estancia".to_string(),
                machine_model: "drillor".to_string(),
                machine_serial: None,
                report_type: "Puesta en Marcha".to_string(),
                status: "finalizado".to_string(),
                checklist_data: BTreeMap::new(),
                created_at: Utc::now(),
            },
            technician_name: Some("Ana".to_string()),
        };
        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["type"], "Puesta en Marcha");
        assert_eq!(value["technician_name"], "Ana");
    }
}
