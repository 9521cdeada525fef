//! Assignment domain models and DTOs.
//!
//! [`AssignmentInput`] is the one payload shape for both creating and editing
//! an assignment; [`AssignmentInput::validate`] is the one validator.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::calendar::parse_calendar_date;
use super::checklist::MachineModel;
use super::validation::FieldErrors;
use super::workflow::AssignmentStatus;

/// Create/edit payload for an assignment.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AssignmentInput {
    pub technician_id: String,
    pub service_type_id: String,
    pub client_name: String,
    pub machine_model: String,
    #[serde(default)]
    pub machine_serial: Option<String>,
    pub client_location: String,
    #[serde(default)]
    pub origin_location: Option<String>,
    #[serde(default)]
    pub distance_km: Option<f64>,
    pub notes: String,
    /// Start date (`YYYY-MM-DD`, a timestamp prefix is accepted).
    #[serde(default)]
    pub assigned_at: Option<String>,
    /// End date (`YYYY-MM-DD`, a timestamp prefix is accepted).
    #[serde(default)]
    pub due_date: Option<String>,
}

/// An [`AssignmentInput`] that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidAssignment {
    pub technician_id: Uuid,
    pub service_type_id: Uuid,
    pub client_name: String,
    pub machine_model: String,
    pub machine_serial: Option<String>,
    pub client_location: String,
    pub origin_location: String,
    pub distance_km: f64,
    pub notes: String,
    pub assigned_at: NaiveDate,
    pub due_date: Option<NaiveDate>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl AssignmentInput {
    /// Validate the payload.
    ///
    /// `default_start` is used when `assigned_at` is absent (today on create,
    /// the stored start on edit); `default_origin` when `origin_location` is.
    pub fn validate(
        &self,
        default_start: NaiveDate,
        default_origin: &str,
    ) -> Result<ValidAssignment, FieldErrors> {
        let mut errors = FieldErrors::default();

        let technician_id = Uuid::parse_str(self.technician_id.trim()).ok();
        if technician_id.is_none() {
            errors.add("technician_id", "Debe seleccionar un técnico válido.");
        }
        let service_type_id = Uuid::parse_str(self.service_type_id.trim()).ok();
        if service_type_id.is_none() {
            errors.add("service_type_id", "Debe seleccionar un tipo de servicio.");
        }

        errors.min_chars(
            "client_name",
            &self.client_name,
            5,
            "El nombre del cliente es obligatorio (min. 5 chars).",
        );
        errors.min_chars(
            "machine_model",
            &self.machine_model,
            3,
            "El modelo de la máquina es obligatorio.",
        );
        let machine_serial = non_blank(&self.machine_serial).map(str::to_string);
        if let Some(serial) = &machine_serial {
            errors.min_chars(
                "machine_serial",
                serial,
                3,
                "El número de serie es obligatorio.",
            );
        }
        errors.min_chars(
            "client_location",
            &self.client_location,
            3,
            "La ubicación del cliente es obligatoria.",
        );
        errors.min_chars(
            "notes",
            &self.notes,
            10,
            "Debe incluir una descripción/notas de la falla (min. 10 chars).",
        );

        let distance_km = self.distance_km.unwrap_or(0.0);
        if !distance_km.is_finite() || distance_km < 0.0 {
            errors.add("distance_km", "La distancia no puede ser negativa.");
        }

        let assigned_at = match non_blank(&self.assigned_at) {
            Some(raw) => {
                let parsed = parse_calendar_date(raw);
                if parsed.is_none() {
                    errors.add("assigned_at", "Fecha de inicio inválida.");
                }
                parsed
            }
            None => Some(default_start),
        };
        let due_date = match non_blank(&self.due_date) {
            Some(raw) => {
                let parsed = parse_calendar_date(raw);
                if parsed.is_none() {
                    errors.add("due_date", "Fecha de finalización inválida.");
                }
                parsed
            }
            None => None,
        };
        if let (Some(start), Some(end)) = (assigned_at, due_date)
            && end < start
        {
            errors.add(
                "due_date",
                "La fecha de finalización no puede ser anterior a la de inicio.",
            );
        }

        errors.finish()?;

        // Every `None` above recorded an error, so these are all present.
        match (technician_id, service_type_id, assigned_at) {
            (Some(technician_id), Some(service_type_id), Some(assigned_at)) => {
                Ok(ValidAssignment {
                    technician_id,
                    service_type_id,
                    client_name: self.client_name.trim().to_string(),
                    machine_model: self.machine_model.trim().to_string(),
                    machine_serial,
                    client_location: self.client_location.trim().to_string(),
                    origin_location: non_blank(&self.origin_location)
                        .unwrap_or(default_origin)
                        .to_string(),
                    distance_km,
                    notes: self.notes.trim().to_string(),
                    assigned_at,
                    due_date,
                })
            }
            _ => {
                let mut errors = FieldErrors::default();
                errors.add("form", "Error de validación en el formulario.");
                Err(errors)
            }
        }
    }
}

/// Assignment as returned by the API, joined with display names.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentView {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub technician_name: Option<String>,
    pub service_type_id: Uuid,
    pub service_type_name: Option<String>,
    pub client_name: String,
    pub client_location: Option<String>,
    pub origin_location: Option<String>,
    pub distance_km: Option<f64>,
    pub machine_model: String,
    pub machine_serial: Option<String>,
    pub notes: Option<String>,
    pub status: AssignmentStatus,
    pub assigned_at: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub finished_report_id: Option<Uuid>,
    /// Checklist template suggested for this machine.
    pub checklist_model: MachineModel,
    pub created_at: DateTime<Utc>,
}

/// Query parameters for listing assignments.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ListAssignmentsQuery {
    pub technician_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompleteAssignmentRequest {
    pub report_id: Uuid,
}

/// Outcome of a mutation on an assignment.
#[derive(Debug, Serialize, ToSchema)]
pub struct AssignmentActionResponse {
    pub message: String,
    pub assignment: AssignmentView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> AssignmentInput {
        AssignmentInput {
            technician_id: Uuid::new_v4().to_string(),
            service_type_id: Uuid::new_v4().to_string(),
            client_name: "Agro Los Álamos".to_string(),
            machine_model: "Drillor 32".to_string(),
            machine_serial: Some("".to_string()),
            client_location: "Pergamino".to_string(),
            origin_location: None,
            distance_km: Some(120.0),
            notes: "Puesta en marcha de sembradora nueva".to_string(),
            assigned_at: Some("2025-12-15T12:00:00+00:00".to_string()),
            due_date: Some("2025-12-17".to_string()),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()
    }

    #[test]
    fn test_valid_input_applies_defaults() {
        let valid = valid_input()
            .validate(today(), "Planta Crucianelli, Armstrong")
            .unwrap();

        assert_eq!(valid.origin_location, "Planta Crucianelli, Armstrong");
        assert_eq!(valid.machine_serial, None);
        assert_eq!(valid.assigned_at, NaiveDate::from_ymd_opt(2025, 12, 15).unwrap());
        assert_eq!(valid.due_date, NaiveDate::from_ymd_opt(2025, 12, 17));
    }

    #[test]
    fn test_missing_start_uses_default() {
        let mut input = valid_input();
        input.assigned_at = None;
        input.due_date = None;
        let valid = input.validate(today(), "Planta").unwrap();
        assert_eq!(valid.assigned_at, today());
        assert_eq!(valid.due_date, None);
    }

    #[test]
    fn test_due_date_before_start_is_rejected() {
        let mut input = valid_input();
        input.due_date = Some("2025-12-14".to_string());

        let errors = input.validate(today(), "Planta").unwrap_err();
        assert_eq!(
            errors.get("due_date"),
            Some(
                &["La fecha de finalización no puede ser anterior a la de inicio.".to_string()][..]
            )
        );
    }

    #[test]
    fn test_field_errors_are_keyed() {
        let input = AssignmentInput {
            technician_id: "not-a-uuid".to_string(),
            client_name: "Juan".to_string(),
            notes: "corto".to_string(),
            distance_km: Some(-1.0),
            ..Default::default()
        };

        let errors = input.validate(today(), "Planta").unwrap_err();
        for field in [
            "technician_id",
            "service_type_id",
            "client_name",
            "machine_model",
            "client_location",
            "notes",
            "distance_km",
        ] {
            assert!(errors.contains(field), "missing error for {}", field);
        }
        assert!(!errors.contains("due_date"));
    }

    #[test]
    fn test_short_serial_is_rejected_when_given() {
        let mut input = valid_input();
        input.machine_serial = Some("A1".to_string());
        let errors = input.validate(today(), "Planta").unwrap_err();
        assert!(errors.contains("machine_serial"));
    }
}
