//! Assignment workflow state machine.
//!
//! `abierto → en_progreso → finalizado`, with `cancelado` reachable from any
//! non-terminal state. [`AssignmentState::apply`] is the only place where a
//! transition is accepted or rejected.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Persisted assignment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum AssignmentStatus {
    #[serde(rename = "abierto")]
    Open,
    #[serde(rename = "en_progreso")]
    InProgress,
    #[serde(rename = "cancelado")]
    Cancelled,
    #[serde(rename = "finalizado")]
    Finished,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "abierto",
            Self::InProgress => "en_progreso",
            Self::Cancelled => "cancelado",
            Self::Finished => "finalizado",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "abierto" => Some(Self::Open),
            "en_progreso" => Some(Self::InProgress),
            "cancelado" => Some(Self::Cancelled),
            "finalizado" => Some(Self::Finished),
            _ => None,
        }
    }

    /// Open or in progress.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Workflow state with the data each state owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentState {
    Open,
    InProgress,
    Finished { report_id: Uuid },
    Cancelled,
}

/// A service report offered to close an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCandidate {
    pub id: Uuid,
    pub technician_id: Uuid,
    pub status: String,
    /// Already referenced by some assignment's `finished_report_id`.
    pub already_linked: bool,
}

/// Requested workflow action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowAction {
    Start,
    Complete { report: ReportCandidate },
    Cancel,
}

impl WorkflowAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Complete { .. } => "complete",
            Self::Cancel => "cancel",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("No se puede aplicar '{action}' a una asignación en estado '{from}'.")]
    Illegal {
        from: AssignmentStatus,
        action: &'static str,
    },

    #[error("El reporte seleccionado no está finalizado.")]
    ReportNotFinished,

    #[error("El reporte seleccionado pertenece a otro técnico.")]
    ReportTechnicianMismatch,

    #[error("El reporte seleccionado ya está enlazado a otra asignación.")]
    ReportAlreadyLinked,

    #[error("Estado almacenado inconsistente: {0}")]
    Corrupt(String),
}

/// Status string a report must carry to close an assignment.
pub const FINISHED_REPORT_STATUS: &str = "finalizado";

impl AssignmentState {
    /// Rebuild the state from the persisted columns.
    pub fn from_row(
        status: AssignmentStatus,
        finished_report_id: Option<Uuid>,
    ) -> Result<Self, TransitionError> {
        match (status, finished_report_id) {
            (AssignmentStatus::Open, _) => Ok(Self::Open),
            (AssignmentStatus::InProgress, _) => Ok(Self::InProgress),
            (AssignmentStatus::Cancelled, _) => Ok(Self::Cancelled),
            (AssignmentStatus::Finished, Some(report_id)) => Ok(Self::Finished { report_id }),
            (AssignmentStatus::Finished, None) => Err(TransitionError::Corrupt(
                "finalizado sin reporte enlazado".to_string(),
            )),
        }
    }

    pub fn status(&self) -> AssignmentStatus {
        match self {
            Self::Open => AssignmentStatus::Open,
            Self::InProgress => AssignmentStatus::InProgress,
            Self::Finished { .. } => AssignmentStatus::Finished,
            Self::Cancelled => AssignmentStatus::Cancelled,
        }
    }

    pub fn finished_report_id(&self) -> Option<Uuid> {
        match self {
            Self::Finished { report_id } => Some(*report_id),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished { .. } | Self::Cancelled)
    }

    /// Apply `action` to an assignment owned by `assignment_technician`.
    pub fn apply(
        self,
        action: WorkflowAction,
        assignment_technician: Uuid,
    ) -> Result<Self, TransitionError> {
        match (self, action) {
            (Self::Open, WorkflowAction::Start) => Ok(Self::InProgress),
            (Self::InProgress, WorkflowAction::Complete { report }) => {
                if report.technician_id != assignment_technician {
                    return Err(TransitionError::ReportTechnicianMismatch);
                }
                if report.status != FINISHED_REPORT_STATUS {
                    return Err(TransitionError::ReportNotFinished);
                }
                if report.already_linked {
                    return Err(TransitionError::ReportAlreadyLinked);
                }
                Ok(Self::Finished {
                    report_id: report.id,
                })
            }
            (state, WorkflowAction::Cancel) if !state.is_terminal() => Ok(Self::Cancelled),
            (state, action) => Err(TransitionError::Illegal {
                from: state.status(),
                action: action.name(),
            }),
        }
    }
}
