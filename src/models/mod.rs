//! Domain models for the field service server.

use serde::Serialize;
use utoipa::ToSchema;

pub mod assignment;
pub mod calculators;
pub mod calendar;
pub mod checklist;
pub mod library;
pub mod profile;
pub mod service_report;
pub mod validation;
pub mod workflow;

// Re-export commonly used types
pub use assignment::{AssignmentInput, AssignmentView, ValidAssignment};
pub use calendar::{CalendarEvent, MonthGrid};
pub use checklist::{ChecklistTemplate, MachineModel, StartupChecklistInput};
pub use library::{LibraryItem, LibraryItemType};
pub use profile::{Profile, Role, TechnicianOption};
pub use service_report::{MonthlyKpi, ServiceReport};
pub use validation::FieldErrors;
pub use workflow::{AssignmentState, AssignmentStatus, TransitionError, WorkflowAction};

/// Plain confirmation returned by mutations without a richer payload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
