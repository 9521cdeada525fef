//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, db, error, models, services};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Field Service Server",
        version = "0.1.0",
        description = "API server for assigning, scheduling and closing agricultural machinery service jobs"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Auth endpoints
        api::auth::signup,
        api::auth::login,
        api::auth::logout,
        api::auth::me,
        // User endpoints
        api::users::list_users,
        api::users::create_user,
        api::users::list_technicians,
        // Assignment endpoints
        api::service_types::list_service_types,
        api::assignments::list_assignments,
        api::assignments::create_assignment,
        api::assignments::get_assignment,
        api::assignments::update_assignment,
        api::assignments::start_assignment,
        api::assignments::cancel_assignment,
        api::assignments::complete_assignment,
        api::assignments::list_unlinked_reports,
        api::logistics::estimate_distance,
        // Calendar endpoints
        api::calendar::list_events,
        api::calendar::month_view,
        api::calendar::day_view,
        // Checklist endpoints
        api::checklists::list_checklists,
        api::checklists::get_checklist,
        api::checklists::submit_startup,
        // Report endpoints
        api::reports::list_reports,
        api::reports::monthly_kpis,
        api::reports::get_report,
        api::reports::dashboard,
        // Library endpoints
        api::library::list_library,
        api::library::get_item,
        api::library::create_item,
        api::library::rename_item,
        api::library::delete_item,
        // Calculator endpoints
        api::calculators::seed_density,
        api::calculators::row_spacings,
        api::calculators::list_crops,
        api::calculators::list_plates,
        api::calculators::list_spacings,
        api::calculators::list_populations,
        api::calculators::list_speeds,
        api::calculators::speed_check,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            models::MessageResponse,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Users
            models::Role,
            models::Profile,
            models::TechnicianOption,
            models::profile::CreateUserRequest,
            models::profile::SignupRequest,
            models::profile::LoginRequest,
            models::profile::LoginResponse,
            // Assignments
            db::service_types::ServiceTypeOption,
            models::AssignmentStatus,
            models::AssignmentInput,
            models::AssignmentView,
            models::assignment::CompleteAssignmentRequest,
            models::assignment::AssignmentActionResponse,
            services::distance::DistanceRequest,
            services::distance::DistanceEstimate,
            // Calendar
            models::CalendarEvent,
            models::calendar::CellEvent,
            models::calendar::DayCell,
            models::calendar::MonthView,
            models::calendar::DayDetails,
            // Checklists
            models::MachineModel,
            models::ChecklistTemplate,
            models::checklist::ChecklistItem,
            models::checklist::ChecklistState,
            models::checklist::ChecklistResponse,
            models::StartupChecklistInput,
            // Reports
            models::ServiceReport,
            models::service_report::ReportDetail,
            models::service_report::UnlinkedReport,
            models::service_report::ReportCreatedResponse,
            models::MonthlyKpi,
            models::service_report::DashboardSummary,
            // Library
            models::LibraryItemType,
            models::LibraryItem,
            models::library::CreateLibraryItemRequest,
            models::library::RenameLibraryItemRequest,
            models::library::BreadcrumbEntry,
            models::library::LibraryListing,
            models::library::LibraryDeleteResponse,
            // Calculators
            models::calculators::DensityMode,
            models::calculators::SeedDensityRequest,
            models::calculators::SeedDensityResult,
            models::calculators::LookupOption,
            models::calculators::SpeedCheckRequest,
            models::calculators::SpeedVerdict,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Auth", description = "Sign-up, login and sessions"),
        (name = "Users", description = "Profiles and technicians"),
        (name = "Assignments", description = "Work orders and their workflow"),
        (name = "Calendar", description = "Assignments by day and month"),
        (name = "Checklists", description = "Startup checklists"),
        (name = "Reports", description = "Service reports and dashboard"),
        (name = "Library", description = "Technical documentation library"),
        (name = "Calculators", description = "Seed density and speed limits")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Add the session security scheme.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
