//! API endpoint modules.

pub mod assignments;
pub mod auth;
pub mod calculators;
pub mod calendar;
pub mod checklists;
pub mod health;
pub mod library;
pub mod logistics;
pub mod openapi;
pub mod reports;
pub mod service_types;
pub mod users;

use actix_web::web;

pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use calculators::configure_calculator_routes;
pub use calendar::configure_calendar_routes;
pub use checklists::configure_checklist_routes;
pub use health::configure_health_routes;
pub use library::configure_library_routes;
pub use logistics::configure_logistics_routes;
pub use openapi::ApiDoc;
pub use reports::configure_report_routes;
pub use service_types::configure_service_type_routes;
pub use users::configure_user_routes;

/// Register every route group. Mounted under `/api/v1`.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_health_routes)
        .configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_service_type_routes)
        .configure(configure_assignment_routes)
        .configure(configure_logistics_routes)
        .configure(configure_calendar_routes)
        .configure(configure_checklist_routes)
        .configure(configure_report_routes)
        .configure(configure_library_routes)
        .configure(configure_calculator_routes);
}
