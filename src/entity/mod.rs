//! SeaORM entity definitions for PostgreSQL database.

pub mod assignment;
pub mod library_item;
pub mod profile;
pub mod row_spacing;
pub mod seed_crop;
pub mod seed_plate;
pub mod seed_population;
pub mod service_report;
pub mod service_type;
pub mod speed_limit;
