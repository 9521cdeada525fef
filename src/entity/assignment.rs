//! Assignment entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub technician_id: Uuid,
    pub service_type_id: Uuid,
    pub client_name: String,
    pub client_location: Option<String>,
    pub origin_location: Option<String>,
    pub distance_km: Option<f64>,
    pub machine_model: String,
    pub machine_serial: Option<String>,
    pub notes: Option<String>,
    /// abierto | en_progreso | cancelado | finalizado
    pub status: String,
    /// Start date.
    pub assigned_at: Date,
    /// End date; the start date when absent.
    pub due_date: Option<Date>,
    pub finished_report_id: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::TechnicianId",
        to = "super::profile::Column::Id"
    )]
    Technician,
    #[sea_orm(
        belongs_to = "super::service_type::Entity",
        from = "Column::ServiceTypeId",
        to = "super::service_type::Column::Id"
    )]
    ServiceType,
    #[sea_orm(
        belongs_to = "super::service_report::Entity",
        from = "Column::FinishedReportId",
        to = "super::service_report::Column::Id",
        on_delete = "SetNull"
    )]
    FinishedReport,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Technician.def()
    }
}

impl Related<super::service_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceType.def()
    }
}

impl Related<super::service_report::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FinishedReport.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
