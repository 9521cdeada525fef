//! Service report entity (submitted checklists).

use sea_orm::entity::prelude::*;
use serde_json::Value as JsonValue;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "service_reports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub technician_id: Uuid,
    pub client_name: String,
    pub machine_model: String,
    pub machine_serial: Option<String>,
    /// Service type name.
    #[sea_orm(column_name = "type")]
    pub report_type: String,
    pub status: String,
    /// Item id → `{state, note}`.
    #[sea_orm(column_type = "JsonBinary")]
    pub checklist_data: JsonValue,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::profile::Entity",
        from = "Column::TechnicianId",
        to = "super::profile::Column::Id"
    )]
    Technician,
}

impl Related<super::profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Technician.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
