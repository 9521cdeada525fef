use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "row_spacings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plate_id: Uuid,
    /// Display name with unit, e.g. `52.5 cm`.
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seed_plate::Entity",
        from = "Column::PlateId",
        to = "super::seed_plate::Column::Id",
        on_delete = "Cascade"
    )]
    Plate,
}

impl ActiveModelBehavior for ActiveModel {}
