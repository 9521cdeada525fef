use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seed_populations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub plate_id: Uuid,
    pub spacing_id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::row_spacing::Entity",
        from = "Column::SpacingId",
        to = "super::row_spacing::Column::Id",
        on_delete = "Cascade"
    )]
    Spacing,
}

impl ActiveModelBehavior for ActiveModel {}
