use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "seed_crops")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::seed_plate::Entity")]
    Plates,
}

impl Related<super::seed_plate::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Plates.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
