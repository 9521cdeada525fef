use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "speed_limits")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub population_id: Uuid,
    pub spacing_id: Uuid,
    /// Display value with unit, e.g. `5.5 km/h`.
    pub speed_value: String,
    /// Free-text verdict, e.g. `SI` or `Velocidad maxima 7 km/h`.
    pub result: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seed_population::Entity",
        from = "Column::PopulationId",
        to = "super::seed_population::Column::Id",
        on_delete = "Cascade"
    )]
    Population,
}

impl ActiveModelBehavior for ActiveModel {}
