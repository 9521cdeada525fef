//! Read-only queries over the speed-limit reference tables.

use sea_orm::*;
use uuid::Uuid;

use crate::entity::{row_spacing, seed_crop, seed_plate, seed_population, speed_limit};
use crate::error::AppResult;
use crate::models::calculators::{LookupOption, sort_by_embedded_number};

/// Crops, alphabetical.
pub async fn crops(db: &DatabaseConnection) -> AppResult<Vec<LookupOption>> {
    let rows = seed_crop::Entity::find()
        .order_by_asc(seed_crop::Column::Name)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| LookupOption {
            id: m.id,
            name: m.name,
        })
        .collect())
}

/// Plates for a crop, alphabetical.
pub async fn plates(db: &DatabaseConnection, crop_id: Uuid) -> AppResult<Vec<LookupOption>> {
    let rows = seed_plate::Entity::find()
        .filter(seed_plate::Column::CropId.eq(crop_id))
        .order_by_asc(seed_plate::Column::Name)
        .all(db)
        .await?;
    Ok(rows
        .into_iter()
        .map(|m| LookupOption {
            id: m.id,
            name: m.name,
        })
        .collect())
}

/// Row spacings for a plate, by the number in their name.
pub async fn spacings(db: &DatabaseConnection, plate_id: Uuid) -> AppResult<Vec<LookupOption>> {
    let rows = row_spacing::Entity::find()
        .filter(row_spacing::Column::PlateId.eq(plate_id))
        .all(db)
        .await?;
    let mut options: Vec<LookupOption> = rows
        .into_iter()
        .map(|m| LookupOption {
            id: m.id,
            name: m.name,
        })
        .collect();
    sort_by_embedded_number(&mut options, |o| &o.name);
    Ok(options)
}

/// Populations for a spacing and plate, by the number in their name.
pub async fn populations(
    db: &DatabaseConnection,
    spacing_id: Uuid,
    plate_id: Uuid,
) -> AppResult<Vec<LookupOption>> {
    let rows = seed_population::Entity::find()
        .filter(seed_population::Column::SpacingId.eq(spacing_id))
        .filter(seed_population::Column::PlateId.eq(plate_id))
        .all(db)
        .await?;
    let mut options: Vec<LookupOption> = rows
        .into_iter()
        .map(|m| LookupOption {
            id: m.id,
            name: m.name,
        })
        .collect();
    sort_by_embedded_number(&mut options, |o| &o.name);
    Ok(options)
}

/// Speed values available for a population and spacing, slowest first.
pub async fn speeds(
    db: &DatabaseConnection,
    population_id: Uuid,
    spacing_id: Uuid,
) -> AppResult<Vec<String>> {
    let rows = speed_limit::Entity::find()
        .filter(speed_limit::Column::PopulationId.eq(population_id))
        .filter(speed_limit::Column::SpacingId.eq(spacing_id))
        .all(db)
        .await?;
    let mut values: Vec<String> = rows.into_iter().map(|m| m.speed_value).collect();
    sort_by_embedded_number(&mut values, |v| v);
    Ok(values)
}

/// The `result` text for one configuration. `None` when no row matches.
pub async fn speed_result(
    db: &DatabaseConnection,
    population_id: Uuid,
    spacing_id: Uuid,
    speed_value: &str,
) -> AppResult<Option<String>> {
    let row = speed_limit::Entity::find()
        .filter(speed_limit::Column::PopulationId.eq(population_id))
        .filter(speed_limit::Column::SpacingId.eq(spacing_id))
        .filter(speed_limit::Column::SpeedValue.eq(speed_value))
        .one(db)
        .await?;
    Ok(row.map(|m| m.result.unwrap_or_default()))
}
