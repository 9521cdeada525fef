//! Migration: Create the speed-limit reference tables.
//!
//! crop → plate → row spacing → population → speed limit. Rows are loaded
//! by operators; the server only reads them.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TABLE seed_crops (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    name VARCHAR(100) NOT NULL
                );

                CREATE TABLE seed_plates (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    crop_id UUID NOT NULL REFERENCES seed_crops(id) ON DELETE CASCADE,
                    name VARCHAR(100) NOT NULL
                );
                CREATE INDEX idx_seed_plates_crop ON seed_plates(crop_id);

                CREATE TABLE row_spacings (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    plate_id UUID NOT NULL REFERENCES seed_plates(id) ON DELETE CASCADE,
                    name VARCHAR(50) NOT NULL
                );
                CREATE INDEX idx_row_spacings_plate ON row_spacings(plate_id);

                CREATE TABLE seed_populations (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    plate_id UUID NOT NULL REFERENCES seed_plates(id) ON DELETE CASCADE,
                    spacing_id UUID NOT NULL REFERENCES row_spacings(id) ON DELETE CASCADE,
                    name VARCHAR(50) NOT NULL
                );
                CREATE INDEX idx_seed_populations_spacing ON seed_populations(spacing_id, plate_id);

                CREATE TABLE speed_limits (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    population_id UUID NOT NULL REFERENCES seed_populations(id) ON DELETE CASCADE,
                    spacing_id UUID NOT NULL REFERENCES row_spacings(id) ON DELETE CASCADE,
                    speed_value VARCHAR(50) NOT NULL,
                    result TEXT
                );
                CREATE INDEX idx_speed_limits_lookup
                    ON speed_limits(population_id, spacing_id, speed_value);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP TABLE IF EXISTS speed_limits CASCADE;
                DROP TABLE IF EXISTS seed_populations CASCADE;
                DROP TABLE IF EXISTS row_spacings CASCADE;
                DROP TABLE IF EXISTS seed_plates CASCADE;
                DROP TABLE IF EXISTS seed_crops CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
