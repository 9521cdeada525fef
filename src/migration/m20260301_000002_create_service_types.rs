//! Migration: Create service_types table with the default catalogue.

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
                CREATE TABLE service_types (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    name VARCHAR(100) NOT NULL UNIQUE,
                    description TEXT,
                    is_active BOOLEAN NOT NULL DEFAULT TRUE,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                INSERT INTO service_types (name, description) VALUES
                    ('Puesta en Marcha', 'Entrega y puesta en marcha de maquinaria nueva'),
                    ('Servicio Técnico', 'Reparación o asistencia técnica general'),
                    ('Garantía', 'Intervención cubierta por garantía');
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS service_types CASCADE;")
            .await?;

        Ok(())
    }
}
