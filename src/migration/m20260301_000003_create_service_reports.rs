//! Migration: Create service_reports table.
//!
//! One row per submitted checklist. Rows are never edited after insert.

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
                CREATE TABLE service_reports (
                    id UUID PRIMARY KEY,
                    technician_id UUID NOT NULL REFERENCES profiles(id),
                    client_name VARCHAR(255) NOT NULL,
                    machine_model VARCHAR(100) NOT NULL,
                    machine_serial VARCHAR(100),
                    type VARCHAR(100) NOT NULL,
                    status VARCHAR(20) NOT NULL DEFAULT 'finalizado',

                    -- {item_id: {state, note}}
                    checklist_data JSONB NOT NULL DEFAULT '{}'::jsonb,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                );

                CREATE INDEX idx_service_reports_created ON service_reports(created_at DESC);
                CREATE INDEX idx_service_reports_technician
                    ON service_reports(technician_id, status, created_at DESC);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS service_reports CASCADE;")
            .await?;

        Ok(())
    }
}
