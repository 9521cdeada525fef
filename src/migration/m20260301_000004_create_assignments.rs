//! Migration: Create assignments table.
//!
//! Start and end are calendar dates without time or zone.

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
                CREATE TABLE assignments (
                    id UUID PRIMARY KEY,
                    technician_id UUID NOT NULL REFERENCES profiles(id),
                    service_type_id UUID NOT NULL REFERENCES service_types(id),
                    client_name VARCHAR(255) NOT NULL,
                    client_location VARCHAR(255),
                    origin_location VARCHAR(255),
                    distance_km DOUBLE PRECISION
                        CHECK (distance_km IS NULL OR distance_km >= 0),
                    machine_model VARCHAR(100) NOT NULL,
                    machine_serial VARCHAR(100),
                    notes TEXT,
                    status VARCHAR(20) NOT NULL DEFAULT 'abierto'
                        CHECK (status IN ('abierto', 'en_progreso', 'cancelado', 'finalizado')),
                    assigned_at DATE NOT NULL DEFAULT CURRENT_DATE,
                    due_date DATE,
                    finished_report_id UUID REFERENCES service_reports(id) ON DELETE SET NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    CONSTRAINT chk_assignments_date_range
                        CHECK (due_date IS NULL OR due_date >= assigned_at),
                    CONSTRAINT chk_assignments_finished_report
                        CHECK (status <> 'finalizado' OR finished_report_id IS NOT NULL)
                );

                -- A report closes at most one assignment
                CREATE UNIQUE INDEX idx_assignments_finished_report
                    ON assignments(finished_report_id)
                    WHERE finished_report_id IS NOT NULL;

                CREATE INDEX idx_assignments_technician_status
                    ON assignments(technician_id, status);
                CREATE INDEX idx_assignments_assigned_at ON assignments(assigned_at);

                CREATE TRIGGER update_assignments_updated_at
                    BEFORE UPDATE ON assignments
                    FOR EACH ROW
                    EXECUTE FUNCTION update_updated_at_column();
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
                DROP TRIGGER IF EXISTS update_assignments_updated_at ON assignments;
                DROP TABLE IF EXISTS assignments CASCADE;
                "#,
            )
            .await?;

        Ok(())
    }
}
