//! Migration: Create library_items table.
//!
//! Deleting a folder removes its whole subtree through the self-referencing
//! foreign key.

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
                CREATE TABLE library_items (
                    id UUID PRIMARY KEY,
                    name VARCHAR(255) NOT NULL,
                    type VARCHAR(10) NOT NULL
                        CHECK (type IN ('folder', 'pdf', 'video', 'image', 'link')),
                    url TEXT,
                    parent_id UUID REFERENCES library_items(id) ON DELETE CASCADE,
                    created_by UUID REFERENCES profiles(id) ON DELETE SET NULL,

                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

                    CONSTRAINT chk_library_items_url
                        CHECK ((type = 'folder' AND url IS NULL) OR (type <> 'folder' AND url IS NOT NULL))
                );

                CREATE INDEX idx_library_items_parent ON library_items(parent_id, name);
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TABLE IF EXISTS library_items CASCADE;")
            .await?;

        Ok(())
    }
}
