//! Database operations for service types.

use std::collections::HashMap;

use sea_orm::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity::service_type;
use crate::error::AppResult;

/// Service type entry for dropdowns.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceTypeOption {
    pub id: Uuid,
    pub name: String,
}

/// Active service types ordered by name.
pub async fn list_active(db: &DatabaseConnection) -> AppResult<Vec<ServiceTypeOption>> {
    let rows = service_type::Entity::find()
        .filter(service_type::Column::IsActive.eq(true))
        .order_by_asc(service_type::Column::Name)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|m| ServiceTypeOption {
            id: m.id,
            name: m.name,
        })
        .collect())
}

/// Whether `id` names a service type that is still offered.
pub async fn exists(db: &DatabaseConnection, id: Uuid) -> AppResult<bool> {
    Ok(find_active(id).one(db).await?.is_some())
}

fn find_active(id: Uuid) -> Select<service_type::Entity> {
    service_type::Entity::find_by_id(id).filter(service_type::Column::IsActive.eq(true))
}

/// Names for a set of service type ids.
pub async fn names_by_id(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = service_type::Entity::find()
        .filter(service_type::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m.name)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exists_ignores_inactive_types() {
        let sql = find_active(Uuid::nil())
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#""service_types"."id" ="#));
        assert!(sql.contains(r#""service_types"."is_active" ="#));
    }
}
