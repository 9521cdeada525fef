//! Database operations for the technical library.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::library_item;
use crate::error::{AppError, AppResult};
use crate::models::library::{
    BreadcrumbEntry, LibraryItem, LibraryItemType, TreeNode, ValidLibraryItem, breadcrumb,
    collect_subtree, sort_listing,
};

/// Longest parent chain followed when building a breadcrumb.
const MAX_DEPTH: usize = 64;

/// Children of `parent` (the root when `None`), folders first.
pub async fn list_children(
    db: &DatabaseConnection,
    parent: Option<Uuid>,
) -> AppResult<Vec<LibraryItem>> {
    let query = match parent {
        Some(id) => library_item::Entity::find().filter(library_item::Column::ParentId.eq(id)),
        None => library_item::Entity::find().filter(library_item::Column::ParentId.is_null()),
    };
    let rows = query
        .order_by_asc(library_item::Column::Name)
        .all(db)
        .await?;

    let mut items = rows
        .into_iter()
        .map(model_to_item)
        .collect::<AppResult<Vec<_>>>()?;
    sort_listing(&mut items);
    Ok(items)
}

pub async fn find(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<LibraryItem>> {
    let result = library_item::Entity::find_by_id(id).one(db).await?;
    result.map(model_to_item).transpose()
}

/// Root-to-folder path for `id`.
pub async fn breadcrumb_for(db: &DatabaseConnection, id: Uuid) -> AppResult<Vec<BreadcrumbEntry>> {
    let mut chain: HashMap<Uuid, (String, Option<Uuid>)> = HashMap::new();
    let mut current = Some(id);

    while let Some(item_id) = current {
        if chain.contains_key(&item_id) || chain.len() >= MAX_DEPTH {
            break;
        }
        let Some(m) = library_item::Entity::find_by_id(item_id).one(db).await? else {
            break;
        };
        current = m.parent_id;
        chain.insert(m.id, (m.name, m.parent_id));
    }

    Ok(breadcrumb(&chain, id))
}

/// Insert an item. The parent, when given, must be an existing folder.
pub async fn insert(
    db: &DatabaseConnection,
    item: &ValidLibraryItem,
    created_by: Uuid,
) -> AppResult<LibraryItem> {
    if let Some(parent_id) = item.parent_id {
        let parent = find(db, parent_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Carpeta".to_string()))?;
        if !parent.item_type.is_folder() {
            return Err(AppError::InvalidInput(
                "El destino seleccionado no es una carpeta".to_string(),
            ));
        }
    }

    let id = Uuid::new_v4();
    let model = library_item::ActiveModel {
        id: Set(id),
        name: Set(item.name.clone()),
        item_type: Set(item.item_type.as_str().to_string()),
        url: Set(item.url.clone()),
        parent_id: Set(item.parent_id),
        created_by: Set(Some(created_by)),
        created_at: Set(Utc::now()),
    };
    library_item::Entity::insert(model).exec(db).await?;

    find(db, id)
        .await?
        .ok_or_else(|| {
            AppError::Database("Failed to fetch newly inserted library item".to_string())
        })
}

pub async fn rename(db: &DatabaseConnection, id: Uuid, name: &str) -> AppResult<LibraryItem> {
    let existing = library_item::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Library item".to_string()))?;

    let mut active: library_item::ActiveModel = existing.into();
    active.name = Set(name.to_string());
    let updated = active.update(db).await?;
    model_to_item(updated)
}

/// Delete `id` and, through the cascading foreign key, its whole subtree.
/// Returns the ids that were removed.
pub async fn delete(db: &DatabaseConnection, id: Uuid) -> AppResult<Vec<Uuid>> {
    let nodes: Vec<TreeNode> = library_item::Entity::find()
        .all(db)
        .await?
        .into_iter()
        .map(|m| TreeNode {
            id: m.id,
            parent_id: m.parent_id,
        })
        .collect();

    let removed = collect_subtree(&nodes, id);
    if removed.is_empty() {
        return Err(AppError::NotFound("Library item".to_string()));
    }

    library_item::Entity::delete_by_id(id).exec(db).await?;
    Ok(removed)
}

fn model_to_item(m: library_item::Model) -> AppResult<LibraryItem> {
    let item_type = LibraryItemType::parse(&m.item_type).ok_or_else(|| {
        AppError::Database(format!("Unknown library type '{}' on item {}", m.item_type, m.id))
    })?;
    Ok(LibraryItem {
        id: m.id,
        name: m.name,
        item_type,
        url: m.url,
        parent_id: m.parent_id,
        created_by: m.created_by,
        created_at: m.created_at,
    })
}
