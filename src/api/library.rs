//! Technical library: folders, documents, videos and links.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use tracing::info;
use uuid::Uuid;

use crate::auth::{CoordinatorAuth, SessionAuth};
use crate::db::{DbPool, library};
use crate::error::{AppError, AppResult};
use crate::models::library::{
    CreateLibraryItemRequest, LibraryDeleteResponse, LibraryItem, LibraryListing, LibraryQuery,
    RenameLibraryItemRequest,
};

/// Configure library routes.
pub fn configure_library_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list_library)
        .service(create_item)
        .service(get_item)
        .service(rename_item)
        .service(delete_item);
}

/// Contents of a folder (the root by default), with its breadcrumb.
#[utoipa::path(
    get,
    path = "/api/v1/library",
    tag = "Library",
    params(
        ("folder_id" = Option<Uuid>, Query, description = "Folder to list (default: root)")
    ),
    responses(
        (status = 200, description = "Folder listing", body = LibraryListing),
        (status = 404, description = "Folder not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/library")]
pub async fn list_library(
    _auth: SessionAuth,
    query: web::Query<LibraryQuery>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let conn = pool.connection();

    let (folder, breadcrumb) = match query.folder_id {
        Some(id) => {
            let folder = library::find(conn, id)
                .await?
                .filter(|item| item.item_type.is_folder())
                .ok_or_else(|| AppError::NotFound("Carpeta".to_string()))?;
            (Some(folder), library::breadcrumb_for(conn, id).await?)
        }
        None => (None, Vec::new()),
    };
    let items = library::list_children(conn, query.folder_id).await?;

    Ok(HttpResponse::Ok().json(LibraryListing {
        folder,
        breadcrumb,
        items,
    }))
}

/// One library item.
#[utoipa::path(
    get,
    path = "/api/v1/library/{id}",
    tag = "Library",
    params(("id" = String, Path, description = "Item UUID")),
    responses(
        (status = 200, description = "Item", body = LibraryItem),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[get("/library/{id}")]
pub async fn get_item(
    _auth: SessionAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let item = library::find(pool.connection(), id)
        .await?
        .ok_or_else(|| AppError::NotFound("Library item".to_string()))?;
    Ok(HttpResponse::Ok().json(item))
}

/// Create a folder or a linked file.
#[utoipa::path(
    post,
    path = "/api/v1/library",
    tag = "Library",
    request_body = CreateLibraryItemRequest,
    responses(
        (status = 201, description = "Item created", body = LibraryItem),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 422, description = "Validation failed", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[post("/library")]
pub async fn create_item(
    auth: CoordinatorAuth,
    body: web::Json<CreateLibraryItemRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let valid = body.validate()?;
    let item = library::insert(pool.connection(), &valid, auth.ctx.user_id).await?;

    info!(item_id = %item.id, item_type = item.item_type.as_str(), "Library item created");
    Ok(HttpResponse::Created().json(item))
}

/// Rename an item.
#[utoipa::path(
    patch,
    path = "/api/v1/library/{id}",
    tag = "Library",
    params(("id" = String, Path, description = "Item UUID")),
    request_body = RenameLibraryItemRequest,
    responses(
        (status = 200, description = "Item renamed", body = LibraryItem),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[patch("/library/{id}")]
pub async fn rename_item(
    _auth: CoordinatorAuth,
    path: web::Path<String>,
    body: web::Json<RenameLibraryItemRequest>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let name = body.validate()?;
    let item = library::rename(pool.connection(), id, &name).await?;
    Ok(HttpResponse::Ok().json(item))
}

/// Delete an item and everything below it.
#[utoipa::path(
    delete,
    path = "/api/v1/library/{id}",
    tag = "Library",
    params(("id" = String, Path, description = "Item UUID")),
    responses(
        (status = 200, description = "Subtree removed", body = LibraryDeleteResponse),
        (status = 403, description = "Coordinator role required", body = crate::error::ErrorResponse),
        (status = 404, description = "Not found", body = crate::error::ErrorResponse)
    ),
    security(("session" = []))
)]
#[delete("/library/{id}")]
pub async fn delete_item(
    auth: CoordinatorAuth,
    path: web::Path<String>,
    pool: web::Data<DbPool>,
) -> AppResult<HttpResponse> {
    let id = Uuid::parse_str(&path.into_inner())?;
    let removed = library::delete(pool.connection(), id).await?;

    info!(
        item_id = %id,
        removed = removed.len(),
        deleted_by = %auth.ctx.user_id,
        "Library subtree deleted"
    );
    Ok(HttpResponse::Ok().json(LibraryDeleteResponse {
        message: "Elemento eliminado.".to_string(),
        removed,
    }))
}
