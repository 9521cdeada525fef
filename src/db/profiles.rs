//! Database operations for profiles.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::*;
use uuid::Uuid;

use crate::entity::profile;
use crate::error::{AppError, AppResult};
use crate::models::profile::{Profile, Role};

/// Profile row together with its password hash, for login.
pub struct Credentials {
    pub profile: Profile,
    pub password_hash: String,
}

/// Insert a profile. A taken e-mail address is a conflict.
pub async fn insert(
    db: &DatabaseConnection,
    email: &str,
    full_name: &str,
    role: Role,
    password_hash: &str,
) -> AppResult<Profile> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let model = profile::ActiveModel {
        id: Set(id),
        email: Set(email.to_string()),
        full_name: Set(Some(full_name.trim().to_string())),
        role: Set(role.as_str().to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match profile::Entity::insert(model).exec(db).await {
        Ok(_) => {}
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            return Err(AppError::Conflict(
                "Ya existe un usuario registrado con ese correo.".to_string(),
            ));
        }
        Err(e) => return Err(e.into()),
    }

    find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::Database("Failed to fetch newly inserted profile".to_string()))
}

pub async fn find_by_id(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<Profile>> {
    let result = profile::Entity::find_by_id(id).one(db).await?;
    result.map(model_to_profile).transpose()
}

pub async fn find_credentials_by_email(
    db: &DatabaseConnection,
    email: &str,
) -> AppResult<Option<Credentials>> {
    let result = profile::Entity::find()
        .filter(profile::Column::Email.eq(email))
        .one(db)
        .await?;

    match result {
        Some(m) => {
            let password_hash = m.password_hash.clone();
            Ok(Some(Credentials {
                profile: model_to_profile(m)?,
                password_hash,
            }))
        }
        None => Ok(None),
    }
}

/// All profiles ordered by name.
pub async fn list_all(db: &DatabaseConnection) -> AppResult<Vec<Profile>> {
    let rows = profile::Entity::find()
        .order_by_asc(profile::Column::FullName)
        .all(db)
        .await?;
    rows.into_iter().map(model_to_profile).collect()
}

/// Technician profiles ordered by name.
pub async fn list_technicians(db: &DatabaseConnection) -> AppResult<Vec<Profile>> {
    let rows = profile::Entity::find()
        .filter(profile::Column::Role.eq(Role::Technician.as_str()))
        .order_by_asc(profile::Column::FullName)
        .all(db)
        .await?;
    rows.into_iter().map(model_to_profile).collect()
}

/// Display names for a set of profile ids. Unknown ids are absent.
pub async fn names_by_id(
    db: &DatabaseConnection,
    ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Option<String>>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = profile::Entity::find()
        .filter(profile::Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(rows.into_iter().map(|m| (m.id, m.full_name)).collect())
}

fn model_to_profile(m: profile::Model) -> AppResult<Profile> {
    let role = Role::parse(&m.role).ok_or_else(|| {
        AppError::Database(format!("Unknown role '{}' on profile {}", m.role, m.id))
    })?;
    Ok(Profile {
        id: m.id,
        email: m.email,
        full_name: m.full_name,
        role,
        created_at: m.created_at,
    })
}
