//! Profile models: roles, user creation and login payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{FieldErrors, looks_like_email};

/// Profile role. Gates which actions are reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Default)]
pub enum Role {
    /// Creates and assigns work orders, manages users and library content.
    #[serde(rename = "coordinador")]
    Coordinator,
    /// Executes assigned work orders and submits checklists.
    #[default]
    #[serde(rename = "mecanico")]
    Technician,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Coordinator => "coordinador",
            Self::Technician => "mecanico",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "coordinador" => Some(Self::Coordinator),
            "mecanico" => Some(Self::Technician),
            _ => None,
        }
    }

    pub fn is_coordinator(&self) -> bool {
        matches!(self, Self::Coordinator)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Profile stored in database (without credentials).
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.full_name.as_deref().unwrap_or("Sin Nombre")
    }
}

/// Technician entry for assignment dropdowns.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TechnicianOption {
    pub id: Uuid,
    pub full_name: String,
}

impl From<Profile> for TechnicianOption {
    fn from(p: Profile) -> Self {
        Self {
            full_name: p.display_name().to_string(),
            id: p.id,
        }
    }
}

/// Coordinator request to create a user.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(rename = "fullName", alias = "full_name")]
    pub full_name: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if !looks_like_email(&self.email) {
            errors.add("email", "Debe ser un correo electrónico válido.");
        }
        errors.min_chars(
            "fullName",
            &self.full_name,
            3,
            "El nombre completo debe tener al menos 3 caracteres.",
        );
        validate_password(&mut errors, &self.password);
        errors.finish()
    }
}

/// Public self sign-up. New accounts are coordinators.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();
        if self.email.trim().is_empty()
            || self.password.is_empty()
            || self.full_name.trim().is_empty()
        {
            errors.add("form", "Todos los campos son obligatorios");
            return Err(errors);
        }
        if !looks_like_email(&self.email) {
            errors.add("email", "Debe ser un correo electrónico válido.");
        }
        validate_password(&mut errors, &self.password);
        errors.finish()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login: the session token plus the caller's profile.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub profile: Profile,
}

fn validate_password(errors: &mut FieldErrors, password: &str) {
    if password.chars().count() < 6 {
        errors.add(
            "password",
            "La contraseña debe tener al menos 6 caracteres.",
        );
    }
}

/// Normalize an e-mail address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(
            serde_json::to_string(&Role::Coordinator).unwrap(),
            "\"coordinador\""
        );
        assert_eq!(Role::parse("mecanico"), Some(Role::Technician));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::default(), Role::Technician);
    }

    #[test]
    fn test_create_user_defaults_to_technician() {
        let req: CreateUserRequest = serde_json::from_value(serde_json::json!({
            "email": "juan@crucianelli.com",
            "fullName": "Juan Pérez",
            "password": "secreto1"
        }))
        .unwrap();

        assert_eq!(req.role, Role::Technician);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_user_validation_messages() {
        let req = CreateUserRequest {
            email: "no-es-mail".to_string(),
            full_name: "Jo".to_string(),
            password: "123".to_string(),
            role: Role::Coordinator,
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.contains("email"));
        assert!(errors.contains("fullName"));
        assert!(errors.contains("password"));
    }

    #[test]
    fn test_signup_requires_all_fields() {
        let req = SignupRequest {
            email: String::new(),
            password: "secreto1".to_string(),
            full_name: "Ana".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert_eq!(
            errors.get("form"),
            Some(&["Todos los campos son obligatorios".to_string()][..])
        );
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ana@Example.COM "), "ana@example.com");
    }
}
