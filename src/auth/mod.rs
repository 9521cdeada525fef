//! Authentication: password hashing, session tokens and request extractors.

mod extractor;
pub mod password;
pub mod session;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::Role;

pub use extractor::{AuthError, CoordinatorAuth, SessionAuth, session_token};
pub use session::SessionKeys;

/// Identity of the caller, handed explicitly to every handler that needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub user_id: Uuid,
    pub full_name: Option<String>,
    pub role: Role,
}

impl RequestContext {
    pub fn is_coordinator(&self) -> bool {
        self.role.is_coordinator()
    }

    /// Technicians only see their own records; coordinators may narrow to
    /// one technician or see everything.
    pub fn technician_scope(&self, requested: Option<Uuid>) -> Option<Uuid> {
        if self.is_coordinator() {
            requested
        } else {
            Some(self.user_id)
        }
    }

    /// Allow coordinators and the technician who owns the record.
    pub fn ensure_owner_or_coordinator(&self, owner: Uuid) -> AppResult<()> {
        if self.is_coordinator() || self.user_id == owner {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "No tiene permiso para operar sobre este registro.".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(role: Role) -> RequestContext {
        RequestContext {
            user_id: Uuid::new_v4(),
            full_name: None,
            role,
        }
    }

    #[test]
    fn test_technician_scope() {
        let other = Uuid::new_v4();

        let tech = ctx(Role::Technician);
        assert_eq!(tech.technician_scope(None), Some(tech.user_id));
        assert_eq!(tech.technician_scope(Some(other)), Some(tech.user_id));

        let coord = ctx(Role::Coordinator);
        assert_eq!(coord.technician_scope(None), None);
        assert_eq!(coord.technician_scope(Some(other)), Some(other));
    }

    #[test]
    fn test_ensure_owner_or_coordinator() {
        let tech = ctx(Role::Technician);
        assert!(tech.ensure_owner_or_coordinator(tech.user_id).is_ok());
        assert!(matches!(
            tech.ensure_owner_or_coordinator(Uuid::new_v4()),
            Err(AppError::Forbidden(_))
        ));
        assert!(
            ctx(Role::Coordinator)
                .ensure_owner_or_coordinator(Uuid::new_v4())
                .is_ok()
        );
    }
}
