//! RBAC enforcement logic. Checks whether a principal holds a system permission.

use afrifilm_core::error::AppError;

use super::policies::{RbacPolicies, SystemPermission};
use crate::identity::Principal;

/// Enforces role-based access control for system-level operations.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    /// The policy configuration.
    policies: RbacPolicies,
}

impl RbacEnforcer {
    /// Creates a new enforcer with the default policy set.
    pub fn new() -> Self {
        Self {
            policies: RbacPolicies::new(),
        }
    }

    /// Returns `Forbidden` unless the principal's role holds `permission`.
    pub fn require_permission(
        &self,
        principal: &Principal,
        permission: SystemPermission,
    ) -> Result<(), AppError> {
        if self.policies.has_permission(&principal.role, &permission) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role '{}' does not have permission '{permission:?}'",
                principal.role
            )))
        }
    }

    /// Publishing additionally requires a verified account for creators.
    pub fn require_publisher(&self, principal: &Principal) -> Result<(), AppError> {
        self.require_permission(principal, SystemPermission::ContentPublish)?;
        if principal.role.is_admin() || principal.is_verified {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Creator account must be verified before publishing",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use afrifilm_core::ErrorKind;
    use afrifilm_entity::user::UserRole;
    use uuid::Uuid;

    fn principal(role: UserRole, is_verified: bool) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            username: "test".into(),
            role,
            is_verified,
        }
    }

    #[test]
    fn test_viewer_cannot_moderate() {
        let err = RbacEnforcer::new()
            .require_permission(
                &principal(UserRole::Viewer, true),
                SystemPermission::ContentModerate,
            )
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[test]
    fn test_publisher_requires_verified_creator() {
        let rbac = RbacEnforcer::new();
        assert!(rbac.require_publisher(&principal(UserRole::Creator, false)).is_err());
        assert!(rbac.require_publisher(&principal(UserRole::Creator, true)).is_ok());
        assert!(rbac.require_publisher(&principal(UserRole::Admin, false)).is_ok());
        assert!(rbac.require_publisher(&principal(UserRole::Viewer, true)).is_err());
    }

    #[test]
    fn test_only_admin_manages_any() {
        let rbac = RbacEnforcer::new();
        for role in [UserRole::Viewer, UserRole::Creator] {
            assert!(rbac
                .require_permission(&principal(role, true), SystemPermission::ContentManageAny)
                .is_err());
        }
        assert!(rbac
            .require_permission(&principal(UserRole::Admin, false), SystemPermission::ContentManageAny)
            .is_ok());
    }
}
