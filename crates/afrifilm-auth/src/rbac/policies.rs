//! Role-to-permission mapping definitions.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use afrifilm_entity::user::UserRole;

/// A system-level permission checked before any content-level rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemPermission {
    /// Publish new content.
    ContentPublish,
    /// Edit or delete content one owns.
    ContentManageOwn,
    /// Delete any content.
    ContentManageAny,
    /// Approve or reject content.
    ContentModerate,
    /// Verify creator accounts.
    UserVerify,
    /// List all users.
    UserList,
}

/// Maps each role to the set of system permissions it holds.
#[derive(Debug, Clone)]
pub struct RbacPolicies {
    grants: HashMap<UserRole, HashSet<SystemPermission>>,
}

impl RbacPolicies {
    /// The default AfriFilm policy set.
    pub fn new() -> Self {
        use SystemPermission::*;

        let viewer: HashSet<_> = HashSet::new();
        let creator: HashSet<_> = [ContentPublish, ContentManageOwn].into_iter().collect();
        let admin: HashSet<_> = [
            ContentPublish,
            ContentManageOwn,
            ContentManageAny,
            ContentModerate,
            UserVerify,
            UserList,
        ]
        .into_iter()
        .collect();

        let grants = HashMap::from([
            (UserRole::Viewer, viewer),
            (UserRole::Creator, creator),
            (UserRole::Admin, admin),
        ]);

        Self { grants }
    }

    /// Whether `role` holds `permission`.
    pub fn has_permission(&self, role: &UserRole, permission: &SystemPermission) -> bool {
        self.grants
            .get(role)
            .is_some_and(|set| set.contains(permission))
    }
}

impl Default for RbacPolicies {
    fn default() -> Self {
        Self::new()
    }
}
