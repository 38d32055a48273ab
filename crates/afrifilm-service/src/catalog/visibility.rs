//! Approval gate shared by the catalog and the entitlement engine.

use afrifilm_auth::Principal;
use afrifilm_entity::content::Content;

/// Approved content is visible to everyone. Unapproved content is visible
/// only to its owning creator and to admins.
pub fn is_visible_to(content: &Content, principal: Option<&Principal>) -> bool {
    content.is_approved
        || principal.is_some_and(|p| p.role.is_admin() || content.is_owned_by(p.user_id))
}
