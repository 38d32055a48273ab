//! Moderation service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use afrifilm_auth::rbac::{RbacEnforcer, SystemPermission};
use afrifilm_auth::Principal;
use afrifilm_core::error::AppError;
use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_database::{ContentStore, UserStore};
use afrifilm_entity::content::Content;
use afrifilm_entity::user::{User, UserRole};

use crate::catalog::visibility;
use crate::entitlement::AccessCache;

/// Handles admin moderation and content deletion.
#[derive(Debug, Clone)]
pub struct ModerationService {
    contents: Arc<dyn ContentStore>,
    users: Arc<dyn UserStore>,
    access_cache: AccessCache,
    rbac: Arc<RbacEnforcer>,
}

impl ModerationService {
    /// Creates a new moderation service.
    pub fn new(
        contents: Arc<dyn ContentStore>,
        users: Arc<dyn UserStore>,
        access_cache: AccessCache,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            contents,
            users,
            access_cache,
            rbac,
        }
    }

    /// Make a content item publicly visible.
    pub async fn approve(&self, admin: &Principal, content_id: Uuid) -> AppResult<Content> {
        self.set_approval(admin, content_id, true).await
    }

    /// Hide a content item from the public catalog.
    pub async fn reject(&self, admin: &Principal, content_id: Uuid) -> AppResult<Content> {
        self.set_approval(admin, content_id, false).await
    }

    async fn set_approval(
        &self,
        admin: &Principal,
        content_id: Uuid,
        approved: bool,
    ) -> AppResult<Content> {
        self.rbac
            .require_permission(admin, SystemPermission::ContentModerate)?;

        let content = self
            .contents
            .set_approved(content_id, approved)
            .await?
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        info!(
            content_id = %content_id,
            user_id = %admin.user_id,
            is_approved = approved,
            "Content moderated"
        );
        Ok(content)
    }

    /// Content awaiting moderation, oldest first.
    pub async fn list_pending(
        &self,
        admin: &Principal,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        self.rbac
            .require_permission(admin, SystemPermission::ContentModerate)?;
        self.contents.list_pending(page).await
    }

    /// Mark a creator account as verified so it may publish.
    pub async fn verify_creator(&self, admin: &Principal, user_id: Uuid) -> AppResult<User> {
        self.rbac
            .require_permission(admin, SystemPermission::UserVerify)?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        if user.role != UserRole::Creator {
            return Err(AppError::validation("Only creator accounts can be verified"));
        }

        let user = self
            .users
            .set_verified(user_id, true)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %user_id, verified_by = %admin.user_id, "Creator verified");
        Ok(user)
    }

    /// All accounts, newest first.
    pub async fn list_users(
        &self,
        admin: &Principal,
        page: PageRequest,
    ) -> AppResult<PageResponse<User>> {
        self.rbac
            .require_permission(admin, SystemPermission::UserList)?;
        self.users.list(page).await
    }

    /// Delete a content item with its media and transactions.
    ///
    /// Admins may delete anything. Creators may delete only what they own.
    /// Cached access rights for the content are dropped afterwards.
    pub async fn delete_content(&self, principal: &Principal, content_id: Uuid) -> AppResult<u64> {
        let content = self
            .contents
            .find_by_id(content_id)
            .await?
            .filter(|c| visibility::is_visible_to(c, Some(principal)))
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        let permission = if content.is_owned_by(principal.user_id) {
            SystemPermission::ContentManageOwn
        } else {
            SystemPermission::ContentManageAny
        };
        self.rbac.require_permission(principal, permission)?;

        let removed = self
            .contents
            .delete(content_id)
            .await?
            .ok_or_else(|| AppError::not_found("Content not found"))?;
        let evicted = self.access_cache.forget_content(content_id).await;

        info!(
            content_id = %content_id,
            user_id = %principal.user_id,
            transactions_removed = removed,
            cache_entries_evicted = evicted,
            "Content deleted"
        );
        Ok(removed)
    }
}
