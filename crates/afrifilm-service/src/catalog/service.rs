//! Catalog browsing, content details and creator publishing.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use afrifilm_auth::rbac::{RbacEnforcer, SystemPermission};
use afrifilm_auth::Principal;
use afrifilm_core::error::AppError;
use afrifilm_core::result::AppResult;
use afrifilm_core::types::{PageRequest, PageResponse};
use afrifilm_database::ContentStore;
use afrifilm_entity::content::{
    Content, ContentKind, CreateContent, MediaLocator, NewMedia, UpdateContent,
};

use super::visibility;
use crate::entitlement::{AccessDecision, EntitlementEngine};

/// Content details as returned to a caller.
///
/// `media` is present only when `access.granted` is true.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSummary {
    #[serde(flatten)]
    pub content: Content,
    pub access: AccessDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media: Option<MediaLocator>,
}

/// A new film or series submitted by a creator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    pub title: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub poster_url: Option<String>,
    pub media: NewMedia,
}

/// Reads and writes the catalog on behalf of a caller.
#[derive(Debug, Clone)]
pub struct CatalogService {
    /// Content store.
    contents: Arc<dyn ContentStore>,
    /// Access decisions for media gating.
    engine: Arc<EntitlementEngine>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl CatalogService {
    /// Creates a new catalog service.
    pub fn new(
        contents: Arc<dyn ContentStore>,
        engine: Arc<EntitlementEngine>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            contents,
            engine,
            rbac,
        }
    }

    /// Details of an approved content item for an anonymous caller.
    pub async fn get_public_content(&self, content_id: Uuid) -> AppResult<ContentSummary> {
        self.get_content_for_principal(content_id, None).await
    }

    /// Details of a content item as seen by `principal`.
    ///
    /// The approval gate is relaxed for the owning creator and for admins.
    /// Media locators are loaded only when the caller holds access.
    pub async fn get_content_for_principal(
        &self,
        content_id: Uuid,
        principal: Option<&Principal>,
    ) -> AppResult<ContentSummary> {
        let content = self
            .contents
            .find_by_id(content_id)
            .await?
            .filter(|c| visibility::is_visible_to(c, principal))
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        let access = self.engine.decide(principal, &content).await?;
        let media = if access.granted {
            self.contents.find_media(&content).await?
        } else {
            None
        };

        Ok(ContentSummary {
            content,
            access,
            media,
        })
    }

    /// Approved content, newest first. Listings never carry media.
    pub async fn list_public(
        &self,
        kind: Option<ContentKind>,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        self.contents.list_approved(kind, page).await
    }

    /// Everything the caller has published, approved or not.
    pub async fn list_for_creator(
        &self,
        principal: &Principal,
        page: PageRequest,
    ) -> AppResult<PageResponse<Content>> {
        self.rbac
            .require_permission(principal, SystemPermission::ContentManageOwn)?;
        self.contents.list_by_creator(principal.user_id, page).await
    }

    /// Publish a film or series.
    ///
    /// Creator submissions wait for moderation; admin submissions are
    /// approved on creation.
    pub async fn publish(&self, principal: &Principal, req: PublishRequest) -> AppResult<Content> {
        self.rbac.require_publisher(principal)?;

        let title = req.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Title is required"));
        }
        validate_price(req.price)?;
        validate_media(&req.media)?;

        let content = self
            .contents
            .create(CreateContent {
                title: title.to_string(),
                description: req.description,
                price: req.price,
                creator_id: principal.user_id,
                poster_url: req.poster_url,
                is_approved: principal.role.is_admin(),
                media: req.media,
            })
            .await?;

        info!(
            content_id = %content.id,
            user_id = %principal.user_id,
            kind = %content.kind,
            is_approved = content.is_approved,
            "Content published"
        );

        Ok(content)
    }

    /// Edit the catalog fields of one's own content. The edit sends the
    /// content back to moderation.
    pub async fn update(
        &self,
        principal: &Principal,
        content_id: Uuid,
        changes: UpdateContent,
    ) -> AppResult<Content> {
        self.rbac
            .require_permission(principal, SystemPermission::ContentManageOwn)?;

        let existing = self
            .contents
            .find_by_id(content_id)
            .await?
            .filter(|c| visibility::is_visible_to(c, Some(principal)))
            .ok_or_else(|| AppError::not_found("Content not found"))?;
        if !existing.is_owned_by(principal.user_id) {
            return Err(AppError::forbidden("Only the owning creator may edit this content"));
        }

        if let Some(title) = &changes.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Title cannot be empty"));
            }
        }
        if let Some(price) = changes.price {
            validate_price(price)?;
        }

        let updated = self
            .contents
            .update(content_id, changes)
            .await?
            .ok_or_else(|| AppError::not_found("Content not found"))?;

        info!(content_id = %content_id, user_id = %principal.user_id, "Content updated, awaiting approval");
        Ok(updated)
    }
}

fn validate_price(price: Option<f64>) -> AppResult<()> {
    match price {
        Some(p) if !p.is_finite() || p < 0.0 => {
            Err(AppError::validation("Price must be a non-negative number"))
        }
        _ => Ok(()),
    }
}

fn validate_media(media: &NewMedia) -> AppResult<()> {
    match media {
        NewMedia::Film { video_url, duration } => {
            if video_url.trim().is_empty() {
                return Err(AppError::validation("A film requires a video URL"));
            }
            if duration.is_some_and(|d| d <= 0) {
                return Err(AppError::validation("Duration must be positive"));
            }
        }
        NewMedia::Serie { seasons } => {
            if seasons.is_empty() {
                return Err(AppError::validation("A series requires at least one season"));
            }
            let mut numbers = HashSet::new();
            for season in seasons {
                if !numbers.insert(season.number) {
                    return Err(AppError::validation(format!(
                        "Season {} appears more than once",
                        season.number
                    )));
                }
                let mut episodes = HashSet::new();
                for episode in &season.episodes {
                    if !episodes.insert(episode.number) {
                        return Err(AppError::validation(format!(
                            "Episode {} of season {} appears more than once",
                            episode.number, season.number
                        )));
                    }
                    if episode.video_url.trim().is_empty() {
                        return Err(AppError::validation("Every episode requires a video URL"));
                    }
                }
            }
        }
    }
    Ok(())
}
