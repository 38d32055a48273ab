//! Content entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::ContentKind;
use super::media::NewMedia;

/// A catalog entry. Media locators live in the film, season, and episode
/// tables and are only loaded for callers that hold access.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Unique content identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Synopsis.
    pub description: Option<String>,
    /// Film or series.
    pub kind: ContentKind,
    /// Purchase price. `None` or zero means free.
    pub price: Option<f64>,
    /// Set by an admin; unapproved content is hidden from the public.
    pub is_approved: bool,
    /// Owning creator.
    pub creator_id: Uuid,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// When the content was created.
    pub created_at: DateTime<Utc>,
    /// When the content was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Content {
    /// Free content has no price or a price of zero.
    pub fn is_free(&self) -> bool {
        self.price.is_none_or(|p| p <= 0.0)
    }

    /// The amount a purchase of this content is recorded at.
    pub fn purchase_amount(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    /// Whether the given user owns this content.
    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.creator_id == user_id
    }
}

/// Data required to publish a new content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContent {
    /// Display title.
    pub title: String,
    /// Synopsis.
    pub description: Option<String>,
    /// Purchase price.
    pub price: Option<f64>,
    /// Owning creator.
    pub creator_id: Uuid,
    /// Poster image URL.
    pub poster_url: Option<String>,
    /// Admin-published content may skip moderation.
    pub is_approved: bool,
    /// Film video or series seasons. Determines the content kind.
    pub media: NewMedia,
}

/// Partial update of the catalog fields of a content item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateContent {
    /// New title.
    pub title: Option<String>,
    /// New synopsis.
    pub description: Option<String>,
    /// New price. `Some(None)` makes the content free.
    pub price: Option<Option<f64>>,
    /// New poster.
    pub poster_url: Option<String>,
}

impl UpdateContent {
    /// Apply this update onto an existing row.
    pub fn apply(&self, content: &mut Content) {
        if let Some(title) = &self.title {
            content.title = title.clone();
        }
        if let Some(description) = &self.description {
            content.description = Some(description.clone());
        }
        if let Some(price) = self.price {
            content.price = price;
        }
        if let Some(poster) = &self.poster_url {
            content.poster_url = Some(poster.clone());
        }
    }
}
