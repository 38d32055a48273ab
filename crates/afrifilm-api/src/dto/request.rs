//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;
use validator::Validate;

use afrifilm_core::types::PageRequest;
use afrifilm_entity::content::{ContentKind, NewMedia, UpdateContent};
use afrifilm_entity::user::UserRole;
use afrifilm_service::{PaymentDetails, PublishRequest, RegisterRequest};

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterBody {
    /// Username.
    #[validate(length(min = 3, max = 32, message = "Username must be 3 to 32 characters long"))]
    pub username: String,
    /// Email.
    #[validate(email(message = "Email address is invalid"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    /// `VIEWER` (default) or `CREATOR`.
    pub role: Option<UserRole>,
}

impl From<RegisterBody> for RegisterRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: body.password,
            role: body.role,
        }
    }
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginBody {
    /// Username or email.
    #[serde(alias = "email")]
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// New content submitted by a creator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PublishBody {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters long"))]
    pub title: String,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    pub price: Option<f64>,
    #[validate(url(message = "Poster URL is invalid"))]
    pub poster_url: Option<String>,
    pub media: NewMedia,
}

impl From<PublishBody> for PublishRequest {
    fn from(body: PublishBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            price: body.price,
            poster_url: body.poster_url,
            media: body.media,
        }
    }
}

/// Partial content edit. An explicit `"price": null` makes the content free.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentBody {
    #[validate(length(min = 1, max = 200, message = "Title must be 1 to 200 characters long"))]
    pub title: Option<String>,
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub price: Option<Option<f64>>,
    #[validate(url(message = "Poster URL is invalid"))]
    pub poster_url: Option<String>,
}

impl From<UpdateContentBody> for UpdateContent {
    fn from(body: UpdateContentBody) -> Self {
        Self {
            title: body.title,
            description: body.description,
            price: body.price,
            poster_url: body.poster_url,
        }
    }
}

/// Distinguishes an absent field from an explicit `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Catalog listing query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentListQuery {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub kind: Option<ContentKind>,
}

impl ContentListQuery {
    /// The clamped page request.
    pub fn page_request(&self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.per_page.unwrap_or(defaults.per_page),
        )
    }
}

/// `POST /api/payment/create` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseBody {
    pub content_id: Uuid,
}

/// `POST /api/payment/confirm` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmPaymentBody {
    pub transaction_id: Uuid,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Confirmation code is required"))]
    pub code: String,
}

impl ConfirmPaymentBody {
    /// The payer details handed to the gateway.
    pub fn details(&self) -> PaymentDetails {
        PaymentDetails {
            phone_number: self.phone_number.clone(),
            code: self.code.clone(),
        }
    }
}
