//! Content kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a content item is a single film or a multi-season series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "content_kind", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentKind {
    /// A single feature with one video.
    Film,
    /// Seasons of episodes.
    Serie,
}

impl ContentKind {
    /// Return the kind as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Film => "FILM",
            Self::Serie => "SERIE",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
