//! Film, season, and episode rows, plus the media view returned to callers
//! that hold access.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::ContentKind;

/// Video of a film-kind content item.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub content_id: Uuid,
    pub video_url: String,
    /// Running time in minutes.
    pub duration: Option<i32>,
}

/// A season of a series.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub id: Uuid,
    pub content_id: Uuid,
    pub number: i32,
    pub title: Option<String>,
}

/// An episode inside a season.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    pub id: Uuid,
    pub season_id: Uuid,
    pub number: i32,
    pub title: Option<String>,
    pub video_url: String,
}

/// Media supplied when publishing content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum NewMedia {
    Film {
        #[serde(rename = "videoUrl")]
        video_url: String,
        duration: Option<i32>,
    },
    Serie { seasons: Vec<NewSeason> },
}

impl NewMedia {
    /// The content kind this media implies.
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Film { .. } => ContentKind::Film,
            Self::Serie { .. } => ContentKind::Serie,
        }
    }
}

/// A season supplied when publishing a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeason {
    pub number: i32,
    pub title: Option<String>,
    #[serde(default)]
    pub episodes: Vec<NewEpisode>,
}

/// An episode supplied when publishing a series.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEpisode {
    pub number: i32,
    pub title: Option<String>,
    pub video_url: String,
}

/// Playable media locators, shown only to callers with access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum MediaLocator {
    Film {
        #[serde(rename = "videoUrl")]
        video_url: String,
        duration: Option<i32>,
    },
    Serie { seasons: Vec<SeasonMedia> },
}

/// Season with its episode locators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonMedia {
    pub number: i32,
    pub title: Option<String>,
    pub episodes: Vec<EpisodeMedia>,
}

/// A single episode locator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeMedia {
    pub number: i32,
    pub title: Option<String>,
    pub video_url: String,
}

impl MediaLocator {
    /// Assemble the series view from season and episode rows, ordered by number.
    pub fn from_series(mut seasons: Vec<Season>, episodes: Vec<Episode>) -> Self {
        seasons.sort_by_key(|s| s.number);
        let seasons = seasons
            .into_iter()
            .map(|season| {
                let mut eps: Vec<EpisodeMedia> = episodes
                    .iter()
                    .filter(|e| e.season_id == season.id)
                    .map(|e| EpisodeMedia {
                        number: e.number,
                        title: e.title.clone(),
                        video_url: e.video_url.clone(),
                    })
                    .collect();
                eps.sort_by_key(|e| e.number);
                SeasonMedia {
                    number: season.number,
                    title: season.title,
                    episodes: eps,
                }
            })
            .collect();
        Self::Serie { seasons }
    }

    /// Film view from its row.
    pub fn from_film(film: Film) -> Self {
        Self::Film {
            video_url: film.video_url,
            duration: film.duration,
        }
    }
}

impl From<&NewMedia> for MediaLocator {
    fn from(media: &NewMedia) -> Self {
        match media {
            NewMedia::Film { video_url, duration } => Self::Film {
                video_url: video_url.clone(),
                duration: *duration,
            },
            NewMedia::Serie { seasons } => Self::Serie {
                seasons: seasons
                    .iter()
                    .map(|s| SeasonMedia {
                        number: s.number,
                        title: s.title.clone(),
                        episodes: s
                            .episodes
                            .iter()
                            .map(|e| EpisodeMedia {
                                number: e.number,
                                title: e.title.clone(),
                                video_url: e.video_url.clone(),
                            })
                            .collect(),
                    })
                    .collect(),
            },
        }
    }
}
