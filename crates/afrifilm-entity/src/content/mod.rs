//! Content domain entities: the catalog row plus its film or series media.

pub mod kind;
pub mod media;
pub mod model;

pub use kind::ContentKind;
pub use media::{Episode, EpisodeMedia, Film, MediaLocator, NewEpisode, NewMedia, NewSeason, Season, SeasonMedia};
pub use model::{Content, CreateContent, UpdateContent};
