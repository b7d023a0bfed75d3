pub mod audio_features;
pub mod emotion;
pub mod mood;
pub mod playlist;
pub mod profile;
pub mod query;
pub mod track;

pub use audio_features::{AudioFeature, AudioFeatureTargets, AudioFeatures, FeatureRange, TargetsError};
pub use emotion::Emotion;
pub use mood::{HexColor, MoodInput, MoodInputError, MoodPoint};
pub use playlist::{Playlist, PlaylistId};
pub use profile::{MoodFacet, MoodProfile};
pub use query::{FeatureConstraint, FeatureQuery, PROVIDER_PAGE_LIMIT};
pub use track::{CatalogTrack, ScoredTrack, Track, TrackId};
