pub mod catalog_query;
pub mod diversifier;
pub mod mood_interpreter;
pub mod mood_tables;
pub mod playlist_service;
pub mod scorer;
pub mod settings;

pub use catalog_query::CatalogQuery;
pub use mood_interpreter::MoodInterpreter;
pub use playlist_service::{GenerateRequest, PlaylistService};
pub use settings::GenerationSettings;
