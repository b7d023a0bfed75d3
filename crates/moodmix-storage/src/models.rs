use crate::schema::{playlist_tracks, playlists, tracks};

use diesel::prelude::*;

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = tracks)]
#[diesel(treat_none_as_null = true)]
pub struct TrackRow {
  pub id: String,
  pub name: String,
  pub artists: String,
  pub album: String,
  pub audio_features: String,
  pub duration_ms: i64,
  pub popularity: i32,
  pub preview_url: Option<String>,
  pub spotify_uri: Option<String>,
  pub album_image: Option<String>,
  pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Insertable, AsChangeset)]
#[diesel(table_name = playlists)]
#[diesel(treat_none_as_null = true)]
pub struct PlaylistRow {
  pub id: String,
  pub name: String,
  pub description: String,
  pub mood_input: String,
  pub targets: String,
  pub external_id: Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = playlist_tracks)]
pub struct PlaylistTrackRow {
  pub playlist_id: String,
  pub position: i32,
  pub track_id: String,
}
