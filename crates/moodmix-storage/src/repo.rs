use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use uuid::Uuid;

use moodmix_core::domain::{AudioFeatureTargets, MoodInput, Playlist, PlaylistId, Track, TrackId};

use crate::error::StorageError;
use crate::models::{PlaylistRow, PlaylistTrackRow, TrackRow};

/// Resumen de una playlist guardada, para listados.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistSummary {
  pub id: PlaylistId,
  pub name: String,
  pub description: String,
  pub mood_input: MoodInput,
  pub track_count: usize,
  pub external_id: Option<String>,
  pub created_at: DateTime<Utc>,
}

fn track_to_row(track: &Track, now: &str) -> Result<TrackRow, StorageError> {
  Ok(TrackRow {
    id: track.id.to_string(),
    name: track.name.clone(),
    artists: serde_json::to_string(&track.artists)?,
    album: track.album.clone(),
    audio_features: serde_json::to_string(&track.audio_features)?,
    duration_ms: i64::try_from(track.duration_ms).unwrap_or(i64::MAX),
    popularity: i32::from(track.popularity),
    preview_url: track.preview_url.clone(),
    spotify_uri: track.spotify_uri.clone(),
    album_image: track.album_image.clone(),
    updated_at: now.to_string(),
  })
}

fn row_to_track(row: TrackRow) -> Result<Track, StorageError> {
  Ok(Track {
    id: TrackId::new(row.id),
    name: row.name,
    artists: serde_json::from_str(&row.artists)?,
    album: row.album,
    audio_features: serde_json::from_str(&row.audio_features)?,
    duration_ms: u64::try_from(row.duration_ms).unwrap_or(0),
    popularity: u8::try_from(row.popularity.clamp(0, 100)).unwrap_or(0),
    preview_url: row.preview_url,
    spotify_uri: row.spotify_uri,
    album_image: row.album_image,
  })
}

/// Ancho fijo para que el orden lexicográfico coincida con el cronológico.
fn timestamp(t: &DateTime<Utc>) -> String {
  t.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, StorageError> {
  DateTime::parse_from_rfc3339(raw)
    .map(|t| t.with_timezone(&Utc))
    .map_err(|e| StorageError::Corrupt(format!("timestamp {raw:?}: {e}")))
}

fn parse_playlist_id(raw: &str) -> Result<PlaylistId, StorageError> {
  Uuid::parse_str(raw).map(PlaylistId::from_uuid).map_err(|e| StorageError::Corrupt(format!("playlist id {raw:?}: {e}")))
}

fn upsert_track_rows(conn: &mut SqliteConnection, rows: &[TrackRow]) -> Result<(), StorageError> {
  use crate::schema::tracks::dsl::*;

  for row in rows {
    diesel::insert_into(tracks).values(row).on_conflict(id).do_update().set(row).execute(conn)?;
  }
  Ok(())
}

/// Inserta o actualiza pistas por id de proveedor.
pub fn upsert_tracks(conn: &mut SqliteConnection, items: &[Track]) -> Result<usize, StorageError> {
  let now = timestamp(&Utc::now());
  let rows = items.iter().map(|t| track_to_row(t, &now)).collect::<Result<Vec<_>, _>>()?;

  conn.transaction(|conn| upsert_track_rows(conn, &rows))?;
  Ok(rows.len())
}

/// Guarda la playlist, sus pistas (en orden) y los objetivos que la
/// generaron. Volver a guardar la misma playlist reemplaza su lista.
pub fn save_playlist(
  conn: &mut SqliteConnection,
  playlist: &Playlist,
  resolved_targets: &AudioFeatureTargets,
) -> Result<(), StorageError> {
  let now = timestamp(&Utc::now());
  let track_rows = playlist.tracks.iter().map(|t| track_to_row(t, &now)).collect::<Result<Vec<_>, _>>()?;

  let playlist_row = PlaylistRow {
    id: playlist.id.to_string(),
    name: playlist.name.clone(),
    description: playlist.description.clone(),
    mood_input: serde_json::to_string(&playlist.mood_input)?,
    targets: serde_json::to_string(resolved_targets)?,
    external_id: playlist.external_id.clone(),
    created_at: timestamp(&playlist.created_at),
    updated_at: timestamp(&playlist.updated_at),
  };

  let entries: Vec<PlaylistTrackRow> = playlist
    .tracks
    .iter()
    .enumerate()
    .map(|(i, t)| PlaylistTrackRow {
      playlist_id: playlist_row.id.clone(),
      position: i32::try_from(i).unwrap_or(i32::MAX),
      track_id: t.id.to_string(),
    })
    .collect();

  conn.transaction(|conn| {
    upsert_track_rows(conn, &track_rows)?;

    {
      use crate::schema::playlists::dsl::*;
      diesel::insert_into(playlists)
        .values(&playlist_row)
        .on_conflict(id)
        .do_update()
        .set(&playlist_row)
        .execute(conn)?;
    }

    {
      use crate::schema::playlist_tracks::dsl::*;
      diesel::delete(playlist_tracks.filter(playlist_id.eq(&playlist_row.id))).execute(conn)?;
      diesel::insert_into(playlist_tracks).values(&entries).execute(conn)?;
    }

    Ok::<_, StorageError>(())
  })
}

/// Playlists más recientes primero.
pub fn list_playlists(conn: &mut SqliteConnection, limit: i64) -> Result<Vec<PlaylistSummary>, StorageError> {
  use crate::schema::playlist_tracks::dsl as pt;
  use crate::schema::playlists::dsl::*;

  let rows: Vec<PlaylistRow> =
    playlists.order(created_at.desc()).limit(limit).select(PlaylistRow::as_select()).load(conn)?;

  rows
    .into_iter()
    .map(|row| {
      let count: i64 = pt::playlist_tracks.filter(pt::playlist_id.eq(&row.id)).count().get_result(conn)?;
      Ok(PlaylistSummary {
        id: parse_playlist_id(&row.id)?,
        name: row.name,
        description: row.description,
        mood_input: serde_json::from_str(&row.mood_input)?,
        track_count: usize::try_from(count).unwrap_or(0),
        external_id: row.external_id,
        created_at: parse_timestamp(&row.created_at)?,
      })
    })
    .collect()
}

/// Playlist completa con sus pistas en orden, y los objetivos guardados.
pub fn find_playlist(
  conn: &mut SqliteConnection,
  playlist: PlaylistId,
) -> Result<Option<(Playlist, AudioFeatureTargets)>, StorageError> {
  use crate::schema::{playlist_tracks, playlists, tracks};

  let key = playlist.to_string();
  let Some(row) = playlists::table
    .filter(playlists::id.eq(&key))
    .select(PlaylistRow::as_select())
    .first(conn)
    .optional()?
  else {
    return Ok(None);
  };

  let track_rows: Vec<TrackRow> = playlist_tracks::table
    .inner_join(tracks::table)
    .filter(playlist_tracks::playlist_id.eq(&key))
    .order(playlist_tracks::position.asc())
    .select(TrackRow::as_select())
    .load(conn)?;

  let loaded = Playlist {
    id: parse_playlist_id(&row.id)?,
    name: row.name,
    description: row.description,
    tracks: track_rows.into_iter().map(row_to_track).collect::<Result<_, _>>()?,
    mood_input: serde_json::from_str(&row.mood_input)?,
    created_at: parse_timestamp(&row.created_at)?,
    updated_at: parse_timestamp(&row.updated_at)?,
    external_id: row.external_id,
  };
  let targets: AudioFeatureTargets = serde_json::from_str(&row.targets)?;

  Ok(Some((loaded, targets)))
}

pub fn find_track(conn: &mut SqliteConnection, track: &TrackId) -> Result<Option<Track>, StorageError> {
  use crate::schema::tracks::dsl::*;

  let row = tracks.filter(id.eq(track.as_str())).select(TrackRow::as_select()).first(conn).optional()?;
  row.map(row_to_track).transpose()
}

pub fn count_tracks(conn: &mut SqliteConnection) -> Result<i64, StorageError> {
  use crate::schema::tracks::dsl::*;
  Ok(tracks.count().get_result(conn)?)
}
