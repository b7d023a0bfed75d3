use std::fmt::Write;

use moodmix_core::domain::Playlist;
use moodmix_storage::PlaylistSummary;

/// Vista de texto de una playlist generada.
pub fn playlist_text(playlist: &Playlist) -> String {
  let mut out = String::new();
  let _ = writeln!(out, "{}", playlist.name);
  if !playlist.description.is_empty() {
    let _ = writeln!(out, "{}", playlist.description);
  }
  let _ = writeln!(
    out,
    "{} tracks · {} · {}",
    playlist.tracks.len(),
    playlist.total_duration_string(),
    playlist.mood_descriptor()
  );
  let _ = writeln!(out);

  let width = playlist.tracks.len().to_string().len();
  for (i, track) in playlist.tracks.iter().enumerate() {
    let _ = writeln!(
      out,
      "{:>width$}. {} - {} ({}) [{}]",
      i + 1,
      track.name,
      track.artists_string(),
      track.duration_string(),
      track.audio_features.emotional_profile()
    );
  }

  if let Some(external_id) = &playlist.external_id {
    let _ = writeln!(out);
    let _ = writeln!(out, "Saved to Spotify: https://open.spotify.com/playlist/{external_id}");
  }

  out
}

pub fn playlist_json(playlist: &Playlist) -> Result<String, serde_json::Error> {
  serde_json::to_string_pretty(playlist)
}

pub fn history_text(entries: &[PlaylistSummary], cached_tracks: i64) -> String {
  if entries.is_empty() {
    return "No playlists saved yet.\n".to_string();
  }

  let mut out = String::new();
  for entry in entries {
    let remote = if entry.external_id.is_some() { " [spotify]" } else { "" };
    let _ = writeln!(
      out,
      "{}  {:<7} {:>3} tracks  {}{}",
      entry.created_at.format("%Y-%m-%d %H:%M"),
      entry.mood_input.kind(),
      entry.track_count,
      entry.name,
      remote
    );
  }
  let _ = writeln!(out, "{} playlists shown, {cached_tracks} tracks cached", entries.len());
  out
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use moodmix_core::domain::{AudioFeatures, MoodInput, PlaylistId, Track, TrackId};

  use super::*;

  fn track(name: &str, duration_ms: u64) -> Track {
    Track {
      id: TrackId::from(name),
      name: name.into(),
      artists: vec!["Ana".into(), "Bo".into()],
      album: String::new(),
      audio_features: AudioFeatures {
        danceability: 0.8,
        energy: 0.8,
        valence: 0.8,
        acousticness: 0.1,
        instrumentalness: 0.0,
        speechiness: 0.05,
        tempo: 125.0,
        loudness: -5.0,
        key: None,
        mode: None,
        time_signature: None,
      },
      duration_ms,
      popularity: 50,
      preview_url: None,
      spotify_uri: None,
      album_image: None,
    }
  }

  #[test]
  fn text_view_lists_tracks_in_order() {
    let mut playlist = Playlist::new(
      "Color Mood - 2024-03-09".into(),
      "Bright and loud".into(),
      vec![track("First", 185_000), track("Second", 61_000)],
      MoodInput::color("#ff0000").unwrap(),
    );
    playlist.external_id = Some("abc".into());

    let text = playlist_text(&playlist);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Color Mood - 2024-03-09");
    assert_eq!(lines[1], "Bright and loud");
    assert!(lines[2].starts_with("2 tracks"));
    assert_eq!(lines[4], "1. First - Ana, Bo (3:05) [Happy, Energetic, Danceable]");
    assert_eq!(lines[5], "2. Second - Ana, Bo (1:01) [Happy, Energetic, Danceable]");
    assert!(text.ends_with("https://open.spotify.com/playlist/abc\n"));
  }

  #[test]
  fn json_view_is_the_serialized_playlist() {
    let playlist = Playlist::new("P".into(), "d".into(), vec![track("a", 1000)], MoodInput::Emotion("calm".into()));
    let value: serde_json::Value = serde_json::from_str(&playlist_json(&playlist).unwrap()).unwrap();

    assert_eq!(value["name"], "P");
    assert_eq!(value["mood_input"]["type"], "emotion");
    assert_eq!(value["tracks"].as_array().map(Vec::len), Some(1));
  }

  #[test]
  fn history_rows() {
    assert_eq!(history_text(&[], 0), "No playlists saved yet.\n");

    let entry = PlaylistSummary {
      id: PlaylistId::new(),
      name: "🔥 Vibes - 2024-03-09".into(),
      description: String::new(),
      mood_input: MoodInput::Emoji(vec!["🔥".into()]),
      track_count: 30,
      external_id: Some("x".into()),
      created_at: Utc.with_ymd_and_hms(2024, 3, 9, 18, 30, 0).unwrap(),
    };
    assert_eq!(
      history_text(&[entry], 42),
      "2024-03-09 18:30  emoji    30 tracks  🔥 Vibes - 2024-03-09 [spotify]\n1 playlists shown, 42 tracks cached\n"
    );
  }
}
