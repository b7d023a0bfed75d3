use moodmix_core::domain::Track;

/// Pistas que se listan en el prompt de descripción.
const DESCRIBE_SAMPLE: usize = 10;

pub(crate) fn interpret(text: &str) -> String {
  format!(
    r#"You are an expert in music and emotional analysis. Translate the following text into Spotify audio feature ranges.

User text: "{text}"

Available features (0.0 to 1.0 unless noted):
- danceability: how suitable the music is for dancing
- energy: perceived intensity and activity
- valence: musical positiveness (0 = sad/negative, 1 = happy/positive)
- acousticness: whether the track is acoustic (0 = electronic, 1 = acoustic)
- instrumentalness: whether the track has no vocals
- speechiness: presence of spoken words
- tempo: beats per minute (70 to 200)
- loudness: decibels (-60 to 0)

Consider words about energy (calm, restless, intense, relaxed), mood (happy, sad, nostalgic, romantic),
rhythm (danceable, slow, fast) and style (acoustic, electronic, instrumental).

Answer ONLY with valid JSON in this shape:
{{
  "danceability": {{"min": 0.0, "max": 1.0, "target": 0.5}},
  "energy": {{"min": 0.0, "max": 1.0, "target": 0.5}},
  "valence": {{"min": 0.0, "max": 1.0, "target": 0.5}},
  "acousticness": {{"min": 0.0, "max": 1.0, "target": 0.5}},
  "tempo": {{"min": 70, "max": 200, "target": 120}}
}}

Include only the features that matter for the described emotion. Use min/max for flexibility and target for the ideal value."#
  )
}

pub(crate) fn describe(mood_summary: &str, sample: &[Track]) -> String {
  let tracks = sample
    .iter()
    .take(DESCRIBE_SAMPLE)
    .map(|t| format!("{} - {}", t.name, t.artists_string()))
    .collect::<Vec<_>>()
    .join("\n");

  format!(
    r#"Based on the mood "{mood_summary}" and these first tracks of the playlist:

{tracks}

Write a creative, engaging description for the playlist (150 characters at most). It should capture the mood,
be evocative, use poetic but accessible language and hint at the discovery aspect.

Answer only with the description, without quotes or extra formatting."#
  )
}

/// Quita comillas envolventes que el modelo añade a veces.
pub(crate) fn clean_description(text: &str) -> String {
  let trimmed = text.trim();
  let unquoted = trimmed
    .strip_prefix('"')
    .and_then(|t| t.strip_suffix('"'))
    .unwrap_or(trimmed);
  unquoted.trim().to_string()
}
