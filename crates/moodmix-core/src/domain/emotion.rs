use std::fmt;

use serde::{Deserialize, Serialize};

/// Categorías emocionales reconocidas por la detección por palabras clave.
///
/// El orden de declaración es el orden de desempate: ante el mismo número
/// de coincidencias gana la primera categoría.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
  Happy,
  Sad,
  Energetic,
  Calm,
  Romantic,
  Angry,
  Focused,
  Dreamy,
  Nostalgic,
  Excited,
}

impl Emotion {
  pub const ALL: [Emotion; 10] = [
    Emotion::Happy,
    Emotion::Sad,
    Emotion::Energetic,
    Emotion::Calm,
    Emotion::Romantic,
    Emotion::Angry,
    Emotion::Focused,
    Emotion::Dreamy,
    Emotion::Nostalgic,
    Emotion::Excited,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Emotion::Happy => "happy",
      Emotion::Sad => "sad",
      Emotion::Energetic => "energetic",
      Emotion::Calm => "calm",
      Emotion::Romantic => "romantic",
      Emotion::Angry => "angry",
      Emotion::Focused => "focused",
      Emotion::Dreamy => "dreamy",
      Emotion::Nostalgic => "nostalgic",
      Emotion::Excited => "excited",
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      Emotion::Happy => "Cheerful and upbeat",
      Emotion::Sad => "Melancholic and introspective",
      Emotion::Energetic => "Energetic and vibrant",
      Emotion::Calm => "Calm and relaxing",
      Emotion::Romantic => "Romantic and intimate",
      Emotion::Angry => "Intense and powerful",
      Emotion::Focused => "Focused and concentrated",
      Emotion::Dreamy => "Dreamy and ethereal",
      Emotion::Nostalgic => "Nostalgic and wistful",
      Emotion::Excited => "Thrilling and enthusiastic",
    }
  }
}

impl fmt::Display for Emotion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
