use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Máximo de emojis aceptados en una misma petición.
pub const MAX_EMOJIS: usize = 5;
/// Longitud máxima (en caracteres) de un texto emocional.
pub const MAX_EMOTION_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MoodInputError {
  #[error("invalid hex color: {0:?}")]
  InvalidColor(String),

  #[error("at least one emoji is required")]
  NoEmoji,

  #[error("at most 5 emojis are allowed, got {0}")]
  TooManyEmojis(usize),

  #[error("blank emoji entry")]
  BlankEmoji,

  #[error("emotion text is empty")]
  EmptyEmotion,

  #[error("emotion text exceeds 500 characters")]
  EmotionTooLong,

  #[error("coordinate ({x}, {y}) must lie in [0, 1] x [0, 1]")]
  CoordinateOutOfRange { x: f64, y: f64 },
}

/// Color hexadecimal normalizado: siempre `#RRGGBB` en mayúsculas.
///
/// La normalización ocurre aquí, en el borde, para que las tablas puedan
/// buscar por igualdad exacta.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(String);

impl HexColor {
  pub fn parse(raw: &str) -> Result<Self, MoodInputError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(MoodInputError::InvalidColor(raw.to_string()));
    }

    Ok(HexColor(format!("#{}", digits.to_ascii_uppercase())))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Componentes `(r, g, b)` en `0..=255`.
  pub fn rgb(&self) -> (u8, u8, u8) {
    let channel = |i: usize| u8::from_str_radix(&self.0[i..i + 2], 16).unwrap_or(0);
    (channel(1), channel(3), channel(5))
  }
}

impl TryFrom<String> for HexColor {
  type Error = MoodInputError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    HexColor::parse(&value)
  }
}

impl From<HexColor> for String {
  fn from(color: HexColor) -> Self {
    color.0
  }
}

impl fmt::Display for HexColor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Punto del plano de ánimo: `x` = eje bailable, `y` = eje acústico.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoodPoint {
  pub x: f64,
  pub y: f64,
}

impl MoodPoint {
  pub fn new(x: f64, y: f64) -> Result<Self, MoodInputError> {
    let valid = |v: f64| v.is_finite() && (0.0..=1.0).contains(&v);
    if !valid(x) || !valid(y) {
      return Err(MoodInputError::CoordinateOutOfRange { x, y });
    }
    Ok(Self { x, y })
  }
}

/// Señal de ánimo proporcionada por el usuario.
///
/// Se construye una vez por petición y no se modifica. En JSON se
/// representa como `{"type": "...", "value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum MoodInput {
  Color(HexColor),
  Emoji(Vec<String>),
  Emotion(String),
  Coordinate(MoodPoint),
}

impl MoodInput {
  pub fn color(raw: &str) -> Result<Self, MoodInputError> {
    Ok(MoodInput::Color(HexColor::parse(raw)?))
  }

  pub fn coordinate(x: f64, y: f64) -> Result<Self, MoodInputError> {
    Ok(MoodInput::Coordinate(MoodPoint::new(x, y)?))
  }

  /// Nombre del tipo tal como aparece en la representación serializada.
  pub fn kind(&self) -> &'static str {
    match self {
      MoodInput::Color(_) => "color",
      MoodInput::Emoji(_) => "emoji",
      MoodInput::Emotion(_) => "emotion",
      MoodInput::Coordinate(_) => "coordinate",
    }
  }

  /// Valida las restricciones que el sistema de tipos no puede expresar.
  ///
  /// Un `MoodInput` deserializado puede traer textos vacíos, listas vacías o
  /// coordenadas fuera de rango; esta comprobación corre antes de cualquier
  /// llamada de red.
  pub fn validate(&self) -> Result<(), MoodInputError> {
    match self {
      // HexColor sólo se construye ya normalizado.
      MoodInput::Color(_) => Ok(()),
      MoodInput::Emoji(emojis) => {
        if emojis.is_empty() {
          return Err(MoodInputError::NoEmoji);
        }
        if emojis.len() > MAX_EMOJIS {
          return Err(MoodInputError::TooManyEmojis(emojis.len()));
        }
        if emojis.iter().any(|e| e.trim().is_empty()) {
          return Err(MoodInputError::BlankEmoji);
        }
        Ok(())
      }
      MoodInput::Emotion(text) => {
        if text.trim().is_empty() {
          return Err(MoodInputError::EmptyEmotion);
        }
        if text.chars().count() > MAX_EMOTION_CHARS {
          return Err(MoodInputError::EmotionTooLong);
        }
        Ok(())
      }
      MoodInput::Coordinate(point) => MoodPoint::new(point.x, point.y).map(|_| ()),
    }
  }

  /// Valor crudo legible, usado en nombres y descripciones de reserva.
  pub fn raw_value(&self) -> String {
    match self {
      MoodInput::Color(color) => color.to_string(),
      MoodInput::Emoji(emojis) => emojis.join(" "),
      MoodInput::Emotion(text) => text.trim().to_string(),
      MoodInput::Coordinate(p) => format!("({:.2}, {:.2})", p.x, p.y),
    }
  }

  /// Resumen para el intérprete de lenguaje natural: el texto tal cual para
  /// emociones, `tipo: valor` para el resto.
  pub fn summary(&self) -> String {
    match self {
      MoodInput::Emotion(text) => text.trim().to_string(),
      other => format!("{}: {}", other.kind(), other.raw_value()),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hex_colors_are_normalized() {
    assert_eq!(HexColor::parse("#ff0000").unwrap().as_str(), "#FF0000");
    assert_eq!(HexColor::parse("00ff7f").unwrap().as_str(), "#00FF7F");
    assert_eq!(HexColor::parse("#12AbEf").unwrap().rgb(), (0x12, 0xAB, 0xEF));
  }

  #[test]
  fn malformed_hex_colors_are_rejected() {
    for raw in ["", "#FFF", "#GG0000", "#FF00001", "red"] {
      assert!(HexColor::parse(raw).is_err(), "{raw} should be rejected");
    }
  }

  #[test]
  fn serialized_shape_is_type_and_value() {
    let input = MoodInput::color("#ff0000").unwrap();
    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "color", "value": "#FF0000" }));

    let back: MoodInput =
      serde_json::from_value(serde_json::json!({ "type": "coordinate", "value": { "x": 0.2, "y": 0.9 } })).unwrap();
    assert_eq!(back, MoodInput::Coordinate(MoodPoint { x: 0.2, y: 0.9 }));
  }

  #[test]
  fn deserializing_a_bad_color_fails() {
    let res: Result<MoodInput, _> = serde_json::from_value(serde_json::json!({ "type": "color", "value": "#XYZ" }));
    assert!(res.is_err());
  }

  #[test]
  fn validation_rules() {
    assert_eq!(MoodInput::Emotion("   ".into()).validate(), Err(MoodInputError::EmptyEmotion));
    assert_eq!(MoodInput::Emotion("a".repeat(501)).validate(), Err(MoodInputError::EmotionTooLong));
    assert_eq!(MoodInput::Emoji(vec![]).validate(), Err(MoodInputError::NoEmoji));
    assert_eq!(MoodInput::Emoji(vec!["🔥".into(); 6]).validate(), Err(MoodInputError::TooManyEmojis(6)));
    assert!(MoodInput::Coordinate(MoodPoint { x: 1.2, y: 0.0 }).validate().is_err());
    assert!(MoodInput::coordinate(0.0, 1.0).is_ok());
    assert!(MoodInput::Emoji(vec!["🔥".into(), "🌊".into()]).validate().is_ok());
  }

  #[test]
  fn summary_uses_plain_text_for_emotions() {
    assert_eq!(MoodInput::Emotion(" rainy sunday ".into()).summary(), "rainy sunday");
    assert_eq!(MoodInput::color("#0000ff").unwrap().summary(), "color: #0000FF");
    assert_eq!(MoodInput::Emoji(vec!["🔥".into(), "🌊".into()]).summary(), "emoji: 🔥 🌊");
  }
}
