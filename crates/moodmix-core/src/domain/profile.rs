use serde::{Deserialize, Serialize};

use super::audio_features::AudioFeatureTargets;

/// Una faceta de consulta: unos objetivos y, opcionalmente, el término de
/// búsqueda que los acompaña.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodFacet {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub search_term: Option<String>,
  pub targets: AudioFeatureTargets,
}

impl MoodFacet {
  pub fn targets(targets: AudioFeatureTargets) -> Self {
    Self { search_term: None, targets }
  }

  pub fn term(search_term: impl Into<String>, targets: AudioFeatureTargets) -> Self {
    Self { search_term: Some(search_term.into()), targets }
  }
}

/// Resultado de interpretar un [`MoodInput`](super::mood::MoodInput).
///
/// Color, coordenada y emoción producen una única faceta sin término (modo
/// por rangos). Varios emojis producen una faceta por emoji; sus objetivos
/// no se promedian, cada faceta consulta y puntúa por separado.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodProfile {
  facets: Vec<MoodFacet>,
}

impl MoodProfile {
  pub fn single(targets: AudioFeatureTargets) -> Self {
    Self { facets: vec![MoodFacet::targets(targets)] }
  }

  /// Construye un perfil multi-faceta. Devuelve `None` si no hay facetas.
  pub fn from_facets(facets: Vec<MoodFacet>) -> Option<Self> {
    if facets.is_empty() { None } else { Some(Self { facets }) }
  }

  pub fn facets(&self) -> &[MoodFacet] {
    &self.facets
  }

  /// Objetivos de la primera faceta; los que se persisten con la playlist.
  pub fn primary(&self) -> &AudioFeatureTargets {
    // `facets` nunca está vacío: ambos constructores lo garantizan.
    &self.facets[0].targets
  }

  /// Términos de búsqueda en orden, si todas las facetas traen uno.
  pub fn search_terms(&self) -> Option<Vec<&str>> {
    self.facets.iter().map(|f| f.search_term.as_deref()).collect()
  }
}
