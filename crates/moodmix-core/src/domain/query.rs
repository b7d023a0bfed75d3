use super::audio_features::{AudioFeature, AudioFeatureTargets};

/// Máximo de resultados que el proveedor acepta en una sola llamada.
pub const PROVIDER_PAGE_LIMIT: usize = 100;

/// Restricción sobre una característica dentro de una consulta por rangos.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureConstraint {
  pub feature: AudioFeature,
  pub min: f64,
  pub max: f64,
  pub target: f64,
}

/// Consulta al catálogo por rangos de características.
///
/// Cada rango `{min, max, target}` se traduce a `min_X`, `max_X` y
/// `target_X`. La variante relajada no lleva ninguna restricción: el
/// proveedor devuelve lo que considere representativo.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureQuery {
  pub constraints: Vec<FeatureConstraint>,
  pub limit: usize,
}

impl FeatureQuery {
  /// `limit` se recorta al máximo por llamada del proveedor (y nunca baja de 1).
  pub fn from_targets(targets: &AudioFeatureTargets, limit: usize) -> Self {
    let constraints = targets
      .iter()
      .map(|(feature, range)| FeatureConstraint {
        feature,
        min: range.min,
        max: range.max,
        target: range.target_or_midpoint(),
      })
      .collect();

    Self { constraints, limit: limit.clamp(1, PROVIDER_PAGE_LIMIT) }
  }

  pub fn relaxed(&self) -> Self {
    Self {
      constraints: Vec::new(),
      limit: self.limit,
    }
  }

  pub fn is_relaxed(&self) -> bool {
    self.constraints.is_empty()
  }

  /// Pares `(nombre, valor)` listos para una query string.
  pub fn to_params(&self) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(self.constraints.len() * 3 + 1);

    for c in &self.constraints {
      let name = c.feature.as_str();
      params.push((format!("min_{name}"), c.min.to_string()));
      params.push((format!("max_{name}"), c.max.to_string()));
      params.push((format!("target_{name}"), c.target.to_string()));
    }

    params.push(("limit".to_string(), self.limit.to_string()));
    params
  }
}
