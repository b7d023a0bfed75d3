use crate::domain::{AudioFeatureTargets, AudioFeatures, MoodProfile, ScoredTrack, Track};

/// Compatibilidad de unos descriptores con un conjunto de objetivos, en `[0, 1]`.
///
/// Por cada característica presente en `targets`:
/// - dentro de `[min, max]`: `0.5 + 0.5 * (1 - |v - target| / max_distance)`,
///   con `max_distance = max(target - min, max - target)`; si es 0 la
///   contribución es 1.
/// - fuera: `max(0, 0.5 - distancia_al_borde)`.
///
/// El resultado es la media de las contribuciones; 0 si `targets` está vacío.
pub fn score(features: &AudioFeatures, targets: &AudioFeatureTargets) -> f64 {
  let mut total = 0.0;
  let mut count = 0usize;

  for (feature, range) in targets.iter() {
    let value = features.value(feature);
    let target = range.target_or_midpoint();

    let contribution = if range.contains(value) {
      let max_distance = (target - range.min).max(range.max - target);
      if max_distance <= 0.0 {
        1.0
      } else {
        let proximity = (1.0 - (value - target).abs() / max_distance).clamp(0.0, 1.0);
        0.5 + 0.5 * proximity
      }
    } else {
      (0.5 - range.distance_outside(value)).max(0.0)
    };

    total += contribution;
    count += 1;
  }

  if count == 0 { 0.0 } else { (total / count as f64).clamp(0.0, 1.0) }
}

/// Máximo de [`score`] sobre las facetas del perfil.
pub fn score_profile(features: &AudioFeatures, profile: &MoodProfile) -> f64 {
  profile.facets().iter().map(|f| score(features, &f.targets)).fold(0.0, f64::max)
}

/// Puntúa y ordena de mayor a menor. El orden es estable: a igual
/// puntuación se conserva el orden de entrada.
pub fn rank(tracks: Vec<Track>, profile: &MoodProfile) -> Vec<ScoredTrack> {
  let mut scored: Vec<ScoredTrack> = tracks
    .into_iter()
    .map(|track| {
      let score = score_profile(&track.audio_features, profile);
      ScoredTrack { track, score }
    })
    .collect();

  scored.sort_by(|a, b| b.score.total_cmp(&a.score));
  scored
}
