use crate::domain::{AudioFeatures, Track};

/// Tamaño del prefijo fijo con las mejores puntuaciones.
pub const DEFAULT_ANCHOR_COUNT: usize = 5;

/// Bonus para candidatos que no comparten artista con nada ya elegido.
const NEW_ARTIST_BONUS: f64 = 0.1;

/// Escala de tempo para llevarlo aproximadamente a `[0, 1]`.
const TEMPO_SCALE: f64 = 200.0;

fn normalized(f: &AudioFeatures) -> [f64; 5] {
  [f.danceability, f.energy, f.valence, f.acousticness, f.tempo / TEMPO_SCALE]
}

/// Distancia media entre dos pistas sobre las cinco dimensiones normalizadas.
fn feature_distance(a: &AudioFeatures, b: &AudioFeatures) -> f64 {
  let (a, b) = (normalized(a), normalized(b));
  a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum::<f64>() / a.len() as f64
}

fn diversity(candidate: &Track, selected: &[Track]) -> f64 {
  if selected.is_empty() {
    return 0.0;
  }

  let spread = selected.iter().map(|s| feature_distance(&candidate.audio_features, &s.audio_features)).sum::<f64>()
    / selected.len() as f64;

  let shares_artist = selected.iter().any(|s| candidate.shares_artist_with(s));

  if shares_artist { spread } else { spread + NEW_ARTIST_BONUS }
}

/// Reduce una lista ordenada por puntuación (desc) a como mucho `max_count`
/// pistas.
///
/// Si ya cabe, se devuelve tal cual. Si no, las `anchor_count` mejores forman
/// un prefijo fijo y el resto se elige de forma voraz: en cada paso entra el
/// candidato con mayor diversidad respecto a lo ya elegido (el primero en
/// caso de empate). Determinista para una entrada dada.
pub fn select(ranked: Vec<Track>, max_count: usize, anchor_count: usize) -> Vec<Track> {
  if ranked.len() <= max_count {
    return ranked;
  }

  let anchors = anchor_count.min(ranked.len()).min(max_count);
  let mut pool = ranked;
  let mut result: Vec<Track> = pool.drain(..anchors).collect();

  while result.len() < max_count && !pool.is_empty() {
    let mut best_index = 0;
    let mut best_score = f64::NEG_INFINITY;

    for (i, candidate) in pool.iter().enumerate() {
      let d = diversity(candidate, &result);
      if d > best_score {
        best_score = d;
        best_index = i;
      }
    }

    result.push(pool.remove(best_index));
  }

  result
}
