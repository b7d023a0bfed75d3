use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::{
  AudioFeatures, CatalogTrack, FeatureQuery, MoodFacet, MoodProfile, PROVIDER_PAGE_LIMIT, Track, TrackId,
};
use crate::errors::CoreError;
use crate::ports::{CatalogError, CatalogProvider};

/// Adaptador entre un [`MoodProfile`] y el catálogo.
///
/// Cada faceta se convierte en una consulta: búsqueda por texto si trae
/// término, búsqueda por rangos si no. Las consultas corren en paralelo y se
/// fusionan en el orden de las facetas, sin duplicados.
pub struct CatalogQuery<C>
where
  C: CatalogProvider,
{
  catalog: Arc<C>,
}

impl<C> CatalogQuery<C>
where
  C: CatalogProvider,
{
  pub fn new(catalog: Arc<C>) -> Self {
    Self { catalog }
  }

  /// Candidatos con descriptores de audio resueltos, sin ids repetidos.
  ///
  /// Cero resultados no es un error. Sólo falla si fallan todas las
  /// consultas.
  pub async fn fetch_candidates(&self, profile: &MoodProfile, desired: usize) -> Result<Vec<Track>, CoreError> {
    let facets = profile.facets();
    let per_facet = desired.div_ceil(facets.len().max(1)).clamp(1, PROVIDER_PAGE_LIMIT);

    let results = join_all(facets.iter().map(|facet| self.query_facet(facet, per_facet))).await;

    let mut merged = Vec::new();
    let mut last_error = None;
    let mut failures = 0usize;

    for (facet, result) in facets.iter().zip(results) {
      match result {
        Ok(tracks) => merged.extend(tracks),
        Err(error) => {
          warn!(term = facet.search_term.as_deref().unwrap_or("<features>"), %error, "catalog query failed, skipping");
          failures += 1;
          last_error = Some(error);
        }
      }
    }

    if failures == facets.len() {
      if let Some(error) = last_error {
        return Err(CoreError::CatalogQueryFailed(error.to_string()));
      }
    }

    let unique = dedup_by_id(merged);
    debug!(candidates = unique.len(), "catalog candidates fetched");

    Ok(self.attach_features(unique).await)
  }

  async fn query_facet(&self, facet: &MoodFacet, limit: usize) -> Result<Vec<CatalogTrack>, CatalogError> {
    if let Some(term) = &facet.search_term {
      return self.catalog.search_by_text(term, limit).await;
    }

    let query = FeatureQuery::from_targets(&facet.targets, limit);
    let tracks = self.catalog.search_by_features(&query).await?;
    if !tracks.is_empty() {
      return Ok(tracks);
    }

    debug!("feature query returned nothing, retrying without feature constraints");
    match self.catalog.search_by_features(&query.relaxed()).await {
      Ok(tracks) => Ok(tracks),
      Err(error) => {
        warn!(%error, "relaxed feature query failed");
        Ok(Vec::new())
      }
    }
  }

  /// Pide los descriptores en lotes y descarta toda pista sin descriptores
  /// completos.
  async fn attach_features(&self, tracks: Vec<CatalogTrack>) -> Vec<Track> {
    if tracks.is_empty() {
      return Vec::new();
    }

    let ids: Vec<TrackId> = tracks.iter().map(|t| t.id.clone()).collect();
    let chunks: Vec<&[TrackId]> = ids.chunks(PROVIDER_PAGE_LIMIT).collect();
    let responses = join_all(chunks.iter().map(|chunk| self.catalog.get_audio_features(chunk))).await;

    let mut features: HashMap<TrackId, AudioFeatures> = HashMap::with_capacity(ids.len());
    for (chunk, response) in chunks.iter().zip(responses) {
      match response {
        Ok(slots) => {
          for (id, slot) in chunk.iter().zip(slots) {
            if let Some(f) = slot.filter(AudioFeatures::is_complete) {
              features.insert(id.clone(), f);
            }
          }
        }
        Err(error) => warn!(batch = chunk.len(), %error, "audio feature batch failed, dropping its tracks"),
      }
    }

    let total = tracks.len();
    let resolved: Vec<Track> = tracks
      .into_iter()
      .filter_map(|t| {
        let f = features.remove(&t.id)?;
        Some(Track::from_catalog(t, f))
      })
      .collect();

    if resolved.len() < total {
      debug!(dropped = total - resolved.len(), "tracks without audio features dropped");
    }

    resolved
  }
}

/// Conserva la primera aparición de cada id.
pub fn dedup_by_id(tracks: Vec<CatalogTrack>) -> Vec<CatalogTrack> {
  let mut seen = HashSet::with_capacity(tracks.len());
  tracks.into_iter().filter(|t| seen.insert(t.id.clone())).collect()
}
