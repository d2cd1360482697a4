//! Catalog held in memory, loaded from a saved service payload

use std::collections::HashSet;
use std::future::{ready, Future};
use std::path::Path;

use super::error::CatalogError;
use super::normalize::CatalogEnvelope;
use super::records::{CamCatalogRecord, HeadCatalogRecord};
use super::{CamCatalog, CatalogQuery};
use crate::recommend::{families_overlap, family_tokens};

/// In-memory [`CamCatalog`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    cams: Vec<CamCatalogRecord>,
    heads: Vec<HeadCatalogRecord>,
}

impl InMemoryCatalog {
    pub fn new(cams: Vec<CamCatalogRecord>, heads: Vec<HeadCatalogRecord>) -> Self {
        Self { cams, heads }
    }

    pub fn from_envelope(envelope: &CatalogEnvelope) -> Self {
        Self::new(envelope.cam_records(), envelope.head_records())
    }

    /// Load a `{ ok, cams, heads }` payload
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self::from_envelope(&CatalogEnvelope::from_json(json)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn cams(&self) -> &[CamCatalogRecord] {
        &self.cams
    }

    pub fn heads(&self) -> &[HeadCatalogRecord] {
        &self.heads
    }

    /// Same-make cams, family matches first, de-duplicated by brand and
    /// part number.
    pub fn matching_cams(&self, query: &CatalogQuery) -> Vec<CamCatalogRecord> {
        let same_make: Vec<&CamCatalogRecord> = self
            .cams
            .iter()
            .filter(|cam| cam.make.trim().eq_ignore_ascii_case(&query.make))
            .collect();

        let (matches, rest): (Vec<&CamCatalogRecord>, Vec<&CamCatalogRecord>) = same_make
            .into_iter()
            .partition(|cam| cam_matches_family(cam, query));

        let mut seen = HashSet::new();
        matches
            .into_iter()
            .chain(rest)
            .filter(|cam| {
                seen.insert(format!(
                    "{}|{}",
                    cam.brand.to_lowercase(),
                    cam.part_number.to_lowercase()
                ))
            })
            .cloned()
            .collect()
    }

    /// Same-make heads whose family overlaps the query
    pub fn matching_heads(&self, query: &CatalogQuery) -> Vec<HeadCatalogRecord> {
        self.heads
            .iter()
            .filter(|head| head.make.trim().eq_ignore_ascii_case(&query.make))
            .filter(|head| families_overlap(&head.family, &query.family))
            .cloned()
            .collect()
    }
}

/// The requested family, or any of its tokens, appears among the cam's
/// family name, family tags or family tokens.
fn cam_matches_family(cam: &CamCatalogRecord, query: &CatalogQuery) -> bool {
    let mut cam_tokens: HashSet<String> = HashSet::new();
    cam_tokens.insert(cam.family.trim().to_lowercase());
    cam_tokens.extend(cam.family_tags.iter().map(|tag| tag.trim().to_lowercase()));
    cam_tokens.extend(family_tokens(&cam.family));

    let requested = query.family.trim().to_lowercase();
    if !requested.is_empty() && cam_tokens.contains(&requested) {
        return true;
    }
    if query.family_tokens.is_empty() {
        return requested.is_empty();
    }
    query.family_tokens.iter().any(|token| cam_tokens.contains(token))
}

impl CamCatalog for InMemoryCatalog {
    fn search_cams(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<Vec<CamCatalogRecord>, CatalogError>> + Send {
        ready(Ok(self.matching_cams(query)))
    }

    fn search_heads(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<Vec<HeadCatalogRecord>, CatalogError>> + Send {
        ready(Ok(self.matching_heads(query)))
    }
}
