//! Cam and Cylinder Head Catalog
//!
//! The catalog is an external service; this module defines how the engine
//! talks to it:
//! - [`CamCatalog`], the read-only query interface
//! - Catalog records and their boost-suitability tags
//! - Normalization of raw service rows (string numbers, missing figures)
//! - [`InMemoryCatalog`], a catalog loaded from a saved service payload

mod error;
mod memory;
pub mod normalize;
mod records;

pub use error::CatalogError;
pub use memory::InMemoryCatalog;
pub use normalize::{CatalogEnvelope, RawCamRow, RawFlowPoint, RawHeadRow};
pub use records::{BoostSuitability, CamCatalogRecord, HeadCatalogRecord, DEFAULT_PORT_CFM};

use serde::{Deserialize, Serialize};
use std::future::Future;

use crate::recommend::family_tokens;

/// Most family tokens sent with a query
pub const MAX_QUERY_TOKENS: usize = 4;

/// Catalog lookup by engine make and family
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub make: String,
    pub family: String,
    /// Fuzzy family tokens, derived from `family`
    pub family_tokens: Vec<String>,
}

impl CatalogQuery {
    pub fn new(make: impl Into<String>, family: impl Into<String>) -> Self {
        let make = make.into().trim().to_string();
        let family = family.into().trim().to_string();
        let family_tokens = family_tokens(&family)
            .into_iter()
            .take(MAX_QUERY_TOKENS)
            .collect();
        Self {
            make,
            family,
            family_tokens,
        }
    }
}

/// Read-only catalog collaborator.
///
/// Implementations own transport, timeouts and cancellation. An empty result
/// is a normal answer, not an error.
pub trait CamCatalog {
    fn search_cams(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<Vec<CamCatalogRecord>, CatalogError>> + Send;

    fn search_heads(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<Vec<HeadCatalogRecord>, CatalogError>> + Send;
}
