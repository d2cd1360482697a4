//! # CamSpec Core Library
//!
//! Engine performance modeling and camshaft matching.

#![cfg_attr(docsrs, feature(doc_cfg))]

//!
//! This library provides:
//! - Engine geometry (displacement, static and dynamic compression)
//! - Valvetrain helpers (rocker ratio lift conversion, head flow curves)
//! - A naturally aspirated power model with fuel, AFR and boost corrections
//! - Power and torque curve synthesis over an rpm sweep
//! - Camshaft recommendation against a cam catalog
//!
//! ## Example
//!
//! ```rust,ignore
//! use camspec_core::prelude::*;
//!
//! // Estimate the reference combination
//! let report = recompute(&PerformanceInputs::default());
//! println!("{:.0} hp @ {:.0} rpm", report.peak_hp, report.peak_hp_rpm);
//!
//! // Rank cams for a power goal
//! let catalog = InMemoryCatalog::from_path("catalog.json")?;
//! let request = RecommendationRequest {
//!     make: "Ford".into(),
//!     family: "SBF Windsor".into(),
//!     displacement_cid: 347.0,
//!     target_hp: 450.0,
//!     peak_rpm: 6200.0,
//!     ..Default::default()
//! };
//! let recommendation = recommend_from_catalog(&catalog, &request).await?;
//! ```

pub mod cam;
pub mod catalog;
pub mod error;
pub mod geometry;
pub mod performance;
pub mod recommend;
pub mod tune;
pub mod unit_conversion;
pub mod valvetrain;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::cam::{CamshaftSpec, TappetType};
    pub use crate::catalog::{
        BoostSuitability, CamCatalog, CamCatalogRecord, CatalogError, CatalogQuery,
        HeadCatalogRecord, InMemoryCatalog,
    };
    pub use crate::error::ParseEnumError;
    pub use crate::geometry::{compute_geometry, EngineGeometry, EnginePreset, GeometryResult};
    pub use crate::performance::{
        recompute, recompute_with, Calibration, CurvePoint, EstimateStatus, FuelType,
        PerformanceInputs, PerformanceReport,
    };
    pub use crate::recommend::{
        recommend, recommend_from_catalog, IdlePreference, Induction, Recommendation,
        RecommendationOutcome, RecommendationRequest, ScoredCandidate, TargetSpec, Usage,
    };
    pub use crate::tune::{BoostDevice, IntakeManifold, RpmSweep, TuneConfiguration};
    pub use crate::unit_conversion::UnitSystem;
    pub use crate::valvetrain::{FlowSample, HeadFlowCurve};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
