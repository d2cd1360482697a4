//! Valvetrain
//!
//! - Rocker ratio lift conversion
//! - Cylinder head flow-bench curves

mod head_flow;
mod rocker;

pub use head_flow::{FlowSample, HeadFlowCurve};
pub use rocker::{adjust_lift, parse_ratio};

/// Rocker ratio assumed when a cam card does not state one
pub const DEFAULT_ROCKER_RATIO: f64 = 1.6;
