//! Cost calculations for the construction estimator.
//!
//! [`pricing`] holds the engine that turns an [`crate::EstimateInput`] into
//! an [`crate::EstimateResult`]; [`common`] holds shared rounding helpers.

pub mod common;
pub mod pricing;

pub use pricing::{EstimateBreakdown, PricingEngine, estimate};
