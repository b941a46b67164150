use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::models::{MaterialTier, ProjectType, TimelineTier};

/// A fully populated set of pricing parameters.
///
/// Area and floor count are expected to be inside the calculator's slider
/// bounds; [`crate::EstimatorForm`] clamps them before building one of these.
/// Reading one straight from a file would skip that clamping, so only
/// `Serialize` is derived. Parse raw values through the form instead:
///
/// ```compile_fail
/// let _: estimate_core::EstimateInput = toml::from_str("").unwrap();
/// ```
///
/// ```
/// use estimate_core::{EstimatorForm, FormField};
///
/// let mut form = EstimatorForm::new();
/// form.apply(FormField::Area, "5000").unwrap();
/// form.apply(FormField::ProjectType, "commercial").unwrap();
/// form.apply(FormField::MaterialTier, "premium").unwrap();
/// form.apply(FormField::TimelineTier, "urgent").unwrap();
///
/// assert_eq!(form.input().unwrap().area_sqm, 1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EstimateInput {
    pub project_type: ProjectType,
    pub area_sqm: u16,
    pub floors: u8,
    pub material_tier: MaterialTier,
    pub timeline_tier: TimelineTier,
}

/// A computed price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EstimateResult {
    amount: Decimal,
}

impl EstimateResult {
    /// Wraps an already rounded, non-negative amount.
    pub(crate) fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn to_u64(&self) -> Option<u64> {
        self.amount.to_u64()
    }
}

impl fmt::Display for EstimateResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.amount)
    }
}
