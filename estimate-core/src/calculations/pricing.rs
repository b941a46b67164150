//! Construction cost pricing.
//!
//! The price of a project is
//!
//! ```text
//! round(area_sqm × floors × base_rate(project_type)
//!       × material_multiplier(material_tier)
//!       × timeline_multiplier(timeline_tier))
//! ```
//!
//! rounded half-up to whole currency units.
//!
//! | Project type | Base rate per m² |
//! |--------------|------------------|
//! | residential  | 45 000           |
//! | commercial   | 60 000           |
//! | industrial   | 35 000           |
//!
//! | Materials | Multiplier | Timeline | Multiplier |
//! |-----------|------------|----------|------------|
//! | economy   | 1.0        | extended | 1.0        |
//! | standard  | 1.2        | standard | 1.1        |
//! | premium   | 1.4        | urgent   | 1.3        |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimate_core::{EstimateInput, MaterialTier, PricingEngine, ProjectType, RateTable, TimelineTier};
//!
//! let rates = RateTable::default();
//! let engine = PricingEngine::new(&rates);
//!
//! let input = EstimateInput {
//!     project_type: ProjectType::Industrial,
//!     area_sqm: 50,
//!     floors: 1,
//!     material_tier: MaterialTier::Economy,
//!     timeline_tier: TimelineTier::Extended,
//! };
//!
//! assert_eq!(engine.estimate(&input).amount(), dec!(1750000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calculations::common::round_whole;
use crate::models::{EstimateInput, EstimateResult, MaterialTier, ProjectType, RateTable, TimelineTier};

/// Intermediate factors of a single estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateBreakdown {
    /// Area times floor count.
    pub total_area_sqm: Decimal,
    pub base_rate: Decimal,
    pub material_multiplier: Decimal,
    pub timeline_multiplier: Decimal,
    /// Product of all factors before rounding.
    pub unrounded: Decimal,
    pub result: EstimateResult,
}

/// Prices construction projects against a borrowed [`RateTable`].
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    rates: &'a RateTable,
}

impl<'a> PricingEngine<'a> {
    pub fn new(rates: &'a RateTable) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> &'a RateTable {
        self.rates
    }

    /// Computes the price of a project.
    pub fn estimate(
        &self,
        input: &EstimateInput,
    ) -> EstimateResult {
        self.breakdown(input).result
    }

    /// Computes the price together with every factor that went into it.
    pub fn breakdown(
        &self,
        input: &EstimateInput,
    ) -> EstimateBreakdown {
        let total_area_sqm = Decimal::from(input.area_sqm) * Decimal::from(input.floors);
        let base_rate = self.base_rate(Some(input.project_type));
        let material_multiplier = self.material_multiplier(Some(input.material_tier));
        let timeline_multiplier = self.timeline_multiplier(Some(input.timeline_tier));

        let unrounded = total_area_sqm * base_rate * material_multiplier * timeline_multiplier;
        let result = EstimateResult::new(round_whole(unrounded));

        trace!(
            project_type = input.project_type.as_str(),
            area_sqm = input.area_sqm,
            floors = input.floors,
            material = input.material_tier.as_str(),
            timeline = input.timeline_tier.as_str(),
            %result,
            "estimate computed"
        );

        EstimateBreakdown {
            total_area_sqm,
            base_rate,
            material_multiplier,
            timeline_multiplier,
            unrounded,
            result,
        }
    }

    /// Base rate per square meter. An unset type is priced as residential.
    pub fn base_rate(
        &self,
        project_type: Option<ProjectType>,
    ) -> Decimal {
        self.rates
            .base_rates
            .rate(project_type.unwrap_or(ProjectType::Residential))
    }

    /// Base rate for a raw project type code. Unrecognised codes are priced
    /// as residential.
    pub fn base_rate_for_code(
        &self,
        code: &str,
    ) -> Decimal {
        self.base_rate(ProjectType::parse(code))
    }

    /// Material multiplier. An unset tier is priced as economy.
    pub fn material_multiplier(
        &self,
        tier: Option<MaterialTier>,
    ) -> Decimal {
        self.rates
            .material_multipliers
            .multiplier(tier.unwrap_or(MaterialTier::Economy))
    }

    /// Timeline multiplier. An unset tier is priced as extended.
    pub fn timeline_multiplier(
        &self,
        tier: Option<TimelineTier>,
    ) -> Decimal {
        self.rates
            .timeline_multipliers
            .multiplier(tier.unwrap_or(TimelineTier::Extended))
    }
}

/// Prices a project with the built-in rate table.
pub fn estimate(input: &EstimateInput) -> EstimateResult {
    let rates = RateTable::default();
    PricingEngine::new(&rates).estimate(input)
}
