//! Base rates and tier multipliers used by the pricing engine.
//!
//! The defaults reproduce the calculator's published price list. A table can
//! also be read from TOML, where every section is optional:
//!
//! ```
//! use rust_decimal_macros::dec;
//! use estimate_core::{MaterialTier, ProjectType, RateTable};
//!
//! let table = RateTable::from_toml_str(
//!     r#"
//!     [base_rates]
//!     commercial = "65000"
//!
//!     [material_multipliers]
//!     premium = "1.5"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(table.base_rates.rate(ProjectType::Commercial), dec!(65000));
//! assert_eq!(table.base_rates.rate(ProjectType::Residential), dec!(45000));
//! assert_eq!(table.material_multipliers.multiplier(MaterialTier::Premium), dec!(1.5));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{MaterialTier, ProjectType, TimelineTier};

/// Upper bound for a base rate. Keeps the engine's products inside
/// `Decimal` range for every `EstimateInput`.
pub const MAX_BASE_RATE: Decimal = dec!(1000000000000);

/// Upper bound for any single tier multiplier.
pub const MAX_MULTIPLIER: Decimal = dec!(100);

#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("base rate for {project_type} must be between 0 and 1000000000000, got {rate}")]
    BaseRateOutOfRange {
        project_type: &'static str,
        rate: Decimal,
    },

    #[error("{table} multiplier for {tier} must be above 0 and at most 100, got {value}")]
    MultiplierOutOfRange {
        table: &'static str,
        tier: &'static str,
        value: Decimal,
    },

    /// A higher tier would be cheaper than a lower one.
    #[error("{table} multiplier for {higher} ({higher_value}) is below {lower} ({lower_value})")]
    DecreasingMultiplier {
        table: &'static str,
        lower: &'static str,
        lower_value: Decimal,
        higher: &'static str,
        higher_value: Decimal,
    },

    #[error("invalid rate table: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRates {
    pub residential: Decimal,
    pub commercial: Decimal,
    pub industrial: Decimal,
}

impl Default for BaseRates {
    fn default() -> Self {
        Self {
            residential: dec!(45000),
            commercial: dec!(60000),
            industrial: dec!(35000),
        }
    }
}

impl BaseRates {
    pub fn rate(
        &self,
        project_type: ProjectType,
    ) -> Decimal {
        match project_type {
            ProjectType::Residential => self.residential,
            ProjectType::Commercial => self.commercial,
            ProjectType::Industrial => self.industrial,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialMultipliers {
    pub economy: Decimal,
    pub standard: Decimal,
    pub premium: Decimal,
}

impl Default for MaterialMultipliers {
    fn default() -> Self {
        Self {
            economy: dec!(1.0),
            standard: dec!(1.2),
            premium: dec!(1.4),
        }
    }
}

impl MaterialMultipliers {
    pub fn multiplier(
        &self,
        tier: MaterialTier,
    ) -> Decimal {
        match tier {
            MaterialTier::Economy => self.economy,
            MaterialTier::Standard => self.standard,
            MaterialTier::Premium => self.premium,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineMultipliers {
    pub extended: Decimal,
    pub standard: Decimal,
    pub urgent: Decimal,
}

impl Default for TimelineMultipliers {
    fn default() -> Self {
        Self {
            extended: dec!(1.0),
            standard: dec!(1.1),
            urgent: dec!(1.3),
        }
    }
}

impl TimelineMultipliers {
    pub fn multiplier(
        &self,
        tier: TimelineTier,
    ) -> Decimal {
        match tier {
            TimelineTier::Extended => self.extended,
            TimelineTier::Standard => self.standard,
            TimelineTier::Urgent => self.urgent,
        }
    }
}

/// Complete pricing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateTable {
    pub base_rates: BaseRates,
    pub material_multipliers: MaterialMultipliers,
    pub timeline_multipliers: TimelineMultipliers,
}

impl RateTable {
    /// Parses and validates a rate table from TOML text.
    pub fn from_toml_str(input: &str) -> Result<Self, RateTableError> {
        let table: RateTable = toml::from_str(input)?;
        table.validate()?;
        Ok(table)
    }

    /// Checks that every rate is in range and that multipliers never
    /// decrease as the tier rank increases.
    pub fn validate(&self) -> Result<(), RateTableError> {
        for project_type in ProjectType::ALL {
            let rate = self.base_rates.rate(project_type);
            if rate.is_sign_negative() || rate > MAX_BASE_RATE {
                return Err(RateTableError::BaseRateOutOfRange {
                    project_type: project_type.as_str(),
                    rate,
                });
            }
        }

        let materials: Vec<(&'static str, Decimal)> = MaterialTier::ALL
            .iter()
            .map(|tier| (tier.as_str(), self.material_multipliers.multiplier(*tier)))
            .collect();
        check_multipliers("material", &materials)?;

        let timelines: Vec<(&'static str, Decimal)> = TimelineTier::ALL
            .iter()
            .map(|tier| (tier.as_str(), self.timeline_multipliers.multiplier(*tier)))
            .collect();
        check_multipliers("timeline", &timelines)
    }
}

/// `ranked` must be ordered from the lowest tier to the highest.
fn check_multipliers(
    table: &'static str,
    ranked: &[(&'static str, Decimal)],
) -> Result<(), RateTableError> {
    for &(tier, value) in ranked {
        if value <= Decimal::ZERO || value > MAX_MULTIPLIER {
            return Err(RateTableError::MultiplierOutOfRange { table, tier, value });
        }
    }

    for pair in ranked.windows(2) {
        let (lower, lower_value) = pair[0];
        let (higher, higher_value) = pair[1];
        if higher_value < lower_value {
            return Err(RateTableError::DecreasingMultiplier {
                table,
                lower,
                lower_value,
                higher,
                higher_value,
            });
        }
    }

    Ok(())
}
