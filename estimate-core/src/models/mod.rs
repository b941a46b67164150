mod estimate;
mod project_type;
mod rate_table;
mod tiers;

pub use estimate::{EstimateInput, EstimateResult};
pub use project_type::ProjectType;
pub use rate_table::{BaseRates, MaterialMultipliers, RateTable, RateTableError, TimelineMultipliers};
pub use tiers::{MaterialTier, TimelineTier};
