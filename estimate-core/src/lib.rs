pub mod calculations;
pub mod form;
pub mod format;
pub mod models;

pub use calculations::{EstimateBreakdown, PricingEngine, estimate};
pub use form::{EstimateView, EstimatorForm, FormError, FormField, FormState};
pub use format::CurrencyFormat;
pub use models::*;
