//! Plain-text rendering of the estimator's panels.
//!
//! Each panel is a small borrowing struct with a `Display` impl, so the same
//! text can go to stdout, into a session writer or into a `String`.

use std::fmt;

use estimate_core::form::{DISCLAIMER, INCLUDED_SERVICES, PLACEHOLDER_PROMPT};
use estimate_core::{
    CurrencyFormat, EstimateBreakdown, EstimateView, EstimatorForm, FormField, MaterialTier,
    PricingEngine, ProjectType, TimelineTier,
};
use rust_decimal::Decimal;

const RESULT_TITLE: &str = "Предварительная стоимость";
const INCLUDED_TITLE: &str = "Включено в стоимость:";
const UNSET: &str = "—";

/// The result panel: an amount with the disclaimer and included services,
/// or the placeholder prompt.
#[derive(Debug, Clone, Copy)]
pub struct ResultPanel<'a> {
    pub view: &'a EstimateView,
    pub currency: &'a CurrencyFormat,
}

impl fmt::Display for ResultPanel<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "{RESULT_TITLE}")?;

        match self.view {
            EstimateView::Placeholder => writeln!(f, "{PLACEHOLDER_PROMPT}"),
            EstimateView::Amount(result) => {
                writeln!(f, "{}", self.currency.format_result(result))?;
                writeln!(f, "{DISCLAIMER}")?;
                writeln!(f)?;
                writeln!(f, "{INCLUDED_TITLE}")?;
                for service in INCLUDED_SERVICES {
                    writeln!(f, "  • {service}")?;
                }
                Ok(())
            }
        }
    }
}

/// The parameters panel, one field per line.
#[derive(Debug, Clone, Copy)]
pub struct FormPanel<'a>(pub &'a EstimatorForm);

impl fmt::Display for FormPanel<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let form = self.0;
        for field in FormField::ALL {
            let value = match field {
                FormField::ProjectType => form.project_type().map(|t| t.label().to_string()),
                FormField::Area => Some(form.area_sqm().to_string()),
                FormField::Floors => Some(form.floors().to_string()),
                FormField::MaterialTier => form.material_tier().map(|t| t.label().to_string()),
                FormField::TimelineTier => form.timeline_tier().map(|t| t.label().to_string()),
            }
            .unwrap_or_else(|| UNSET.to_string());
            writeln!(f, "{:<20} {value}", format!("{}:", field.label()))?;
        }
        Ok(())
    }
}

/// Every factor of one estimate. The last line has no trailing newline.
#[derive(Debug, Clone, Copy)]
pub struct BreakdownPanel<'a> {
    pub breakdown: &'a EstimateBreakdown,
    pub currency: &'a CurrencyFormat,
}

impl fmt::Display for BreakdownPanel<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let breakdown = self.breakdown;
        writeln!(f, "Total area (m²):     {}", breakdown.total_area_sqm)?;
        writeln!(
            f,
            "Base rate (per m²):  {}",
            self.currency.format(breakdown.base_rate)
        )?;
        writeln!(f, "Material multiplier: ×{}", breakdown.material_multiplier)?;
        writeln!(f, "Timeline multiplier: ×{}", breakdown.timeline_multiplier)?;
        writeln!(f, "Before rounding:     {}", breakdown.unrounded.normalize())?;
        write!(
            f,
            "Estimate:            {}",
            self.currency.format_result(&breakdown.result)
        )
    }
}

/// Every selectable option with the rate or multiplier it carries.
#[derive(Debug, Clone, Copy)]
pub struct OptionsPanel<'a> {
    pub engine: &'a PricingEngine<'a>,
    pub currency: &'a CurrencyFormat,
}

impl fmt::Display for OptionsPanel<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let engine = self.engine;

        writeln!(f, "{}:", FormField::ProjectType.label())?;
        for project_type in ProjectType::ALL {
            let rate = self.currency.format(engine.base_rate(Some(project_type)));
            option_line(
                f,
                project_type.as_str(),
                project_type.label(),
                &format!("{rate} / м²"),
            )?;
        }

        writeln!(f, "{}:", FormField::MaterialTier.label())?;
        for tier in MaterialTier::ALL {
            option_line(
                f,
                tier.as_str(),
                tier.label(),
                &multiplier(engine.material_multiplier(Some(tier))),
            )?;
        }

        writeln!(f, "{}:", FormField::TimelineTier.label())?;
        for tier in TimelineTier::ALL {
            option_line(
                f,
                tier.as_str(),
                tier.label(),
                &multiplier(engine.timeline_multiplier(Some(tier))),
            )?;
        }
        Ok(())
    }
}

/// One line of batch output: `row N: <amount>` or `row N: <prompt>`.
#[derive(Debug, Clone, Copy)]
pub struct BatchLine<'a> {
    /// 1-based row number.
    pub row: usize,
    pub view: &'a EstimateView,
    pub currency: &'a CurrencyFormat,
}

impl fmt::Display for BatchLine<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self.view {
            EstimateView::Amount(result) => {
                write!(f, "row {}: {}", self.row, self.currency.format_result(result))
            }
            EstimateView::Placeholder => write!(f, "row {}: {PLACEHOLDER_PROMPT}", self.row),
        }
    }
}

fn option_line(
    f: &mut fmt::Formatter<'_>,
    code: &str,
    label: &str,
    value: &str,
) -> fmt::Result {
    writeln!(f, "  {code:<12} {label:<28} {value}")
}

fn multiplier(value: Decimal) -> String {
    format!("×{}", value.normalize())
}
