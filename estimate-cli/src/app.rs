//! Composition helpers shared by the CLI commands.
//!
//! The binary builds one [`RateTable`] at startup and hands a
//! [`estimate_core::PricingEngine`] borrowing it to whichever command runs.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use estimate_core::{EstimatorForm, FormError, FormField, RateTable};
use tracing::{debug, info};

/// Loads the rate table from `path`, or the built-in table when no path is given.
pub fn load_rate_table(path: Option<&Path>) -> Result<RateTable> {
    let Some(path) = path else {
        debug!("using built-in rate table");
        return Ok(RateTable::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rate table: {}", path.display()))?;
    let table = RateTable::from_toml_str(&contents)
        .with_context(|| format!("Failed to load rate table: {}", path.display()))?;

    info!(path = %path.display(), "loaded rate table");
    Ok(table)
}

/// Form values given on the command line. Anything omitted keeps the
/// form default (unset for choices, 100 m² and 1 floor for the sliders).
#[derive(Debug, Clone, Default, Args)]
pub struct QuoteChoices {
    /// Project type: residential, commercial or industrial.
    #[arg(long = "type")]
    pub project_type: Option<String>,

    /// Built area per floor in m², clamped to 50..=1000 in steps of 10.
    #[arg(long, allow_negative_numbers = true)]
    pub area: Option<String>,

    /// Number of floors, clamped to 1..=10.
    #[arg(long, allow_negative_numbers = true)]
    pub floors: Option<String>,

    /// Material class: economy, standard or premium.
    #[arg(long)]
    pub materials: Option<String>,

    /// Timeline: extended, standard or urgent.
    #[arg(long)]
    pub timeline: Option<String>,
}

impl QuoteChoices {
    /// Fills a fresh form with these choices.
    pub fn to_form(&self) -> Result<EstimatorForm, FormError> {
        let mut form = EstimatorForm::new();

        let choices = [
            (FormField::ProjectType, &self.project_type),
            (FormField::Area, &self.area),
            (FormField::Floors, &self.floors),
            (FormField::MaterialTier, &self.materials),
            (FormField::TimelineTier, &self.timeline),
        ];
        for (field, value) in choices {
            if let Some(value) = value {
                form.apply(field, value)?;
            }
        }

        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use estimate_core::{MaterialTier, ProjectType, TimelineTier};
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_rate_table_without_path_uses_defaults() {
        let table = load_rate_table(None).unwrap();

        assert_eq!(table, RateTable::default());
    }

    #[test]
    fn load_rate_table_reports_missing_file() {
        let result = load_rate_table(Some(Path::new("/this/path/does/not/exist.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn empty_choices_leave_form_at_defaults() {
        let form = QuoteChoices::default().to_form().unwrap();

        assert_eq!(form, EstimatorForm::new());
    }

    #[test]
    fn choices_fill_form_and_clamp_sliders() {
        let choices = QuoteChoices {
            project_type: Some("industrial".to_string()),
            area: Some("1234".to_string()),
            floors: Some("0".to_string()),
            materials: Some("premium".to_string()),
            timeline: Some("urgent".to_string()),
        };

        let form = choices.to_form().unwrap();

        assert_eq!(form.project_type(), Some(ProjectType::Industrial));
        assert_eq!(form.area_sqm(), 1000);
        assert_eq!(form.floors(), 1);
        assert_eq!(form.material_tier(), Some(MaterialTier::Premium));
        assert_eq!(form.timeline_tier(), Some(TimelineTier::Urgent));
    }

    #[test]
    fn negative_numbers_parse_from_the_command_line_and_clamp() {
        #[derive(Debug, clap::Parser)]
        struct Cli {
            #[command(flatten)]
            choices: QuoteChoices,
        }

        let cli = <Cli as clap::Parser>::try_parse_from([
            "quote", "--area", "-40", "--floors", "-3",
        ])
        .unwrap();
        let form = cli.choices.to_form().unwrap();

        assert_eq!(form.area_sqm(), 50);
        assert_eq!(form.floors(), 1);
    }

    #[test]
    fn non_numeric_area_is_an_error() {
        let choices = QuoteChoices {
            area: Some("wide".to_string()),
            ..Default::default()
        };

        let result = choices.to_form();

        assert!(matches!(
            result,
            Err(FormError::InvalidNumber {
                field: FormField::Area,
                ..
            })
        ));
    }

    #[test]
    fn unknown_choice_is_an_error() {
        let choices = QuoteChoices {
            timeline: Some("yesterday".to_string()),
            ..Default::default()
        };

        let result = choices.to_form();

        assert!(matches!(
            result,
            Err(FormError::UnknownOption {
                field: FormField::TimelineTier,
                ..
            })
        ));
    }
}
