//! CSV loader for batch quotes.
//!
//! ## CSV Format
//!
//! Columns are matched by header name, so their order does not matter.
//! Every column is optional; a missing or empty cell keeps the form default.
//!
//! | Column          | Type    | Notes                                        |
//! |-----------------|---------|----------------------------------------------|
//! | `project_type`  | string  | `residential`, `commercial` or `industrial`  |
//! | `area_sqm`      | integer | Clamped to 50..=1000, snapped to steps of 10 |
//! | `floors`        | integer | Clamped to 1..=10, negative values become 1  |
//! | `material_tier` | string  | `economy`, `standard` or `premium`           |
//! | `timeline_tier` | string  | `extended`, `standard` or `urgent`           |
//!
//! A row with an empty choice column loads fine and renders as the
//! placeholder. An unrecognised code or a number cell that is not an integer
//! is an error carrying the row number.
//!
//! ### Example
//!
//! ```csv
//! project_type,area_sqm,floors,material_tier,timeline_tier
//! industrial,50,1,economy,extended
//! commercial,1000,10,premium,urgent
//! residential,120,2,,standard
//! ```

use std::path::Path;

use estimate_core::{EstimatorForm, FormError, FormField};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    project_type: Option<String>,
    #[serde(default)]
    area_sqm: Option<String>,
    #[serde(default)]
    floors: Option<String>,
    #[serde(default)]
    material_tier: Option<String>,
    #[serde(default)]
    timeline_tier: Option<String>,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// Errors that can occur while loading or converting CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The CSV is structurally invalid.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// A cell holds an unrecognised code or a non-integer number. `row` is
    /// 1-based, not counting the header.
    #[error("row {row}: {source}")]
    InvalidValue {
        row: usize,
        #[source]
        source: FormError,
    },
}

/// One loaded row, already applied to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRow {
    /// 1-based row number, not counting the header.
    pub row: usize,
    pub form: EstimatorForm,
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<QuoteRow, CsvLoadError> {
    let mut form = EstimatorForm::new();
    let invalid = |source| CsvLoadError::InvalidValue {
        row: row_number,
        source,
    };

    let cells = [
        (FormField::ProjectType, row.project_type),
        (FormField::Area, row.area_sqm),
        (FormField::Floors, row.floors),
        (FormField::MaterialTier, row.material_tier),
        (FormField::TimelineTier, row.timeline_tier),
    ];
    for (field, value) in cells {
        if let Some(value) = value {
            form.apply(field, &value).map_err(invalid)?;
        }
    }

    Ok(QuoteRow {
        row: row_number,
        form,
    })
}

/// Parses CSV text and returns one form per row, in file order.
///
/// # Errors
///
/// * [CsvLoadError::Parse] – if the CSV is structurally invalid.
/// * [CsvLoadError::InvalidValue] – if a row holds an unrecognised code or a
///   number cell that is not an integer.
pub fn load_from_str(input: &str) -> Result<Vec<QuoteRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All) // tolerate whitespace around values
        .flexible(false) // strict column count
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect()
}

/// Reads a file from disk and delegates to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<QuoteRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_str(&contents)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use estimate_core::{MaterialTier, ProjectType, TimelineTier};
    use pretty_assertions::assert_eq;

    use super::*;

    const FULL_CSV: &str = "\
project_type,area_sqm,floors,material_tier,timeline_tier
industrial,50,1,economy,extended
";

    const REORDERED_CSV: &str = "\
timeline_tier,material_tier,floors,area_sqm,project_type
urgent,premium,10,1000,commercial
";

    const PARTIAL_CSV: &str = "\
project_type,material_tier
residential,standard
";

    // -----------------------------------------------------------------------
    // 1. Column layouts
    // -----------------------------------------------------------------------
    #[test]
    fn test_full_row_builds_ready_form() {
        let rows = load_from_str(FULL_CSV).expect("should parse full CSV");

        assert_eq!(rows.len(), 1);
        let form = &rows[0].form;
        assert_eq!(rows[0].row, 1);
        assert_eq!(form.project_type(), Some(ProjectType::Industrial));
        assert_eq!(form.area_sqm(), 50);
        assert_eq!(form.floors(), 1);
        assert!(form.is_ready());
    }

    #[test]
    fn test_columns_are_matched_by_header() {
        let rows = load_from_str(REORDERED_CSV).expect("should parse reordered CSV");
        let form = &rows[0].form;

        assert_eq!(form.project_type(), Some(ProjectType::Commercial));
        assert_eq!(form.area_sqm(), 1000);
        assert_eq!(form.floors(), 10);
        assert_eq!(form.material_tier(), Some(MaterialTier::Premium));
        assert_eq!(form.timeline_tier(), Some(TimelineTier::Urgent));
    }

    #[test]
    fn test_missing_columns_keep_defaults() {
        let rows = load_from_str(PARTIAL_CSV).expect("should parse partial CSV");
        let form = &rows[0].form;

        assert_eq!(form.area_sqm(), 100);
        assert_eq!(form.floors(), 1);
        assert_eq!(form.timeline_tier(), None);
        assert!(!form.is_ready());
    }

    // -----------------------------------------------------------------------
    // 2. Cell handling
    // -----------------------------------------------------------------------
    #[test]
    fn test_empty_choice_cell_leaves_field_unset() {
        let csv = "project_type,area_sqm,floors,material_tier,timeline_tier\n\
                   residential,120,2,,standard\n";

        let rows = load_from_str(csv).unwrap();

        assert_eq!(rows[0].form.material_tier(), None);
        assert_eq!(rows[0].form.timeline_tier(), Some(TimelineTier::Standard));
    }

    #[test]
    fn test_out_of_range_numbers_are_clamped() {
        let csv = "project_type,area_sqm,floors,material_tier,timeline_tier\n\
                   residential,5000,25,economy,extended\n";

        let rows = load_from_str(csv).unwrap();

        assert_eq!(rows[0].form.area_sqm(), 1000);
        assert_eq!(rows[0].form.floors(), 10);
    }

    #[test]
    fn test_negative_and_oversized_numbers_are_clamped() {
        let csv = "project_type,area_sqm,floors,material_tier,timeline_tier\n\
                   residential,-20,-3,economy,extended\n\
                   residential,99999999999999999999,4294967296,economy,extended\n";

        let rows = load_from_str(csv).unwrap();

        assert_eq!(rows[0].form.area_sqm(), 50);
        assert_eq!(rows[0].form.floors(), 1);
        assert_eq!(rows[1].form.area_sqm(), 1000);
        assert_eq!(rows[1].form.floors(), 10);
    }

    #[test]
    fn test_whitespace_around_values_is_trimmed() {
        let csv = "project_type , area_sqm\n  commercial ,  300 \n";

        let rows = load_from_str(csv).unwrap();

        assert_eq!(rows[0].form.project_type(), Some(ProjectType::Commercial));
        assert_eq!(rows[0].form.area_sqm(), 300);
    }

    // -----------------------------------------------------------------------
    // 3. Errors
    // -----------------------------------------------------------------------
    #[test]
    fn test_unknown_code_reports_row_number() {
        let csv = "project_type,material_tier\nresidential,economy\nresidential,marble\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            CsvLoadError::InvalidValue { row, source } => {
                assert_eq!(row, 2);
                assert_eq!(
                    source,
                    FormError::UnknownOption {
                        field: FormField::MaterialTier,
                        value: "marble".to_string(),
                    }
                );
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_area_reports_row_number() {
        let csv = "project_type,area_sqm\nresidential,large\n";

        let err = load_from_str(csv).unwrap_err();

        match err {
            CsvLoadError::InvalidValue { row, source } => {
                assert_eq!(row, 1);
                assert_eq!(
                    source,
                    FormError::InvalidNumber {
                        field: FormField::Area,
                        value: "large".to_string(),
                    }
                );
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = "project_type,area_sqm\nresidential,100,extra\n";

        let err = load_from_str(csv).unwrap_err();

        assert!(matches!(err, CsvLoadError::Parse(_)));
    }

    #[test]
    fn test_header_only_yields_no_rows() {
        let rows = load_from_str("project_type,area_sqm\n").unwrap();

        assert!(rows.is_empty());
    }
}
