//! Estimator form state.
//!
//! The form owns the values the user has picked so far. It is INCOMPLETE
//! while any of project type, material tier or timeline tier is unset, and
//! READY once all three are chosen. Area and floor count always carry a
//! value, clamped to the calculator's slider bounds.
//!
//! ```
//! use estimate_core::{EstimateView, EstimatorForm, MaterialTier, PricingEngine, ProjectType, RateTable, TimelineTier};
//!
//! let rates = RateTable::default();
//! let engine = PricingEngine::new(&rates);
//! let mut form = EstimatorForm::new();
//!
//! form.set_project_type(ProjectType::Residential);
//! form.set_material_tier(MaterialTier::Economy);
//! assert_eq!(form.view(&engine), EstimateView::Placeholder);
//!
//! form.set_timeline_tier(TimelineTier::Extended);
//! assert!(matches!(form.view(&engine), EstimateView::Amount(_)));
//! ```

use std::fmt;
use std::num::IntErrorKind;

use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::PricingEngine;
use crate::models::{EstimateInput, EstimateResult, MaterialTier, ProjectType, TimelineTier};

pub const AREA_MIN_SQM: u16 = 50;
pub const AREA_MAX_SQM: u16 = 1000;
pub const AREA_STEP_SQM: u16 = 10;
pub const AREA_DEFAULT_SQM: u16 = 100;

pub const FLOORS_MIN: u8 = 1;
pub const FLOORS_MAX: u8 = 10;
pub const FLOORS_DEFAULT: u8 = 1;

/// Shown instead of an amount while the form is incomplete.
pub const PLACEHOLDER_PROMPT: &str =
    "Заполните параметры проекта, чтобы увидеть предварительную стоимость";

/// Shown under a computed amount.
pub const DISCLAIMER: &str = "Стоимость может варьироваться в зависимости от дополнительных требований";

/// Work covered by every estimate.
pub const INCLUDED_SERVICES: [&str; 5] = [
    "Проектирование и согласование",
    "Основные строительные работы",
    "Материалы выбранного класса",
    "Контроль качества на всех этапах",
    "Гарантийное обслуживание",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    ProjectType,
    Area,
    Floors,
    MaterialTier,
    TimelineTier,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        Self::ProjectType,
        Self::Area,
        Self::Floors,
        Self::MaterialTier,
        Self::TimelineTier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectType => "type",
            Self::Area => "area",
            Self::Floors => "floors",
            Self::MaterialTier => "materials",
            Self::TimelineTier => "timeline",
        }
    }

    /// Accepts the short names used by the CLI as well as the CSV column names.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "type" | "project_type" => Some(Self::ProjectType),
            "area" | "area_sqm" => Some(Self::Area),
            "floors" => Some(Self::Floors),
            "materials" | "material_tier" => Some(Self::MaterialTier),
            "timeline" | "timeline_tier" => Some(Self::TimelineTier),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ProjectType => "Тип проекта",
            Self::Area => "Площадь (м²)",
            Self::Floors => "Количество этажей",
            Self::MaterialTier => "Класс материалов",
            Self::TimelineTier => "Сроки выполнения",
        }
    }

    /// Whether the field starts unset and blocks the estimate until chosen.
    pub fn is_required_choice(&self) -> bool {
        matches!(self, Self::ProjectType | Self::MaterialTier | Self::TimelineTier)
    }
}

impl fmt::Display for FormField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("'{value}' is not a valid {field} option")]
    UnknownOption { field: FormField, value: String },

    #[error("'{value}' is not a whole number for {field}")]
    InvalidNumber { field: FormField, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// Required choices still missing, in form order.
    Incomplete { missing: Vec<FormField> },
    Ready(EstimateInput),
}

/// What the result panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateView {
    Placeholder,
    Amount(EstimateResult),
}

/// Clamps an area to the slider bounds and snaps it to the slider step.
pub fn clamp_area(area_sqm: u32) -> u16 {
    let clamped = area_sqm.clamp(u32::from(AREA_MIN_SQM), u32::from(AREA_MAX_SQM));
    let step = u32::from(AREA_STEP_SQM);
    let snapped = (clamped + step / 2) / step * step;
    // Both bounds are multiples of the step, so snapping stays in range.
    snapped as u16
}

pub fn clamp_floors(floors: u32) -> u8 {
    floors.clamp(u32::from(FLOORS_MIN), u32::from(FLOORS_MAX)) as u8
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimatorForm {
    project_type: Option<ProjectType>,
    area_sqm: u16,
    floors: u8,
    material_tier: Option<MaterialTier>,
    timeline_tier: Option<TimelineTier>,
}

impl Default for EstimatorForm {
    fn default() -> Self {
        Self {
            project_type: None,
            area_sqm: AREA_DEFAULT_SQM,
            floors: FLOORS_DEFAULT,
            material_tier: None,
            timeline_tier: None,
        }
    }
}

impl EstimatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project_type(&self) -> Option<ProjectType> {
        self.project_type
    }

    pub fn area_sqm(&self) -> u16 {
        self.area_sqm
    }

    pub fn floors(&self) -> u8 {
        self.floors
    }

    pub fn material_tier(&self) -> Option<MaterialTier> {
        self.material_tier
    }

    pub fn timeline_tier(&self) -> Option<TimelineTier> {
        self.timeline_tier
    }

    pub fn set_project_type(
        &mut self,
        project_type: ProjectType,
    ) {
        self.update(|form| form.project_type = Some(project_type));
    }

    /// Sets the area, clamped to [50, 1000] m² in steps of 10.
    pub fn set_area(
        &mut self,
        area_sqm: u32,
    ) {
        let clamped = clamp_area(area_sqm);
        if u32::from(clamped) != area_sqm {
            debug!(requested = area_sqm, applied = clamped, "area adjusted to slider bounds");
        }
        self.update(|form| form.area_sqm = clamped);
    }

    /// Sets the floor count, clamped to [1, 10].
    pub fn set_floors(
        &mut self,
        floors: u32,
    ) {
        let clamped = clamp_floors(floors);
        if u32::from(clamped) != floors {
            debug!(requested = floors, applied = clamped, "floors adjusted to slider bounds");
        }
        self.update(|form| form.floors = clamped);
    }

    pub fn set_material_tier(
        &mut self,
        tier: MaterialTier,
    ) {
        self.update(|form| form.material_tier = Some(tier));
    }

    pub fn set_timeline_tier(
        &mut self,
        tier: TimelineTier,
    ) {
        self.update(|form| form.timeline_tier = Some(tier));
    }

    /// Unsets a choice, or restores the default for area and floors.
    pub fn clear(
        &mut self,
        field: FormField,
    ) {
        self.update(|form| match field {
            FormField::ProjectType => form.project_type = None,
            FormField::Area => form.area_sqm = AREA_DEFAULT_SQM,
            FormField::Floors => form.floors = FLOORS_DEFAULT,
            FormField::MaterialTier => form.material_tier = None,
            FormField::TimelineTier => form.timeline_tier = None,
        });
    }

    pub fn reset(&mut self) {
        self.update(|form| *form = Self::default());
    }

    /// Sets a field from text. An empty value clears the field.
    ///
    /// Area and floors accept any integer, including negative or oversized
    /// ones, and clamp it like [`Self::set_area`] and [`Self::set_floors`].
    /// The form is left unchanged when the value is rejected.
    pub fn apply(
        &mut self,
        field: FormField,
        value: &str,
    ) -> Result<(), FormError> {
        let value = value.trim();
        if value.is_empty() {
            self.clear(field);
            return Ok(());
        }

        let unknown = || {
            warn!(%field, value, "rejected form option");
            FormError::UnknownOption {
                field,
                value: value.to_string(),
            }
        };

        match field {
            FormField::ProjectType => {
                let project_type = ProjectType::parse(value).ok_or_else(unknown)?;
                self.set_project_type(project_type);
            }
            FormField::MaterialTier => {
                let tier = MaterialTier::parse(value).ok_or_else(unknown)?;
                self.set_material_tier(tier);
            }
            FormField::TimelineTier => {
                let tier = TimelineTier::parse(value).ok_or_else(unknown)?;
                self.set_timeline_tier(tier);
            }
            FormField::Area => {
                let area = parse_whole_number(field, value)?;
                self.set_area(area);
            }
            FormField::Floors => {
                let floors = parse_whole_number(field, value)?;
                self.set_floors(floors);
            }
        }
        Ok(())
    }

    /// The required choices that are still unset.
    pub fn missing(&self) -> Vec<FormField> {
        let mut missing = Vec::new();
        if self.project_type.is_none() {
            missing.push(FormField::ProjectType);
        }
        if self.material_tier.is_none() {
            missing.push(FormField::MaterialTier);
        }
        if self.timeline_tier.is_none() {
            missing.push(FormField::TimelineTier);
        }
        missing
    }

    pub fn is_ready(&self) -> bool {
        self.input().is_some()
    }

    /// The pricing input, available only once every choice is made.
    pub fn input(&self) -> Option<EstimateInput> {
        Some(EstimateInput {
            project_type: self.project_type?,
            area_sqm: self.area_sqm,
            floors: self.floors,
            material_tier: self.material_tier?,
            timeline_tier: self.timeline_tier?,
        })
    }

    pub fn state(&self) -> FormState {
        match self.input() {
            Some(input) => FormState::Ready(input),
            None => FormState::Incomplete {
                missing: self.missing(),
            },
        }
    }

    /// Prices the current values, or returns the placeholder.
    pub fn view(
        &self,
        engine: &PricingEngine<'_>,
    ) -> EstimateView {
        match self.input() {
            Some(input) => EstimateView::Amount(engine.estimate(&input)),
            None => EstimateView::Placeholder,
        }
    }

    fn update(
        &mut self,
        change: impl FnOnce(&mut Self),
    ) {
        let was_ready = self.is_ready();
        change(self);
        match (was_ready, self.is_ready()) {
            (false, true) => debug!("estimator form ready"),
            (true, false) => debug!(missing = ?self.missing(), "estimator form incomplete"),
            _ => {}
        }
    }
}

/// Parses an integer for a slider field. Out-of-range and negative values
/// saturate so the slider clamp decides the final value; only text that is
/// not an integer at all is rejected.
fn parse_whole_number(
    field: FormField,
    value: &str,
) -> Result<u32, FormError> {
    let number = match value.parse::<i64>() {
        Ok(number) => number,
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => {
                warn!(%field, value, "rejected form number");
                return Err(FormError::InvalidNumber {
                    field,
                    value: value.to_string(),
                });
            }
        },
    };
    Ok(number.clamp(0, i64::from(u32::MAX)) as u32)
}
