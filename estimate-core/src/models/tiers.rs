use serde::{Deserialize, Serialize};

/// Quality class of the building materials.
///
/// Variants are declared in rank order, so the derived `Ord` compares
/// cheapest to most expensive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialTier {
    Economy,
    Standard,
    Premium,
}

impl MaterialTier {
    pub const ALL: [MaterialTier; 3] = [Self::Economy, Self::Standard, Self::Premium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "economy" => Some(Self::Economy),
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Economy => "Эконом",
            Self::Standard => "Стандарт",
            Self::Premium => "Премиум",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }
}

/// Requested delivery speed.
///
/// Ranked from the slowest (`Extended`) to the fastest (`Urgent`). Note that
/// the `standard` code means an accelerated schedule, while the ordinary
/// schedule is `extended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineTier {
    Extended,
    Standard,
    Urgent,
}

impl TimelineTier {
    pub const ALL: [TimelineTier; 3] = [Self::Extended, Self::Standard, Self::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extended => "extended",
            Self::Standard => "standard",
            Self::Urgent => "urgent",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extended" => Some(Self::Extended),
            "standard" => Some(Self::Standard),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Extended => "Стандартные сроки",
            Self::Standard => "Ускоренные сроки",
            Self::Urgent => "Срочное выполнение",
        }
    }

    pub fn rank(&self) -> u8 {
        *self as u8
    }
}
