use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Residential,
    Commercial,
    Industrial,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [Self::Residential, Self::Commercial, Self::Industrial];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential => "residential",
            Self::Commercial => "commercial",
            Self::Industrial => "industrial",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "residential" => Some(Self::Residential),
            "commercial" => Some(Self::Commercial),
            "industrial" => Some(Self::Industrial),
            _ => None,
        }
    }

    /// Display label shown next to the option in the calculator.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Residential => "Жилое строительство",
            Self::Commercial => "Коммерческое строительство",
            Self::Industrial => "Промышленное строительство",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_every_code() {
        for project_type in ProjectType::ALL {
            assert_eq!(ProjectType::parse(project_type.as_str()), Some(project_type));
        }
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(ProjectType::parse("  Commercial "), Some(ProjectType::Commercial));
    }

    #[test]
    fn parse_rejects_unknown_code() {
        assert_eq!(ProjectType::parse("agricultural"), None);
        assert_eq!(ProjectType::parse(""), None);
    }
}
