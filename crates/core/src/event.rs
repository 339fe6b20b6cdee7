//! Event categories.

use serde::{Deserialize, Serialize};

/// Category of a calendar event. Affects display only; the dispatcher
/// treats every category identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Birthday,
    Anniversary,
    NameDay,
    Holiday,
    Custom,
}

impl EventType {
    /// Parse a stored category value. Unknown values fall back to
    /// [`EventType::Custom`] so a stray row never breaks a dispatch run.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "birthday" => Self::Birthday,
            "anniversary" => Self::Anniversary,
            "name_day" => Self::NameDay,
            "holiday" => Self::Holiday,
            _ => Self::Custom,
        }
    }

    /// Human-readable label used in notification emails.
    pub fn label(self) -> &'static str {
        match self {
            Self::Birthday => "Urodziny",
            Self::Anniversary => "Rocznica",
            Self::NameDay => "Imieniny",
            Self::Holiday => "Święto",
            Self::Custom => "Wydarzenie",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_categories() {
        assert_eq!(EventType::parse("birthday"), EventType::Birthday);
        assert_eq!(EventType::parse("Anniversary"), EventType::Anniversary);
        assert_eq!(EventType::parse("name_day"), EventType::NameDay);
        assert_eq!(EventType::parse("holiday"), EventType::Holiday);
    }

    #[test]
    fn unknown_category_falls_back_to_custom() {
        assert_eq!(EventType::parse("event"), EventType::Custom);
        assert_eq!(EventType::parse(""), EventType::Custom);
    }
}
