//! Reminder categories and the category filter used by list views.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ReminderError;

/// Closed set of categories a reminder can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCategory {
    Work,
    Personal,
    Health,
    Shopping,
    Other,
}

/// Color scheme the category palette is resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl ReminderCategory {
    /// All categories, in display order
    pub const ALL: [ReminderCategory; 5] = [
        Self::Work,
        Self::Personal,
        Self::Health,
        Self::Shopping,
        Self::Other,
    ];

    /// Stable lowercase name (matches the persisted form)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Health => "health",
            Self::Shopping => "shopping",
            Self::Other => "other",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Health => "Health",
            Self::Shopping => "Shopping",
            Self::Other => "Other",
        }
    }

    /// Badge color for this category under the given theme
    pub fn color(&self, theme: Theme) -> &'static str {
        match (self, theme) {
            (Self::Work, Theme::Light) => "#5271FF",
            (Self::Work, Theme::Dark) => "#738AFF",
            (Self::Personal, Theme::Light) => "#FF7A5A",
            (Self::Personal, Theme::Dark) => "#FF8F73",
            (Self::Health, Theme::Light) => "#4CAF50",
            (Self::Health, Theme::Dark) => "#66BB6A",
            (Self::Shopping, Theme::Light) => "#9C27B0",
            (Self::Shopping, Theme::Dark) => "#BA68C8",
            (Self::Other, Theme::Light) => "#607D8B",
            (Self::Other, Theme::Dark) => "#78909C",
        }
    }
}

impl Default for ReminderCategory {
    fn default() -> Self {
        Self::Other
    }
}

impl fmt::Display for ReminderCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderCategory {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == lowered)
            .ok_or_else(|| ReminderError::UnknownCategory(s.to_string()))
    }
}

/// Category selection applied by the filtered list view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ReminderCategory),
}

impl CategoryFilter {
    /// Whether a reminder in `category` passes this filter
    pub fn matches(&self, category: ReminderCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(selected) => *selected == category,
        }
    }
}

impl From<ReminderCategory> for CategoryFilter {
    fn from(category: ReminderCategory) -> Self {
        Self::Only(category)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_is_case_insensitive() {
        assert_eq!("Work".parse::<ReminderCategory>().unwrap(), ReminderCategory::Work);
        assert_eq!(" shopping ".parse::<ReminderCategory>().unwrap(), ReminderCategory::Shopping);
        assert!(matches!(
            "errands".parse::<ReminderCategory>(),
            Err(ReminderError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_filter_parse_and_match() {
        let all: CategoryFilter = "ALL".parse().unwrap();
        assert_eq!(all, CategoryFilter::All);
        assert!(all.matches(ReminderCategory::Health));

        let health: CategoryFilter = "health".parse().unwrap();
        assert!(health.matches(ReminderCategory::Health));
        assert!(!health.matches(ReminderCategory::Work));
        assert_eq!(health.to_string(), "health");
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(ReminderCategory::Work.color(Theme::Light), "#5271FF");
        assert_eq!(ReminderCategory::Other.color(Theme::Dark), "#78909C");
        assert_eq!(ReminderCategory::Shopping.label(), "Shopping");
    }
}
