use serde::Serialize;

use crate::careers::remote::Position;

/// Shown in the position dropdown whenever the directory is unavailable.
pub const FALLBACK_POSITIONS: [&str; 12] = [
    "Headhunter",
    "Business Development",
    "HR Manager",
    "HR Executive",
    "Recruiter",
    "Accountant",
    "Software Developer",
    "Marketing Executive",
    "Graphic Designer",
    "Administrative",
    "Sales Executive",
    "Other",
];

pub const EXPERIENCE_LEVELS: [&str; 5] = [
    "Less than 1 year",
    "1-2 years",
    "3-5 years",
    "5-8 years",
    "8+ years",
];

pub const SALARY_TYPES: [&str; 3] = ["Gross", "Net", "Base + Commission"];

pub const REFERRAL_SOURCES: [&str; 6] = [
    "Job Board",
    "LinkedIn",
    "Facebook",
    "Friend/Referral",
    "Company Website",
    "Other",
];

pub const EMPLOYMENT_TYPES: [&str; 7] = [
    "Full-time",
    "Part-time",
    "Contract",
    "Remote",
    "Hybrid",
    "Freelancer",
    "Internship",
];

pub const HOURS_PER_WEEK: [&str; 5] = [
    "Less than 10 hours",
    "10-20 hours",
    "20-30 hours",
    "30-40 hours",
    "40+ hours",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionsSource {
    Directory,
    Fallback,
}

/// Titles offered by the position dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionOptions {
    pub titles: Vec<String>,
    pub source: OptionsSource,
}

impl PositionOptions {
    pub fn fallback() -> Self {
        Self {
            titles: FALLBACK_POSITIONS.iter().map(|title| title.to_string()).collect(),
            source: OptionsSource::Fallback,
        }
    }

    pub fn from_directory(positions: &[Position]) -> Self {
        Self {
            titles: positions
                .iter()
                .map(|position| position.title.clone())
                .filter(|title| !title.trim().is_empty())
                .collect(),
            source: OptionsSource::Directory,
        }
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|candidate| candidate == title)
    }
}

/// Static lists rendered alongside the dropdowns.
#[derive(Debug, Clone, Serialize)]
pub struct StaticOptions {
    pub experience_levels: &'static [&'static str],
    pub salary_types: &'static [&'static str],
    pub referral_sources: &'static [&'static str],
    pub employment_types: &'static [&'static str],
    pub hours_per_week: &'static [&'static str],
}

impl StaticOptions {
    pub fn get() -> Self {
        Self {
            experience_levels: &EXPERIENCE_LEVELS,
            salary_types: &SALARY_TYPES,
            referral_sources: &REFERRAL_SOURCES,
            employment_types: &EMPLOYMENT_TYPES,
            hours_per_week: &HOURS_PER_WEEK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_lists_twelve_positions() {
        let options = PositionOptions::fallback();
        assert_eq!(options.titles.len(), 12);
        assert_eq!(options.source, OptionsSource::Fallback);
        assert!(options.contains("Software Developer"));
        assert!(!options.contains("software developer"));
    }

    #[test]
    fn directory_titles_skip_blank_rows() {
        let positions = vec![
            Position {
                id: "1".to_string(),
                title: "3D Artist".to_string(),
                description: String::new(),
            },
            Position {
                id: "2".to_string(),
                title: "  ".to_string(),
                description: String::new(),
            },
        ];
        let options = PositionOptions::from_directory(&positions);
        assert_eq!(options.titles, vec!["3D Artist".to_string()]);
        assert_eq!(options.source, OptionsSource::Directory);
    }
}
