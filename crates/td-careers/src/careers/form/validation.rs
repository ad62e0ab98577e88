use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Serialize, Serializer};
use url::Url;

pub const NAME_MIN_CHARS: usize = 2;
pub const PHONE_MIN_CHARS: usize = 10;
pub const MESSAGE_MAX_CHARS: usize = 1000;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Input controls on either form variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FormField {
    FullName,
    Email,
    Phone,
    LinkedinUrl,
    PortfolioUrl,
    Position,
    EmploymentType,
    Experience,
    HowDidYouHear,
    AvailableStartDate,
    ExpectedSalary,
    SalaryType,
    HourlyRate,
    HoursPerWeek,
    AdditionalMessage,
    /// Supplementary link row, by display index.
    PortfolioLink(usize),
}

impl FormField {
    /// Payload key of the field; link rows are keyed `portfolioLinks.{index}`.
    pub fn key(self) -> String {
        let key = match self {
            FormField::FullName => "fullName",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::LinkedinUrl => "linkedinUrl",
            FormField::PortfolioUrl => "portfolioUrl",
            FormField::Position => "position",
            FormField::EmploymentType => "employmentType",
            FormField::Experience => "experience",
            FormField::HowDidYouHear => "howDidYouHear",
            FormField::AvailableStartDate => "availableStartDate",
            FormField::ExpectedSalary => "expectedSalary",
            FormField::SalaryType => "salaryType",
            FormField::HourlyRate => "hourlyRate",
            FormField::HoursPerWeek => "hoursPerWeek",
            FormField::AdditionalMessage => "additionalMessage",
            FormField::PortfolioLink(index) => return format!("portfolioLinks.{index}"),
        };
        key.to_string()
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl Serialize for FormField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

/// Inline annotation for a single control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FormField,
    pub message: &'static str,
}

/// Every failing field of one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: FormField, outcome: Option<&'static str>) {
        if let Some(message) = outcome {
            self.errors.push(FieldError { field, message });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

pub(crate) fn min_chars(value: &str, min: usize, message: &'static str) -> Option<&'static str> {
    (value.chars().count() < min).then_some(message)
}

pub(crate) fn max_chars(value: &str, max: usize, message: &'static str) -> Option<&'static str> {
    (value.chars().count() > max).then_some(message)
}

pub(crate) fn email(value: &str) -> Option<&'static str> {
    const MESSAGE: &str = "Please enter a valid email address";
    let valid = EMAIL_REGEX.is_match(value) && !value.starts_with('.') && !value.contains("..");
    (!valid).then_some(MESSAGE)
}

pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

pub(crate) fn url(value: &str, message: &'static str) -> Option<&'static str> {
    (!is_absolute_url(value)).then_some(message)
}

/// Empty is accepted; anything else must be an absolute URL.
pub(crate) fn optional_url(value: &str, message: &'static str) -> Option<&'static str> {
    if value.is_empty() {
        None
    } else {
        url(value, message)
    }
}

/// Required selection from a fixed list.
pub(crate) fn one_of<S: AsRef<str>>(
    value: &str,
    allowed: &[S],
    message: &'static str,
) -> Option<&'static str> {
    let known = allowed.iter().any(|candidate| candidate.as_ref() == value);
    (value.is_empty() || !known).then_some(message)
}

pub(crate) fn optional_one_of(
    value: Option<&str>,
    allowed: &[&str],
    message: &'static str,
) -> Option<&'static str> {
    match value {
        Some(value) if !value.is_empty() => one_of(value, allowed, message),
        _ => None,
    }
}

pub(crate) fn optional_date(value: Option<&str>) -> Option<&'static str> {
    const MESSAGE: &str = "Please choose a valid start date";
    match value {
        Some(value) if !value.is_empty() => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .err()
            .map(|_| MESSAGE),
        _ => None,
    }
}

pub(crate) fn full_name(value: &str) -> Option<&'static str> {
    min_chars(value, NAME_MIN_CHARS, "Please enter your full name")
}

pub(crate) fn phone(value: &str) -> Option<&'static str> {
    min_chars(value, PHONE_MIN_CHARS, "Please enter a valid phone number")
}

pub(crate) fn message(value: Option<&str>) -> Option<&'static str> {
    value.and_then(|value| {
        max_chars(
            value,
            MESSAGE_MAX_CHARS,
            "String must contain at most 1000 character(s)",
        )
    })
}

/// Blank rows are skipped on submit, so only filled rows are checked.
pub(crate) fn supplementary_link(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        None
    } else {
        url(value.trim(), "Please provide a valid URL")
    }
}

/// `"{chars}/1000"` shown under the message box.
pub fn message_counter(value: Option<&str>) -> String {
    let used = value.map(|value| value.chars().count()).unwrap_or(0);
    format!("{used}/{MESSAGE_MAX_CHARS}")
}

/// Share of `filled` over `required`, as a percentage.
pub(crate) fn progress(filled: &[bool]) -> f32 {
    if filled.is_empty() {
        return 0.0;
    }
    let done = filled.iter().filter(|filled| **filled).count();
    done as f32 / filled.len() as f32 * 100.0
}
