use serde::{Deserialize, Serialize};

pub const VND_SUFFIX: &str = "đ";

/// Digit-group separator conventions used by the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// `vi-VN`: `15.000.000`
    Vietnamese,
    /// `en-US`: `15,000,000`
    English,
}

impl Grouping {
    fn separator(self) -> char {
        match self {
            Grouping::Vietnamese => '.',
            Grouping::English => ',',
        }
    }
}

pub fn group_digits(amount: u64, grouping: Grouping) -> String {
    let digits = amount.to_string();
    let separator = grouping.separator();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// `15000000` -> `15.000.000đ`
pub fn format_vnd(amount: u64) -> String {
    format!("{}{}", group_digits(amount, Grouping::Vietnamese), VND_SUFFIX)
}

/// Money input that stores only the digits the user typed.
///
/// The stored value is the raw digit string; the display string is derived
/// from it on every keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyInput {
    raw: String,
}

impl CurrencyInput {
    pub fn from_typed(typed: &str) -> Self {
        let mut input = Self::default();
        input.input(typed);
        input
    }

    /// Replace the value with the digits of `typed`, discarding everything else.
    pub fn input(&mut self, typed: &str) {
        self.raw = typed.chars().filter(char::is_ascii_digit).collect();
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Formatted text shown in the input; empty when there are no digits.
    pub fn display(&self) -> String {
        match self.amount() {
            Ok(Some(amount)) => format_vnd(amount),
            Ok(None) => String::new(),
            Err(_) => format!("{}{}", self.raw, VND_SUFFIX),
        }
    }

    /// Numeric value sent on submit. `Ok(None)` when nothing was entered.
    pub fn amount(&self) -> Result<Option<u64>, AmountOverflow> {
        if self.raw.is_empty() {
            return Ok(None);
        }
        self.raw.parse::<u64>().map(Some).map_err(|_| AmountOverflow)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("amount has too many digits")]
pub struct AmountOverflow;
