//! Visit/posting dates as the listing displays them.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A parsed calendar date, or the displayed text when it could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostedAt {
    Date(NaiveDate),
    Raw(String),
}

// Literal patterns; `None` would only mean a typo here, and then the form is treated as unparseable.
static FULL_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d{4})[.\-/]\s?(\d{1,2})[.\-/]\s?(\d{1,2})\b").ok());
static KOREAN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(\d{4})년\s*(\d{1,2})월\s*(\d{1,2})일").ok());
static SHORT_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d{2})\.(\d{1,2})\.(\d{1,2})(?:\D|$)").ok());
static NO_YEAR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,2})\.(\d{1,2})\.(?:\D|$)").ok());

fn captures<'t>(pattern: &LazyLock<Option<Regex>>, text: &'t str) -> Option<regex::Captures<'t>> {
    pattern.as_ref()?.captures(text)
}

impl PostedAt {
    /// Parse a displayed date.
    ///
    /// Yearless forms (`10.3.목`) take the year of `today`, stepping back a
    /// year when that would put the date in the future.
    pub fn parse(raw: &str, today: NaiveDate) -> Self {
        let trimmed = raw.trim();
        parse_date(trimmed, today)
            .map(PostedAt::Date)
            .unwrap_or_else(|| PostedAt::Raw(trimmed.to_string()))
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PostedAt::Date(date) => Some(*date),
            PostedAt::Raw(_) => None,
        }
    }
}

fn ymd(caps: &regex::Captures<'_>) -> Option<(i32, u32, u32)> {
    Some((
        caps.get(1)?.as_str().parse().ok()?,
        caps.get(2)?.as_str().parse().ok()?,
        caps.get(3)?.as_str().parse().ok()?,
    ))
}

fn parse_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = captures(&FULL_YEAR, text).or_else(|| captures(&KOREAN, text)) {
        let (y, m, d) = ymd(&caps)?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }

    if let Some(caps) = captures(&SHORT_YEAR, text) {
        let (y, m, d) = ymd(&caps)?;
        return NaiveDate::from_ymd_opt(2000 + y, m, d);
    }

    if let Some(caps) = captures(&NO_YEAR, text) {
        let m: u32 = caps.get(1)?.as_str().parse().ok()?;
        let d: u32 = caps.get(2)?.as_str().parse().ok()?;
        let date = NaiveDate::from_ymd_opt(today.year(), m, d)?;
        return if date > today {
            NaiveDate::from_ymd_opt(today.year() - 1, m, d)
        } else {
            Some(date)
        };
    }

    None
}
