//! Date normalization for upstream date fields
//!
//! Work items come back with dates in whatever shape the field was written
//! in. [`DateNormalizer`] tries an ordered list of [`DateFormat`]s and keeps
//! the first one that parses.
//!
//! Supported formats (default order):
//! - `iso_utc`: `2024-06-14T09:30:00Z`
//! - `iso_local`: `2024-06-14T09:30:00` (read as UTC)
//! - `iso_offset`: `2024-06-14T09:30:00-03:00`
//! - `date`: `2024-06-14`
//! - `regional_date_time`: `14/06/2024 09:30`
//! - `regional_date`: `14/06/2024`
//! - `short_date`: `6/14/2024`
//! - `long_date`: `June 14, 2024`
//! - `slashed_date`: `2024/06/14`
//! - `rfc3339`: any RFC 3339 timestamp, e.g. `2024-06-14 09:30:00+00:00`

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical timestamp produced by the normalizer.
///
/// The parsed offset is kept so the calendar date of the input survives;
/// zone-less inputs get `+00:00`.
pub type Timestamp = DateTime<FixedOffset>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DateError {
    #[error("Unrecognized date format: '{0}'")]
    UnrecognizedDateFormat(String),

    #[error("Unknown date format name: '{0}'")]
    UnknownFormatName(String),
}

/// A single supported date layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    IsoUtc,
    IsoLocal,
    IsoOffset,
    Date,
    RegionalDateTime,
    RegionalDate,
    ShortDate,
    LongDate,
    SlashedDate,
    Rfc3339,
}

impl DateFormat {
    /// Order used when no other order is configured
    pub const DEFAULT_ORDER: [DateFormat; 10] = [
        DateFormat::IsoUtc,
        DateFormat::IsoLocal,
        DateFormat::IsoOffset,
        DateFormat::Date,
        DateFormat::RegionalDateTime,
        DateFormat::RegionalDate,
        DateFormat::ShortDate,
        DateFormat::LongDate,
        DateFormat::SlashedDate,
        DateFormat::Rfc3339,
    ];

    /// Returns the configuration name of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            DateFormat::IsoUtc => "iso_utc",
            DateFormat::IsoLocal => "iso_local",
            DateFormat::IsoOffset => "iso_offset",
            DateFormat::Date => "date",
            DateFormat::RegionalDateTime => "regional_date_time",
            DateFormat::RegionalDate => "regional_date",
            DateFormat::ShortDate => "short_date",
            DateFormat::LongDate => "long_date",
            DateFormat::SlashedDate => "slashed_date",
            DateFormat::Rfc3339 => "rfc3339",
        }
    }

    /// Returns a human-readable layout for display
    pub fn layout(&self) -> &'static str {
        match self {
            DateFormat::IsoUtc => "YYYY-MM-DDTHH:MM:SS[.f]Z",
            DateFormat::IsoLocal => "YYYY-MM-DDTHH:MM:SS[.f]",
            DateFormat::IsoOffset => "YYYY-MM-DDTHH:MM:SS[.f]+HH:MM",
            DateFormat::Date => "YYYY-MM-DD",
            DateFormat::RegionalDateTime => "DD/MM/YYYY HH:MM",
            DateFormat::RegionalDate => "DD/MM/YYYY",
            DateFormat::ShortDate => "M/D/YYYY",
            DateFormat::LongDate => "Month D, YYYY",
            DateFormat::SlashedDate => "YYYY/MM/DD",
            DateFormat::Rfc3339 => "RFC 3339",
        }
    }

    /// Parses `raw` with this layout only
    pub fn parse(&self, raw: &str) -> Option<Timestamp> {
        match self {
            DateFormat::IsoUtc => naive_as_utc(raw, "%Y-%m-%dT%H:%M:%S%.fZ"),
            DateFormat::IsoLocal => naive_as_utc(raw, "%Y-%m-%dT%H:%M:%S%.f"),
            DateFormat::IsoOffset => DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%:z").ok(),
            DateFormat::Date => date_as_utc(raw, "%Y-%m-%d"),
            DateFormat::RegionalDateTime => {
                let (date, _) = raw.split_once(' ')?;
                if !is_padded_regional(date) {
                    return None;
                }
                naive_as_utc(raw, "%d/%m/%Y %H:%M")
            }
            DateFormat::RegionalDate => {
                if !is_padded_regional(raw) {
                    return None;
                }
                date_as_utc(raw, "%d/%m/%Y")
            }
            DateFormat::ShortDate => date_as_utc(raw, "%m/%d/%Y"),
            DateFormat::LongDate => date_as_utc(raw, "%B %d, %Y"),
            DateFormat::SlashedDate => date_as_utc(raw, "%Y/%m/%d"),
            DateFormat::Rfc3339 => DateTime::parse_from_rfc3339(raw).ok(),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DateFormat {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateFormat::DEFAULT_ORDER
            .iter()
            .copied()
            .find(|format| format.as_str() == s.trim())
            .ok_or_else(|| DateError::UnknownFormatName(s.to_string()))
    }
}

fn naive_as_utc(raw: &str, pattern: &str) -> Option<Timestamp> {
    NaiveDateTime::parse_from_str(raw, pattern)
        .ok()
        .map(|dt| dt.and_utc().fixed_offset())
}

fn date_as_utc(raw: &str, pattern: &str) -> Option<Timestamp> {
    NaiveDate::parse_from_str(raw, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().fixed_offset())
}

/// `DD/MM/YYYY` with both day and month zero-padded.
///
/// Keeps the regional layouts from claiming unpadded `M/D/YYYY` input.
fn is_padded_regional(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[2] == b'/'
        && bytes[5] == b'/'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit())
}

/// Ordered, first-match-wins date parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateNormalizer {
    formats: Vec<DateFormat>,
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self {
            formats: DateFormat::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl DateNormalizer {
    /// Creates a normalizer that tries `formats` in the given order
    pub fn new(formats: Vec<DateFormat>) -> Self {
        Self { formats }
    }

    /// Returns the formats in the order they are tried
    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Parses `raw` into a timestamp
    pub fn normalize(&self, raw: &str) -> Result<Timestamp, DateError> {
        self.normalize_with_format(raw).map(|(timestamp, _)| timestamp)
    }

    /// Parses `raw` and also reports which format matched
    pub fn normalize_with_format(&self, raw: &str) -> Result<(Timestamp, DateFormat), DateError> {
        let trimmed = raw.trim();

        self.formats
            .iter()
            .find_map(|format| format.parse(trimmed).map(|ts| (ts, *format)))
            .ok_or_else(|| DateError::UnrecognizedDateFormat(raw.to_string()))
    }
}

/// Parses `raw` using the default format order
pub fn normalize(raw: &str) -> Result<Timestamp, DateError> {
    DateNormalizer::default().normalize(raw)
}
