// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Public holiday lookups for grid annotation.
//!
//! The scheduling engine never reads holidays; only the grid does.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use time::Date;
use tracing::info;

use crate::dates::parse_date_field;

/// Errors raised while loading a holiday calendar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HolidayError {
    /// The calendar file could not be read.
    #[error("Failed to read holiday calendar: {0}")]
    Io(String),
    /// The calendar is not valid JSON of the expected shape.
    #[error("Failed to parse holiday calendar: {0}")]
    Parse(String),
    /// A date key is not `YYYY-MM-DD`.
    #[error("Invalid holiday date '{date}' for country {country}")]
    InvalidDate {
        /// The country the entry belongs to.
        country: String,
        /// The offending key.
        date: String,
    },
}

/// Source of public holidays per country.
pub trait HolidayCalendar {
    /// Returns the holidays of `country` between `start` and `end`, inclusive.
    fn holidays_in_range(&self, country: &str, start: Date, end: Date) -> BTreeMap<Date, String>;
}

/// A holiday calendar held in memory.
///
/// The JSON form is `{"CO": {"2026-01-01": "Año Nuevo"}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryHolidayCalendar {
    by_country: HashMap<String, BTreeMap<Date, String>>,
}

impl InMemoryHolidayCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with one more holiday.
    #[must_use]
    pub fn with_holiday(mut self, country: &str, date: Date, name: &str) -> Self {
        self.by_country
            .entry(country.to_string())
            .or_default()
            .insert(date, name.to_string());
        self
    }

    /// Parses a calendar from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a date key is invalid.
    pub fn from_json_str(json: &str) -> Result<Self, HolidayError> {
        let raw: HashMap<String, BTreeMap<String, String>> =
            serde_json::from_str(json).map_err(|e| HolidayError::Parse(e.to_string()))?;

        let mut calendar: Self = Self::new();
        for (country, entries) in raw {
            let mut dates: BTreeMap<Date, String> = BTreeMap::new();
            for (date, name) in entries {
                let parsed: Date =
                    parse_date_field("holiday", &date).map_err(|_| HolidayError::InvalidDate {
                        country: country.clone(),
                        date: date.clone(),
                    })?;
                dates.insert(parsed, name);
            }
            calendar.by_country.insert(country, dates);
        }
        Ok(calendar)
    }

    /// Loads a calendar from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, HolidayError> {
        let json: String =
            std::fs::read_to_string(path.as_ref()).map_err(|e| HolidayError::Io(e.to_string()))?;
        let calendar: Self = Self::from_json_str(&json)?;
        info!(
            path = %path.as_ref().display(),
            countries = calendar.by_country.len(),
            "Loaded holiday calendar"
        );
        Ok(calendar)
    }

    /// Number of holidays known for `country`.
    #[must_use]
    pub fn holiday_count(&self, country: &str) -> usize {
        self.by_country.get(country).map_or(0, BTreeMap::len)
    }
}

impl HolidayCalendar for InMemoryHolidayCalendar {
    fn holidays_in_range(&self, country: &str, start: Date, end: Date) -> BTreeMap<Date, String> {
        if end < start {
            return BTreeMap::new();
        }
        self.by_country
            .get(country)
            .map(|dates| {
                dates
                    .range(start..=end)
                    .map(|(date, name)| (*date, name.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}
