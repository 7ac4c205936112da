// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::ApiError;

/// The boundary date format, `YYYY-MM-DD`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parses a request date, naming `field` on failure.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if `value` is not a valid `YYYY-MM-DD` date.
pub fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    Date::parse(value.trim(), DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: field.to_string(),
        message: format!("Failed to parse date '{value}': {e}"),
    })
}

/// Formats a date for a response.
#[must_use]
pub fn format_date(date: Date) -> String {
    date.to_string()
}
