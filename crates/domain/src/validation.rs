// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::ShiftCode;
use time::Date;

/// Symbols allowed in a shift code besides ASCII letters and digits.
const ALLOWED_SYMBOLS: &[char] = &['+', '-', '*', '/', '&', '@', '#', '.'];

/// Returns whether a single character may appear in a shift code.
#[must_use]
pub fn is_allowed_code_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALLOWED_SYMBOLS.contains(&c)
}

/// Validates a shift code against the allowed character class.
///
/// # Arguments
///
/// * `code` - The code to validate
///
/// # Errors
///
/// Returns an error if:
/// - The code is empty
/// - The code is longer than [`ShiftCode::MAX_LEN`] characters
/// - The code contains anything other than letters, digits and `+ - * / & @ # .`
pub fn validate_shift_code(code: &str) -> Result<(), DomainError> {
    if code.is_empty() {
        return Err(DomainError::EmptyShiftCode);
    }

    if code.chars().count() > ShiftCode::MAX_LEN {
        return Err(DomainError::ShiftCodeTooLong {
            code: code.to_string(),
            max: ShiftCode::MAX_LEN,
        });
    }

    if !code.chars().all(is_allowed_code_char) {
        return Err(DomainError::InvalidCodeCharacters {
            code: code.to_string(),
        });
    }

    Ok(())
}

/// Validates that `end` is not before `start`.
///
/// # Errors
///
/// Returns `DomainError::InvalidDateRange` if `end < start`.
pub fn validate_date_range(start: Date, end: Date) -> Result<(), DomainError> {
    if end < start {
        return Err(DomainError::InvalidDateRange { start, end });
    }
    Ok(())
}

/// Validates a requested extension against the window's current end date.
///
/// The extension must start strictly after `current_end` and must itself be
/// a well-formed range.
///
/// # Errors
///
/// Returns an error if:
/// - `ext_start <= current_end` (`OverlappingExtension`)
/// - `ext_end < ext_start` (`InvalidDateRange`)
pub fn validate_extension_range(
    current_end: Date,
    ext_start: Date,
    ext_end: Date,
) -> Result<(), DomainError> {
    if ext_start <= current_end {
        return Err(DomainError::OverlappingExtension {
            current_end,
            requested_start: ext_start,
        });
    }
    validate_date_range(ext_start, ext_end)
}

/// Returns the whole number of days from `from` to `to`.
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Returns every date in `[start, end]`, in order.
///
/// # Errors
///
/// Returns an error if the range is inverted or runs past the maximum
/// representable date.
pub fn dates_inclusive(start: Date, end: Date) -> Result<Vec<Date>, DomainError> {
    validate_date_range(start, end)?;

    let mut dates: Vec<Date> = Vec::new();
    let mut current: Date = start;
    loop {
        dates.push(current);
        if current == end {
            break;
        }
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("iterating dates after {current}"),
            })?;
    }

    Ok(dates)
}
