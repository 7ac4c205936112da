// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A shift code contains characters outside the allowed class.
    #[error(
        "Shift code '{code}' contains invalid characters. Only letters, digits and the symbols + - * / & @ # . are allowed"
    )]
    InvalidCodeCharacters {
        /// The rejected code.
        code: String,
    },
    /// A shift code was empty where a code is required.
    #[error("Shift code cannot be empty")]
    EmptyShiftCode,
    /// A shift code exceeds the maximum stored length.
    #[error("Shift code '{code}' is longer than {max} characters")]
    ShiftCodeTooLong {
        /// The rejected code.
        code: String,
        /// The maximum allowed length.
        max: usize,
    },
    /// The end of a date range precedes its start.
    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidDateRange {
        /// The range start.
        start: Date,
        /// The range end.
        end: Date,
    },
    /// An extension must begin strictly after the current window end.
    #[error(
        "Extension must start after the current window end {current_end}, but starts on {requested_start}"
    )]
    OverlappingExtension {
        /// The window's current end date.
        current_end: Date,
        /// The requested extension start.
        requested_start: Date,
    },
    /// A fixed rotation does not have enough eligible employees.
    #[error(
        "Fixed rotations require at least {required} employees for this site, but only {available} are available"
    )]
    InsufficientStaffing {
        /// The minimum headcount required.
        required: u32,
        /// The eligible headcount found.
        available: usize,
    },
    /// Rotation type string could not be parsed.
    #[error("Invalid rotation type: {0}")]
    InvalidRotationType(String),
    /// Employee status string could not be parsed.
    #[error("Invalid employee status: {0}")]
    InvalidEmployeeStatus(String),
    /// Date arithmetic overflow.
    #[error("Date arithmetic overflow while {operation}")]
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}
