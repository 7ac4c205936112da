// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod eligibility;
mod error;
mod pattern_matrix;
mod staffing;
mod types;
mod validation;
mod window;

#[cfg(test)]
mod tests;

pub use eligibility::{eligible_employees, eligible_on};
pub use pattern_matrix::{PatternCell, PatternMatrix};
pub use staffing::{FIXED_ROTATION_MULTIPLIER, minimum_required, validate_staffing};
pub use window::{Assignment, SchedulingWindow};

// Re-export public types
pub use error::DomainError;
pub use types::{
    Employee, EmployeeId, EmployeeStatus, MatrixId, RoleId, RotationType, ShiftCode, SiteId,
    WindowId, WorkSite,
};
pub use validation::{
    dates_inclusive, days_between, is_allowed_code_char, validate_date_range,
    validate_extension_range, validate_shift_code,
};
