// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::validate_shift_code;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Generates a canonical numeric identifier newtype.
///
/// Identifiers are assigned by the store; the domain never invents them.
macro_rules! canonical_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

canonical_id!(
    /// Identifies a work site (operational centre).
    SiteId
);
canonical_id!(
    /// Identifies a predefined role employees are hired into.
    RoleId
);
canonical_id!(
    /// Identifies an employee in the directory.
    EmployeeId
);
canonical_id!(
    /// Identifies a pattern matrix.
    MatrixId
);
canonical_id!(
    /// Identifies a scheduling window.
    WindowId
);

/// A validated shift code token.
///
/// The engine treats codes as opaque; only the character class and length
/// are enforced.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShiftCode(String);

impl ShiftCode {
    /// Maximum number of characters in a stored code.
    pub const MAX_LEN: usize = 10;

    /// Creates a new `ShiftCode`, validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty, too long, or contains
    /// characters outside the allowed class.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        validate_shift_code(value)?;
        Ok(Self(value.to_string()))
    }

    /// Returns the code value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ShiftCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// How a pattern matrix rotates staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RotationType {
    /// Fixed posts that must be covered around the clock.
    #[default]
    Fixed,
    /// Variable coverage without a headcount rule.
    Variable,
}

impl RotationType {
    /// Converts this rotation type to its stored code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fixed => "F",
            Self::Variable => "V",
        }
    }
}

impl FromStr for RotationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "F" | "FIXED" => Ok(Self::Fixed),
            "V" | "VARIABLE" => Ok(Self::Variable),
            _ => Err(DomainError::InvalidRotationType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RotationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Employment status of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmployeeStatus {
    /// Currently employed and schedulable.
    Active,
    /// Left, suspended or otherwise not schedulable.
    Inactive,
}

impl EmployeeStatus {
    /// Converts this status to its stored string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            _ => Err(DomainError::InvalidEmployeeStatus(s.to_string())),
        }
    }
}

/// A work site (operational centre) staff are scheduled at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSite {
    /// The canonical identifier.
    pub id: SiteId,
    /// The display name.
    pub name: String,
    /// Target headcount ("promesa de valor") used by the staffing rule.
    pub target_headcount: Option<u32>,
    /// ISO country code used to annotate holidays on a rendered grid.
    pub country_code: String,
    /// Whether the site is active.
    pub active: bool,
}

impl WorkSite {
    /// Country used when a site does not declare one.
    pub const DEFAULT_COUNTRY: &'static str = "CO";

    /// Creates a new active `WorkSite` in the default country.
    #[must_use]
    pub fn new(id: SiteId, name: &str, target_headcount: Option<u32>) -> Self {
        Self {
            id,
            name: name.to_string(),
            target_headcount,
            country_code: String::from(Self::DEFAULT_COUNTRY),
            active: true,
        }
    }
}

/// An employee as seen by the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The canonical identifier.
    pub id: EmployeeId,
    /// Given name.
    pub given_name: String,
    /// Surname; the deterministic ordering key for row assignment.
    pub surname: String,
    /// Identity document number.
    pub document: String,
    /// The site the employee works at.
    pub site_id: SiteId,
    /// The employee's role.
    pub role_id: RoleId,
    /// Employment status.
    pub status: EmployeeStatus,
    /// First day the employee may be scheduled (inclusive).
    pub active_from: Option<Date>,
    /// Last day the employee may be scheduled (inclusive).
    pub active_until: Option<Date>,
}

impl Employee {
    /// Creates a new active `Employee` with open-ended availability.
    #[must_use]
    pub fn new(
        id: EmployeeId,
        given_name: &str,
        surname: &str,
        site_id: SiteId,
        role_id: RoleId,
    ) -> Self {
        Self {
            id,
            given_name: given_name.to_string(),
            surname: surname.to_string(),
            document: String::new(),
            site_id,
            role_id,
            status: EmployeeStatus::Active,
            active_from: None,
            active_until: None,
        }
    }

    /// Returns a copy with the given availability bounds.
    #[must_use]
    pub fn with_availability(
        mut self,
        active_from: Option<Date>,
        active_until: Option<Date>,
    ) -> Self {
        self.active_from = active_from;
        self.active_until = active_until;
        self
    }

    /// Returns a copy with the given status.
    #[must_use]
    pub fn with_status(mut self, status: EmployeeStatus) -> Self {
        self.status = status;
        self
    }

    /// Returns the display name, surname first.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.surname, self.given_name)
    }

    /// Whether this employee belongs to the given site and role and is active.
    #[must_use]
    pub fn is_eligible_for(&self, site_id: SiteId, role_id: RoleId) -> bool {
        self.status == EmployeeStatus::Active && self.site_id == site_id && self.role_id == role_id
    }

    /// Whether the given date falls inside the employee's availability bounds.
    #[must_use]
    pub fn is_available_on(&self, date: Date) -> bool {
        self.active_from.is_none_or(|from| from <= date)
            && self.active_until.is_none_or(|until| date <= until)
    }
}
