// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use rota::CoreError;
use rota_domain::DomainError;
use rota_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A scheduling rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

fn rule(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from(rule),
        message,
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: String::from(field),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidCodeCharacters { .. }
        | DomainError::EmptyShiftCode
        | DomainError::ShiftCodeTooLong { .. } => invalid("code", message),
        DomainError::InvalidDateRange { .. } => invalid("end_date", message),
        DomainError::OverlappingExtension { .. } => rule("non_overlapping_extension", message),
        DomainError::InsufficientStaffing { .. } => rule("minimum_staffing", message),
        DomainError::InvalidRotationType(_) => invalid("rotation_type", message),
        DomainError::InvalidEmployeeStatus(_) => invalid("status", message),
        DomainError::DateArithmeticOverflow { .. } => invalid("date", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::NoEligibleEmployees { .. } => rule("eligible_employees", message),
        CoreError::EmptyPattern { .. } => rule("non_empty_pattern", message),
        CoreError::NoActiveEmployeesInRange { .. } => rule("active_employees_in_range", message),
        CoreError::CrossSiteSwap { .. } => rule("same_site_swap", message),
        CoreError::SelfSwap(_) => invalid("employee_b", message),
        CoreError::EmployeeNotFound(_) => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message,
        },
        CoreError::WindowInactive(_) => rule("active_window", message),
        CoreError::WindowAlreadyActive(_) => rule("inactive_window", message),
        CoreError::ContextMismatch(_) => ApiError::Internal { message },
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows become `ResourceNotFound`; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::WindowNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Scheduling window"),
            message: format!("Scheduling window {id} does not exist"),
        },
        PersistenceError::NotFound(what) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: format!("{what} does not exist"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
