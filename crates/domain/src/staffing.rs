// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Minimum staffing for fixed rotations.
//!
//! A fixed post is covered around the clock, which takes four people per
//! promised headcount. Variable rotations carry no headcount rule.

use crate::error::DomainError;
use crate::types::{RotationType, WorkSite};

/// Staff needed per promised headcount on a fixed rotation.
pub const FIXED_ROTATION_MULTIPLIER: u32 = 4;

/// Returns the minimum headcount the site needs for `rotation_type`.
///
/// `None` means no rule applies: a variable rotation, or a site without a
/// target headcount.
#[must_use]
pub fn minimum_required(site: &WorkSite, rotation_type: RotationType) -> Option<u32> {
    match rotation_type {
        RotationType::Variable => None,
        RotationType::Fixed => site
            .target_headcount
            .map(|target| target.saturating_mul(FIXED_ROTATION_MULTIPLIER)),
    }
}

/// Validates that `available` eligible employees satisfy the staffing rule.
///
/// # Errors
///
/// Returns `DomainError::InsufficientStaffing` if a fixed rotation has fewer
/// eligible employees than required.
pub fn validate_staffing(
    site: &WorkSite,
    rotation_type: RotationType,
    available: usize,
) -> Result<(), DomainError> {
    let Some(required) = minimum_required(site, rotation_type) else {
        return Ok(());
    };

    let enough: bool = usize::try_from(required).is_ok_and(|required| available >= required);
    if !enough {
        return Err(DomainError::InsufficientStaffing {
            required,
            available,
        });
    }
    Ok(())
}
