// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee eligibility.
//!
//! Row assignment is deterministic: eligible employees are ordered by
//! surname, then given name, then identifier.

use crate::types::{Employee, RoleId, SiteId};
use time::Date;

/// Returns the active employees of `site_id` and `role_id`, in rotation order.
#[must_use]
pub fn eligible_employees(roster: &[Employee], site_id: SiteId, role_id: RoleId) -> Vec<Employee> {
    let mut eligible: Vec<Employee> = roster
        .iter()
        .filter(|employee| employee.is_eligible_for(site_id, role_id))
        .cloned()
        .collect();
    eligible.sort_by(|a, b| {
        a.surname
            .cmp(&b.surname)
            .then_with(|| a.given_name.cmp(&b.given_name))
            .then_with(|| a.id.cmp(&b.id))
    });
    eligible
}

/// Narrows an ordered snapshot to those available on `date`.
#[must_use]
pub fn eligible_on(snapshot: &[Employee], date: Date) -> Vec<&Employee> {
    snapshot
        .iter()
        .filter(|employee| employee.is_available_on(date))
        .collect()
}
