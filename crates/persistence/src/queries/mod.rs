// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! Every function takes a `SqliteConnection` and returns domain values;
//! rows that cannot be reconstructed surface as `ReconstructionError`.

pub mod audit;
pub mod directory;
pub mod schedule;

use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Converts a stored matrix index back to its domain width.
pub(crate) fn index_from_db(value: i32, column: &str) -> Result<u32, PersistenceError> {
    value.to_u32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}
