// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write paths.
//!
//! Every multi-row write runs inside a single transaction: either all rows
//! land or none do.

pub mod audit;
pub mod directory;
pub mod schedule;

use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Maximum rows per batched `INSERT`.
pub(crate) const INSERT_CHUNK_SIZE: usize = 500;

/// Converts a domain index to its stored width.
pub(crate) fn index_to_db(value: u32, column: &str) -> Result<i32, PersistenceError> {
    value.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("{column} out of range: {value}"))
    })
}
