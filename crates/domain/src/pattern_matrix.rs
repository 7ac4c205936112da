// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rotation template.
//!
//! A pattern matrix is stored as a sparse set of `(row, column, code)` cells
//! and materialized here into an indexed map with precomputed dimensions.
//!
//! ## Invariants
//!
//! - `row_count` is one more than the largest row index among defined cells
//! - `column_count` is one more than the largest column index among defined cells
//! - A matrix with no defined cells has zero rows and zero columns
//! - A defined cell may be empty, meaning "no shift"
//! - Every non-empty cell holds a valid [`ShiftCode`]

use crate::error::DomainError;
use crate::types::{MatrixId, RotationType, ShiftCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One raw cell as supplied by the matrix editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCell {
    /// Zero-based row index.
    pub row: u32,
    /// Zero-based column index.
    pub column: u32,
    /// The cell code; empty means "no shift".
    pub code: String,
}

impl PatternCell {
    /// Creates a new `PatternCell`.
    #[must_use]
    pub fn new(row: u32, column: u32, code: &str) -> Self {
        Self {
            row,
            column,
            code: code.to_string(),
        }
    }
}

/// An immutable rotation template of shift codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatrix {
    id: Option<MatrixId>,
    name: String,
    rotation_type: RotationType,
    cells: BTreeMap<(u32, u32), Option<ShiftCode>>,
    row_count: u32,
    column_count: u32,
}

impl PatternMatrix {
    /// Builds a matrix from its sparse cells.
    ///
    /// Later cells at the same position replace earlier ones.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `rotation_type` - Fixed or variable rotation
    /// * `cells` - The defined cells
    ///
    /// # Errors
    ///
    /// Returns an error if any non-empty cell code is not a valid shift code.
    pub fn new(
        name: &str,
        rotation_type: RotationType,
        cells: Vec<PatternCell>,
    ) -> Result<Self, DomainError> {
        let mut map: BTreeMap<(u32, u32), Option<ShiftCode>> = BTreeMap::new();
        let mut row_count: u32 = 0;
        let mut column_count: u32 = 0;

        for cell in cells {
            let trimmed: &str = cell.code.trim();
            let code: Option<ShiftCode> = if trimmed.is_empty() {
                None
            } else {
                Some(ShiftCode::new(trimmed)?)
            };
            row_count = row_count.max(cell.row.saturating_add(1));
            column_count = column_count.max(cell.column.saturating_add(1));
            map.insert((cell.row, cell.column), code);
        }

        Ok(Self {
            id: None,
            name: name.to_string(),
            rotation_type,
            cells: map,
            row_count,
            column_count,
        })
    }

    /// Builds a matrix from a row-major grid.
    ///
    /// Only non-empty values become defined cells, so trailing blanks do not
    /// widen the matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if any non-empty value is not a valid shift code.
    pub fn from_rows<S: AsRef<str>>(
        name: &str,
        rotation_type: RotationType,
        rows: &[Vec<S>],
    ) -> Result<Self, DomainError> {
        let mut cells: Vec<PatternCell> = Vec::new();
        for (row_index, row) in rows.iter().enumerate() {
            for (column_index, value) in row.iter().enumerate() {
                if value.as_ref().trim().is_empty() {
                    continue;
                }
                cells.push(PatternCell::new(
                    index_to_u32(row_index)?,
                    index_to_u32(column_index)?,
                    value.as_ref(),
                ));
            }
        }
        Self::new(name, rotation_type, cells)
    }

    /// Returns a copy carrying the persisted identifier.
    #[must_use]
    pub fn with_id(mut self, id: MatrixId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns the persisted identifier, if any.
    #[must_use]
    pub const fn id(&self) -> Option<MatrixId> {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the rotation type.
    #[must_use]
    pub const fn rotation_type(&self) -> RotationType {
        self.rotation_type
    }

    /// Number of rows (max row index + 1).
    #[must_use]
    pub const fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns (max column index + 1).
    #[must_use]
    pub const fn column_count(&self) -> u32 {
        self.column_count
    }

    /// Looks up the code at `(row, column)`; `None` means no shift.
    #[must_use]
    pub fn cell(&self, row: u32, column: u32) -> Option<&ShiftCode> {
        self.cells.get(&(row, column)).and_then(Option::as_ref)
    }

    /// Whether at least one cell carries a code.
    #[must_use]
    pub fn has_codes(&self) -> bool {
        self.cells.values().any(Option::is_some)
    }

    /// Whether the matrix can drive a rotation at all.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.row_count > 0 && self.column_count > 0 && self.has_codes()
    }

    /// Returns one row read left to right, `None` for empty cells.
    #[must_use]
    pub fn row_codes(&self, row: u32) -> Vec<Option<&ShiftCode>> {
        (0..self.column_count)
            .map(|column| self.cell(row, column))
            .collect()
    }

    /// Returns the defined cells back in sparse form, row-major.
    #[must_use]
    pub fn cells(&self) -> Vec<PatternCell> {
        self.cells
            .iter()
            .map(|(&(row, column), code)| PatternCell {
                row,
                column,
                code: code.as_ref().map(|c| c.value().to_string()).unwrap_or_default(),
            })
            .collect()
    }
}

fn index_to_u32(index: usize) -> Result<u32, DomainError> {
    u32::try_from(index).map_err(|_| DomainError::DateArithmeticOverflow {
        operation: format!("converting matrix index {index}"),
    })
}
