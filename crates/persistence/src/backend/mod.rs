// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! Connection setup, migrations and the few statements Diesel DSL cannot
//! express (PRAGMA, `last_insert_rowid()`) live here. Queries and mutations
//! live in `queries/` and `mutations/`.

pub mod sqlite;
