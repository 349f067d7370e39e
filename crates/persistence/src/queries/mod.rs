// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.
//!
//! All queries use Diesel DSL and return domain values; rows that fail to
//! parse are reported as `PersistenceError::ReconstructionError`.

pub mod audit;
pub mod directory;
pub mod ledger;
pub mod requests;
