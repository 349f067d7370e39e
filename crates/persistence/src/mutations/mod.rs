// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `audit` — audit event persistence
//! - `directory` — brigade, employee and guard-calendar seeding
//! - `commit` — atomic application of workflow outcomes

pub mod audit;
pub mod commit;
pub mod directory;

pub use commit::{CommitReceipt, commit_outcome};
