// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The rotation scheduling engine.
//!
//! All functions here are pure: they take the current state and a command
//! and return a [`TransitionResult`] describing the new state, the store
//! writes required to reach it and the audit events to record. Nothing is
//! written until the caller persists the result.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod edit;
mod error;
mod extension;
mod generation;
mod state;
mod swap;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, create_window};
pub use command::{CellChange, Command};
pub use error::CoreError;
pub use extension::extend;
pub use generation::generate;
pub use state::{
    AssignmentMutation, CellRef, EditOutcome, ExtensionOutcome, GenerationOutcome, RejectedEdit,
    ScheduleContext, SwapOutcome, TransitionOutcome, TransitionResult, WindowState,
};
