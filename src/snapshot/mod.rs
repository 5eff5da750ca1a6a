//! Directory snapshots
//!
//! Helpers for naming, validating and walking the directory snapshots that
//! make up a consolidation run.

pub mod path;
pub mod walker;
