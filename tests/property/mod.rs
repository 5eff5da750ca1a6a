//! Property test modules

pub mod consolidation;
pub mod ordering;
