//! Small shared utilities.

pub mod env;
pub mod format;
