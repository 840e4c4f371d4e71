//! shipnode - carrier integration core.
//!
//! Quotes shipping rates, tracks packages, computes transit times, and
//! validates addresses against two carrier APIs, with deterministic local
//! simulation whenever a carrier is unconfigured or unreachable.

#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod core;
pub mod error;
pub mod mock;
pub mod providers;
pub mod util;

pub use crate::core::pipeline::ShipNode;
pub use error::{ExitCode, Result, ShipError};
