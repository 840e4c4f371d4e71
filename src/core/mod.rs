//! Core carrier-integration logic.
//!
//! Contains the shared internal model, credential resolution, token
//! caching, mode resolution, the request pipeline, and the pure helpers
//! (business-day arithmetic, result selection) used by both the live and
//! mock paths.

pub mod busday;
pub mod carrier;
pub mod config;
pub mod events;
pub mod http;
pub mod logging;
pub mod mode;
pub mod models;
pub mod pipeline;
pub mod selector;
pub mod token;
pub mod validate;
