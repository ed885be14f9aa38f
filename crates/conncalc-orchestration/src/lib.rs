//! # conncalc-orchestration
//!
//! Single and multi-method dispatch over the metric registry: resolves
//! requested method tokens, fans computations out over the worker pool,
//! and collects tagged, ordered results with per-method timings.

pub mod interfaces;
pub mod orchestrator;

pub use interfaces::{into_networks, MethodResult};
pub use orchestrator::{calculate, calculate_all};
