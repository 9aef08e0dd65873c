//! Core types, configuration, and error handling for scamlens.
//!
//! This crate provides the shared foundation used by the other scamlens
//! crates:
//! - [`ScamlensError`], a unified error type using `thiserror`
//! - [`ScamlensConfig`], configuration loaded from `.scamlens.toml`
//! - Shared types: [`InputKind`], [`HeuristicResult`], [`OutputFormat`]

mod config;
mod error;
mod types;

pub use config::{LlmConfig, ScamlensConfig};
pub use error::ScamlensError;
pub use types::{HeuristicResult, InputKind, OutputFormat, SUSPICION_THRESHOLD};

/// A convenience `Result` type for scamlens operations.
pub type Result<T> = std::result::Result<T, ScamlensError>;
