//! # FinControl Domain
//!
//! Business domain types and models for the FinControl client.
//!
//! This crate contains:
//! - Wire types for every backend resource (categorias, despesas, receitas,
//!   metas, parametros, dashboard, auth)
//! - Domain error types and Result definitions
//! - Derived calculations shown next to server data (goal progress, password
//!   strength, pagination window, currency formatting)
//! - Client configuration (API, cache, logging)
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other FinControl crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::{ApiConfig, CacheConfig, ClientConfig, LoggingConfig};
pub use errors::*;
pub use types::*;
