//! # FinControl Infrastructure
//!
//! Everything that talks to the outside world.
//!
//! This crate contains:
//! - The authenticated HTTP client with single-flight token refresh
//! - Typed services for every backend resource
//! - The query cache shared by those services
//! - Configuration loading (environment, TOML and JSON files)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Depends on `fincontrol-domain` for wire types and configuration
//! - Depends on `fincontrol-common` for credential storage and token helpers
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod cache;
pub mod config;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{
    AuthService, CategoriaService, DashboardService, DespesaService, MetaService,
    ParametroService, ReceitaService, ServiceContext,
};
pub use cache::{QueryCache, QueryKey};
pub use config::{ConfigError, ConfigResult};
pub use http::*;
pub use observability::{init_tracing, ObservabilityError};
