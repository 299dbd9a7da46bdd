//! Application constants
//!
//! Centralized location for domain-level constants shared by the client
//! crates.

// Backend defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const LOGIN_PATH: &str = "/login";
pub const REFRESH_PATH: &str = "/auth/refresh";

// Credential storage keys
pub const ACCESS_TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

// Pagination defaults
pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_PAGINATION_WINDOW: u32 = 5;

// Dashboard defaults
pub const DEFAULT_EVOLUTION_MONTHS: u32 = 6;
pub const DEFAULT_TOP_CATEGORIES: u32 = 5;

// Goal projections
pub const DAYS_PER_MONTH: f64 = 30.0;

// Form limits
pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_NOTES_LENGTH: usize = 500;
pub const MAX_NAME_LENGTH: usize = 100;
