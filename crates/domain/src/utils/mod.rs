//! Pure helpers derived from server data
//!
//! Nothing in here performs I/O; every function is deterministic given its
//! inputs (dates are passed in rather than read from the clock).

pub mod currency;
pub mod goals;
pub mod pagination;
pub mod parametros;
pub mod password;

pub use currency::{calculate_variation, format_currency, format_number, parse_currency};
pub use goals::{days_remaining, monthly_contribution_needed, ProgressTier};
pub use pagination::{page_window, PageItem};
pub use parametros::{format_parametro_value, validate_json};
pub use password::{password_strength, PasswordStrength};
