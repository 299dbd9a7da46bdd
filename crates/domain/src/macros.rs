//! Macro for implementing Display and FromStr for backend enums
//!
//! The backend serializes its enums as upper-case identifiers
//! (`PENDENTE`, `EM_ANDAMENTO`). This macro generates a `Display`
//! implementation that yields the wire value and a case-insensitive
//! `FromStr`, so the same string can be used in URL paths and parsed back
//! from user input.
//!
//! # Example
//!
//! ```rust
//! use fincontrol_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Asc,
//!     Desc,
//! }
//!
//! impl_wire_enum_conversions!(Direction {
//!     Asc => "ASC",
//!     Desc => "DESC",
//! });
//!
//! assert_eq!(Direction::Asc.to_string(), "ASC");
//! assert_eq!("desc".parse::<Direction>().unwrap(), Direction::Desc);
//! ```

/// Implements `Display`, `FromStr` and `as_str` for wire enums
///
/// # Features
///
/// - Case-insensitive parsing (`"pago"`, `"PAGO"` and `"Pago"` all work)
/// - `Display` produces the exact upper-case wire value
/// - Parse failures return [`crate::errors::DomainError::InvalidEnumValue`]
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire representation used by the backend
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::errors::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err($crate::errors::DomainError::InvalidEnumValue {
                        kind: stringify!($enum_name).to_string(),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::errors::DomainError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestStatus {
        Open,
        InProgress,
        Closed,
    }

    impl_wire_enum_conversions!(TestStatus {
        Open => "OPEN",
        InProgress => "IN_PROGRESS",
        Closed => "CLOSED",
    });

    #[test]
    fn test_display_uses_wire_value() {
        assert_eq!(TestStatus::Open.to_string(), "OPEN");
        assert_eq!(TestStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(TestStatus::Closed.as_str(), "CLOSED");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestStatus::from_str("open").unwrap(), TestStatus::Open);
        assert_eq!(TestStatus::from_str("In_Progress").unwrap(), TestStatus::InProgress);
        assert_eq!(TestStatus::from_str(" CLOSED ").unwrap(), TestStatus::Closed);
    }

    #[test]
    fn test_fromstr_invalid() {
        let err = TestStatus::from_str("archived").unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidEnumValue {
                kind: "TestStatus".to_string(),
                value: "archived".to_string()
            }
        );
        assert!(TestStatus::from_str("").is_err());
    }
}
