// Field Validators - Reusable validation components
//
// Messages are the Portuguese strings shown next to form fields. Each
// validator builds a default message from its label; `.message(..)` replaces
// the message of the rule added last.
use std::fmt::Display;

use once_cell::sync::Lazy;

/// Trait for field validators
pub trait FieldValidator<T: ?Sized> {
    /// Validate a field value, returning the user-facing message on failure
    fn validate(&self, value: &T) -> Result<(), String>;
}

#[derive(Debug, Clone)]
enum StringRule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Pattern(regex::Regex),
}

/// String validator with length and pattern constraints
#[derive(Debug, Clone)]
pub struct StringValidator {
    label: String,
    rules: Vec<(StringRule, Option<String>)>,
    trim: bool,
}

impl Default for StringValidator {
    fn default() -> Self {
        Self::new("Valor")
    }
}

impl StringValidator {
    /// Create a new string validator; `label` prefixes default messages
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), rules: Vec::new(), trim: false }
    }

    /// Require non-empty string
    #[must_use]
    pub fn not_empty(mut self) -> Self {
        self.rules.push((StringRule::Required, None));
        self
    }

    /// Set minimum length (in characters)
    #[must_use]
    pub fn min_length(mut self, min: usize) -> Self {
        self.rules.push((StringRule::MinLength(min), None));
        self
    }

    /// Set maximum length (in characters)
    #[must_use]
    pub fn max_length(mut self, max: usize) -> Self {
        self.rules.push((StringRule::MaxLength(max), None));
        self
    }

    /// Set pattern to match
    ///
    /// # Errors
    /// Returns the regex compilation error for an invalid pattern
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.rules.push((StringRule::Pattern(regex::Regex::new(pattern)?), None));
        Ok(self)
    }

    /// Replace the message of the most recently added rule
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.1 = Some(message.into());
        }
        self
    }

    /// Set whether to trim before validation
    #[must_use]
    pub const fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    fn default_message(&self, rule: &StringRule) -> String {
        match rule {
            StringRule::Required => format!("{} é obrigatório", self.label),
            StringRule::MinLength(min) => {
                format!("{} deve ter no mínimo {} caracteres", self.label, min)
            }
            StringRule::MaxLength(max) => {
                format!("{} deve ter no máximo {} caracteres", self.label, max)
            }
            StringRule::Pattern(_) => format!("{} possui formato inválido", self.label),
        }
    }
}

impl FieldValidator<str> for StringValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let val = if self.trim { value.trim() } else { value };
        let length = val.chars().count();

        for (rule, message) in &self.rules {
            let passed = match rule {
                StringRule::Required => !val.is_empty(),
                StringRule::MinLength(min) => length >= *min,
                StringRule::MaxLength(max) => length <= *max,
                StringRule::Pattern(pattern) => pattern.is_match(val),
            };

            if !passed {
                return Err(message.clone().unwrap_or_else(|| self.default_message(rule)));
            }
        }

        Ok(())
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

#[derive(Debug, Clone)]
enum RangeRule<T> {
    AtLeast(T),
    GreaterThan(T),
    AtMost(T),
}

/// Range validator for numeric types
#[derive(Debug, Clone)]
pub struct RangeValidator<T> {
    label: String,
    rules: Vec<(RangeRule<T>, Option<String>)>,
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), rules: Vec::new() }
    }

    /// Set inclusive minimum value
    #[must_use]
    pub fn min(mut self, min: T) -> Self {
        self.rules.push((RangeRule::AtLeast(min), None));
        self
    }

    /// Set exclusive minimum value
    #[must_use]
    pub fn greater_than(mut self, bound: T) -> Self {
        self.rules.push((RangeRule::GreaterThan(bound), None));
        self
    }

    /// Set inclusive maximum value
    #[must_use]
    pub fn max(mut self, max: T) -> Self {
        self.rules.push((RangeRule::AtMost(max), None));
        self
    }

    /// Replace the message of the most recently added rule
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(rule) = self.rules.last_mut() {
            rule.1 = Some(message.into());
        }
        self
    }

    fn default_message(&self, rule: &RangeRule<T>) -> String {
        match rule {
            RangeRule::AtLeast(min) => format!("{} deve ser no mínimo {}", self.label, min),
            RangeRule::GreaterThan(bound) => format!("{} deve ser maior que {}", self.label, bound),
            RangeRule::AtMost(max) => format!("{} deve ser no máximo {}", self.label, max),
        }
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        for (rule, message) in &self.rules {
            let passed = match rule {
                RangeRule::AtLeast(min) => value >= min,
                RangeRule::GreaterThan(bound) => value > bound,
                RangeRule::AtMost(max) => value <= max,
            };

            if !passed {
                return Err(message.clone().unwrap_or_else(|| self.default_message(rule)));
            }
        }

        Ok(())
    }
}

static EMAIL_REGEX: Lazy<Option<regex::Regex>> = Lazy::new(|| {
    regex::Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok()
});

/// Email validator
#[derive(Debug, Clone, Default)]
pub struct EmailValidator;

impl EmailValidator {
    /// Create a new email validator
    pub const fn new() -> Self {
        Self
    }
}

impl FieldValidator<str> for EmailValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        match EMAIL_REGEX.as_ref() {
            Some(regex) if regex.is_match(value) => Ok(()),
            _ => Err("Email inválido".to_string()),
        }
    }
}

impl FieldValidator<String> for EmailValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}

/// URL validator
#[derive(Debug, Clone)]
pub struct UrlValidator {
    require_https: bool,
    allowed_schemes: Vec<String>,
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl UrlValidator {
    /// Create a new URL validator accepting http and https
    pub fn new() -> Self {
        Self {
            require_https: false,
            allowed_schemes: vec!["http".to_string(), "https".to_string()],
        }
    }

    /// Require HTTPS
    #[must_use]
    pub const fn require_https(mut self) -> Self {
        self.require_https = true;
        self
    }
}

impl FieldValidator<str> for UrlValidator {
    fn validate(&self, value: &str) -> Result<(), String> {
        let parsed = url::Url::parse(value).map_err(|_| "URL inválida".to_string())?;
        let scheme = parsed.scheme();

        if self.require_https && scheme != "https" {
            return Err("URL deve usar HTTPS".to_string());
        }

        if !self.allowed_schemes.iter().any(|allowed| allowed == scheme) {
            return Err("URL inválida".to_string());
        }

        Ok(())
    }
}

impl FieldValidator<String> for UrlValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        FieldValidator::<str>::validate(self, value.as_str())
    }
}
