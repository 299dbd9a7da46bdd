//! Password strength heuristic shown while registering

const LABELS: [&str; 5] = ["Muito fraca", "Fraca", "Média", "Forte", "Muito forte"];

/// Score in the 0-5 range plus its label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
}

impl PasswordStrength {
    pub const MAX: u8 = 5;

    /// Label for the score; an empty or trivial password has none
    #[must_use]
    pub fn label(&self) -> Option<&'static str> {
        let index = usize::from(self.score.min(Self::MAX)).checked_sub(1)?;
        LABELS.get(index).copied()
    }

    /// Fill ratio of the strength bar, 0.0 to 1.0
    #[must_use]
    pub fn ratio(&self) -> f64 {
        f64::from(self.score) / f64::from(Self::MAX)
    }
}

/// Score a password: one point each for length >= 8, length >= 12, mixed
/// case, a digit and a symbol
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength { score: 0 };
    }

    let length = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let score = [length >= 8, length >= 12, has_lower && has_upper, has_digit, has_symbol]
        .into_iter()
        .filter(|passed| *passed)
        .count();

    PasswordStrength { score: u8::try_from(score).unwrap_or(PasswordStrength::MAX) }
}
