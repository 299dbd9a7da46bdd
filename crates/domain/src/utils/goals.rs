//! Savings goal projections

use chrono::NaiveDate;

use crate::constants::DAYS_PER_MONTH;

/// Progress band used to label a goal's progress bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressTier {
    /// 100% or more
    Reached,
    /// 75% or more
    AlmostThere,
    /// 50% or more
    Halfway,
    /// 25% or more
    Progressing,
    Starting,
}

impl ProgressTier {
    /// Classify a progress percentage
    #[must_use]
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            Self::Reached
        } else if percentage >= 75.0 {
            Self::AlmostThere
        } else if percentage >= 50.0 {
            Self::Halfway
        } else if percentage >= 25.0 {
            Self::Progressing
        } else {
            Self::Starting
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Reached => "Meta Atingida!",
            Self::AlmostThere => "Quase lá!",
            Self::Halfway => "Na metade do caminho",
            Self::Progressing => "Progredindo",
            Self::Starting => "Começando",
        }
    }
}

/// Days between `today` and `deadline`; negative once the deadline passed
#[must_use]
pub fn days_remaining(deadline: NaiveDate, today: NaiveDate) -> i64 {
    (deadline - today).num_days()
}

/// Amount to contribute per month to reach the goal by its deadline
///
/// Returns `None` when the goal has no deadline or the deadline is today or
/// already past. Partial months count as a whole month, with a floor of one.
#[must_use]
pub fn monthly_contribution_needed(
    remaining: f64,
    deadline: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<f64> {
    let days = days_remaining(deadline?, today);
    if days <= 0 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)]
    let months = (days as f64 / DAYS_PER_MONTH).ceil().max(1.0);
    Some(remaining / months)
}
