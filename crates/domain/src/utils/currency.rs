//! Brazilian real formatting and parsing

/// Format a number with `.` thousands and `,` decimal separators
///
/// # Examples
///
/// ```
/// use fincontrol_domain::utils::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1.234.567,89");
/// assert_eq!(format_number(-0.5, 1), "-0,5");
/// ```
#[must_use]
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return format_number(0.0, decimals);
    }

    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{fraction}")
    }
}

/// Format an amount as BRL, e.g. `R$ 1.234,56`
///
/// Non-finite values are shown as zero.
#[must_use]
pub fn format_currency(value: f64) -> String {
    let number = format_number(value, 2);
    match number.strip_prefix('-') {
        Some(positive) => format!("-R$ {positive}"),
        None => format!("R$ {number}"),
    }
}

/// Parse a user-typed BRL amount; unparsable input yields zero
///
/// When a comma is present it is the decimal separator and dots are
/// thousands separators (`R$ 1.234,56`); otherwise a dot is the decimal
/// separator (`1234.56`).
#[must_use]
pub fn parse_currency(formatted: &str) -> f64 {
    let cleaned: String = formatted
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();

    let normalized =
        if cleaned.contains(',') { cleaned.replace('.', "").replace(',', ".") } else { cleaned };

    normalized.parse::<f64>().unwrap_or(0.0)
}

/// Percentage change from `previous` to `current`
///
/// A zero baseline yields 100 when the value grew and 0 otherwise.
#[must_use]
pub fn calculate_variation(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current > 0.0 { 100.0 } else { 0.0 };
    }
    ((current - previous) / previous.abs()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "R$ 0,00");
        assert_eq!(format_currency(1234.5), "R$ 1.234,50");
        assert_eq!(format_currency(999.999), "R$ 1.000,00");
        assert_eq!(format_currency(-45.1), "-R$ 45,10");
        assert_eq!(format_currency(f64::NAN), "R$ 0,00");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001), "R$ 0,00");
    }

    #[test]
    fn test_parse_currency() {
        assert!((parse_currency("R$ 1.234,56") - 1234.56).abs() < 1e-9);
        assert!((parse_currency("1234.56") - 1234.56).abs() < 1e-9);
        assert!((parse_currency("-R$ 10,00") + 10.0).abs() < 1e-9);
        assert!(parse_currency("").abs() < f64::EPSILON);
        assert!(parse_currency("abc").abs() < f64::EPSILON);
    }

    #[test]
    fn test_calculate_variation() {
        assert!((calculate_variation(150.0, 100.0) - 50.0).abs() < 1e-9);
        assert!((calculate_variation(50.0, 100.0) + 50.0).abs() < 1e-9);
        assert!((calculate_variation(50.0, -100.0) - 150.0).abs() < 1e-9);
        assert!((calculate_variation(10.0, 0.0) - 100.0).abs() < 1e-9);
        assert!(calculate_variation(0.0, 0.0).abs() < f64::EPSILON);
    }
}
