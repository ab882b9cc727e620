/// Display formatting for prices and percentage changes
///
/// Pure helpers. They never fail; non-finite input renders as the "--"
/// placeholder instead.

/// Placeholder shown when a value cannot be rendered
pub const PLACEHOLDER: &str = "--";

/// Sign classification for a formatted change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Positive,
    Negative,
    Neutral,
}

/// A percentage change ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedChange {
    pub text: String,
    pub direction: ChangeDirection,
}

/// Format a price in the given currency (code matched case-insensitively).
///
/// BRL renders as `R$ 1.234,56` (dot thousands, comma decimals); every
/// other currency as `$1,234.56`. Sub-unit prices keep up to six decimal
/// places, everything else two.
pub fn format_price(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let decimals = if value.abs() < 1.0 { 6 } else { 2 };

    match currency.to_ascii_uppercase().as_str() {
        "BRL" => format!("R$ {}", grouped_fixed(value, decimals, '.', ',')),
        _ => format!("${}", grouped_fixed(value, decimals, ',', '.')),
    }
}

/// `+2.50%` / `-0.50%` with sign classification. Zero counts as positive.
pub fn format_change(value: f64) -> FormattedChange {
    if !value.is_finite() {
        return FormattedChange {
            text: PLACEHOLDER.to_string(),
            direction: ChangeDirection::Neutral,
        };
    }

    let (sign, direction) = if value >= 0.0 {
        ("+", ChangeDirection::Positive)
    } else {
        ("-", ChangeDirection::Negative)
    };

    FormattedChange {
        text: format!("{}{:.2}%", sign, value.abs()),
        direction,
    }
}

/// Fixed-point rendering with a thousands separator. Fractions longer
/// than two digits are trimmed of trailing zeros down to two.
fn grouped_fixed(value: f64, decimals: usize, thousands: char, decimal_point: char) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(thousands);
        }
        grouped.push(ch);
    }

    let mut frac = frac_part.trim_end_matches('0');
    if frac.len() < 2 {
        frac = &frac_part[..2.min(frac_part.len())];
    }

    let sign = if value < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}{}{}", sign, grouped, decimal_point, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_grouping_and_decimals() {
        assert_eq!(format_price(1234.56, "USD"), "$1,234.56");
        assert_eq!(format_price(70000.0, "usd"), "$70,000.00");
        assert_eq!(format_price(1_000_000.0, "USD"), "$1,000,000.00");
    }

    #[test]
    fn brl_uses_brazilian_separators() {
        assert_eq!(format_price(1234.56, "BRL"), "R$ 1.234,56");
        assert_eq!(format_price(385000.0, "brl"), "R$ 385.000,00");
    }

    #[test]
    fn currency_code_is_case_insensitive() {
        assert_eq!(format_price(0.5, "USD"), format_price(0.5, "usd"));
        assert_eq!(format_price(2.75, "BRL"), format_price(2.75, "brl"));
    }

    #[test]
    fn sub_unit_prices_keep_more_decimals() {
        assert_eq!(format_price(0.5, "USD"), "$0.50");
        assert_eq!(format_price(0.000123, "USD"), "$0.000123");
        assert_eq!(format_price(0.523456, "USD"), "$0.523456");
    }

    #[test]
    fn non_finite_renders_placeholder() {
        assert_eq!(format_price(f64::NAN, "USD"), PLACEHOLDER);
        assert_eq!(format_price(f64::INFINITY, "BRL"), PLACEHOLDER);
    }

    #[test]
    fn negative_values_keep_the_sign() {
        assert_eq!(format_price(-1234.5, "USD"), "$-1,234.50");
    }

    #[test]
    fn change_classification() {
        let up = format_change(2.5);
        assert_eq!(up.text, "+2.50%");
        assert_eq!(up.direction, ChangeDirection::Positive);

        let down = format_change(-0.5);
        assert_eq!(down.text, "-0.50%");
        assert_eq!(down.direction, ChangeDirection::Negative);
    }

    #[test]
    fn zero_change_counts_as_positive() {
        let flat = format_change(0.0);
        assert_eq!(flat.text, "+0.00%");
        assert_eq!(flat.direction, ChangeDirection::Positive);
    }

    #[test]
    fn non_finite_change_is_neutral() {
        let unknown = format_change(f64::NAN);
        assert_eq!(unknown.text, PLACEHOLDER);
        assert_eq!(unknown.direction, ChangeDirection::Neutral);
    }
}
