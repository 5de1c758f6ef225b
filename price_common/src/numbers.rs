//! Number formatting for display: money, token quantities and percentages.
//!
//! All helpers use a comma as thousands separator and a dot as decimal point
//! (`$1,234,567.89`). Values that round to zero never carry a minus sign.

/// Placeholder used for quantities the provider reports as zero or unknown.
pub const NOT_AVAILABLE: &str = "N/A";

/// Formats a USD amount with two decimals, e.g. `$67,012.35`.
///
/// Negative amounts keep the sign after the currency symbol (`$-12.50`).
pub fn format_currency(amount: f64) -> String {
    let (negative, body) = signed_fixed(amount, 2);
    if negative {
        format!("$-{}", body)
    } else {
        format!("${}", body)
    }
}

/// Formats a token quantity without decimals, e.g. `19,500,000`.
///
/// Zero means "not reported" for every provider we talk to, so it renders as `N/A`.
pub fn format_quantity(quantity: f64) -> String {
    if quantity == 0.0 {
        return NOT_AVAILABLE.to_string();
    }
    let (negative, body) = signed_fixed(quantity, 0);
    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Formats a percentage with two decimals, e.g. `5.00%` or `-3.20%`.
///
/// No thousands separators here: the formatter parses this value back to pick
/// the direction marker.
pub fn format_percent(percent: f64) -> String {
    let body = format!("{:.2}", percent.abs());
    let rounds_to_zero = body.chars().all(|c| c == '0' || c == '.');
    if percent < 0.0 && !rounds_to_zero {
        format!("-{}%", body)
    } else {
        format!("{}%", body)
    }
}

/// Inserts a comma every three digits, counting from the right.
pub fn group_thousands(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().rev().collect();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result.chars().rev().collect()
}

/// Renders `|value|` with `decimals` fractional digits and grouped integer part.
/// The returned flag is `true` only when the rounded value is non-zero and negative.
fn signed_fixed(value: f64, decimals: usize) -> (bool, String) {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let rounds_to_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let negative = value < 0.0 && !rounds_to_zero;

    let mut body = group_thousands(int_part);
    if let Some(frac) = frac_part {
        body.push('.');
        body.push_str(frac);
    }
    (negative, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands("0"), "0");
        assert_eq!(group_thousands("999"), "999");
        assert_eq!(group_thousands("1000"), "1,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn currency_has_two_decimals_and_separators() {
        assert_eq!(format_currency(67012.346), "$67,012.35");
        assert_eq!(format_currency(0.5), "$0.50");
        assert_eq!(format_currency(1_300_000_000_000.0), "$1,300,000,000,000.00");
        assert_eq!(format_currency(-1234.5), "$-1,234.50");
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn quantity_zero_is_not_available() {
        assert_eq!(format_quantity(0.0), "N/A");
        assert_eq!(format_quantity(19_500_000.4), "19,500,000");
        assert_eq!(format_quantity(21_000_000.0), "21,000,000");
    }

    #[test]
    fn percent_keeps_sign_only_when_non_zero() {
        assert_eq!(format_percent(5.0), "5.00%");
        assert_eq!(format_percent(-3.2), "-3.20%");
        assert_eq!(format_percent(-0.001), "0.00%");
        assert_eq!(format_percent(1234.567), "1234.57%");
    }
}
