//! Human-readable market overview rendered from a `Summary`.
use std::fmt::Write;

use crate::numbers::NOT_AVAILABLE;
use crate::summary::Summary;

/// Header placeholder when the provider did not report a token name.
pub const FALLBACK_NAME: &str = "Token";

/// Renders the overview message.
///
/// Price and footer are always present; every other line appears only when the
/// corresponding field is present and non-empty.
pub fn render(summary: &Summary) -> String {
    let mut out = String::new();

    let name = non_empty(&summary.name).unwrap_or(FALLBACK_NAME);
    let _ = writeln!(out, "💰 **{} Price & Market Overview**", name);

    let price = non_empty(&summary.price_usd).unwrap_or(NOT_AVAILABLE);
    let _ = writeln!(out, "- **Price (USD):** {}", price);

    if let Some(change) = non_empty(&summary.change_24h) {
        out.push_str(&change_line(change));
    }
    if let Some(market_cap) = non_empty(&summary.market_cap) {
        let _ = writeln!(out, "- **Market Cap:** {}", market_cap);
    }
    if let Some(volume) = non_empty(&summary.volume_24h) {
        let _ = writeln!(out, "- **24h Volume:** {}", volume);
    }
    if let Some(fdv) = non_empty(&summary.fdv) {
        let _ = writeln!(out, "- **Fully Diluted Value (FDV):** {}", fdv);
    }
    if let Some(supply) = non_empty(&summary.circulating_supply).filter(|s| *s != NOT_AVAILABLE) {
        let _ = writeln!(out, "- **Circulating Supply:** {}", supply);
    }

    let source = summary.source.as_deref().unwrap_or_default().to_uppercase();
    let _ = write!(out, "\n*(Data provided by {})*", source);
    out
}

/// 24h change line with a direction marker picked from the sign.
///
/// A value that does not parse as a number is printed verbatim without a marker.
fn change_line(change: &str) -> String {
    match change.trim_end_matches('%').trim().parse::<f64>() {
        Ok(value) if value >= 0.0 => {
            let sign = if change.starts_with('+') { "" } else { "+" };
            format!("- **24h Change:** **🟢 {}{}**\n", sign, change)
        }
        Ok(_) => format!("- **24h Change:** **🔴 {}**\n", change),
        Err(_) => format!("- **24h Change:** {}\n", change),
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary_with_change(change: &str) -> Summary {
        Summary {
            source: Some("coinmarketcap".into()),
            price_usd: Some("$1.00".into()),
            change_24h: Some(change.into()),
            ..Default::default()
        }
    }

    #[test]
    fn renders_full_template() {
        let summary = Summary::parse(
            "token_source:coingecko;name:Bitcoin;current_price_usd:$67,012.35;24h_change:5.00%;market_cap_usd:$1,300,000,000.00;volume_24h:$30,000.00;fdv:$1,400,000,000.00;circulating_supply:19,500,000",
        );
        let expected = "💰 **Bitcoin Price & Market Overview**\n\
            - **Price (USD):** $67,012.35\n\
            - **24h Change:** **🟢 +5.00%**\n\
            - **Market Cap:** $1,300,000,000.00\n\
            - **24h Volume:** $30,000.00\n\
            - **Fully Diluted Value (FDV):** $1,400,000,000.00\n\
            - **Circulating Supply:** 19,500,000\n\
            \n\
            *(Data provided by COINGECKO)*";
        assert_eq!(render(&summary), expected);
    }

    #[test]
    fn positive_change_gets_green_marker_and_plus() {
        let out = render(&summary_with_change("5.00%"));
        assert!(out.contains("- **24h Change:** **🟢 +5.00%**\n"));
    }

    #[test]
    fn explicit_plus_is_not_duplicated() {
        let out = render(&summary_with_change("+5.00%"));
        assert!(out.contains("**🟢 +5.00%**"));
        assert!(!out.contains("++"));
    }

    #[test]
    fn negative_change_gets_red_marker() {
        let out = render(&summary_with_change("-3.20%"));
        assert!(out.contains("- **24h Change:** **🔴 -3.20%**\n"));
        assert!(!out.contains("+-"));
    }

    #[test]
    fn empty_change_emits_no_line() {
        let out = render(&summary_with_change(""));
        assert!(!out.contains("24h Change"));
    }

    #[test]
    fn unparseable_change_is_printed_raw() {
        let out = render(&summary_with_change("abc%"));
        assert!(out.contains("- **24h Change:** abc%\n"));
        assert!(!out.contains('🟢'));
        assert!(!out.contains('🔴'));
    }

    #[test]
    fn missing_fields_fall_back() {
        let out = render(&Summary::default());
        assert_eq!(
            out,
            "💰 **Token Price & Market Overview**\n- **Price (USD):** N/A\n\n*(Data provided by )*"
        );
    }

    #[test]
    fn optional_lines_skip_empty_and_na_values() {
        let summary = Summary::parse(
            "token_source:coinmarketcap;current_price_usd:$2.00;market_cap_usd:;circulating_supply:N/A;volume_24h:$5.00",
        );
        let out = render(&summary);
        assert!(!out.contains("Market Cap"));
        assert!(!out.contains("Circulating Supply"));
        assert!(out.contains("- **24h Volume:** $5.00\n"));
        assert!(!out.contains("FDV"));
    }

    #[test]
    fn each_present_field_renders_exactly_once() {
        let summary = Summary::parse(
            "token_source:dexscreener;current_price_usd:$0.01;volume_24h:$1.00;fdv:$2.00;fdv:$3.00",
        );
        let out = render(&summary);
        assert_eq!(out.matches("FDV").count(), 1);
        assert!(out.contains("(FDV):** $3.00"));
        assert_eq!(out.matches("24h Volume").count(), 1);
        assert!(out.ends_with("*(Data provided by DEXSCREENER)*"));
    }
}
