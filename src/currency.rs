//! Currency display formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Display convention for monetary amounts: symbol, thousands grouping, and
/// two fraction digits.
///
/// The default is the US convention (`$1,234.50`). Absent amounts render as
/// the empty string so templates can bind them directly.
#[derive(Debug, Clone)]
pub struct CurrencyFormat {
    /// Currency symbol prefix.
    pub symbol: String,
    /// Separator inserted between groups of three integer digits.
    pub thousands_sep: char,
    /// Separator between the integer and fraction parts.
    pub decimal_sep: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            thousands_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl CurrencyFormat {
    /// Create the default US-convention format.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Render an optional amount.
    ///
    /// `None` renders as `""`. Amounts are rounded half-away-from-zero to
    /// two fraction digits; negatives take a leading minus before the
    /// symbol.
    #[must_use]
    pub fn format(&self, amount: Option<Decimal>) -> String {
        let Some(amount) = amount else {
            return String::new();
        };

        let rounded =
            amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut out = String::with_capacity(text.len() + self.symbol.len() + 4);
        if rounded.is_sign_negative() && !rounded.is_zero() {
            out.push('-');
        }
        out.push_str(&self.symbol);
        push_grouped(&mut out, int_part, self.thousands_sep);
        out.push(self.decimal_sep);
        out.push_str(frac_part);
        out
    }
}

/// Append `digits` to `out`, inserting `sep` every three digits from the
/// right.
fn push_grouped(out: &mut String, digits: &str, sep: char) {
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(sep);
        }
        out.push(ch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_none_renders_empty() {
        assert_eq!(CurrencyFormat::new().format(None), "");
    }

    #[test]
    fn test_us_convention() {
        let fmt = CurrencyFormat::new();
        assert_eq!(fmt.format(Some(dec("123.45"))), "$123.45");
        assert_eq!(fmt.format(Some(dec("0"))), "$0.00");
        assert_eq!(fmt.format(Some(dec("1234.5"))), "$1,234.50");
        assert_eq!(fmt.format(Some(dec("1000000"))), "$1,000,000.00");
    }

    #[test]
    fn test_negative_amounts() {
        let fmt = CurrencyFormat::new();
        assert_eq!(fmt.format(Some(dec("-200"))), "-$200.00");
        assert_eq!(fmt.format(Some(dec("-1234.56"))), "-$1,234.56");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        let fmt = CurrencyFormat::new();
        assert_eq!(fmt.format(Some(dec("0.005"))), "$0.01");
        assert_eq!(fmt.format(Some(dec("-0.005"))), "-$0.01");
        assert_eq!(fmt.format(Some(dec("2.675"))), "$2.68");
    }

    #[test]
    fn test_custom_convention() {
        let fmt = CurrencyFormat {
            symbol: "€".to_string(),
            thousands_sep: '.',
            decimal_sep: ',',
        };
        assert_eq!(fmt.format(Some(dec("1234.5"))), "€1.234,50");
    }
}
