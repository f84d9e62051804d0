use rust_decimal::{Decimal, RoundingStrategy};

// ============================================================================
// Currency Display
// ============================================================================
//
// The order core stores raw decimals; this is only for rendering.
//
// ============================================================================

/// Render an amount as US dollars with two decimals, e.g. `$7.25` or `-$0.50`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_pads_to_cents() {
        assert_eq!(format_currency(dec!(0)), "$0.00");
        assert_eq!(format_currency(dec!(5)), "$5.00");
        assert_eq!(format_currency(dec!(7.5)), "$7.50");
    }

    #[test]
    fn test_format_rounds_half_away_from_zero() {
        assert_eq!(format_currency(dec!(0.585)), "$0.59");
        assert_eq!(format_currency(dec!(15.0800)), "$15.08");
        assert_eq!(format_currency(dec!(1.004)), "$1.00");
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(format_currency(dec!(-0.5)), "-$0.50");
        assert_eq!(format_currency(dec!(-0.001)), "$0.00");
    }
}
