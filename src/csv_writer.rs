//! Field formatting for CSV exports.

/// Render an amount as a plain decimal: no currency symbol, no thousands
/// separator, and at least one fractional digit (`10.0`, `15.5`, `1234.56`).
pub fn format_amount(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_have_no_separators() {
        assert_eq!(format_amount(10.0), "10.0");
        assert_eq!(format_amount(15.5), "15.5");
        assert_eq!(format_amount(1234567.89), "1234567.89");
        assert_eq!(format_amount(0.0), "0.0");
    }

    #[test]
    fn sub_cent_amounts_keep_full_precision() {
        assert_eq!(format_amount(0.012), "0.012");
        assert_eq!(format_amount(1.125), "1.125");
    }
}
