//! VND amounts and rounding

/// Amount in whole Vietnamese dong
pub type Vnd = u64;

const THOUSAND: Vnd = 1_000;

/// Round to the nearest dong, then down to a multiple of 1,000
///
/// Negative and non-finite amounts are 0.
pub fn round_down_thousand(amount: f64) -> Vnd {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    let rounded = amount.round() as Vnd;
    rounded / THOUSAND * THOUSAND
}

/// Round to the nearest dong, then up to a multiple of 1,000
pub fn round_up_thousand(amount: f64) -> Vnd {
    if !amount.is_finite() || amount <= 0.0 {
        return 0;
    }
    let rounded = amount.round() as Vnd;
    rounded.div_ceil(THOUSAND) * THOUSAND
}

/// `amount / 1000 * rate`, rounded the standard way
pub fn per_mille(amount: Vnd, rate: f64) -> Vnd {
    round_down_thousand(amount as f64 / 1000.0 * rate)
}

/// Group thousands with dots: `12345000` -> `12.345.000`
pub fn format_vnd(amount: Vnd) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

pub fn format_vnd_with_unit(amount: Vnd) -> String {
    format!("{} VNĐ", format_vnd(amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_down_thousand() {
        assert_eq!(round_down_thousand(1_500.0), 1_000);
        assert_eq!(round_down_thousand(999.4), 0);
        // nearest dong first
        assert_eq!(round_down_thousand(1_999.6), 2_000);
        assert_eq!(round_down_thousand(11_862_000.0), 11_862_000);
        assert_eq!(round_down_thousand(-5_000.0), 0);
        assert_eq!(round_down_thousand(f64::NAN), 0);
    }

    #[test]
    fn test_round_up_thousand() {
        assert_eq!(round_up_thousand(1_001.0), 2_000);
        assert_eq!(round_up_thousand(2_000.0), 2_000);
        assert_eq!(round_up_thousand(0.0), 0);
    }

    #[test]
    fn test_per_mille() {
        assert_eq!(per_mille(300_000_000, 39.54), 11_862_000);
        assert_eq!(per_mille(0, 39.54), 0);
    }

    #[test]
    fn test_format_vnd() {
        assert_eq!(format_vnd(0), "0");
        assert_eq!(format_vnd(999), "999");
        assert_eq!(format_vnd(1_000), "1.000");
        assert_eq!(format_vnd(12_345_000), "12.345.000");
        assert_eq!(format_vnd(100_000_000), "100.000.000");
        assert_eq!(format_vnd_with_unit(1_500_000), "1.500.000 VNĐ");
    }
}
