//! Reverse lookups between premium and sum insured for direct-input products

use crate::tables::SumInsuredBands;

use super::money::{round_down_thousand, round_up_thousand, Vnd};

/// Allowed sum insured range for an annual base premium at an issue age
///
/// `None` when the age is outside every band.
pub fn sum_insured_range(bands: &SumInsuredBands, age: u32, annual_premium: Vnd) -> Option<(Vnd, Vnd)> {
    let (min_factor, max_factor) = bands.factors(age)?;
    let premium = annual_premium as f64;
    Some((round_up_thousand(premium * min_factor), round_down_thousand(premium * max_factor)))
}

/// Annual base premium range that supports a sum insured at an issue age
pub fn premium_range_for_sum_insured(bands: &SumInsuredBands, age: u32, stbh: Vnd) -> Option<(Vnd, Vnd)> {
    let (min_factor, max_factor) = bands.factors(age)?;
    let stbh = stbh as f64;
    Some((round_up_thousand(stbh / max_factor), round_down_thousand(stbh / min_factor)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_insured_range() {
        let bands = SumInsuredBands::standard();
        // age 35: 25x to 70x
        assert_eq!(
            sum_insured_range(&bands, 35, 20_000_000),
            Some((500_000_000, 1_400_000_000))
        );
        assert_eq!(sum_insured_range(&bands, 80, 20_000_000), None);
    }

    #[test]
    fn test_premium_range_inverts_sum_insured_range() {
        let bands = SumInsuredBands::standard();
        let (low, high) = premium_range_for_sum_insured(&bands, 35, 1_000_000_000).unwrap();
        // 1e9 / 70 = 14,285,714.3 -> up; 1e9 / 25 = 40,000,000
        assert_eq!(low, 14_286_000);
        assert_eq!(high, 40_000_000);

        for premium in [low, high] {
            let (min_si, max_si) = sum_insured_range(&bands, 35, premium).unwrap();
            assert!(min_si <= 1_000_000_000 && 1_000_000_000 <= max_si);
        }
    }
}
