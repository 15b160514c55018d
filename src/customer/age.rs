//! Age in completed years from a `DD/MM/YYYY` date of birth
//!
//! The reference date is always passed in. Nothing here reads the clock,
//! so the same inputs give the same age on every call.

use chrono::{Datelike, NaiveDate};

use crate::error::{QuoteError, Result};

/// Parse a `DD/MM/YYYY` string into a calendar date
///
/// Rejects anything that is not exactly two digits, slash, two digits,
/// slash, four digits, and anything that is not a real date (31/02/2000).
pub fn parse_date_of_birth(dob: &str) -> Result<NaiveDate> {
    let invalid = || QuoteError::InvalidDateOfBirth(dob.to_string());

    let bytes = dob.as_bytes();
    if bytes.len() != 10 || bytes[2] != b'/' || bytes[5] != b'/' {
        return Err(invalid());
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2 && *i != 5)
        .all(|(_, b)| b.is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }

    let day: u32 = dob[0..2].parse().map_err(|_| invalid())?;
    let month: u32 = dob[3..5].parse().map_err(|_| invalid())?;
    let year: i32 = dob[6..10].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

/// Age in completed years at `reference`, clamped at 0
///
/// `age = ref_year - birth_year`, less one when the reference month/day
/// falls before the birth month/day.
pub fn calculate_age(dob: &str, reference: NaiveDate) -> Result<u32> {
    let birth = parse_date_of_birth(dob)?;
    Ok(age_between(birth, reference))
}

pub(crate) fn age_between(birth: NaiveDate, reference: NaiveDate) -> u32 {
    let mut age = reference.year() - birth.year();
    if (reference.month(), reference.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    #[test]
    fn test_birthday_boundaries() {
        // Birthday already passed this year
        assert_eq!(calculate_age("14/06/1995", reference()), Ok(30));
        // Birthday is today
        assert_eq!(calculate_age("15/06/1995", reference()), Ok(30));
        // Birthday tomorrow
        assert_eq!(calculate_age("16/06/1995", reference()), Ok(29));
        // Later month, earlier day still counts as not yet reached
        assert_eq!(calculate_age("01/07/1995", reference()), Ok(29));
    }

    #[test]
    fn test_future_birth_clamps_to_zero() {
        assert_eq!(calculate_age("01/01/2030", reference()), Ok(0));
    }

    #[test]
    fn test_age_is_stable_across_calls() {
        let first = calculate_age("29/02/2000", reference());
        for _ in 0..5 {
            assert_eq!(calculate_age("29/02/2000", reference()), first);
        }
        assert_eq!(first, Ok(25));
    }

    #[test]
    fn test_rejects_bad_patterns() {
        for dob in ["1/6/1995", "1995-06-01", "01/06/95", "ab/cd/efgh", "", "01/06/1995 "] {
            assert_eq!(
                calculate_age(dob, reference()),
                Err(QuoteError::InvalidDateOfBirth(dob.to_string())),
                "{dob:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(calculate_age("31/02/2000", reference()).is_err());
        assert!(calculate_age("29/02/2001", reference()).is_err());
        assert!(calculate_age("00/01/2000", reference()).is_err());
        assert!(calculate_age("10/13/2000", reference()).is_err());
    }
}
