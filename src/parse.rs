use chrono::NaiveDate;

use crate::error::{FitError, Result};

pub const MIN_EXERCISE_COUNT: u8 = 1;
pub const MAX_EXERCISE_COUNT: u8 = 20;

/// Parse a CLI date in DD-MM-YY form (e.g. 31-12-25).
pub fn parse_eu_date(s: &str) -> std::result::Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s.trim(), "%d-%m-%y")
}

/// Parse an explicit exercise count for `generate`.
pub fn parse_exercise_count(s: &str) -> Result<u8> {
    let count: i64 = s.trim().parse().map_err(|_| {
        FitError::Validation(format!(
            "invalid exercise count. Must be a number between {} and {}",
            MIN_EXERCISE_COUNT, MAX_EXERCISE_COUNT
        ))
    })?;

    if count < MIN_EXERCISE_COUNT as i64 || count > MAX_EXERCISE_COUNT as i64 {
        return Err(FitError::Validation(format!(
            "exercise count must be between {} and {}, got {}",
            MIN_EXERCISE_COUNT, MAX_EXERCISE_COUNT, count
        )));
    }

    Ok(count as u8)
}

/// Accepts "100", "100kg", "82.5", "bodyweight", "-" or nothing. Unknown input is 0.
pub fn parse_weight(s: &str) -> i64 {
    let s = s.trim().to_lowercase();
    if s.is_empty() || s == "-" || s == "bodyweight" {
        return 0;
    }

    let s = s.trim_end_matches("kg").trim();
    s.parse::<i64>()
        .or_else(|_| s.parse::<f64>().map(|f| f as i64))
        .unwrap_or(0)
}

pub fn parse_int(s: &str) -> i64 {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return 0;
    }
    s.parse().unwrap_or(0)
}

/// Minutes as a float. Unlike the other fields, garbage is reported so the caller can ask again.
pub fn parse_duration(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() || s == "-" {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|d| d.is_finite() && *d >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_eu_date() {
        let date = parse_eu_date("31-12-25").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn test_parse_eu_date_rejects_iso() {
        assert!(parse_eu_date("2025-12-31").is_err());
        assert!(parse_eu_date("32-01-25").is_err());
        assert!(parse_eu_date("").is_err());
    }

    #[test]
    fn test_exercise_count_range() {
        assert_eq!(parse_exercise_count("1").unwrap(), 1);
        assert_eq!(parse_exercise_count("20").unwrap(), 20);

        for bad in ["0", "-3", "21"] {
            let err = parse_exercise_count(bad).unwrap_err();
            assert!(matches!(err, FitError::Validation(_)));
            assert!(err.to_string().contains("between 1 and 20"), "{}", err);
        }
    }

    #[test]
    fn test_exercise_count_not_a_number() {
        let err = parse_exercise_count("lots").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid exercise count. Must be a number between 1 and 20"
        );
    }

    #[test]
    fn test_parse_weight() {
        assert_eq!(parse_weight("100"), 100);
        assert_eq!(parse_weight(" 100kg "), 100);
        assert_eq!(parse_weight("82.5"), 82);
        assert_eq!(parse_weight("Bodyweight"), 0);
        assert_eq!(parse_weight("-"), 0);
        assert_eq!(parse_weight(""), 0);
        assert_eq!(parse_weight("heavy"), 0);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("12"), 12);
        assert_eq!(parse_int(" 8 "), 8);
        assert_eq!(parse_int("-"), 0);
        assert_eq!(parse_int("ten"), 0);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("1.5"), Some(1.5));
        assert_eq!(parse_duration(""), Some(0.0));
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("-2"), None);
    }
}
