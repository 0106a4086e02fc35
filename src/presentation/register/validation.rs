//! Registration input rules
//!
//! Rules run in a fixed order and the first failure wins.

use crate::domain::errors::{TeamError, TeamResult};

pub const MIN_FOUNDED_YEAR: i32 = 1800;
pub const MAX_FOUNDED_YEAR: i32 = 2025;

pub const NAME_REQUIRED: &str = "name is required";
pub const FOUNDED_YEAR_REQUIRED: &str = "founded year is required";
pub const INVALID_YEAR: &str = "invalid year";
pub const YEAR_OUT_OF_RANGE: &str = "year out of range";
pub const TITLES_WON_REQUIRED: &str = "titles won is required";
pub const INVALID_TITLES_WON: &str = "invalid titles won";

/// Validates raw registration input
///
/// # Example
/// ```
/// use team_registry::presentation::register::validation::validate_team_input;
///
/// assert!(validate_team_input("River", "1901", "38").is_ok());
/// assert_eq!(
///     validate_team_input("", "", "").unwrap_err().to_string(),
///     "name is required"
/// );
/// ```
pub fn validate_team_input(name: &str, founded_year: &str, titles_won: &str) -> TeamResult<()> {
    if name.trim().is_empty() {
        return Err(invalid(NAME_REQUIRED));
    }

    if founded_year.trim().is_empty() {
        return Err(invalid(FOUNDED_YEAR_REQUIRED));
    }

    let year: i32 = founded_year
        .trim()
        .parse()
        .map_err(|_| invalid(INVALID_YEAR))?;

    if !(MIN_FOUNDED_YEAR..=MAX_FOUNDED_YEAR).contains(&year) {
        return Err(invalid(YEAR_OUT_OF_RANGE));
    }

    if titles_won.trim().is_empty() {
        return Err(invalid(TITLES_WON_REQUIRED));
    }

    titles_won
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid(INVALID_TITLES_WON))?;

    Ok(())
}

/// Input filter for numeric fields: empty or ASCII digits only
pub fn is_digits_only(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_digit())
}

/// Parses a numeric field, degrading to 0 when it does not parse
pub fn parse_or_zero(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}

fn invalid(message: &str) -> TeamError {
    TeamError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, year: &str, titles: &str) -> String {
        validate_team_input(name, year, titles)
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn test_valid_input_passes() {
        assert!(validate_team_input("River", "1901", "38").is_ok());
        assert!(validate_team_input("Boca", "1800", "0").is_ok());
        assert!(validate_team_input("New", "2025", "0").is_ok());
    }

    #[test]
    fn test_blank_name_wins_over_everything() {
        assert_eq!(message("", "", ""), NAME_REQUIRED);
        assert_eq!(message("   ", "abc", "x"), NAME_REQUIRED);
    }

    #[test]
    fn test_year_rules_in_order() {
        assert_eq!(message("River", " ", ""), FOUNDED_YEAR_REQUIRED);
        assert_eq!(message("River", "19a0", ""), INVALID_YEAR);
        assert_eq!(message("River", "99999999999", ""), INVALID_YEAR);
        assert_eq!(message("River", "1799", ""), YEAR_OUT_OF_RANGE);
        assert_eq!(message("River", "2026", ""), YEAR_OUT_OF_RANGE);
    }

    #[test]
    fn test_titles_rules_in_order() {
        assert_eq!(message("River", "1901", ""), TITLES_WON_REQUIRED);
        assert_eq!(message("River", "1901", "many"), INVALID_TITLES_WON);
    }

    #[test]
    fn test_validation_errors_are_validation_variant() {
        let err = validate_team_input("", "", "").unwrap_err();
        assert!(matches!(err, TeamError::Validation(_)));
    }

    #[test]
    fn test_digit_filter() {
        assert!(is_digits_only(""));
        assert!(is_digits_only("1990"));
        assert!(!is_digits_only("19a0"));
        assert!(!is_digits_only("-1"));
        assert!(!is_digits_only("١٩٩٠"));
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("38"), 38);
        assert_eq!(parse_or_zero(""), 0);
        assert_eq!(parse_or_zero("x"), 0);
    }
}
