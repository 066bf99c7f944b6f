//! Season registration checks.

use chrono::{Datelike, Days};

use crate::config::SeasonRules;
use crate::error::{Result, StatsError};
use crate::models::{Season, SeasonDraft};

#[derive(Debug, Clone, Default)]
pub struct SeasonWindowValidator {
    rules: SeasonRules,
}

impl SeasonWindowValidator {
    pub fn new(rules: SeasonRules) -> Self {
        Self { rules }
    }

    /// Check `candidate` against its own format rules and every `existing` season.
    pub fn validate(&self, candidate: &SeasonDraft, existing: &[Season]) -> Result<()> {
        self.check_period(candidate)?;

        let (start_year, end_suffix) = parse_name(&candidate.name)
            .ok_or_else(|| StatsError::rule("Season name must be in the format of 'yyyy-yy'"))?;

        if start_year != candidate.start_date.year() {
            return Err(StatsError::rule("Season name must start with the year of start date"));
        }

        let expected_suffix = (start_year.rem_euclid(100) + 1) % 100;
        if end_suffix != expected_suffix {
            return Err(StatsError::rule("Season name is not matched to the period"));
        }

        // Name and period are checked together, season by season.
        for season in existing {
            if season.name == candidate.name {
                return Err(StatsError::rule("Season name is already used"));
            }
            if strictly_inside(candidate.start_date, season) || strictly_inside(candidate.end_date, season) {
                return Err(StatsError::rule("Season period is already used"));
            }
        }

        log::debug!("season {} passed window checks", candidate.name);
        Ok(())
    }

    fn check_period(&self, candidate: &SeasonDraft) -> Result<()> {
        let span = Days::new(self.rules.max_span_days.max(0) as u64);
        // A limit past the last representable date cannot be exceeded.
        let too_long = match candidate.start_date.checked_add_days(span) {
            Some(limit) => candidate.end_date > limit,
            None => false,
        };
        if too_long {
            return Err(StatsError::rule(format!(
                "Season period must be less than or equal to {} days",
                self.rules.max_period_days()
            )));
        }
        Ok(())
    }
}

/// Split a `yyyy-yy` name into the start year and the two-digit end suffix.
fn parse_name(name: &str) -> Option<(i32, i32)> {
    let bytes = name.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return None;
    }
    let digits = |range: std::ops::Range<usize>| {
        if bytes[range.clone()].iter().all(u8::is_ascii_digit) {
            name[range].parse::<i32>().ok()
        } else {
            None
        }
    };
    Some((digits(0..4)?, digits(5..7)?))
}

/// Exclusive on both ends: touching boundaries and fully nested seasons are
/// not detected.
fn strictly_inside(date: chrono::NaiveDate, season: &Season) -> bool {
    date > season.start_date && date < season.end_date
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn draft(name: &str, start: NaiveDate, end: NaiveDate) -> SeasonDraft {
        SeasonDraft { name: name.into(), start_date: start, end_date: end }
    }

    fn existing(name: &str, start: NaiveDate, end: NaiveDate) -> Season {
        Season { id: 0, name: name.into(), start_date: start, end_date: end, current: false }
    }

    fn message(res: Result<()>) -> String {
        res.unwrap_err().to_string()
    }

    #[test]
    fn test_period_limit() {
        let validator = SeasonWindowValidator::default();
        let res = validator.validate(&draft("2023-24", date(2023, 7, 1), date(2024, 7, 1)), &[]);
        assert_eq!(message(res), "Season period must be less than or equal to 366 days");

        assert!(validator
            .validate(&draft("2023-24", date(2023, 7, 1), date(2024, 6, 30)), &[])
            .is_ok());
        // Without a leap day the limit falls on the anniversary itself.
        assert!(validator
            .validate(&draft("2021-22", date(2021, 7, 1), date(2022, 7, 1)), &[])
            .is_ok());
    }

    #[test]
    fn test_name_format() {
        let validator = SeasonWindowValidator::default();
        for name in ["2023/24", "23-24", "2023-2024", "abcd-ef", "2023-2x"] {
            let res = validator.validate(&draft(name, date(2023, 8, 1), date(2024, 5, 31)), &[]);
            assert_eq!(message(res), "Season name must be in the format of 'yyyy-yy'", "{}", name);
        }
    }

    #[test]
    fn test_name_year_must_match_start() {
        let res = SeasonWindowValidator::default()
            .validate(&draft("2022-23", date(2023, 8, 1), date(2024, 5, 31)), &[]);
        assert_eq!(message(res), "Season name must start with the year of start date");
    }

    #[test]
    fn test_name_years_must_be_consecutive() {
        let validator = SeasonWindowValidator::default();
        let res = validator.validate(&draft("2023-25", date(2023, 8, 1), date(2024, 5, 31)), &[]);
        assert_eq!(message(res), "Season name is not matched to the period");

        assert!(validator
            .validate(&draft("1999-00", date(1999, 8, 1), date(2000, 5, 31)), &[])
            .is_ok());
    }

    #[test]
    fn test_name_already_used() {
        let seasons = [existing("2023-24", date(2023, 8, 1), date(2024, 5, 31))];
        let res = SeasonWindowValidator::default()
            .validate(&draft("2023-24", date(2023, 6, 1), date(2023, 7, 31)), &seasons);
        assert_eq!(message(res), "Season name is already used");
    }

    #[test]
    fn test_overlap_is_exclusive_containment() {
        let validator = SeasonWindowValidator::default();
        let seasons = [existing("2022-23", date(2022, 8, 1), date(2023, 7, 31))];

        let res = validator.validate(&draft("2023-24", date(2023, 7, 1), date(2024, 6, 30)), &seasons);
        assert_eq!(message(res), "Season period is already used");

        // Only the end date falls inside.
        let later = [existing("2023-24", date(2023, 7, 15), date(2024, 6, 30))];
        let res = validator.validate(&draft("2022-23", date(2022, 8, 1), date(2023, 7, 31)), &later);
        assert_eq!(message(res), "Season period is already used");

        // Touching the existing end date is not an overlap.
        assert!(validator
            .validate(&draft("2023-24", date(2023, 7, 31), date(2024, 6, 30)), &seasons)
            .is_ok());
    }

    #[test]
    fn test_unrepresentable_limit_never_trips() {
        let validator = SeasonWindowValidator::new(SeasonRules { max_span_days: i64::MAX });
        assert!(validator
            .validate(&draft("2023-24", date(2023, 7, 1), date(2024, 12, 31)), &[])
            .is_ok());
    }

    #[test]
    fn test_nested_existing_season_is_not_detected() {
        let seasons = [existing("2021-22", date(2022, 9, 1), date(2022, 12, 31))];
        assert!(SeasonWindowValidator::default()
            .validate(&draft("2022-23", date(2022, 8, 1), date(2023, 5, 31)), &seasons)
            .is_ok());
    }
}
