use chrono::NaiveDate;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::models::{AvailabilitySlot, RequiredSkills, SkillId};

/// Format accepted for requested dates
pub const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Check that an instructor teaches every required skill
///
/// This is the first hard constraint of the eligibility gate.
#[inline]
pub fn covers_skills(required: &RequiredSkills, skills: &BTreeSet<SkillId>) -> bool {
    required.is_covered_by(skills)
}

/// Reasons a requested date is rejected
#[derive(Debug, Error)]
pub enum RequestDateError {
    #[error("Requested date {0:?} contains characters other than digits and '-'")]
    UnexpectedCharacter(String),

    #[error("Requested date does not match %Y-%m-%d: {0}")]
    Format(#[from] chrono::ParseError),
}

/// Parse a requested date in `YYYY-MM-DD` form
///
/// Only ASCII digits and `-` are allowed, so padding and signs are rejected.
/// Unpadded fields such as `2024-1-5` are accepted.
pub fn parse_request_date(raw: &str) -> Result<NaiveDate, RequestDateError> {
    if !raw.bytes().all(|b| b.is_ascii_digit() || b == b'-') {
        return Err(RequestDateError::UnexpectedCharacter(raw.to_string()));
    }
    Ok(NaiveDate::parse_from_str(raw, REQUEST_DATE_FORMAT)?)
}

/// Full English weekday name of a date, e.g. "Monday"
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

/// Check that at least one availability slot falls on `weekday`
///
/// The comparison is an exact, case-sensitive match on the day name.
/// Start and end times are not considered.
#[inline]
pub fn is_available_on(availability: &[AvailabilitySlot], weekday: &str) -> bool {
    availability.iter().any(|slot| slot.day == weekday)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn slot(day: &str) -> AvailabilitySlot {
        AvailabilitySlot {
            day: day.to_string(),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_covers_skills() {
        let required = RequiredSkills::parse("1,2").unwrap();

        assert!(covers_skills(&required, &BTreeSet::from([1, 2, 3])));
        assert!(!covers_skills(&required, &BTreeSet::from([1, 3])));
        assert!(!covers_skills(&required, &BTreeSet::new()));
    }

    #[test]
    fn test_weekday_name() {
        let date = parse_request_date("2024-01-15").unwrap();
        assert_eq!(weekday_name(date), "Monday");
    }

    #[test]
    fn test_parse_request_date_rejects_other_formats() {
        assert!(parse_request_date("15/01/2024").is_err());
        assert!(parse_request_date("2024-02-30").is_err());
        assert!(parse_request_date("").is_err());
    }

    #[test]
    fn test_parse_request_date_rejects_padding_and_signs() {
        for raw in [" 2024-01-15", "+2024-01-15", "2024- 01-15", "2024-01-15 "] {
            assert!(
                matches!(parse_request_date(raw), Err(RequestDateError::UnexpectedCharacter(_))),
                "{:?} should be rejected",
                raw
            );
        }

        let date = parse_request_date("2024-1-5").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn test_availability_is_case_sensitive() {
        let availability = vec![slot("monday"), slot("Tuesday")];

        assert!(is_available_on(&availability, "Tuesday"));
        assert!(!is_available_on(&availability, "Monday"));
        assert!(!is_available_on(&[], "Monday"));
    }
}
