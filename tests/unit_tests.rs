// Unit tests for Skill Match

use skill_match::core::{
    distance::{distance_between, haversine_distance, Distance, EARTH_RADIUS_KM},
    eligibility::{covers_skills, is_available_on, parse_request_date, weekday_name},
    scoring::{proximity_score, Eligibility, IneligibleReason},
    Matcher,
};
use skill_match::models::{AvailabilitySlot, GeoPoint, Instructor, LessonRequest, RequiredSkills};
use skill_match::services::RosterSnapshot;
use chrono::NaiveTime;
use std::collections::BTreeSet;

const MANILA: (f64, f64) = (14.5995, 120.9842);
const NEARBY: (f64, f64) = (14.6760, 121.0437);

fn slot(day: &str, start: u32, end: u32) -> AvailabilitySlot {
    AvailabilitySlot {
        day: day.to_string(),
        start_time: NaiveTime::from_hms_opt(start, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(end, 0, 0).unwrap(),
    }
}

fn instructor_at(id: i64, location: Option<(f64, f64)>) -> Instructor {
    Instructor {
        user_id: id,
        user_name: format!("instructor{}", id),
        teaching_level: None,
        latitude: location.map(|(lat, _)| lat),
        longitude: location.map(|(_, lon)| lon),
    }
}

fn request_at(skills: &str, date: &str, location: Option<(f64, f64)>) -> LessonRequest {
    LessonRequest {
        request_id: Some(1),
        requester_id: 500,
        required_skills: skills.to_string(),
        requested_date: date.to_string(),
        latitude: location.map(|(lat, _)| lat),
        longitude: location.map(|(_, lon)| lon),
    }
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(MANILA.0, MANILA.1, MANILA.0, MANILA.1);
    assert_eq!(distance, 0.0);
}

#[test]
fn test_haversine_distance_is_symmetric() {
    let there = haversine_distance(MANILA.0, MANILA.1, NEARBY.0, NEARBY.1);
    let back = haversine_distance(NEARBY.0, NEARBY.1, MANILA.0, MANILA.1);
    assert!((there - back).abs() < 1e-9);
}

#[test]
fn test_haversine_distance_manila_nearby() {
    let distance = haversine_distance(MANILA.0, MANILA.1, NEARBY.0, NEARBY.1);
    assert!(distance > 5.0 && distance < 15.0, "Expected ~10.5km, got {}", distance);
}

#[test]
fn test_haversine_distance_manila_fifty_km() {
    // Due north of Manila by 50 km of arc
    let delta_deg = (50.0 / EARTH_RADIUS_KM).to_degrees();
    let distance = haversine_distance(MANILA.0, MANILA.1, MANILA.0 + delta_deg, MANILA.1);
    assert!((distance - 50.0).abs() / 50.0 < 0.001, "Expected ~50km, got {}", distance);
}

#[test]
fn test_distance_between_missing_component() {
    let manila = GeoPoint::from_parts(Some(MANILA.0), Some(MANILA.1));
    let half = GeoPoint::from_parts(Some(NEARBY.0), None);

    assert_eq!(distance_between(manila, half), Distance::Unknown);
    assert!(distance_between(half, manila).km().is_infinite());
}

#[test]
fn test_skill_coverage() {
    let required = RequiredSkills::parse("2,3").unwrap();

    assert!(covers_skills(&required, &BTreeSet::from([1, 2, 3])));
    assert!(!covers_skills(&required, &BTreeSet::from([2])));
}

#[test]
fn test_availability_ignores_time_window() {
    let date = parse_request_date("2024-01-17").unwrap();
    let weekday = weekday_name(date);
    assert_eq!(weekday, "Wednesday");

    // A late-night slot still counts: only the day is checked
    assert!(is_available_on(&[slot("Wednesday", 22, 23)], &weekday));
    assert!(!is_available_on(&[slot("WEDNESDAY", 9, 17)], &weekday));
}

#[test]
fn test_proximity_floor_beyond_radius() {
    assert_eq!(proximity_score(Distance::Known(50.0), 50.0), 0.0);
    assert_eq!(proximity_score(Distance::Known(75.0), 50.0), 0.0);
    assert_eq!(proximity_score(Distance::Unknown, 50.0), 0.0);
}

#[test]
fn test_score_missing_skill_is_ineligible_even_when_close() {
    let matcher = Matcher::default();
    let candidate = instructor_at(1, Some(MANILA));
    let roster = RosterSnapshot::new().with_instructor(candidate.clone(), [1], vec![slot("Monday", 9, 12)]);
    let request = request_at("1,2", "2024-01-15", Some(MANILA));
    let required = RequiredSkills::parse(&request.required_skills).unwrap();

    let eligibility = matcher.score(&roster, &request, &required, &candidate).unwrap();

    assert_eq!(eligibility.score(), -1.0);
}

#[test]
fn test_score_no_weekday_slot_is_ineligible() {
    let matcher = Matcher::default();
    let candidate = instructor_at(1, Some(MANILA));
    let roster = RosterSnapshot::new().with_instructor(
        candidate.clone(),
        [1, 2],
        vec![slot("Saturday", 9, 12), slot("Sunday", 9, 12)],
    );
    let request = request_at("1,2", "2024-01-15", Some(MANILA));
    let required = RequiredSkills::parse(&request.required_skills).unwrap();

    let eligibility = matcher.score(&roster, &request, &required, &candidate).unwrap();

    assert_eq!(eligibility, Eligibility::Ineligible(IneligibleReason::UnavailableOnDay));
    assert_eq!(eligibility.score(), -1.0);
}

#[test]
fn test_score_at_zero_distance_is_exactly_hundred() {
    let matcher = Matcher::default();
    let candidate = instructor_at(1, Some(MANILA));
    let roster = RosterSnapshot::new().with_instructor(candidate.clone(), [1], vec![slot("Monday", 9, 12)]);
    let request = request_at("1", "2024-01-15", Some(MANILA));
    let required = RequiredSkills::parse(&request.required_skills).unwrap();

    let eligibility = matcher.score(&roster, &request, &required, &candidate).unwrap();

    assert_eq!(eligibility.score(), 100.0);
}

#[test]
fn test_score_far_candidate_is_eligible_at_zero() {
    let matcher = Matcher::default();
    // Cebu, several hundred km from Manila
    let candidate = instructor_at(1, Some((10.3157, 123.8854)));
    let roster = RosterSnapshot::new().with_instructor(candidate.clone(), [1], vec![slot("Monday", 9, 12)]);
    let request = request_at("1", "2024-01-15", Some(MANILA));
    let required = RequiredSkills::parse(&request.required_skills).unwrap();

    let eligibility = matcher.score(&roster, &request, &required, &candidate).unwrap();

    assert!(eligibility.is_eligible());
    assert_eq!(eligibility.score(), 0.0);
}

#[test]
fn test_score_requester_without_location() {
    let matcher = Matcher::default();
    let candidate = instructor_at(1, Some(MANILA));
    let roster = RosterSnapshot::new().with_instructor(candidate.clone(), [1], vec![slot("Monday", 9, 12)]);
    let request = request_at("1", "2024-01-15", None);
    let required = RequiredSkills::parse(&request.required_skills).unwrap();

    let eligibility = matcher.score(&roster, &request, &required, &candidate).unwrap();

    assert_eq!(
        eligibility,
        Eligibility::Eligible {
            proximity_score: 0.0,
            distance: Distance::Unknown,
        }
    );
}
