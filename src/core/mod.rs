// Core algorithm exports
pub mod distance;
pub mod eligibility;
pub mod matcher;
pub mod scoring;

pub use distance::{distance_between, haversine_distance, Distance};
pub use eligibility::{covers_skills, is_available_on, parse_request_date, weekday_name, RequestDateError};
pub use matcher::{BestMatch, MatchOutcome, Matcher};
pub use scoring::{proximity_score, Eligibility, IneligibleReason};
