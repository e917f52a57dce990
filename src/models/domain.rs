use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub type UserId = i64;
pub type SkillId = i64;
pub type RequestId = i64;

/// Instructor account as returned by the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "teachingLevel", default)]
    pub teaching_level: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Instructor {
    /// Location of the instructor, if both coordinates are set
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// One weekly availability window of an instructor
///
/// `day` holds the full English weekday name ("Monday").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    #[serde(rename = "startTime")]
    pub start_time: NaiveTime,
    #[serde(rename = "endTime")]
    pub end_time: NaiveTime,
}

/// A learner's pending request as handed to the matcher
///
/// Skill and date fields are kept in their submitted form; the matcher
/// parses them and decides what a malformed value means.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRequest {
    #[serde(rename = "requestId", default)]
    pub request_id: Option<RequestId>,
    #[serde(rename = "requesterId")]
    pub requester_id: UserId,
    #[serde(rename = "requiredSkills")]
    pub required_skills: String,
    #[serde(rename = "requestDate")]
    pub requested_date: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl LessonRequest {
    /// Location of the requester, if both coordinates are set
    pub fn location(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.latitude, self.longitude)
    }
}

/// Latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a point only when both components are present
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) => Some(Self { latitude, longitude }),
            _ => None,
        }
    }
}

/// Why a skill specification could not be used
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkillSpecError {
    #[error("skill specification is empty")]
    Empty,

    #[error("invalid skill identifier {token:?}")]
    InvalidIdentifier { token: String },
}

/// Parsed, non-empty set of skills a request needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredSkills(BTreeSet<SkillId>);

impl RequiredSkills {
    pub const DELIMITER: char = ',';

    /// Parse a comma-delimited list of skill identifiers
    ///
    /// Whitespace around each identifier is ignored and duplicates collapse.
    /// An empty token anywhere in the list is rejected.
    pub fn parse(raw: &str) -> Result<Self, SkillSpecError> {
        if raw.trim().is_empty() {
            return Err(SkillSpecError::Empty);
        }

        raw.split(Self::DELIMITER)
            .map(|token| {
                token
                    .trim()
                    .parse::<SkillId>()
                    .map_err(|_| SkillSpecError::InvalidIdentifier {
                        token: token.to_string(),
                    })
            })
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every required skill is in `skills`
    pub fn is_covered_by(&self, skills: &BTreeSet<SkillId>) -> bool {
        self.0.is_subset(skills)
    }
}

impl FromStr for RequiredSkills {
    type Err = SkillSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RequiredSkills {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", ids.join(","))
    }
}

/// Proximity scoring parameters
#[derive(Debug, Clone, Copy)]
pub struct ProximitySettings {
    /// Distance at which the proximity bonus reaches zero; must be positive.
    /// A non-positive radius gives every candidate a zero bonus.
    pub radius_km: f64,
}

impl Default for ProximitySettings {
    fn default() -> Self {
        Self { radius_km: 50.0 }
    }
}
