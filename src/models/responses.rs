use serde::{Deserialize, Serialize};

use crate::core::matcher::MatchOutcome;
use crate::models::domain::{Instructor, RequestId, UserId};

/// Response for the best-match endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BestMatchResponse {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor: Option<Instructor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<MatchOutcome> for BestMatchResponse {
    fn from(outcome: MatchOutcome) -> Self {
        let label = outcome.label().to_string();
        match outcome {
            MatchOutcome::Matched(best) => Self {
                outcome: label,
                score: Some(best.proximity_score),
                distance_km: best.distance.known_km(),
                instructor: Some(best.instructor),
                message: None,
            },
            MatchOutcome::NoEligibleInstructor => Self {
                outcome: label,
                instructor: None,
                score: None,
                distance_km: None,
                message: None,
            },
            MatchOutcome::MalformedRequest(err) => Self {
                outcome: label,
                instructor: None,
                score: None,
                distance_km: None,
                message: Some(err.to_string()),
            },
        }
    }
}

/// Response for the by-skill listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillListingResponse {
    pub instructors: Vec<Instructor>,
    pub total: usize,
}

/// Proposed instructor for one pending request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingMatchProposal {
    #[serde(rename = "requestId")]
    pub request_id: Option<RequestId>,
    pub outcome: String,
    #[serde(rename = "instructorId")]
    pub instructor_id: Option<UserId>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
