use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{LessonRequest, SkillId, UserId};

/// Ad-hoc request to find the best instructor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BestMatchRequest {
    #[serde(alias = "requester_id", rename = "requesterId")]
    pub requester_id: UserId,
    #[serde(alias = "required_skills", rename = "requiredSkills")]
    pub required_skills: String,
    #[validate(length(min = 1))]
    #[serde(alias = "request_date", rename = "requestDate")]
    pub request_date: String,
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(default)]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl From<BestMatchRequest> for LessonRequest {
    fn from(value: BestMatchRequest) -> Self {
        LessonRequest {
            request_id: None,
            requester_id: value.requester_id,
            required_skills: value.required_skills,
            requested_date: value.request_date,
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

/// Request to list every instructor teaching one skill
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SkillListingRequest {
    #[serde(alias = "skill_id", rename = "skillId")]
    pub skill_id: SkillId,
    #[validate(length(min = 1))]
    #[serde(alias = "preferred_level", rename = "preferredLevel", default)]
    pub preferred_level: Option<String>,
}
