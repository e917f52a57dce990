// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilitySlot, GeoPoint, Instructor, LessonRequest, ProximitySettings, RequestId,
    RequiredSkills, SkillId, SkillSpecError, UserId,
};
pub use requests::{BestMatchRequest, SkillListingRequest};
pub use responses::{BestMatchResponse, ErrorResponse, HealthResponse, PendingMatchProposal, SkillListingResponse};
