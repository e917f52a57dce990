use actix_web::{web, HttpResponse, Responder};
use std::fmt::Display;
use std::sync::Arc;
use validator::Validate;

use crate::core::{MatchOutcome, Matcher};
use crate::models::{
    BestMatchRequest, BestMatchResponse, ErrorResponse, HealthResponse, LessonRequest,
    PendingMatchProposal, RequestId, SkillListingRequest, SkillListingResponse,
};
use crate::services::{PostgresClient, PostgresError, RosterSnapshot};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub postgres: Arc<PostgresClient>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches/best", web::post().to(best_match))
        .route("/matches/by-skill", web::post().to(list_by_skill))
        .route("/requests/pending/matches", web::get().to(pending_matches))
        .route("/requests/{request_id}/match", web::post().to(match_stored_request));
}

fn error_response(status: u16, error: &str, message: impl Display) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

async fn load_roster(state: &AppState) -> Result<RosterSnapshot, HttpResponse> {
    state.postgres.load_roster().await.map_err(|e| {
        tracing::error!("Failed to load instructor roster: {}", e);
        HttpResponse::InternalServerError().json(error_response(500, "Failed to load instructor roster", e))
    })
}

fn run_best_match(matcher: &Matcher, roster: &RosterSnapshot, request: &LessonRequest) -> HttpResponse {
    match matcher.find_best_match_for_request(roster, request) {
        Ok(outcome) => HttpResponse::Ok().json(BestMatchResponse::from(outcome)),
        Err(e) => {
            tracing::error!("Matching failed for request {:?}: {}", request.request_id, e);
            HttpResponse::InternalServerError().json(error_response(500, "Matching failed", e))
        }
    }
}

/// Find the best instructor for an ad-hoc request
///
/// POST /api/v1/matches/best
///
/// Request body:
/// ```json
/// {
///   "requesterId": 12,
///   "requiredSkills": "1,4",
///   "requestDate": "2024-01-15",
///   "latitude": 14.5995,
///   "longitude": 120.9842
/// }
/// ```
async fn best_match(
    state: web::Data<AppState>,
    req: web::Json<BestMatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for best_match request: {:?}", errors);
        return HttpResponse::BadRequest().json(error_response(400, "Validation failed", errors));
    }

    let request = LessonRequest::from(req.into_inner());

    tracing::info!(
        "Finding best instructor for requester {} (skills {:?}, date {})",
        request.requester_id,
        request.required_skills,
        request.requested_date
    );

    let roster = match load_roster(&state).await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    run_best_match(&state.matcher, &roster, &request)
}

/// List all instructors teaching one skill
///
/// POST /api/v1/matches/by-skill
///
/// Request body:
/// ```json
/// { "skillId": 4, "preferredLevel": "advanced" }
/// ```
async fn list_by_skill(
    state: web::Data<AppState>,
    req: web::Json<SkillListingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(error_response(400, "Validation failed", errors));
    }

    let roster = match load_roster(&state).await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    match state
        .matcher
        .find_best_match(&roster, req.skill_id, req.preferred_level.as_deref())
    {
        Ok(instructors) => {
            let total = instructors.len();
            HttpResponse::Ok().json(SkillListingResponse { instructors, total })
        }
        Err(e) => {
            tracing::error!("Skill listing failed for skill {}: {}", req.skill_id, e);
            HttpResponse::InternalServerError().json(error_response(500, "Skill listing failed", e))
        }
    }
}

/// Find the best instructor for a stored request
///
/// POST /api/v1/requests/{request_id}/match
///
/// The request's status is left untouched; the caller decides what to do with
/// the proposed instructor.
async fn match_stored_request(
    state: web::Data<AppState>,
    path: web::Path<RequestId>,
) -> impl Responder {
    let request_id = path.into_inner();

    let request = match state.postgres.get_request(request_id).await {
        Ok(request) => request,
        Err(PostgresError::NotFound(what)) => {
            return HttpResponse::NotFound().json(error_response(404, "Request not found", what));
        }
        Err(e) => {
            tracing::error!("Failed to fetch request {}: {}", request_id, e);
            return HttpResponse::InternalServerError().json(error_response(500, "Failed to fetch request", e));
        }
    };

    let roster = match load_roster(&state).await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    run_best_match(&state.matcher, &roster, &request)
}

/// Propose an instructor for every pending request
///
/// GET /api/v1/requests/pending/matches
///
/// Each request is matched on its own against the same roster snapshot.
async fn pending_matches(state: web::Data<AppState>) -> impl Responder {
    let requests = match state.postgres.get_pending_requests().await {
        Ok(requests) => requests,
        Err(e) => {
            tracing::error!("Failed to fetch pending requests: {}", e);
            return HttpResponse::InternalServerError().json(error_response(500, "Failed to fetch pending requests", e));
        }
    };

    let roster = match load_roster(&state).await {
        Ok(roster) => roster,
        Err(response) => return response,
    };

    match propose_matches(&state.matcher, &roster, &requests) {
        Ok(proposals) => {
            tracing::info!("Proposed matches for {} pending requests", proposals.len());
            HttpResponse::Ok().json(proposals)
        }
        Err(e) => {
            tracing::error!("Matching pending requests failed: {}", e);
            HttpResponse::InternalServerError().json(error_response(500, "Matching failed", e))
        }
    }
}

/// Match each request independently and summarise the outcome
pub fn propose_matches(
    matcher: &Matcher,
    roster: &RosterSnapshot,
    requests: &[LessonRequest],
) -> Result<Vec<PendingMatchProposal>, crate::services::DirectoryError> {
    requests
        .iter()
        .map(|request| {
            let outcome = matcher.find_best_match_for_request(roster, request)?;
            Ok(proposal(request, &outcome))
        })
        .collect()
}

fn proposal(request: &LessonRequest, outcome: &MatchOutcome) -> PendingMatchProposal {
    PendingMatchProposal {
        request_id: request.request_id,
        outcome: outcome.label().to_string(),
        instructor_id: outcome.instructor().map(|i| i.user_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilitySlot, Instructor};
    use chrono::NaiveTime;

    fn request(id: RequestId, skills: &str) -> LessonRequest {
        LessonRequest {
            request_id: Some(id),
            requester_id: 50,
            required_skills: skills.to_string(),
            requested_date: "2024-01-15".to_string(),
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_propose_matches_each_request_independently() {
        let instructor = Instructor {
            user_id: 9,
            user_name: "ana".to_string(),
            teaching_level: None,
            latitude: None,
            longitude: None,
        };
        let roster = RosterSnapshot::new().with_instructor(
            instructor,
            [1],
            vec![AvailabilitySlot {
                day: "Monday".to_string(),
                start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            }],
        );
        let requests = vec![request(1, "1"), request(2, "2"), request(3, "x")];

        let proposals = propose_matches(&Matcher::default(), &roster, &requests).unwrap();

        let summary: Vec<(Option<RequestId>, &str, Option<i64>)> = proposals
            .iter()
            .map(|p| (p.request_id, p.outcome.as_str(), p.instructor_id))
            .collect();
        assert_eq!(
            summary,
            vec![
                (Some(1), "matched", Some(9)),
                (Some(2), "no_match", None),
                (Some(3), "malformed_request", None),
            ]
        );
    }
}
