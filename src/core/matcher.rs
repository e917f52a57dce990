use crate::core::{
    distance::{distance_between, Distance},
    eligibility::{covers_skills, is_available_on, parse_request_date, weekday_name},
    scoring::{proximity_score, Eligibility, IneligibleReason, INELIGIBLE_SCORE},
};
use crate::models::{Instructor, LessonRequest, ProximitySettings, RequiredSkills, SkillId, SkillSpecError};
use crate::services::roster::{DirectoryError, InstructorDirectory};

/// Instructor selected for a request
#[derive(Debug, Clone, PartialEq)]
pub struct BestMatch {
    pub instructor: Instructor,
    pub proximity_score: f64,
    pub distance: Distance,
}

/// Outcome of matching one request
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    Matched(BestMatch),
    NoEligibleInstructor,
    /// The request's skill list could not be parsed; no candidate was evaluated
    MalformedRequest(SkillSpecError),
}

impl MatchOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            MatchOutcome::Matched(_) => "matched",
            MatchOutcome::NoEligibleInstructor => "no_match",
            MatchOutcome::MalformedRequest(_) => "malformed_request",
        }
    }

    pub fn instructor(&self) -> Option<&Instructor> {
        match self {
            MatchOutcome::Matched(best) => Some(&best.instructor),
            _ => None,
        }
    }

    pub fn into_instructor(self) -> Option<Instructor> {
        match self {
            MatchOutcome::Matched(best) => Some(best.instructor),
            _ => None,
        }
    }
}

/// Matching engine
///
/// Two distinct modes share the same directory:
/// - [`Matcher::find_best_match_for_request`] picks the single closest instructor who
///   covers every requested skill and is available on the requested weekday.
/// - [`Matcher::find_best_match`] lists every instructor teaching one exact skill,
///   optionally at one teaching level, without availability or proximity weighting.
#[derive(Debug, Clone)]
pub struct Matcher {
    proximity: ProximitySettings,
}

impl Matcher {
    /// `proximity.radius_km` must be positive; otherwise every eligible
    /// candidate scores 0 and the first one in roster order wins.
    pub fn new(proximity: ProximitySettings) -> Self {
        Self { proximity }
    }

    pub fn with_default_settings() -> Self {
        Self {
            proximity: ProximitySettings::default(),
        }
    }

    pub fn proximity(&self) -> ProximitySettings {
        self.proximity
    }

    /// Score one candidate against a request
    ///
    /// Gate order: skill coverage, then requested-weekday availability, then
    /// proximity. The first failing constraint ends evaluation, so availability
    /// is never looked up for a candidate missing skills.
    pub fn score<D>(
        &self,
        directory: &D,
        request: &LessonRequest,
        required_skills: &RequiredSkills,
        candidate: &Instructor,
    ) -> Result<Eligibility, DirectoryError>
    where
        D: InstructorDirectory + ?Sized,
    {
        let skills = directory.instructor_skills(candidate.user_id)?;
        if !covers_skills(required_skills, &skills) {
            return Ok(Eligibility::Ineligible(IneligibleReason::MissingSkills));
        }

        let weekday = match parse_request_date(&request.requested_date) {
            Ok(date) => weekday_name(date),
            Err(_) => return Ok(Eligibility::Ineligible(IneligibleReason::InvalidRequestDate)),
        };

        let availability = directory.instructor_availability(candidate.user_id)?;
        if !is_available_on(&availability, &weekday) {
            return Ok(Eligibility::Ineligible(IneligibleReason::UnavailableOnDay));
        }

        let distance = distance_between(request.location(), candidate.location());

        Ok(Eligibility::Eligible {
            proximity_score: proximity_score(distance, self.proximity.radius_km),
            distance,
        })
    }

    /// Find the single best instructor for a request
    ///
    /// Ties keep the instructor seen first in roster order.
    pub fn find_best_match_for_request<D>(
        &self,
        directory: &D,
        request: &LessonRequest,
    ) -> Result<MatchOutcome, DirectoryError>
    where
        D: InstructorDirectory + ?Sized,
    {
        let instructors = directory.all_instructors()?;

        let required_skills = match RequiredSkills::parse(&request.required_skills) {
            Ok(skills) => skills,
            Err(err) => {
                tracing::info!(
                    "Request {:?} has malformed skills {:?}: {}",
                    request.request_id,
                    request.required_skills,
                    err
                );
                return Ok(MatchOutcome::MalformedRequest(err));
            }
        };

        let total_candidates = instructors.len();
        let mut best_score = INELIGIBLE_SCORE;
        let mut best: Option<BestMatch> = None;

        for instructor in instructors {
            let eligibility = self.score(directory, request, &required_skills, &instructor)?;

            match eligibility {
                Eligibility::Eligible { proximity_score, distance } => {
                    if proximity_score > best_score {
                        best_score = proximity_score;
                        best = Some(BestMatch {
                            instructor,
                            proximity_score,
                            distance,
                        });
                    }
                }
                Eligibility::Ineligible(reason) => {
                    tracing::debug!(
                        "Instructor {} ineligible for request {:?}: {:?}",
                        instructor.user_id,
                        request.request_id,
                        reason
                    );
                }
            }
        }

        let outcome = match best {
            Some(best) => MatchOutcome::Matched(best),
            None => MatchOutcome::NoEligibleInstructor,
        };

        tracing::info!(
            "Request {:?}: {} (from {} candidates)",
            request.request_id,
            outcome.label(),
            total_candidates
        );

        Ok(outcome)
    }

    /// List every instructor teaching `skill_id`
    ///
    /// When `preferred_level` is set, only instructors with exactly that
    /// teaching level are kept. Results stay in roster order.
    pub fn find_best_match<D>(
        &self,
        directory: &D,
        skill_id: SkillId,
        preferred_level: Option<&str>,
    ) -> Result<Vec<Instructor>, DirectoryError>
    where
        D: InstructorDirectory + ?Sized,
    {
        let mut matches = Vec::new();

        for instructor in directory.all_instructors()? {
            let skills = directory.instructor_skills(instructor.user_id)?;
            let level_ok = match preferred_level {
                Some(level) => instructor.teaching_level.as_deref() == Some(level),
                None => true,
            };

            if skills.contains(&skill_id) && level_ok {
                matches.push(instructor);
            }
        }

        tracing::debug!(
            "{} instructors teach skill {} (level {:?})",
            matches.len(),
            skill_id,
            preferred_level
        );

        Ok(matches)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_settings()
    }
}
