use crate::core::distance::Distance;

/// Proximity score of a candidate at distance zero
pub const MAX_PROXIMITY_SCORE: f64 = 100.0;

/// Numeric score reported for an ineligible candidate
pub const INELIGIBLE_SCORE: f64 = -1.0;

/// Hard constraint a candidate failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    MissingSkills,
    InvalidRequestDate,
    UnavailableOnDay,
}

/// Result of scoring one candidate against one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Eligibility {
    Eligible { proximity_score: f64, distance: Distance },
    Ineligible(IneligibleReason),
}

impl Eligibility {
    /// Score in [-1, 100]: -1 when ineligible, the proximity score otherwise
    pub fn score(&self) -> f64 {
        match self {
            Eligibility::Eligible { proximity_score, .. } => *proximity_score,
            Eligibility::Ineligible(_) => INELIGIBLE_SCORE,
        }
    }

    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible { .. })
    }
}

/// Calculate the proximity score (0-100)
///
/// Linear falloff: 100 at 0 km down to 0 at `radius_km`, clamped at 0 beyond.
/// An unknown distance is infinite and therefore scores 0, as does any
/// radius that is not a positive number.
#[inline]
pub fn proximity_score(distance: Distance, radius_km: f64) -> f64 {
    if radius_km.is_nan() || radius_km <= 0.0 {
        return 0.0;
    }
    (MAX_PROXIMITY_SCORE * (1.0 - distance.km() / radius_km)).clamp(0.0, MAX_PROXIMITY_SCORE)
}
