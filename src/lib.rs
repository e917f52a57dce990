//! Skill Match - instructor matching service
//!
//! This library pairs a learner's lesson request with the closest instructor
//! who teaches every requested skill and is available on the requested weekday.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, MatchOutcome, Eligibility, distance::{haversine_distance, distance_between, Distance}};
pub use crate::models::{Instructor, LessonRequest, AvailabilitySlot, GeoPoint, RequiredSkills, ProximitySettings};
pub use crate::services::{InstructorDirectory, RosterSnapshot, DirectoryError};
