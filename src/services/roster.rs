use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

use crate::models::{AvailabilitySlot, Instructor, SkillId, UserId};

/// Errors raised by an instructor directory
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Instructor directory unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of instructors, their skills and their availability
///
/// The matcher only reads through this trait and never caches what it returns.
pub trait InstructorDirectory {
    /// Every instructor-role account, in roster order
    fn all_instructors(&self) -> Result<Vec<Instructor>, DirectoryError>;

    fn instructor_skills(&self, instructor_id: UserId) -> Result<BTreeSet<SkillId>, DirectoryError>;

    fn instructor_availability(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<AvailabilitySlot>, DirectoryError>;
}

/// In-memory roster captured at one point in time
#[derive(Debug, Clone, Default)]
pub struct RosterSnapshot {
    instructors: Vec<Instructor>,
    skills: HashMap<UserId, BTreeSet<SkillId>>,
    availability: HashMap<UserId, Vec<AvailabilitySlot>>,
}

impl RosterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instructor with their skills and availability
    pub fn with_instructor(
        mut self,
        instructor: Instructor,
        skills: impl IntoIterator<Item = SkillId>,
        availability: Vec<AvailabilitySlot>,
    ) -> Self {
        self.push(instructor, skills, availability);
        self
    }

    pub fn push(
        &mut self,
        instructor: Instructor,
        skills: impl IntoIterator<Item = SkillId>,
        availability: Vec<AvailabilitySlot>,
    ) {
        let id = instructor.user_id;
        self.skills.entry(id).or_default().extend(skills);
        self.availability.entry(id).or_default().extend(availability);
        self.instructors.push(instructor);
    }

    pub fn add_skill(&mut self, instructor_id: UserId, skill_id: SkillId) {
        self.skills.entry(instructor_id).or_default().insert(skill_id);
    }

    pub fn add_availability(&mut self, instructor_id: UserId, slot: AvailabilitySlot) {
        self.availability.entry(instructor_id).or_default().push(slot);
    }

    pub fn len(&self) -> usize {
        self.instructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructors.is_empty()
    }
}

impl InstructorDirectory for RosterSnapshot {
    fn all_instructors(&self) -> Result<Vec<Instructor>, DirectoryError> {
        Ok(self.instructors.clone())
    }

    fn instructor_skills(&self, instructor_id: UserId) -> Result<BTreeSet<SkillId>, DirectoryError> {
        Ok(self.skills.get(&instructor_id).cloned().unwrap_or_default())
    }

    fn instructor_availability(
        &self,
        instructor_id: UserId,
    ) -> Result<Vec<AvailabilitySlot>, DirectoryError> {
        Ok(self
            .availability
            .get(&instructor_id)
            .cloned()
            .unwrap_or_default())
    }
}
