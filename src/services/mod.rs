// Service exports
pub mod postgres;
pub mod roster;

pub use postgres::{PostgresClient, PostgresError};
pub use roster::{DirectoryError, InstructorDirectory, RosterSnapshot};
