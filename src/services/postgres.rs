use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

use crate::models::{AvailabilitySlot, Instructor, LessonRequest, RequestId, SkillId};
use crate::services::roster::RosterSnapshot;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// PostgreSQL client for the instructor roster and stored requests
///
/// Only reads are issued here. Request status changes and match bookkeeping
/// belong to the application that owns the tables.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Load every instructor with skills and availability into a snapshot
    ///
    /// Instructors come back in ascending id order, which is the roster order
    /// the matcher uses for tie-breaking.
    pub async fn load_roster(&self) -> Result<RosterSnapshot, PostgresError> {
        let instructor_rows = sqlx::query(
            r#"
            SELECT user_id, user_name, teaching_level, user_lat, user_long
            FROM users
            WHERE user_role = 'instructor'
            ORDER BY user_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let skill_rows = sqlx::query(
            r#"
            SELECT s.instructor_id, s.skill_id
            FROM instructor_skills s
            JOIN users u ON u.user_id = s.instructor_id
            WHERE u.user_role = 'instructor'
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let availability_rows = sqlx::query(
            r#"
            SELECT a.instructor_id, a.day, a.start_time, a.end_time
            FROM instructor_availability a
            JOIN users u ON u.user_id = a.instructor_id
            WHERE u.user_role = 'instructor'
            ORDER BY a.availability_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut roster = RosterSnapshot::new();

        for row in &instructor_rows {
            roster.push(instructor_from_row(row)?, Vec::<SkillId>::new(), vec![]);
        }

        for row in &skill_rows {
            roster.add_skill(row.try_get("instructor_id")?, row.try_get("skill_id")?);
        }

        for row in &availability_rows {
            roster.add_availability(
                row.try_get("instructor_id")?,
                AvailabilitySlot {
                    day: row.try_get("day")?,
                    start_time: row.try_get("start_time")?,
                    end_time: row.try_get("end_time")?,
                },
            );
        }

        tracing::debug!(
            "Loaded roster: {} instructors, {} skill rows, {} availability rows",
            instructor_rows.len(),
            skill_rows.len(),
            availability_rows.len()
        );

        Ok(roster)
    }

    /// Fetch one stored request with the requester's location
    pub async fn get_request(&self, request_id: RequestId) -> Result<LessonRequest, PostgresError> {
        let row = sqlx::query(
            r#"
            SELECT r.request_id, r.user_id, r.req_skills, r.request_date, u.user_lat, u.user_long
            FROM requests r
            JOIN users u ON r.user_id = u.user_id
            WHERE r.request_id = $1
            "#,
        )
        .bind(request_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => request_from_row(&row),
            None => Err(PostgresError::NotFound(format!("request {}", request_id))),
        }
    }

    /// Fetch every request still waiting for a match
    pub async fn get_pending_requests(&self) -> Result<Vec<LessonRequest>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT r.request_id, r.user_id, r.req_skills, r.request_date, u.user_lat, u.user_long
            FROM requests r
            JOIN users u ON r.user_id = u.user_id
            WHERE r.status = 'pending'
            ORDER BY r.request_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        tracing::debug!("Found {} pending requests", rows.len());

        rows.iter().map(request_from_row).collect()
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn instructor_from_row(row: &PgRow) -> Result<Instructor, PostgresError> {
    Ok(Instructor {
        user_id: row.try_get("user_id")?,
        user_name: row.try_get("user_name")?,
        teaching_level: row.try_get("teaching_level")?,
        latitude: row.try_get("user_lat")?,
        longitude: row.try_get("user_long")?,
    })
}

fn request_from_row(row: &PgRow) -> Result<LessonRequest, PostgresError> {
    Ok(LessonRequest {
        request_id: Some(row.try_get("request_id")?),
        requester_id: row.try_get("user_id")?,
        required_skills: row.try_get("req_skills")?,
        requested_date: row.try_get("request_date")?,
        latitude: row.try_get("user_lat")?,
        longitude: row.try_get("user_long")?,
    })
}
