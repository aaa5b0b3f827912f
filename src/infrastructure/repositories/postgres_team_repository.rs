use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::errors::{TeamError, TeamResult};
use crate::domain::repositories::TeamRepository;
use crate::domain::team::{Team, TeamName};

/// PostgreSQL implementation of TeamRepository
///
/// Persists teams with SQLx runtime queries against PostgreSQL. The pool
/// hands out one connection per operation and returns it on every exit
/// path, including errors.
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    /// Creates a new PostgresTeamRepository
    ///
    /// # Arguments
    /// * `pool` - SQLx connection pool for PostgreSQL
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `teams` table when it does not exist yet
    ///
    /// Run once at startup. `start_time` defaults server-side so creation
    /// and timestamping happen in one statement.
    pub async fn ensure_schema(pool: &PgPool) -> TeamResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS teams (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                current_step INTEGER NOT NULL DEFAULT 1,
                start_time TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                completed BOOLEAN NOT NULL DEFAULT FALSE,
                score INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

fn team_from_row(row: &PgRow) -> Result<Team, sqlx::Error> {
    Ok(Team::from_persistence(
        row.try_get("id")?,
        row.try_get("name")?,
        row.try_get("current_step")?,
        row.try_get("start_time")?,
        row.try_get("completed")?,
        row.try_get("score")?,
    ))
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn create(&self, name: &TeamName) -> TeamResult<i32> {
        let row = sqlx::query("INSERT INTO teams (name) VALUES ($1) RETURNING id")
            .bind(name.as_str())
            .fetch_one(&self.pool)
            .await?;

        let id: i32 = row.try_get("id").map_err(TeamError::from)?;
        Ok(id)
    }

    async fn award_score(&self, team_id: i32, delta: i32) -> TeamResult<()> {
        // Unconditional increment; a missing id affects zero rows and
        // still succeeds.
        sqlx::query("UPDATE teams SET score = score + $1 WHERE id = $2")
            .bind(delta)
            .bind(team_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, team_id: i32) -> TeamResult<Option<Team>> {
        let row = sqlx::query(
            "SELECT id, name, current_step, start_time, completed, score \
             FROM teams WHERE id = $1",
        )
        .bind(team_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| team_from_row(&r)).transpose().map_err(TeamError::from)
    }

    async fn advance_step(&self, team_id: i32) -> TeamResult<i32> {
        // Row lock held across the read-modify-write so concurrent calls
        // advance at most one step each.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT id, name, current_step, start_time, completed, score \
             FROM teams WHERE id = $1 FOR UPDATE",
        )
        .bind(team_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            return Err(TeamError::NotFound(team_id));
        };

        let mut team = team_from_row(&row)?;
        let next_step = team.advance();

        sqlx::query("UPDATE teams SET current_step = $1, completed = $2 WHERE id = $3")
            .bind(team.current_step())
            .bind(team.completed())
            .bind(team_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(next_step)
    }

    async fn list_all(&self) -> TeamResult<Vec<Team>> {
        let rows = sqlx::query(
            "SELECT id, name, current_step, start_time, completed, score FROM teams",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| team_from_row(r).map_err(TeamError::from))
            .collect()
    }
}
