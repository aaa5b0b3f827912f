use async_trait::async_trait;

use crate::domain::errors::TeamResult;
use crate::domain::team::{Team, TeamName};

/// Repository trait for the Team entity
///
/// Defines the contract for persisting and retrieving teams.
/// Implementations handle database-specific details; each operation is
/// atomic with respect to the store.
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Insert a new team at step 1 with zero score; returns the
    /// store-assigned id. The start time is assigned by the store.
    async fn create(&self, name: &TeamName) -> TeamResult<i32>;

    /// Add `delta` to a team's score as a single unconditional increment.
    ///
    /// A missing team id is a silent no-op (zero rows affected), not an
    /// error; callers cannot detect a missing team through this path.
    async fn award_score(&self, team_id: i32, delta: i32) -> TeamResult<()>;

    /// Find a team by its id
    async fn find_by_id(&self, team_id: i32) -> TeamResult<Option<Team>>;

    /// Advance a team by one step under a row-level lock, so concurrent
    /// calls never lose an increment. Returns the reported next step.
    ///
    /// Fails with `TeamError::NotFound` when the team does not exist.
    async fn advance_step(&self, team_id: i32) -> TeamResult<i32>;

    /// Fetch every team, in no particular order
    async fn list_all(&self) -> TeamResult<Vec<Team>>;
}
