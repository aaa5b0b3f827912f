use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Total number of steps in the escape-room course
pub const MAX_STEPS: i32 = 7;

/// Team entity
///
/// Represents one participating group in the event, as stored in the
/// `teams` table. Progression and ranking rules live here; persistence
/// is handled by repository implementations.
///
/// # Invariants
/// - `current_step` stays within `[1, MAX_STEPS]`
/// - Once `completed` is true, `current_step` no longer changes
/// - `start_time` is fixed at creation
#[derive(Debug, Clone)]
pub struct Team {
    id: i32,
    name: String,
    current_step: i32,
    start_time: DateTime<Utc>,
    completed: bool,
    score: i32,
}

impl Team {
    /// Reconstructs a Team from persistence layer data
    ///
    /// The row was written by this service, so its fields already satisfy
    /// the entity invariants.
    pub fn from_persistence(
        id: i32,
        name: String,
        current_step: i32,
        start_time: DateTime<Utc>,
        completed: bool,
        score: i32,
    ) -> Self {
        Self {
            id,
            name,
            current_step,
            start_time,
            completed,
            score,
        }
    }

    /// Advances the team by one step
    ///
    /// Reads the current step and either increments it, or, when the team
    /// is already on the final step, marks the team completed and leaves
    /// the step unchanged.
    ///
    /// # Returns
    /// The step number reported to the caller: always the pre-transition
    /// `current_step + 1`, including the terminal call where only
    /// `completed` flips (there it equals `MAX_STEPS + 1`).
    pub fn advance(&mut self) -> i32 {
        let next_step = self.current_step + 1;
        if self.current_step >= MAX_STEPS {
            self.completed = true;
        } else {
            self.current_step = next_step;
        }
        next_step
    }

    /// Wall-clock seconds elapsed since the team started
    ///
    /// Computed on read, never stored.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> f64 {
        (now - self.start_time).num_milliseconds() as f64 / 1000.0
    }

    /// Spectator-view ranking comparator
    ///
    /// Orders by score descending, then completed before incomplete, then
    /// furthest step first, then earlier start time.
    pub fn cmp_rank(&self, other: &Team) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(other.completed.cmp(&self.completed))
            .then(other.current_step.cmp(&self.current_step))
            .then(self.start_time.cmp(&other.start_time))
    }

    /// Sorts teams into spectator-view order
    pub fn rank(teams: &mut [Team]) {
        teams.sort_by(Team::cmp_rank);
    }

    // ===== Getters =====

    /// Returns the store-assigned team id
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the team's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the step the team is currently on
    pub fn current_step(&self) -> i32 {
        self.current_step
    }

    /// Returns the timestamp recorded when the team was created
    #[allow(dead_code)]
    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// Returns whether the team has finished the course
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the team's accumulated score
    pub fn score(&self) -> i32 {
        self.score
    }
}
