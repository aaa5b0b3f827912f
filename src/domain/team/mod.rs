// Team domain module
// Contains the team entity, validated value objects and progression rules

#![allow(clippy::module_inception)]

pub mod team;
pub mod value_objects;

// Re-export main types for convenience
pub use team::{Team, MAX_STEPS};
pub use value_objects::TeamName;
