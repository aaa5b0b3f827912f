// Infrastructure layer module
// Contains the PostgreSQL adapter for the team repository

pub mod repositories;
