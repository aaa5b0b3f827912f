use crate::domain::errors::TeamError;

/// Validated team name
///
/// Names are trimmed on construction and must be non-empty afterwards.
/// Uniqueness is not required; two teams may share a name.
///
/// # Example
/// ```
/// use escape_scoreboard_api::domain::team::TeamName;
///
/// let name = TeamName::new("  The Locksmiths  ").expect("valid name");
/// assert_eq!(name.as_str(), "The Locksmiths");
/// assert!(TeamName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamName(String);

impl TeamName {
    /// Creates a validated team name from raw input
    ///
    /// # Returns
    /// * `Ok(TeamName)` - Trimmed, non-empty name
    /// * `Err(TeamError::InvalidArgument)` - If the name is empty or whitespace-only
    pub fn new(raw: impl Into<String>) -> Result<Self, TeamError> {
        let trimmed = raw.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TeamError::InvalidArgument(
                "Team name is required".to_string(),
            ));
        }
        Ok(Self(trimmed))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TeamName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
