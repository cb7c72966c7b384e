//! Domain entities: teams and the participants on their rosters.

use serde::Serialize;

/// Maximum number of participants a competing team may carry.
pub const MAX_TEAM_SIZE: usize = 5;

/// Row id of the built-in free-agent pool. The store guarantees this row
/// exists before any other operation runs.
pub const FREE_AGENT_TEAM_ID: i64 = 1;

#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

impl Team {
    pub fn is_free_agent_pool(&self) -> bool {
        self.id == FREE_AGENT_TEAM_ID
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub team_id: i64,
}

impl Participant {
    /// Roster display format: "LAST, First".
    pub fn display_name(&self) -> String {
        display_name(&self.first_name, &self.last_name)
    }
}

/// Format a participant name for display before the entity exists.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{}, {}", last_name.to_uppercase(), first_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_format() {
        assert_eq!(display_name("Greg", "St. Dennis"), "ST. DENNIS, Greg");
    }

    #[test]
    fn test_free_agent_pool_detection() {
        let pool = Team { id: FREE_AGENT_TEAM_ID, name: "Free Agents".to_string() };
        let team = Team { id: 7, name: "The Hooligans".to_string() };
        assert!(pool.is_free_agent_pool());
        assert!(!team.is_free_agent_pool());
    }
}
