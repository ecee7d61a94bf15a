//! Milestone entity - a dated goal grouping tasks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Lifecycle status of a milestone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneStatus {
    Planned,
    InProgress,
    Completed,
    OnHold,
}

impl MilestoneStatus {
    /// Database / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "PLANNED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::OnHold => "ON_HOLD",
        }
    }

    /// Parse from the database / wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PLANNED" => Some(Self::Planned),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            "ON_HOLD" => Some(Self::OnHold),
            _ => None,
        }
    }
}

impl Default for MilestoneStatus {
    fn default() -> Self {
        Self::Planned
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Milestone entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Milestone {
    pub id: Snowflake,
    pub project_id: Snowflake,
    pub organization_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub target_date: Option<DateTime<Utc>>,
    pub status: MilestoneStatus,
    pub created_by: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Milestone {
    /// Create a new Milestone
    pub fn new(
        id: Snowflake,
        project_id: Snowflake,
        organization_id: Snowflake,
        name: String,
        created_by: Snowflake,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_id,
            organization_id,
            name,
            description: None,
            target_date: None,
            status: MilestoneStatus::default(),
            created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Change the milestone status
    pub fn set_status(&mut self, status: MilestoneStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Check if the target date has passed without completion
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != MilestoneStatus::Completed
            && self.target_date.is_some_and(|target| target < now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_roundtrip() {
        for status in [
            MilestoneStatus::Planned,
            MilestoneStatus::InProgress,
            MilestoneStatus::Completed,
            MilestoneStatus::OnHold,
        ] {
            assert_eq!(MilestoneStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(MilestoneStatus::parse("DONE"), None);
    }

    #[test]
    fn test_milestone_defaults_to_planned() {
        let ms = Milestone::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "v1.0".to_string(),
            Snowflake::new(4),
        );
        assert_eq!(ms.status, MilestoneStatus::Planned);
        assert_eq!(ms.created_by, Snowflake::new(4));
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut ms = Milestone::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "v1.0".to_string(),
            Snowflake::new(4),
        );
        assert!(!ms.is_overdue(now));

        ms.target_date = Some(now - Duration::days(1));
        assert!(ms.is_overdue(now));

        ms.set_status(MilestoneStatus::Completed);
        assert!(!ms.is_overdue(now));
    }
}
