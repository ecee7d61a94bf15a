//! Project entity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Project entity - groups tasks and milestones within an organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: Snowflake,
    pub organization_id: Snowflake,
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new Project
    pub fn new(id: Snowflake, organization_id: Snowflake, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            organization_id,
            name,
            image: None,
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the project name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the project image
    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image;
        self.updated_at = Utc::now();
    }

    /// Update the project description
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new(Snowflake::new(1), Snowflake::new(10), "Website".to_string());
        assert_eq!(project.name, "Website");
        assert_eq!(project.organization_id, Snowflake::new(10));
        assert!(project.description.is_none());
    }
}
