//! Organization entity - the tenant boundary

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

use crate::value_objects::Snowflake;

/// Organization entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: Snowflake,
    pub name: String,
    /// URL-safe unique identifier, e.g. `acme-corp`
    pub slug: String,
    pub logo: Option<String>,
    /// Free-form JSON metadata attached by clients
    pub metadata: Option<JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Organization {
    /// Create a new Organization
    pub fn new(id: Snowflake, name: String, slug: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            slug,
            logo: None,
            metadata: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Update the organization name
    pub fn set_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    /// Update the organization slug
    pub fn set_slug(&mut self, slug: String) {
        self.slug = slug;
        self.updated_at = Utc::now();
    }

    /// Update the organization logo
    pub fn set_logo(&mut self, logo: Option<String>) {
        self.logo = logo;
        self.updated_at = Utc::now();
    }

    /// Replace the metadata object
    pub fn set_metadata(&mut self, metadata: Option<JsonValue>) {
        self.metadata = metadata;
        self.updated_at = Utc::now();
    }

    /// Get the logo URL if set
    pub fn logo_url(&self) -> Option<String> {
        self.logo
            .as_ref()
            .map(|hash| format!("/logos/{}/{}.png", self.id, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_organization_creation() {
        let org = Organization::new(Snowflake::new(1), "Acme".to_string(), "acme".to_string());
        assert_eq!(org.name, "Acme");
        assert_eq!(org.slug, "acme");
        assert!(org.logo.is_none());
        assert!(org.metadata.is_none());
    }

    #[test]
    fn test_logo_url() {
        let mut org = Organization::new(Snowflake::new(9), "Acme".to_string(), "acme".to_string());
        assert!(org.logo_url().is_none());

        org.logo = Some("f00ba4".to_string());
        assert_eq!(org.logo_url(), Some("/logos/9/f00ba4.png".to_string()));
    }

    #[test]
    fn test_set_metadata() {
        let mut org = Organization::new(Snowflake::new(1), "Acme".to_string(), "acme".to_string());
        org.set_metadata(Some(json!({"plan": "pro"})));
        assert_eq!(org.metadata, Some(json!({"plan": "pro"})));
    }
}
