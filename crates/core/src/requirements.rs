//! Structured requirements payload attached to a project request.
//!
//! This is deliberately a concrete struct with explicit optional fields,
//! validated at the boundary. Past validation it travels as typed data,
//! never as an opaque JSON dictionary.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Client-supplied requirements captured at submission time and copied onto
/// the project at approval.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Requirements {
    /// Requested features, free-text bullet points.
    #[validate(length(max = 50, message = "at most 50 feature entries"))]
    #[serde(default)]
    pub features: Vec<String>,

    /// Approximate page count for site builds.
    #[validate(range(min = 1, max = 500))]
    pub page_count: Option<i32>,

    /// Third-party integrations (payment, CRM, analytics, ...).
    #[validate(length(max = 25, message = "at most 25 integrations"))]
    #[serde(default)]
    pub integrations: Vec<String>,

    /// Whether the client already has finished designs.
    pub has_designs: Option<bool>,

    /// Whether content (copy, imagery) will be supplied by the client.
    pub content_provided: Option<bool>,

    /// Anything that does not fit the fields above.
    #[validate(length(max = 5000))]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_payload_is_valid() {
        assert!(Requirements::default().validate().is_ok());
    }

    #[test]
    fn page_count_range_enforced() {
        let req = Requirements {
            page_count: Some(0),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = Requirements {
            page_count: Some(12),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn oversized_notes_rejected() {
        let req = Requirements {
            notes: Some("x".repeat(5001)),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let req = Requirements {
            features: vec!["blog".into(), "booking form".into()],
            page_count: Some(8),
            integrations: vec!["stripe".into()],
            has_designs: Some(false),
            content_provided: Some(true),
            notes: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        let back: Requirements = serde_json::from_str(&json).unwrap();
        assert_eq!(back.features.len(), 2);
        assert_eq!(back.page_count, Some(8));
    }
}
