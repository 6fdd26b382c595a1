//! Learning resources attached to a topic.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceType {
    Pdf,
    Link,
    Document,
    Video,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Pdf,
        ResourceType::Link,
        ResourceType::Document,
        ResourceType::Video,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Pdf => "PDF",
            ResourceType::Link => "LINK",
            ResourceType::Document => "DOCUMENT",
            ResourceType::Video => "VIDEO",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ResourceType::Pdf => "PDF",
            ResourceType::Link => "Link",
            ResourceType::Document => "Document",
            ResourceType::Video => "Video",
        }
    }

    pub fn parse(s: &str) -> Option<ResourceType> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
    #[serde(default)]
    pub topic_id: Option<i64>,
    #[serde(default)]
    pub topic_title: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of resource create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
    pub topic_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl ResourceDraft {
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            title: resource.title.clone(),
            description: resource.description.clone(),
            kind: resource.kind,
            url: resource.url.clone(),
            topic_id: resource.topic_id.unwrap_or_default(),
            display_order: Some(resource.display_order),
            active: Some(resource.active),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() || self.url.trim().is_empty() || self.topic_id <= 0 {
            return Err("Please fill in all required fields".to_string());
        }
        Ok(())
    }
}

/// Active resources of a topic in display order.
pub fn visible_resources(resources: &[Resource]) -> Vec<Resource> {
    let mut out: Vec<Resource> = resources.iter().filter(|r| r.active).cloned().collect();
    out.sort_by_key(|r| r.display_order);
    out
}
