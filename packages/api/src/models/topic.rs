//! Topics: hierarchical content categories.
//!
//! The backend returns topics as a flat list where each entry may name its
//! parent. [`build_topic_tree`] turns that list into the forest the topic
//! browser renders.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Topic as returned by `/api/topics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_topic_id: Option<i64>,
    #[serde(default)]
    pub parent_topic_title: Option<String>,
    #[serde(default)]
    pub sub_topics: Vec<TopicSummary>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub has_quiz: bool,
    #[serde(default)]
    pub resource_count: u32,
    #[serde(default)]
    pub quiz_count: u32,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub has_quiz: bool,
    #[serde(default)]
    pub sub_topic_count: u32,
}

/// Body of topic create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_topic_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl TopicDraft {
    pub fn from_topic(topic: &Topic) -> Self {
        Self {
            title: topic.title.clone(),
            description: Some(topic.description.clone()),
            parent_topic_id: topic.parent_topic_id,
            display_order: Some(topic.display_order),
            active: Some(topic.active),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Topic title is required".to_string());
        }
        Ok(())
    }
}

/// A topic with its children, for tree rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicNode {
    pub topic: Topic,
    pub children: Vec<TopicNode>,
}

/// Build a forest from a flat topic list.
///
/// A topic becomes a root when it has no parent or when its parent is not part
/// of `topics` (for example because a search filtered the parent out). Sibling
/// order follows the input order. Cycles in the parent links are broken by
/// treating the members of a cycle as roots.
pub fn build_topic_tree(topics: &[Topic]) -> Vec<TopicNode> {
    let ids: HashMap<i64, usize> = topics.iter().enumerate().map(|(i, t)| (t.id, i)).collect();
    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut roots = Vec::new();

    for (i, topic) in topics.iter().enumerate() {
        match topic.parent_topic_id {
            Some(parent) if ids.contains_key(&parent) && !reaches_self(topics, &ids, i) => {
                children.entry(parent).or_default().push(i)
            }
            _ => roots.push(i),
        }
    }

    fn build(
        idx: usize,
        topics: &[Topic],
        children: &HashMap<i64, Vec<usize>>,
    ) -> TopicNode {
        let topic = topics[idx].clone();
        let kids = children
            .get(&topic.id)
            .map(|v| v.iter().map(|&c| build(c, topics, children)).collect())
            .unwrap_or_default();
        TopicNode {
            topic,
            children: kids,
        }
    }

    roots
        .into_iter()
        .map(|i| build(i, topics, &children))
        .collect()
}

fn reaches_self(topics: &[Topic], ids: &HashMap<i64, usize>, start: usize) -> bool {
    let start_id = topics[start].id;
    let mut current = topics[start].parent_topic_id;
    let mut steps = 0;
    while let Some(id) = current {
        if id == start_id {
            return true;
        }
        steps += 1;
        if steps > topics.len() {
            return true;
        }
        current = ids.get(&id).and_then(|&i| topics[i].parent_topic_id);
    }
    false
}

/// Case-insensitive match on title or description. An empty query keeps all.
pub fn filter_topics(topics: &[Topic], query: &str) -> Vec<Topic> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return topics.to_vec();
    }
    topics
        .iter()
        .filter(|t| {
            t.title.to_lowercase().contains(&query)
                || t.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: i64, title: &str, parent: Option<i64>) -> Topic {
        Topic {
            id,
            title: title.to_string(),
            description: format!("About {title}"),
            parent_topic_id: parent,
            parent_topic_title: None,
            sub_topics: vec![],
            display_order: 0,
            active: true,
            has_quiz: false,
            resource_count: 0,
            quiz_count: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_build_tree_nests_children() {
        let topics = vec![
            topic(1, "Rust", None),
            topic(2, "Ownership", Some(1)),
            topic(3, "Borrowing", Some(2)),
            topic(4, "Go", None),
        ];
        let tree = build_topic_tree(&topics);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].topic.title, "Rust");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].children[0].topic.title, "Borrowing");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_orphan_becomes_root() {
        let topics = vec![topic(2, "Ownership", Some(1)), topic(5, "Traits", None)];
        let tree = build_topic_tree(&topics);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].topic.id, 2);
    }

    #[test]
    fn test_parent_cycle_does_not_drop_topics() {
        let topics = vec![topic(1, "A", Some(2)), topic(2, "B", Some(1))];
        let tree = build_topic_tree(&topics);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_filter_matches_title_or_description() {
        let mut t = topic(1, "Databases", None);
        t.description = "SQL and indexing".to_string();
        let topics = vec![t, topic(2, "Networking", None)];
        assert_eq!(filter_topics(&topics, "sql").len(), 1);
        assert_eq!(filter_topics(&topics, "NET").len(), 1);
        assert_eq!(filter_topics(&topics, "  ").len(), 2);
        assert!(filter_topics(&topics, "compilers").is_empty());
    }

    #[test]
    fn test_draft_skips_unset_fields() {
        let draft = TopicDraft {
            title: "Rust".into(),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"title": "Rust"})
        );
        assert!(TopicDraft::default().validate().is_err());
    }
}
