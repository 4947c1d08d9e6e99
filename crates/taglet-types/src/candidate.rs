// ABOUTME: Suggestion candidates and the inline elements they commit into
// ABOUTME: Candidates are passed through untouched from source to renderer to commit

use serde::{Deserialize, Serialize};

use crate::text::TriggerKind;

/// A single suggestion returned by a suggestion source
///
/// Only `id` is required. A candidate without a label still renders, with an
/// empty label, instead of breaking the whole panel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Secondary text shown next to the label (path, handle, count)
    #[serde(default)]
    pub detail: Option<String>,
}

impl Candidate {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            detail: None,
        }
    }

    /// Candidate whose id doubles as its label
    pub fn labeled(label: impl Into<String>) -> Self {
        let label = label.into();
        Self {
            id: label.clone(),
            label: Some(label),
            detail: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Label to display; empty when the source omitted it
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }

    /// Text for a committed element: the label, or the id when there is none
    fn committed_label(&self) -> String {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => self.id.clone(),
        }
    }
}

/// Structured, non-editable element inserted in place of the typed trigger text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InlineNode {
    Mention { id: String, label: String },
    Tag { label: String },
}

impl InlineNode {
    /// Build the element for `candidate` according to the trigger kind
    pub fn from_candidate(kind: TriggerKind, candidate: &Candidate) -> Self {
        match kind {
            TriggerKind::Mention => InlineNode::Mention {
                id: candidate.id.clone(),
                label: candidate.committed_label(),
            },
            TriggerKind::Tag => InlineNode::Tag {
                label: candidate.committed_label(),
            },
        }
    }

    pub fn kind(&self) -> TriggerKind {
        match self {
            InlineNode::Mention { .. } => TriggerKind::Mention,
            InlineNode::Tag { .. } => TriggerKind::Tag,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InlineNode::Mention { label, .. } | InlineNode::Tag { label } => label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_label_displays_empty() {
        let candidate: Candidate = serde_json::from_str(r#"{"id": "u-17"}"#).unwrap();
        assert_eq!(candidate.display_label(), "");
        assert!(candidate.detail.is_none());
    }

    #[test]
    fn test_mention_node_carries_identity_and_label() {
        let candidate = Candidate::new("src/service.ts").with_label("service.ts");
        let node = InlineNode::from_candidate(TriggerKind::Mention, &candidate);
        assert_eq!(
            node,
            InlineNode::Mention {
                id: "src/service.ts".into(),
                label: "service.ts".into()
            }
        );
        assert_eq!(node.kind(), TriggerKind::Mention);
    }

    #[test]
    fn test_tag_node_falls_back_to_id() {
        let node = InlineNode::from_candidate(TriggerKind::Tag, &Candidate::new("backend"));
        assert_eq!(
            node,
            InlineNode::Tag {
                label: "backend".into()
            }
        );
    }

    #[test]
    fn test_unlabeled_mention_commits_its_id() {
        let candidate: Candidate = serde_json::from_str(r#"{"id": "u-17"}"#).unwrap();
        let node = InlineNode::from_candidate(TriggerKind::Mention, &candidate);
        assert_eq!(
            node,
            InlineNode::Mention {
                id: "u-17".into(),
                label: "u-17".into()
            }
        );

        let blank = Candidate::new("u-18").with_label("");
        assert_eq!(
            InlineNode::from_candidate(TriggerKind::Mention, &blank).label(),
            "u-18"
        );
    }
}
