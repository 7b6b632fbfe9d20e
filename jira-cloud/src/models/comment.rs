//! Request body for `POST issue/{issueIdOrKey}/comment`.
//!
//! Only plain text is supported: the Atlassian Document Format body is always
//! a single paragraph holding a single text node.

use serde::{Deserialize, Serialize};

const PUBLIC_COMMENT_PROPERTY: &str = "sd.public.comment";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRequest {
    pub body: Document,
    pub properties: Vec<EntityProperty>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub version: u32,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: String,
    pub content: Vec<TextNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityProperty {
    pub key: String,
    pub value: Visibility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visibility {
    pub internal: bool,
}

impl Document {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            version: 1,
            kind: "doc".to_string(),
            content: vec![Block {
                kind: "paragraph".to_string(),
                content: vec![TextNode {
                    kind: "text".to_string(),
                    text: text.into(),
                }],
            }],
        }
    }
}

impl CommentRequest {
    /// `is_internal` controls Service Desk visibility; it is ignored by
    /// plain Jira Software projects.
    pub fn text(comment: impl Into<String>, is_internal: bool) -> Self {
        Self {
            body: Document::text(comment),
            properties: vec![EntityProperty {
                key: PUBLIC_COMMENT_PROPERTY.to_string(),
                value: Visibility {
                    internal: is_internal,
                },
            }],
        }
    }
}
