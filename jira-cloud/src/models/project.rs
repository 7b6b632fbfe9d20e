use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of `GET project/search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectPage {
    #[serde(rename = "startAt")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,

    #[serde(rename = "isLast")]
    pub is_last: bool,

    /// Usually a complete URL for the following page; some servers send a
    /// bare offset instead.
    #[serde(rename = "nextPage")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page: Option<Value>,

    #[serde(default)]
    pub values: Vec<Value>,
}
