use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of `GET search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchPage {
    #[serde(rename = "startAt")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,

    #[serde(rename = "maxResults")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,

    pub total: u64,

    #[serde(default)]
    pub issues: Vec<Value>,
}
