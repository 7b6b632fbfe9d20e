use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Where a request is sent: relative to the configured base URL, or to a
/// complete URL such as a `nextPage` link handed back by the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Relative(String),
    Absolute(Url),
}

/// A single resource request. Built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceRequest {
    target: Target,
    query: Vec<(String, String)>,
    body: Option<Value>,
}

impl ResourceRequest {
    /// Resource path as shown in the API documentation, e.g. `issue/DEMO-1`.
    pub fn path(resource_path: impl Into<String>) -> Self {
        let resource_path = resource_path.into();
        Self::with_target(Target::Relative(
            resource_path.trim_start_matches('/').to_string(),
        ))
    }

    pub fn url(url: Url) -> Self {
        Self::with_target(Target::Absolute(url))
    }

    fn with_target(target: Target) -> Self {
        Self {
            target,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Appends `key` once per value, the way list parameters are encoded.
    pub fn query_list<I, V>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        for value in values {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Body for POST/PUT; an empty JSON object when none was set.
    pub fn json_body(&self) -> Value {
        self.body
            .clone()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    pub fn resolve(&self, base_url: &Url) -> Result<Url> {
        match &self.target {
            Target::Relative(path) => base_url.join(path).map_err(|e| {
                Error::InvalidConfiguration(format!("Invalid resource path {path:?}: {e}"))
            }),
            Target::Absolute(url) => Ok(url.clone()),
        }
    }
}
