use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::client::JiraClient;
use crate::error::{Error, Result};
use crate::request::ResourceRequest;

impl JiraClient {
    /// Looks a user up by email address.
    ///
    /// Returns an empty map when nobody matches, including when the service
    /// answers with a user whose address differs (user search also matches
    /// on partial names). Jira does not guarantee emails are unique, so more
    /// than one result is an [`Error::AmbiguousUser`].
    #[instrument(skip(self), level = "debug")]
    pub async fn get_user_by_email(&self, email: &str) -> Result<Map<String, Value>> {
        let request = ResourceRequest::path("user/search").query("query", email);
        let mut users: Vec<Value> = self.get_json(request).await?;

        if users.len() > 1 {
            return Err(Error::AmbiguousUser(email.to_string()));
        }
        let Some(user) = users.pop() else {
            return Ok(Map::new());
        };

        let Value::Object(user) = user else {
            return Err(Error::UnexpectedResponse(
                "user search result is not an object".to_string(),
            ));
        };
        let Some(found) = user.get("emailAddress").and_then(Value::as_str) else {
            return Err(Error::UnexpectedResponse(
                "user search result has no emailAddress".to_string(),
            ));
        };

        if found != email {
            debug!("User search for {:?} matched {:?}, ignoring", email, found);
            return Ok(Map::new());
        }
        Ok(user)
    }
}
