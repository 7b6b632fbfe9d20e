use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Promotes the matched project and issue type out of the `projects` /
/// `issuetypes` arrays of a `GET issue/createmeta` response.
///
/// The result keeps every other top-level key of the response and adds
/// `project` (without its `issuetypes`) and `issuetype`.
pub fn reshape_create_meta(
    mut response: Map<String, Value>,
    project_key: &str,
    issue_type_name: &str,
) -> Result<Map<String, Value>> {
    let projects = match response.remove("projects") {
        Some(Value::Array(projects)) => projects,
        Some(_) => {
            return Err(Error::UnexpectedResponse(
                "createmeta \"projects\" is not an array".to_string(),
            ));
        }
        None => Vec::new(),
    };

    let mut project = match projects.into_iter().next() {
        Some(Value::Object(project)) => project,
        Some(_) => {
            return Err(Error::UnexpectedResponse(
                "createmeta project is not an object".to_string(),
            ));
        }
        None => return Err(Error::ProjectNotFound(project_key.to_string())),
    };

    let issue_types = match project.remove("issuetypes") {
        Some(Value::Array(issue_types)) => issue_types,
        _ => Vec::new(),
    };

    let issue_type = issue_types
        .into_iter()
        .find(|issue_type| issue_type.get("name").and_then(Value::as_str) == Some(issue_type_name))
        .ok_or_else(|| Error::IssueTypeNotFound {
            project_key: project_key.to_string(),
            issue_type: issue_type_name.to_string(),
        })?;

    response.insert("project".to_string(), Value::Object(project));
    response.insert("issuetype".to_string(), issue_type);
    Ok(response)
}
