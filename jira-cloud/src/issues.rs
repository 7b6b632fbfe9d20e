//! Issue search, creation, update, comments, transitions and create-meta.

use reqwest::Response;
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::{debug, info, instrument};

use crate::client::{JiraClient, read_json};
use crate::error::Result;
use crate::models::{CommentRequest, CreatedIssue, SearchPage, TransitionRequest, reshape_create_meta};
use crate::pagination::OffsetPager;
use crate::request::ResourceRequest;

impl JiraClient {
    /// Runs a JQL search and collects every matching issue, or at most
    /// `max_results` of them, in service order.
    ///
    /// A failing page discards everything collected so far.
    #[instrument(skip(self), level = "debug")]
    pub async fn search_issues(&self, jql: &str, max_results: Option<u64>) -> Result<Vec<Value>> {
        let mut pager = OffsetPager::new(max_results);
        let mut issues = Vec::new();

        while let Some(window) = pager.next_window() {
            let request = ResourceRequest::path("search")
                .query("jql", jql)
                .query("startAt", window.start_at)
                .query("maxResults", window.max_results);
            let page: SearchPage = self.get_json(request).await?;

            let keep = pager.record(page.total, page.issues.len())?;
            issues.extend(page.issues.into_iter().take(keep));
            debug!(
                "Fetched {} of {:?} issues for JQL {:?}",
                issues.len(),
                pager.total(),
                jql
            );
        }

        info!("Found {} issues for JQL {:?}", issues.len(), jql);
        Ok(issues)
    }

    /// `fields` is sent as the `fields` object of the request, e.g.
    /// `{"project": {"key": "DEMO"}, "summary": "...", "issuetype": {"name": "Bug"}}`.
    #[instrument(skip_all, level = "debug")]
    pub async fn create_issue<F>(&self, fields: &F) -> Result<CreatedIssue>
    where
        F: Serialize + ?Sized,
    {
        let body = json!({ "fields": serde_json::to_value(fields)? });
        let response = self.post(ResourceRequest::path("issue").body(body)).await?;
        let created: CreatedIssue = read_json(response).await?;
        info!("Created issue {}", created.key);
        Ok(created)
    }

    /// Sends a partial update such as `{"fields": {"summary": "New summary"}}`.
    /// Jira answers 204 with no body, so the response is returned as is.
    #[instrument(skip(self, body), level = "debug")]
    pub async fn update_issue<B>(&self, issue_key: &str, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let request = ResourceRequest::path(format!("issue/{issue_key}"))
            .body(serde_json::to_value(body)?);
        self.put(request).await
    }

    /// Adds a plain-text comment. Rich Atlassian Document Format content is
    /// not supported.
    #[instrument(skip(self, comment), level = "debug")]
    pub async fn add_text_comment(
        &self,
        issue_id_or_key: &str,
        comment: &str,
        is_internal: bool,
    ) -> Result<Value> {
        let body = serde_json::to_value(CommentRequest::text(comment, is_internal))?;
        let request = ResourceRequest::path(format!("issue/{issue_id_or_key}/comment")).body(body);
        read_json(self.post(request).await?).await
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn transition_issue(&self, issue_id_or_key: &str, transition_id: &str) -> Result<()> {
        let body = serde_json::to_value(TransitionRequest::new(transition_id))?;
        let request =
            ResourceRequest::path(format!("issue/{issue_id_or_key}/transitions")).body(body);
        self.post(request).await?;
        info!("Transitioned {} via transition {}", issue_id_or_key, transition_id);
        Ok(())
    }

    /// Create-issue metadata for one project and issue type, with the
    /// matched project and issue type lifted to the `project` and
    /// `issuetype` keys.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_create_issue_meta(
        &self,
        project_key: &str,
        issue_type_name: &str,
    ) -> Result<Map<String, Value>> {
        let request = ResourceRequest::path("issue/createmeta")
            .query("projectKeys", project_key)
            .query("issuetypeNames", issue_type_name)
            .query("expand", "projects.issuetypes.fields");
        let response: Map<String, Value> = self.get_json(request).await?;
        reshape_create_meta(response, project_key, issue_type_name)
    }
}
