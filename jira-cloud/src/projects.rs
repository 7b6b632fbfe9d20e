use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::client::JiraClient;
use crate::error::Result;
use crate::models::ProjectPage;
use crate::pagination::CursorPager;

impl JiraClient {
    /// Every project visible to the user, following `nextPage` until
    /// `isLast`.
    #[instrument(skip(self), level = "debug")]
    pub async fn get_projects(&self) -> Result<Vec<Value>> {
        let mut pager = CursorPager::new("project/search", &self.config.base_url);
        let mut projects = Vec::new();

        while let Some(request) = pager.next_request() {
            let page: ProjectPage = self.get_json(request).await?;
            pager.record(&page)?;
            projects.extend(page.values);
            debug!("Fetched {} projects so far", projects.len());
        }

        info!("Found {} projects", projects.len());
        Ok(projects)
    }
}
