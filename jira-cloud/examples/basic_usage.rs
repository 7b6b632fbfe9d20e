//! Lists projects and the newest issues of the first one.
//!
//! ```text
//! export JIRA_DOMAIN=your-domain
//! export JIRA_USER=your-email@example.com
//! export JIRA_API_TOKEN=your-api-token
//! RUST_LOG=jira_cloud=debug cargo run --example basic_usage
//! ```

use dotenv::dotenv;
use jira_cloud::{JiraClient, JiraConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> jira_cloud::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let client = JiraClient::new(JiraConfig::from_env()?).await?;

    let projects = client.get_projects().await?;
    info!("{} projects visible", projects.len());

    if let Some(key) = projects.first().and_then(|p| p["key"].as_str()) {
        let jql = format!("project = {key} ORDER BY created DESC");
        for issue in client.search_issues(&jql, Some(5)).await? {
            info!("{} {}", issue["key"], issue["fields"]["summary"]);
        }
    }

    Ok(())
}
