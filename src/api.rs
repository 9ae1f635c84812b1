//! Read-only PostgREST query tool.
//!
//! A thin HTTP GET client for spot-checking the ingested tables through
//! the PostgREST API. Contains no ingestion logic.

use crate::PostgrestArgs;
use tracing::info;

/// Fetch one endpoint and return the raw response body.
pub async fn get_endpoint(
    client: &reqwest::Client,
    base_url: &str,
    endpoint: &str,
) -> Result<String, reqwest::Error> {
    let url = format!("{base_url}{endpoint}");
    info!("Sending GET request to {url}");
    client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await
}

/// Fetch each endpoint in turn and log the response bodies.
pub async fn query_endpoints(
    args: &PostgrestArgs,
    endpoints: &[String],
) -> Result<(), reqwest::Error> {
    let base_url = format!("http://{}:{}", args.postgrest_host, args.postgrest_port);
    info!("Connecting to PostgREST server at {base_url}");

    let client = reqwest::Client::new();
    for endpoint in endpoints {
        info!("Fetching data from endpoint: {endpoint}");
        let data = get_endpoint(&client, &base_url, endpoint).await?;
        info!("Received data: {data}");
    }

    Ok(())
}
