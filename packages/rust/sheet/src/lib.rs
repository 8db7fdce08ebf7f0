//! Spreadsheet CSV retrieval and tolerant parsing.
//!
//! The map data is edited by hand in a public spreadsheet and pulled as a CSV
//! export. This crate fetches that export and turns it into [`RawRow`]s keyed by
//! header name; it knows nothing about the meaning of any column.

mod parser;
mod tokenizer;

use std::time::Duration;

use climatemap_shared::{ClimateMapError, Result, SheetConfig};
use reqwest::Client;
use tracing::{debug, instrument};

pub use parser::{Document, RawRow, normalize_header, parse_csv, parse_document};
pub use tokenizer::tokenize_line;

/// Maximum number of redirects to follow (the export endpoint redirects once).
const MAX_REDIRECTS: usize = 5;

/// User-Agent string for export requests.
const USER_AGENT: &str = concat!("climatemap/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// HTTP
// ---------------------------------------------------------------------------

/// Build a reqwest client for the spreadsheet export.
///
/// No timeout is set unless the config asks for one.
pub fn build_client(config: &SheetConfig) -> Result<Client> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS));

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder
        .build()
        .map_err(|e| ClimateMapError::network(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and return the body as text. Any non-2xx status is an error.
pub async fn fetch_csv(client: &Client, url: &str) -> Result<String> {
    fetch_csv_capped(client, url, None).await
}

/// [`fetch_csv`] that also rejects bodies larger than `max_bytes`.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_csv_capped(
    client: &Client,
    url: &str,
    max_bytes: Option<u64>,
) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| ClimateMapError::network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ClimateMapError::network(format!(
            "failed to fetch spreadsheet: HTTP {status}"
        )));
    }

    if let (Some(max), Some(len)) = (max_bytes, response.content_length()) {
        check_size(url, len, max)?;
    }

    let body = response
        .text()
        .await
        .map_err(|e| ClimateMapError::network(format!("{url}: failed to read body: {e}")))?;

    // Chunked responses carry no Content-Length.
    if let Some(max) = max_bytes {
        check_size(url, body.len() as u64, max)?;
    }

    debug!(bytes = body.len(), "spreadsheet export downloaded");
    Ok(body)
}

fn check_size(url: &str, len: u64, max: u64) -> Result<()> {
    if len > max {
        return Err(ClimateMapError::validation(format!(
            "{url}: response too large ({len} bytes, max {max})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sheet_for(server: &MockServer) -> SheetConfig {
        SheetConfig {
            base_url: server.uri(),
            spreadsheet_id: "test-sheet".into(),
            gid: "0".into(),
            timeout_secs: Some(5),
            max_response_bytes: None,
        }
    }

    #[tokio::test]
    async fn fetch_returns_body_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/test-sheet/export"))
            .and(query_param("format", "csv"))
            .and(query_param("gid", "0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Name\nSkyNet\n"))
            .mount(&server)
            .await;

        let sheet = sheet_for(&server);
        let client = build_client(&sheet).unwrap();
        let body = fetch_csv(&client, &sheet.export_url()).await.unwrap();

        assert_eq!(body, "Name\nSkyNet\n");
        assert_eq!(parse_csv(&body)[0].get("Name"), Some("SkyNet"));
    }

    #[tokio::test]
    async fn fetch_fails_on_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let sheet = sheet_for(&server);
        let client = build_client(&sheet).unwrap();
        let err = fetch_csv(&client, &sheet.export_url()).await.unwrap_err();

        assert!(matches!(err, ClimateMapError::Network(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn capped_fetch_rejects_oversized_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Name\nSkyNet\nAquaBot\n"))
            .mount(&server)
            .await;

        let sheet = sheet_for(&server);
        let client = build_client(&sheet).unwrap();
        let url = sheet.export_url();

        let err = fetch_csv_capped(&client, &url, Some(8)).await.unwrap_err();
        assert!(matches!(err, ClimateMapError::Validation { .. }));
        assert!(err.to_string().contains("too large"));

        let body = fetch_csv_capped(&client, &url, Some(1024)).await.unwrap();
        assert_eq!(body, "Name\nSkyNet\nAquaBot\n");
    }

    #[tokio::test]
    async fn uncapped_fetch_accepts_large_body() {
        let server = MockServer::start().await;
        let csv = format!("Name\n{}", "SkyNet\n".repeat(50_000));

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(csv.clone()))
            .mount(&server)
            .await;

        let sheet = sheet_for(&server);
        let client = build_client(&sheet).unwrap();
        let body = fetch_csv(&client, &sheet.export_url()).await.unwrap();
        assert_eq!(body.len(), csv.len());
    }

    #[tokio::test]
    async fn fetch_fails_when_host_unreachable() {
        let sheet = SheetConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..SheetConfig::default()
        };
        let client = build_client(&sheet).unwrap();
        let result = fetch_csv(&client, &sheet.export_url()).await;
        assert!(matches!(result, Err(ClimateMapError::Network(_))));
    }
}
