// src/fetch/mod.rs

use anyhow::{Context, Result};
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use tokio::fs;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::Source;
use crate::error::PipelineError;

pub const DEFAULT_URL: &str = "https://www.worldometers.info/coronavirus/";

/// True if the response looks like an HTML page we can parse.
/// The content type only has to *contain* "html", in any case.
pub fn is_good_response(status: StatusCode, content_type: Option<&str>) -> bool {
    status == StatusCode::OK
        && content_type
            .map(|ct| ct.to_ascii_lowercase().contains("html"))
            .unwrap_or(false)
}

/// GET `url` and return the body if it is an HTML page.
///
/// Every failure (transport, status, content type, body read) is logged and
/// turned into `None`; nothing propagates out of here.
#[instrument(level = "info", skip_all, fields(url = %url))]
pub async fn simple_get(client: &Client, url: &Url) -> Option<Vec<u8>> {
    let resp = match client.get(url.clone()).send().await {
        Ok(resp) => resp,
        Err(e) => {
            error!(%url, error = %e, "Error during request");
            return None;
        }
    };

    let status = resp.status();
    let content_type = resp
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    debug!(%status, content_type = ?content_type, "response received");

    if !is_good_response(status, content_type.as_deref()) {
        error!(
            %url,
            %status,
            content_type = ?content_type,
            "response is not an HTML page"
        );
        return None;
    }

    match resp.bytes().await {
        Ok(body) => {
            info!(bytes = body.len(), "fetched page");
            Some(body.to_vec())
        }
        Err(e) => {
            error!(%url, error = %e, "Error reading response body");
            None
        }
    }
}

/// Load the raw HTML for a run, either over HTTP or from a local file.
pub async fn load_source(client: &Client, source: &Source) -> Result<Vec<u8>> {
    match source {
        Source::Remote(url) => simple_get(client, url).await.ok_or_else(|| {
            PipelineError::NoContent {
                origin: url.to_string(),
            }
            .into()
        }),
        Source::File(path) => {
            let body = fs::read(path)
                .await
                .with_context(|| format!("reading HTML from {}", path.display()))?;
            info!(path = %path.display(), bytes = body.len(), "loaded page from file");
            Ok(body)
        }
    }
}
