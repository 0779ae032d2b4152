//! Blocking HTTP client for the analysis services.

use std::io::{BufRead, BufReader};
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::chat::{ChatOutcome, ChatRequest, ReplyBuilder};
use crate::error::{Result, TransportError};
use crate::remote::{Frequency, RemoteAggregation};
use crate::sse::{ChatChunk, SseDecoder};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Body of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the pre-aggregation and chat endpoints.
pub struct RemoteClient {
    client: Client,
    base: Url,
}

impl RemoteClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let base = parse_base(endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn health(&self) -> Result<HealthStatus> {
        let url = self.url("health")?;
        debug!(%url, "checking service health");
        let response = check_status(self.client.get(url).send()?)?;
        decode_json(response)
    }

    /// Fetches service-side aggregates for a dataset.
    pub fn fetch_aggregation(
        &self,
        dataset_id: &str,
        frequency: Frequency,
    ) -> Result<RemoteAggregation> {
        let mut url = self.url("analytics/")?;
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidEndpoint(self.base.to_string()))?
            .pop_if_empty()
            .push(dataset_id);
        url.query_pairs_mut()
            .append_pair("frequency", frequency.as_str());
        debug!(%url, %frequency, "fetching remote aggregation");
        let response = check_status(self.client.get(url).send()?)?;
        let aggregation: RemoteAggregation = decode_json(response)?;
        info!(
            periods = aggregation.chart_data.len(),
            hints = aggregation.column_mapping.len(),
            "remote aggregation received"
        );
        Ok(aggregation)
    }

    /// Posts a chat history and consumes the streamed reply.
    ///
    /// `on_chunk` observes every decoded chunk as it arrives. A malformed line
    /// is skipped; an `error` field ends the reply with
    /// [`ChatOutcome::Failed`].
    pub fn stream_chat(
        &self,
        request: &ChatRequest,
        mut on_chunk: impl FnMut(&ChatChunk),
    ) -> Result<ChatOutcome> {
        let url = self.url("analytics/chat")?;
        debug!(%url, messages = request.messages.len(), "starting chat stream");
        let response = self
            .client
            .post(url)
            .header(ACCEPT, "text/event-stream")
            .json(request)
            .send()?;
        let response = check_status(response)?;

        let mut decoder = SseDecoder::new();
        let mut builder = ReplyBuilder::new();
        let mut reader = BufReader::new(response);
        let mut line = Vec::new();
        'stream: loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            for chunk in decoder.feed_bytes(&line) {
                on_chunk(&chunk);
                if !builder.push(chunk) {
                    break 'stream;
                }
            }
        }
        if let Some(chunk) = decoder.finish() {
            on_chunk(&chunk);
            builder.push(chunk);
        }
        if decoder.malformed_count() > 0 {
            warn!(skipped = decoder.malformed_count(), "chat stream had malformed lines");
        }
        Ok(builder.finish())
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|_| TransportError::InvalidEndpoint(self.base.to_string()))
    }
}

/// Parses an endpoint as a base URL that relative paths extend.
fn parse_base(endpoint: &str) -> Result<Url> {
    let mut base =
        Url::parse(endpoint).map_err(|_| TransportError::InvalidEndpoint(endpoint.to_string()))?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(TransportError::InvalidEndpoint(endpoint.to_string()));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Maps non-success statuses to [`TransportError::Server`] with the body's
/// `detail` message when there is one.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(TransportError::Server {
        status: status.as_u16(),
        detail: error_detail(&body),
    })
}

fn error_detail(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        detail: serde_json::Value,
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => Some(detail),
        Ok(ErrorBody { detail }) => Some(detail.to_string()),
        Err(_) => Some(trimmed.to_string()),
    }
}

fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text()?;
    serde_json::from_str(&body).map_err(TransportError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_trailing_slash() {
        let base = parse_base("http://localhost:8000/api").unwrap();
        assert_eq!(base.as_str(), "http://localhost:8000/api/");
        assert_eq!(base.join("analytics/chat").unwrap().path(), "/api/analytics/chat");
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(matches!(
            parse_base("ftp://example.com"),
            Err(TransportError::InvalidEndpoint(_))
        ));
        assert!(parse_base("not a url").is_err());
    }

    #[test]
    fn detail_is_extracted_from_error_bodies() {
        assert_eq!(
            error_detail(r#"{"detail": "Invalid file format"}"#).as_deref(),
            Some("Invalid file format")
        );
        assert_eq!(error_detail("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(error_detail("  "), None);
    }

    #[test]
    fn aggregation_url_escapes_dataset_id() {
        let client = RemoteClient::new("http://localhost:8000", DEFAULT_TIMEOUT).unwrap();
        let mut url = client.url("analytics/").unwrap();
        url.path_segments_mut().unwrap().pop_if_empty().push("a b");
        assert_eq!(url.as_str(), "http://localhost:8000/analytics/a%20b");
    }
}
