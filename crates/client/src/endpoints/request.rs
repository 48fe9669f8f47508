//! Sending requests and classifying responses.
//!
//! Invariants:
//! - Non-2xx responses become `ClientError::HttpStatus` carrying the full body.
//! - A 2xx body that is not JSON becomes `ClientError::Protocol` carrying the body.
//! - Nothing is retried.

use std::path::Path;

use futures::{Stream, StreamExt};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, PRAGMA, USER_AGENT};
use reqwest::{RequestBuilder, Response};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// `Accept` header sent with every request.
pub const ACCEPT_VALUE: &str = "application/json, text/plain, */*";

/// `User-Agent` header value, `nexus-client/<version>`.
pub fn user_agent() -> String {
    format!("nexus-client/{}", env!("CARGO_PKG_VERSION"))
}

/// Headers attached to every session request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    if let Ok(agent) = HeaderValue::from_str(&user_agent()) {
        headers.insert(USER_AGENT, agent);
    }
    headers
}

/// Send a request, turning non-success statuses into `HttpStatus`.
pub async fn send_request(builder: RequestBuilder) -> Result<Response> {
    let response = builder.send().await?;
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(status_error(response).await)
    }
}

pub(crate) async fn status_error(response: Response) -> ClientError {
    let status = response.status().as_u16();
    let url = response.url().to_string();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    debug!(status, %url, "request failed");
    ClientError::HttpStatus { status, url, body }
}

/// Decode a successful response as JSON.
///
/// An empty body is not JSON and fails like any other unparsable body.
pub async fn read_json(response: Response) -> Result<serde_json::Value> {
    let url = response.url().to_string();
    let body = response.text().await?;

    serde_json::from_str(&body).map_err(|e| ClientError::Protocol {
        url,
        message: format!("response is not valid JSON: {e}"),
        body,
    })
}

/// Stream a successful response body into `destination`, chunk by chunk.
///
/// Returns the number of bytes written. On failure the partial file is
/// removed and the original error returned.
pub async fn stream_to_file(response: Response, destination: &Path) -> Result<u64> {
    write_stream(response.bytes_stream(), destination).await
}

async fn write_stream<S, B, E>(stream: S, destination: &Path) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    ClientError: From<E>,
{
    let mut file = tokio::fs::File::create(destination).await?;

    match copy_chunks(stream, &mut file).await {
        Ok(written) => Ok(written),
        Err(err) => {
            drop(file);
            if let Err(remove_err) = tokio::fs::remove_file(destination).await {
                warn!(
                    path = %destination.display(),
                    error = %remove_err,
                    "could not remove partial download"
                );
            }
            Err(err)
        }
    }
}

async fn copy_chunks<S, B, E>(stream: S, file: &mut tokio::fs::File) -> Result<u64>
where
    S: Stream<Item = std::result::Result<B, E>>,
    B: AsRef<[u8]>,
    ClientError: From<E>,
{
    let mut stream = std::pin::pin!(stream);
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        file.write_all(bytes).await?;
        written += bytes.len() as u64;
    }

    file.flush().await?;
    Ok(written)
}
