//! Generic authorized requests: get, post, upload, delete and download.
//!
//! Paths are relative to the selected application's API base. Payloads are
//! parsed by the caller before any session is opened.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use nexus_client::{ApiRequest, AppClient, FileAttachment};
use serde_json::{Value, json};

use super::print_json;

pub async fn get(client: &AppClient, path: &str, query: Vec<(String, String)>) -> Result<()> {
    let request = query
        .into_iter()
        .fold(ApiRequest::get(path), |request, (key, value)| {
            request.query(key, value)
        });
    let res = client
        .execute(request)
        .await
        .with_context(|| format!("Failed to GET {path}"))?;
    print_json(&res)
}

pub async fn post(
    client: &AppClient,
    path: &str,
    payload: Value,
    form: bool,
    multipart: bool,
) -> Result<()> {
    let mut request = ApiRequest::post(path).json(payload);
    if form {
        request = request.form();
    } else if multipart {
        request = request.multipart();
    }

    let res = client
        .execute(request)
        .await
        .with_context(|| format!("Failed to POST {path}"))?;
    print_json(&res)
}

pub async fn upload(
    client: &AppClient,
    path: &str,
    file: &Path,
    payload: Option<Value>,
) -> Result<()> {
    let attachment = FileAttachment::from_path(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let res = client
        .request_upload(path, attachment, payload.as_ref())
        .await
        .with_context(|| format!("Failed to upload {} to {path}", file.display()))?;
    print_json(&res)
}

pub async fn delete(client: &AppClient, path: &str) -> Result<()> {
    let res = client
        .request_del(path)
        .await
        .with_context(|| format!("Failed to DELETE {path}"))?;
    print_json(&res)
}

pub async fn download(client: &AppClient, url: &str, output: PathBuf) -> Result<()> {
    let saved = client
        .download(url, &output)
        .await
        .with_context(|| format!("Failed to download {url}"))?;
    print_json(&json!({ "saved": saved.display().to_string() }))
}
