//! Payload encoding for form and multipart bodies.
//!
//! Form and multipart bodies carry strings only. Every payload value is
//! coerced: strings verbatim, numbers and booleans by their textual form,
//! arrays and objects as compact JSON. Null fields are dropped.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// A file sent as the `file` part of a multipart body.
#[derive(Debug, Clone)]
pub struct FileAttachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl FileAttachment {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Read a local file; the part's file name is the path's final component.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("{} has no file name", path.display()))
            })?;

        Ok(Self::new(file_name, bytes))
    }
}

/// String form of one payload value, or `None` for null.
pub fn coerce_form_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Flatten a JSON object payload into form fields.
pub fn form_fields(payload: &Value) -> Result<Vec<(String, String)>> {
    let object = payload.as_object().ok_or_else(|| {
        ClientError::InvalidRequest("form and multipart payloads must be JSON objects".to_string())
    })?;

    Ok(object
        .iter()
        .filter_map(|(key, value)| coerce_form_value(value).map(|v| (key.clone(), v)))
        .collect())
}

/// Build a multipart body from form fields and an optional file part named `file`.
pub fn multipart_form(fields: Vec<(String, String)>, file: Option<FileAttachment>) -> Result<Form> {
    let mut form = fields
        .into_iter()
        .fold(Form::new(), |form, (key, value)| form.text(key, value));

    if let Some(file) = file {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(mime) = file.mime {
            part = part
                .mime_str(&mime)
                .map_err(|e| ClientError::InvalidRequest(format!("invalid MIME type: {e}")))?;
        }
        form = form.part("file", part);
    }

    Ok(form)
}
