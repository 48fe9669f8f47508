//! Authorized requests against an application session.
//!
//! # What this module does NOT handle:
//! - Response classification and body decoding (delegated to [`crate::endpoints`])
//!
//! # Invariants
//! - Without a session every operation fails with `NotLoggedIn` before any I/O.
//! - The method defaults to POST when a payload or file is present, GET otherwise.
//! - Attaching a file forces multipart encoding.

use std::path::{Path, PathBuf};

use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{Instrument, debug, info};

use crate::client::AppClient;
use crate::endpoints::{self, FileAttachment};
use crate::error::{ClientError, Result};

/// How a request payload is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayloadEncoding {
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`, values coerced to strings.
    Form,
    /// `multipart/form-data`, values coerced to strings.
    Multipart,
}

/// One API call relative to the application's API base.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    path: String,
    method: Option<Method>,
    payload: Option<Value>,
    encoding: PayloadEncoding,
    file: Option<FileAttachment>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
}

impl ApiRequest {
    /// A request whose method follows from its payload.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: None,
            payload: None,
            encoding: PayloadEncoding::default(),
            file: None,
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path).method(Method::GET)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).method(Method::POST)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path).method(Method::DELETE)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn json(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Serialize any payload type into the request body.
    pub fn payload<T: Serialize + ?Sized>(self, payload: &T) -> Result<Self> {
        Ok(self.json(to_value(payload)?))
    }

    pub fn form(mut self) -> Self {
        self.encoding = PayloadEncoding::Form;
        self
    }

    pub fn multipart(mut self) -> Self {
        self.encoding = PayloadEncoding::Multipart;
        self
    }

    pub fn file(mut self, file: FileAttachment) -> Self {
        self.file = Some(file);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Extra header sent with this request only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn resolved_method(&self) -> Method {
        match &self.method {
            Some(method) => method.clone(),
            None if self.payload.is_some() || self.file.is_some() => Method::POST,
            None => Method::GET,
        }
    }

    pub fn resolved_encoding(&self) -> PayloadEncoding {
        if self.file.is_some() {
            PayloadEncoding::Multipart
        } else {
            self.encoding
        }
    }

    fn apply(self, http: &reqwest::Client, url: &str) -> Result<reqwest::RequestBuilder> {
        let method = self.resolved_method();
        let encoding = self.resolved_encoding();
        let mut builder = http.request(method, url);

        if !self.query.is_empty() {
            builder = builder.query(&self.query);
        }

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::InvalidRequest(format!("header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::InvalidRequest(format!("header {name}: {e}")))?;
            builder = builder.header(name, value);
        }

        let builder = match encoding {
            PayloadEncoding::Json => match &self.payload {
                Some(payload) => builder.json(payload),
                None => builder,
            },
            PayloadEncoding::Form => {
                let fields = match &self.payload {
                    Some(payload) => endpoints::form_fields(payload)?,
                    None => Vec::new(),
                };
                builder.form(&fields)
            }
            PayloadEncoding::Multipart => {
                let fields = match &self.payload {
                    Some(payload) => endpoints::form_fields(payload)?,
                    None => Vec::new(),
                };
                builder.multipart(endpoints::multipart_form(fields, self.file)?)
            }
        };

        Ok(builder)
    }
}

fn to_value<T: Serialize + ?Sized>(payload: &T) -> Result<Value> {
    serde_json::to_value(payload)
        .map_err(|e| ClientError::InvalidRequest(format!("payload is not serializable: {e}")))
}

impl AppClient {
    /// Send one authorized request and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NotLoggedIn`] without a session (no I/O happens).
    /// - [`ClientError::HttpStatus`] for non-2xx answers.
    /// - [`ClientError::Protocol`] when a 2xx body is not JSON.
    pub async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let session = self.session()?;
        let url = self.api_url(request.path());
        let method = request.resolved_method();

        async move {
            debug!(%method, %url, "sending request");
            let builder = request.apply(&session.http, &url)?;
            let response = endpoints::send_request(builder).await?;
            endpoints::read_json(response).await
        }
        .instrument(self.span.clone())
        .await
    }

    pub async fn request_get(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::get(path)).await
    }

    /// POST a JSON body.
    pub async fn request_post<T: Serialize + ?Sized>(&self, path: &str, payload: &T) -> Result<Value> {
        self.execute(ApiRequest::post(path).json(to_value(payload)?))
            .await
    }

    /// POST a URL-encoded form body.
    pub async fn request_post_form<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Value> {
        self.execute(ApiRequest::post(path).json(to_value(payload)?).form())
            .await
    }

    /// POST a multipart body without a file.
    pub async fn request_post_multipart<T: Serialize + ?Sized>(
        &self,
        path: &str,
        payload: &T,
    ) -> Result<Value> {
        self.execute(ApiRequest::post(path).json(to_value(payload)?).multipart())
            .await
    }

    /// POST a file as part `file` of a multipart body, with optional fields.
    pub async fn request_upload(
        &self,
        path: &str,
        file: FileAttachment,
        payload: Option<&Value>,
    ) -> Result<Value> {
        let mut request = ApiRequest::post(path).file(file);
        if let Some(payload) = payload {
            request = request.json(payload.clone());
        }
        self.execute(request).await
    }

    pub async fn request_del(&self, path: &str) -> Result<Value> {
        self.execute(ApiRequest::delete(path)).await
    }

    /// Download `url` (absolute, or relative to the application host) into
    /// `destination` and return the destination path.
    pub async fn download(&self, url: &str, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let session = self.session()?;
        let url = self.host_url(url)?;
        let destination = destination.as_ref();

        async move {
            debug!(%url, "downloading");
            let response = endpoints::send_request(session.http.get(&url)).await?;
            let written = endpoints::stream_to_file(response, destination).await?;
            info!(%url, bytes = written, path = %destination.display(), "download complete");
            Ok(destination.to_path_buf())
        }
        .instrument(self.span.clone())
        .await
    }
}
