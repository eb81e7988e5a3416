//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

use crate::error::user_agent;
use crate::error::{ia_err, HBaseError};

/// Trait for the transport used by a [`Client`](crate::Client).
///
/// Paths are REST resource paths such as `/table/row/cf:col` (see
/// [`encode_path()`](crate::encoding::encode_path())). A non-success HTTP
/// response must be returned as an [`HBaseError`] whose `status` is set, so
/// that callers can distinguish "not found" (404) from other failures.
///
/// The crate provides [`HttpConnection`]. Other implementations can be
/// supplied with [`Client::with_connection()`](crate::Client::with_connection()).
pub trait Connection: Send + Sync + Debug {
    /// Issue a GET and return the parsed JSON body.
    fn get(&self, path: &str) -> impl Future<Output = Result<Value, HBaseError>> + Send;

    /// Issue a PUT with a JSON body. The returned value is not interpreted by
    /// [`Row`](crate::Row); implementations may return `Value::Null`.
    fn put(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<Value, HBaseError>> + Send;

    /// Issue a DELETE. The response body is ignored.
    fn delete(&self, path: &str) -> impl Future<Output = Result<(), HBaseError>> + Send;
}

/// [`Connection`] over http/s, using [`reqwest`].
///
/// Created by [`ClientBuilder::build()`](crate::ClientBuilder::build()).
#[derive(Debug, Clone)]
pub struct HttpConnection {
    pub(crate) client: reqwest::Client,
    pub(crate) endpoint: String,
    pub(crate) timeout: Duration,
}

impl HttpConnection {
    pub(crate) fn new(client: reqwest::Client, endpoint: &str, timeout: Duration) -> Self {
        HttpConnection {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Get the base endpoint, such as `http://localhost:8080`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    // `path` comes from encode_path(), so reserved characters of keys and
    // columns are already escaped and cannot start a query or fragment.
    pub(crate) fn url(&self, path: &str) -> Result<Url, HBaseError> {
        if !path.starts_with('/') {
            return ia_err!("REST path must start with '/': {}", path);
        }
        Ok(Url::parse(&format!("{}{}", self.endpoint, path))?)
    }

    fn headers(&self) -> Result<HeaderMap, HBaseError> {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert("User-Agent", HeaderValue::from_str(user_agent())?);
        Ok(headers)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        parse_body: bool,
    ) -> Result<Option<Value>, HBaseError> {
        let url = self.url(path)?;
        debug!("{} {}", method, url);
        let mut req = self
            .client
            .request(method.clone(), url)
            .timeout(self.timeout)
            .headers(self.headers()?);
        if let Some(b) = body {
            // sets Content-Type: application/json
            req = req.json(b);
        }
        let resp = req.send().await?;
        let status = resp.status();
        trace!("{} {} returned status {}", method, path, status);
        if !status.is_success() {
            let content = resp.text().await?;
            return Err(HBaseError::from_http_status(
                status.as_u16(),
                &format!(
                    "got unexpected http status: {}, response text: {}",
                    status, content
                ),
            ));
        }
        if !parse_body || status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = resp.bytes().await?;
        trace!("read {} bytes of response body", bytes.len());
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

impl Connection for HttpConnection {
    async fn get(&self, path: &str) -> Result<Value, HBaseError> {
        Ok(self
            .send(Method::GET, path, None, true)
            .await?
            .unwrap_or(Value::Null))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, HBaseError> {
        Ok(self
            .send(Method::PUT, path, Some(body), false)
            .await?
            .unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<(), HBaseError> {
        // delete responses carry no cell set
        self.send(Method::DELETE, path, None, false).await?;
        Ok(())
    }
}
