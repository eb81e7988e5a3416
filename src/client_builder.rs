//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Builder for creating a [`Client`](crate::Client)
//!

use reqwest::{Certificate, Client as ReqwestClient};
use std::default::Default;
use std::env;
use std::result::Result;
use std::time::Duration;

use crate::client::Client;
use crate::connection::HttpConnection;
use crate::error::{ia_err, HBaseError};

/// Builder used to set all the parameters to create a [`Client`].
///
/// ```no_run
/// # use hbase_rest_rust_sdk::Client;
/// # use std::time::Duration;
/// # fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder()
///     .endpoint("http://localhost:8080")?
///     .timeout(Duration::from_secs(10))?
///     // this will override any defaults above
///     .from_environment()?
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    pub(crate) endpoint: String,
    pub(crate) use_https: bool,
    pub(crate) timeout: Option<Duration>,
    pub(crate) add_cert: Option<Certificate>,
    pub(crate) client: Option<ReqwestClient>,
    pub(crate) accept_invalid_certs: bool,
    pub(crate) unavailable_as_absent: bool,
    // For error messaging
    pub(crate) from_environment: bool,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        ClientBuilder {
            endpoint: String::new(),
            use_https: false,
            timeout: None,
            add_cert: None,
            client: None,
            accept_invalid_certs: false,
            unavailable_as_absent: true,
            from_environment: false,
        }
    }
}

impl ClientBuilder {
    /// Create a new ClientBuilder struct.
    ///
    /// The default ClientBuilder has no endpoint. Call [`endpoint()`](ClientBuilder::endpoint())
    /// or [`from_environment()`](ClientBuilder::from_environment()) before building.
    pub fn new() -> Self {
        ClientBuilder::default()
    }
    /// Build a new [`Client`].
    ///
    /// Note: Internally, if the [`ClientBuilder`] contains
    /// a reference to an existing [`reqwest::Client`], it will clone and
    /// use that. Otherwise, it will create a new [`reqwest::Client`] for its
    /// own internal use. See [`reqwest_client()`](ClientBuilder::reqwest_client()).
    pub fn build(self) -> Result<Client<HttpConnection>, HBaseError> {
        Client::new(&self)
    }
    /// Gather configuration settings from the current envrionment.
    ///
    /// This method will scan the process [`standard environment`](std::env::Vars) to collect and
    /// set the configuration parameters. Values set by methods called before this one are
    /// overridden; methods called afterwards override the environment.
    ///
    /// The following environment variables are used:
    ///
    /// | variable | description |
    /// | -------- | ----------- |
    /// | `HBASE_REST_ENDPOINT` | The URL endpoint to use. See [`ClientBuilder::endpoint()`]. |
    /// | `HBASE_REST_TIMEOUT_MS` | Request timeout in milliseconds. See [`ClientBuilder::timeout()`]. |
    /// | `HBASE_REST_CA_CERT` | Path to a certificate file in `pem` format (see [`ClientBuilder::add_cert_from_pemfile()`]). |
    /// | `HBASE_REST_ACCEPT_INVALID_CERTS` | If this is set to `1` or `true`, do not check certificates (see [`ClientBuilder::danger_accept_invalid_certs()`]). |
    /// | `HBASE_REST_UNAVAILABLE_AS_ABSENT` | `1`/`true` or `0`/`false`. See [`ClientBuilder::unavailable_as_absent()`]. |
    ///
    pub fn from_environment(mut self) -> Result<Self, HBaseError> {
        self.from_environment = true;
        if let Ok(val) = env::var("HBASE_REST_ENDPOINT") {
            self = self.endpoint(&val)?;
        }
        if let Ok(val) = env::var("HBASE_REST_TIMEOUT_MS") {
            match val.trim().parse::<u64>() {
                Ok(ms) => self = self.timeout(Duration::from_millis(ms))?,
                Err(_) => {
                    return ia_err!("invalid value '{}' for HBASE_REST_TIMEOUT_MS", val);
                }
            }
        }
        if let Ok(val) = env::var("HBASE_REST_CA_CERT") {
            self = self.add_cert_from_pemfile(&val)?;
        }
        if let Ok(val) = env::var("HBASE_REST_ACCEPT_INVALID_CERTS") {
            if parse_bool(&val) == Some(true) {
                self = self.danger_accept_invalid_certs(true)?;
            }
        }
        if let Ok(val) = env::var("HBASE_REST_UNAVAILABLE_AS_ABSENT") {
            match parse_bool(&val) {
                Some(b) => self = self.unavailable_as_absent(b)?,
                None => {
                    return ia_err!(
                        "invalid value '{}' for HBASE_REST_UNAVAILABLE_AS_ABSENT",
                        val
                    );
                }
            }
        }
        Ok(self)
    }
    /// Set the REST server endpoint to use.
    ///
    /// Examples:
    /// ```text
    ///     // Local REST server, default port
    ///     http://localhost:8080
    ///
    ///     // Secure REST gateway
    ///     https://hbase-rest.example.com:8443
    ///
    ///     // No scheme: http is assumed
    ///     localhost:8080
    /// ```
    pub fn endpoint(mut self, endpoint: &str) -> Result<Self, HBaseError> {
        // normalize to just domain[:port]
        let endpoint = endpoint.trim().trim_end_matches('/');
        if let Some(b) = endpoint.strip_prefix("https://") {
            self.use_https = true;
            self.endpoint = b.to_string();
        } else if let Some(b) = endpoint.strip_prefix("http://") {
            self.use_https = false;
            self.endpoint = b.to_string();
        } else {
            self.endpoint = endpoint.to_string();
        }
        if self.endpoint.is_empty() {
            return ia_err!("endpoint must not be empty");
        }
        Ok(self)
    }
    /// Add a certificate to use for https connections from a file.
    ///
    /// The file must contain an x509 certificate in `PEM` file format.
    pub fn add_cert_from_pemfile(self, pemfile: &str) -> Result<Self, HBaseError> {
        let buf = match std::fs::read(pemfile) {
            Ok(b) => b,
            Err(e) => {
                return ia_err!("error reading pemfile {}: {}", pemfile, e);
            }
        };
        match reqwest::Certificate::from_pem(&buf) {
            Ok(cert) => self.add_cert(cert),
            Err(e) => {
                ia_err!(
                    "error getting certificate from pemfile {}: {}",
                    pemfile,
                    e
                )
            }
        }
    }

    /// Add a certificate to use for https connections.
    pub fn add_cert(mut self, cert: Certificate) -> Result<Self, HBaseError> {
        self.add_cert = Some(cert);
        Ok(self)
    }
    // see https://docs.rs/reqwest/latest/reqwest/struct.ClientBuilder.html#method.danger_accept_invalid_certs
    /// Allow https connection without validating certificates.
    ///
    /// **Warning:** This is only recommended for local testing purposes. Its use is insecure. See [`reqwest::ClientBuilder::danger_accept_invalid_certs()`] for details.
    ///
    pub fn danger_accept_invalid_certs(
        mut self,
        accept_invalid_certs: bool,
    ) -> Result<Self, HBaseError> {
        self.accept_invalid_certs = accept_invalid_certs;
        Ok(self)
    }
    /// Specify a [`reqwest::Client`] to use for all http/s connections.
    ///
    /// By default, the [`Client`] creates an internal [`reqwest::Client`] to use for
    /// all communications. If your application already has a reqwest Client, you can pass that
    /// into the ClientBuilder to avoid creating multiple connection pools.
    pub fn reqwest_client(mut self, client: &ReqwestClient) -> Result<Self, HBaseError> {
        self.client = Some(client.clone());
        Ok(self)
    }
    /// Specify the timeout used for operations.
    ///
    /// This is used for both connection and request timeouts.
    ///
    /// The default timeout is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Result<Self, HBaseError> {
        if timeout.is_zero() {
            return ia_err!("timeout must be greater than zero");
        }
        self.timeout = Some(timeout);
        Ok(self)
    }
    /// Decide whether [`Row::exists()`](crate::Row::exists()) reports an HTTP 503
    /// as "does not exist" rather than as an error. Defaults to `true`.
    ///
    /// See [`Client::unavailable_as_absent()`].
    pub fn unavailable_as_absent(mut self, val: bool) -> Result<Self, HBaseError> {
        self.unavailable_as_absent = val;
        Ok(self)
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}
