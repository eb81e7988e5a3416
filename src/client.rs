//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use std::result::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::client_builder::ClientBuilder;
use crate::connection::{Connection, HttpConnection};
use crate::error::{ia_err, HBaseError};
use crate::row::Row;

/// **The main HBase REST client**.
///
/// This should be created once and used throughout the application lifetime,
/// across all threads.
///
/// Note: there is no need to enclose this struct in an `Rc` or [`Arc`], as it uses an
/// [`Arc`] internally, so calling `.clone()` on this struct will always return a
/// client sharing the same underlying connection.
///
/// The type parameter is the [`Connection`] used to reach the REST server. It
/// defaults to [`HttpConnection`], created by [`Client::builder()`].
#[derive(Debug)]
pub struct Client<C: Connection = HttpConnection> {
    // Use an inner Arc so cloning keeps the same connection
    pub(crate) inner: Arc<C>,
    pub(crate) unavailable_as_absent: bool,
}

impl<C: Connection> Clone for Client<C> {
    fn clone(&self) -> Self {
        Client {
            inner: self.inner.clone(),
            unavailable_as_absent: self.unavailable_as_absent,
        }
    }
}

impl Client<HttpConnection> {
    /// Create a new [`ClientBuilder`].
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    // Create the new Client based on builder configuration
    pub(crate) fn new(b: &ClientBuilder) -> Result<Client<HttpConnection>, HBaseError> {
        if b.endpoint.is_empty() {
            if b.from_environment {
                return ia_err!("can't determine HBase REST endpoint: set HBASE_REST_ENDPOINT");
            }
            return ia_err!("can't determine HBase REST endpoint: call ClientBuilder::endpoint()");
        }
        // default timeout to 30 seconds
        let timeout = b.timeout.unwrap_or(Duration::new(30, 0));
        let c = {
            if let Some(c) = &b.client {
                c.clone()
            } else {
                let mut cb = reqwest::Client::builder()
                    .timeout(timeout)
                    .connect_timeout(timeout)
                    .connection_verbose(true);
                if let Some(cert) = &b.add_cert {
                    cb = cb.add_root_certificate(cert.clone());
                }
                if b.accept_invalid_certs {
                    cb = cb.danger_accept_invalid_certs(true);
                }
                cb.build()?
            }
        };
        // normalize endpoint to "http[s]://{endpoint}"
        let mut ep = String::from("http");
        if b.use_https {
            ep.push('s');
        }
        ep.push_str("://");
        ep.push_str(&b.endpoint);
        debug!(
            "Creating new Client: endpoint={}, timeout={:?}, unavailable_as_absent={}",
            ep, timeout, b.unavailable_as_absent
        );
        Ok(Client {
            inner: Arc::new(HttpConnection::new(c, &ep, timeout)),
            unavailable_as_absent: b.unavailable_as_absent,
        })
    }
}

impl<C: Connection> Client<C> {
    /// Create a client over an existing [`Connection`].
    ///
    /// This is the way to plug in a transport other than [`HttpConnection`],
    /// for example one that adds authentication headers or a test double.
    pub fn with_connection(connection: C) -> Client<C> {
        Client {
            inner: Arc::new(connection),
            unavailable_as_absent: true,
        }
    }

    /// Decide whether [`Row::exists()`] reports an HTTP 503 (service unavailable)
    /// as "does not exist" (`Ok(false)`) rather than as an error.
    ///
    /// The default is `true`, for compatibility with existing HBase REST clients.
    /// Since a 503 usually means the gateway is temporarily down, applications that
    /// need to tell the two apart should set this to `false`.
    pub fn unavailable_as_absent(mut self, val: bool) -> Self {
        self.unavailable_as_absent = val;
        self
    }

    /// Returns the current 503 handling for [`Row::exists()`]. See [`Client::unavailable_as_absent()`].
    pub fn treats_unavailable_as_absent(&self) -> bool {
        self.unavailable_as_absent
    }

    /// Get the underlying connection.
    pub fn connection(&self) -> &C {
        &self.inner
    }

    /// Get a [`Row`] for `key` in `table`.
    ///
    /// `key` may be a row key, a glob (a key ending in `*`, for multi-row reads)
    /// or `None`, for writing cells that each carry their own row key:
    /// ```no_run
    /// # use hbase_rest_rust_sdk::Client;
    /// # fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = Client::builder().endpoint("http://localhost:8080")?.build()?;
    /// let row = client.row("my_table", "my_row");
    /// let rows = client.row("my_table", "my_key_*");
    /// let batch = client.row("my_table", None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn row<'k>(&self, table: &str, key: impl Into<Option<&'k str>>) -> Row<C> {
        Row::new(self, table, key)
    }
}
