//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! HBase REST Rust SDK
//!
//! This is a Rust client for the [HBase](https://hbase.apache.org) REST gateway
//! (also known as "Stargate"). It provides row-level operations: reading cells,
//! writing cells, testing for existence and deleting rows or columns.
//!
//! This SDK supplies and uses Rust `async` methods throughout. The default transport is
//! [reqwest](https://crates.io/crates/reqwest), which requires a
//! [tokio](https://crates.io/crates/tokio) runtime. There is currently no blocking support.
//!
//! The general flow for an application is:
//! - Create a [`ClientBuilder`] with all needed parameters
//! - Create a [`Client`] from the [`ClientBuilder`] that will be used throughout the application, across all threads
//! - Get a [`Row`] from the [`Client`] for a table and row key, and call [`Row::get()`],
//!   [`Row::put()`], [`Row::exists()`] or [`Row::delete()`]
//!
//! ## Simple Example
//! ```no_run
//! use hbase_rest_rust_sdk::{Client, GetOptions};
//! use std::error::Error;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let client = Client::builder()
//!         .endpoint("http://localhost:8080")?
//!         .build()?;
//!     let row = client.row("users", "user_1");
//!     row.put_column("info:name", "jane").await?;
//!     let cells = row.get(Some("info:name".into()), GetOptions::new()).await?;
//!     println!("name={:?}", cells[0].value_str());
//!     Ok(())
//! }
//! ```
//!
//! ## Row keys
//!
//! A [`Row`] is created for a table and a row key. The key may be:
//! - a literal row key (`"user_1"`),
//! - a glob: a key ending in `*` (`"user_*"`). [`Row::get()`] then returns cells from
//!   every matching row, with [`Cell::key`] set to the row each cell came from,
//! - `None`, to write cells for arbitrary rows in one request with [`Row::put_cells()`].
//!   Each [`Cell`] then names its own row key.
//!
//! ## Columns
//!
//! Columns are written `"family"` or `"family:qualifier"`. Operations taking columns
//! accept anything that converts into [`Columns`]: a `&str`, a `String`, or a `Vec`,
//! slice or array of them.
//!
//! ## Missing rows and columns
//!
//! [`Row::get()`] returns an [`HBaseError`] with code [`HBaseErrorCode::NotFound`] when the
//! row or column does not exist. [`Row::exists()`] reports the same condition as `Ok(false)`.
//!
//! ## Configuring the SDK
//!
//! [`ClientBuilder`] takes the REST endpoint, a timeout, optional TLS settings and an
//! optional existing [`reqwest::Client`]. [`ClientBuilder::from_environment()`] reads the
//! same settings from `HBASE_REST_*` environment variables.
//!
//! A custom transport (for example, one adding authentication headers) can be used by
//! implementing [`Connection`] and calling [`Client::with_connection()`].
//!
//! ## Logging
//!
//! The SDK logs through [tracing](https://crates.io/crates/tracing). Requests are logged at
//! `debug` level and responses at `trace` level.

pub(crate) mod client_builder;
pub use crate::client_builder::ClientBuilder;

pub(crate) mod client;
pub use crate::client::Client;

pub(crate) mod connection;
pub use crate::connection::{Connection, HttpConnection};

pub mod encoding;

#[cfg(test)]
pub(crate) mod encoding_tests;

pub(crate) mod error;
pub use crate::error::{HBaseError, HBaseErrorCode};

pub(crate) mod model;
pub(crate) mod row;
pub use crate::row::Row;


pub mod types;
pub use crate::types::{Cell, Columns, GetOptions, PutCells};
