//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use indexmap::IndexMap;
use serde_json::Value;
use std::result::Result;
use tracing::{debug, warn};

use crate::client::Client;
use crate::connection::Connection;
use crate::encoding::{decode_base64, encode_base64, encode_path, is_glob};
use crate::error::HBaseErrorCode::{BadProtocolMessage, NotFound, ServiceUnavailable};
use crate::error::{ia_err, HBaseError};
use crate::model::{CellModel, CellSet, RowModel};
use crate::types::{Cell, Columns, GetOptions, PutCells};

// Path segment used when writing cells for several rows through a Row with no key.
// The REST server takes row keys from the body in that case.
pub(crate) const FALSE_ROW_KEY: &str = "___false-row-key___";

/// Access to the cells of one row, of a set of rows matching a glob, or of
/// arbitrary rows (for batch writes).
///
/// A `Row` is a cheap, immutable descriptor: create one wherever needed with
/// [`Client::row()`] or [`Row::new()`].
///
/// ```no_run
/// use hbase_rest_rust_sdk::{Client, GetOptions, PutCells};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = Client::builder().endpoint("http://localhost:8080")?.build()?;
/// let row = client.row("my_table", "my_row");
/// row.put_column("my_cf:my_column", "my value").await?;
/// let cells = row.get(Some("my_cf".into()), GetOptions::new().versions(2)).await?;
/// for cell in &cells {
///     println!("{} @ {:?} = {:?}", cell.column, cell.timestamp, cell.value_str());
/// }
/// if row.exists(Some("my_cf:my_column".into())).await? {
///     row.delete(Some("my_cf:my_column".into())).await?;
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Row<C: Connection> {
    pub(crate) client: Client<C>,
    pub(crate) table: String,
    pub(crate) key: Option<String>,
    pub(crate) unavailable_as_absent: bool,
}

impl<C: Connection> Clone for Row<C> {
    fn clone(&self) -> Self {
        Row {
            client: self.client.clone(),
            table: self.table.clone(),
            key: self.key.clone(),
            unavailable_as_absent: self.unavailable_as_absent,
        }
    }
}

impl<C: Connection> Row<C> {
    /// Create a new `Row` for `key` in `table`. See [`Client::row()`].
    pub fn new<'k>(client: &Client<C>, table: &str, key: impl Into<Option<&'k str>>) -> Row<C> {
        Row {
            client: client.clone(),
            table: table.to_string(),
            key: key.into().map(|k| k.to_string()),
            unavailable_as_absent: client.treats_unavailable_as_absent(),
        }
    }

    /// Override the client setting for HTTP 503 handling in [`Row::exists()`] for this row.
    pub fn unavailable_as_absent(mut self, val: bool) -> Row<C> {
        self.unavailable_as_absent = val;
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Returns true if the row key ends with `*` and so addresses several rows.
    pub fn is_glob(&self) -> bool {
        self.key.as_deref().map(is_glob).unwrap_or(false)
    }

    fn require_key(&self, op: &str) -> Result<&str, HBaseError> {
        match self.key.as_deref() {
            Some(k) if !k.is_empty() => Ok(k),
            _ => ia_err!("{} requires a row key (table {})", op, self.table),
        }
    }

    /// Retrieve cells.
    ///
    /// `columns` optionally restricts the result to column families and/or
    /// columns. `options` bounds the timestamps and the number of versions.
    ///
    /// Cells are returned in server order, flattened across rows. If the row key
    /// is a glob (ends with `*`), each cell's `key` is set to the row it came from;
    /// otherwise `key` is `None`.
    ///
    /// Retrieving a row or column that does not exist returns an error whose code
    /// is [`HBaseErrorCode::NotFound`](crate::HBaseErrorCode::NotFound):
    /// ```no_run
    /// # use hbase_rest_rust_sdk::{Client, GetOptions, HBaseErrorCode};
    /// # async fn run(client: Client) -> Result<(), Box<dyn std::error::Error>> {
    /// match client.row("my_table", "my_row").get(Some("cf:missing".into()), GetOptions::new()).await {
    ///     Ok(cells) => println!("{} cells", cells.len()),
    ///     Err(e) if e.code == HBaseErrorCode::NotFound => println!("no such column"),
    ///     Err(e) => return Err(e.into()),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get(
        &self,
        columns: Option<Columns>,
        options: GetOptions,
    ) -> Result<Vec<Cell>, HBaseError> {
        let key = self.require_key("get")?;
        let glob = is_glob(key);
        let mut params = Vec::new();
        if let Some(v) = options.versions {
            params.push(("v", v.to_string()));
        }
        let path = encode_path(
            &self.table,
            key,
            columns.as_ref().map(|c| c.as_slice()),
            options.start,
            options.end,
            &params,
        );
        debug!("get: path={}", path);
        let data = self.client.inner.get(&path).await?;
        decode_cells(data, glob)
    }

    /// Insert or update cells. See [`PutCells`] for the accepted shapes.
    ///
    /// With [`PutCells::ColumnValues`], all values go to this row's key. With
    /// [`PutCells::Cells`], each cell goes to its own `key`, or to this row's key
    /// if it has none; cells for the same key are sent together, in the order given.
    ///
    /// Argument errors (such as mismatched column and value counts) are returned
    /// before any request is sent. Returns `Ok(true)` once the server accepted the cells.
    pub async fn put(&self, data: PutCells) -> Result<bool, HBaseError> {
        data.validate()?;
        let (path, body) = match data {
            PutCells::ColumnValues {
                columns,
                values,
                timestamps,
            } => {
                let key = self.require_key("put of column values")?;
                let cells = columns
                    .iter()
                    .zip(values.iter())
                    .enumerate()
                    .map(|(i, (column, value))| CellModel {
                        column: encode_base64(column),
                        timestamp: timestamps.as_ref().map(|ts| ts[i].to_string()),
                        value: encode_base64(value),
                    })
                    .collect();
                let body = CellSet {
                    rows: vec![RowModel {
                        key: encode_base64(key),
                        cells,
                    }],
                };
                let path = encode_path(
                    &self.table,
                    key,
                    Some(columns.as_slice()),
                    None,
                    None,
                    &[],
                );
                (path, body)
            }
            PutCells::Cells(cells) => {
                let body = self.group_cells(&cells)?;
                let url_key = self.key.as_deref().unwrap_or(FALSE_ROW_KEY);
                let path = encode_path(&self.table, url_key, None, None, None, &[]);
                (path, body)
            }
        };
        debug!("put: path={} rows={}", path, body.rows.len());
        let body = serde_json::to_value(&body)?;
        self.client.inner.put(&path, &body).await?;
        Ok(true)
    }

    // One REST row per distinct key, in order of first appearance.
    fn group_cells(&self, cells: &[Cell]) -> Result<CellSet, HBaseError> {
        let mut groups: IndexMap<&str, Vec<&Cell>> = IndexMap::new();
        for cell in cells {
            let key = match cell.key.as_deref().or(self.key.as_deref()) {
                Some(k) => k,
                None => {
                    return ia_err!(
                        "cell for column {} has no row key and the row has no default key",
                        cell.column
                    );
                }
            };
            groups.entry(key).or_default().push(cell);
        }
        let rows = groups
            .into_iter()
            .map(|(key, group)| RowModel {
                key: encode_base64(key),
                cells: group
                    .into_iter()
                    .map(|c| CellModel {
                        column: encode_base64(&c.column),
                        timestamp: c.timestamp.map(|t| t.to_string()),
                        value: encode_base64(&c.value),
                    })
                    .collect(),
            })
            .collect();
        Ok(CellSet { rows })
    }

    /// Write one value into one column of this row.
    pub async fn put_column<V: AsRef<[u8]>>(
        &self,
        column: &str,
        value: V,
    ) -> Result<bool, HBaseError> {
        self.put(PutCells::column(column, value)).await
    }

    /// Write several columns of this row. `columns` and `values` must have the same length.
    pub async fn put_columns<Cs, I, V>(&self, columns: Cs, values: I) -> Result<bool, HBaseError>
    where
        Cs: Into<Columns>,
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let data = PutCells::columns(columns, values)?;
        self.put(data).await
    }

    /// Write a list of cells, possibly for several rows.
    pub async fn put_cells(&self, cells: Vec<Cell>) -> Result<bool, HBaseError> {
        self.put(PutCells::Cells(cells)).await
    }

    /// Test if this row, or some of its columns, exist.
    ///
    /// A "not found" (404) response is reported as `Ok(false)`. A "service
    /// unavailable" (503) response is also reported as `Ok(false)` unless
    /// [`Client::unavailable_as_absent(false)`](Client::unavailable_as_absent()) or
    /// [`Row::unavailable_as_absent(false)`](Row::unavailable_as_absent()) was set,
    /// in which case it is returned as an error. All other errors are returned.
    pub async fn exists(&self, columns: Option<Columns>) -> Result<bool, HBaseError> {
        let key = self.require_key("exists")?;
        let path = encode_path(
            &self.table,
            key,
            columns.as_ref().map(|c| c.as_slice()),
            None,
            None,
            &[],
        );
        debug!("exists: path={}", path);
        match self.client.inner.get(&path).await {
            Ok(Value::Bool(false)) => Ok(false),
            Ok(_) => Ok(true),
            Err(e) if e.code == NotFound => Ok(false),
            Err(e) if e.code == ServiceUnavailable && self.unavailable_as_absent => {
                warn!(
                    "exists: treating service unavailable (503) as absent for {}: {}",
                    path, e
                );
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete this row, or some of its columns.
    ///
    /// With `None`, the whole row is deleted; otherwise exactly the listed
    /// columns. An empty `Columns` is rejected rather than treated as the
    /// whole row. Returns `Ok(true)` on success.
    pub async fn delete(&self, columns: Option<Columns>) -> Result<bool, HBaseError> {
        let key = self.require_key("delete")?;
        if columns.as_ref().is_some_and(|c| c.is_empty()) {
            return ia_err!(
                "delete of row {} in table {} given an empty column list",
                key,
                self.table
            );
        }
        let path = encode_path(
            &self.table,
            key,
            columns.as_ref().map(|c| c.as_slice()),
            None,
            None,
            &[],
        );
        debug!("delete: path={}", path);
        self.client.inner.delete(&path).await?;
        Ok(true)
    }
}

// Binary keys and qualifiers are legal in HBase; invalid utf-8 is replaced
// rather than failing the whole read.
fn decode_text(data: &str) -> Result<String, HBaseError> {
    Ok(String::from_utf8_lossy(&decode_base64(data)?).into_owned())
}

// Flatten Row[].Cell[] into a list of cells. Row keys are only decoded for globs.
pub(crate) fn decode_cells(data: Value, glob: bool) -> Result<Vec<Cell>, HBaseError> {
    if data.is_null() {
        return Ok(Vec::new());
    }
    let set: CellSet = serde_json::from_value(data)?;
    let mut cells = Vec::new();
    for row in set.rows {
        let key = if glob {
            Some(decode_text(&row.key)?)
        } else {
            None
        };
        for c in row.cells {
            let timestamp = match c.timestamp {
                Some(t) => match t.parse::<i64>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        return Err(HBaseError::new(
                            BadProtocolMessage,
                            &format!("invalid cell timestamp '{}'", t),
                        ));
                    }
                },
                None => None,
            };
            cells.push(Cell {
                key: key.clone(),
                column: decode_text(&c.column)?,
                timestamp,
                value: decode_base64(&c.value)?,
            });
        }
    }
    Ok(cells)
}
