//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Value types used to read and write HBase cells.
use chrono::{DateTime, Utc};

use crate::error::{ia_err, HBaseError};

/// A single HBase cell: the value stored at (row key, column, timestamp).
///
/// Cells are returned by [`Row::get()`](crate::Row::get()) and may be supplied to
/// [`Row::put_cells()`](crate::Row::put_cells()). The `key` field is only set on
/// returned cells when the row key was a glob (for example `"user_*"`); when
/// writing, a cell without a `key` is written to the row key of the [`Row`](crate::Row).
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub key: Option<String>,
    /// `"family"` or `"family:qualifier"`
    pub column: String,
    /// Milliseconds since the epoch.
    pub timestamp: Option<i64>,
    pub value: Vec<u8>,
}

impl Cell {
    /// Create a new cell for `column` holding `value`.
    pub fn new<V: AsRef<[u8]>>(column: &str, value: V) -> Cell {
        Cell {
            column: column.to_string(),
            value: value.as_ref().to_vec(),
            ..Default::default()
        }
    }

    /// Set the row key this cell belongs to.
    pub fn row_key(mut self, key: &str) -> Cell {
        self.key = Some(key.to_string());
        self
    }

    /// Set the timestamp (version) of this cell, in milliseconds since the epoch.
    pub fn timestamp(mut self, ts: i64) -> Cell {
        self.timestamp = Some(ts);
        self
    }

    /// Get the value as a string slice, if it is valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }

    /// Get the timestamp as a UTC date/time.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        self.timestamp.and_then(DateTime::from_timestamp_millis)
    }

    /// Get the column family: the part of the column name before `:`.
    pub fn family(&self) -> &str {
        match self.column.split_once(':') {
            Some((f, _)) => f,
            None => &self.column,
        }
    }

    /// Get the column qualifier: the part of the column name after `:`, if any.
    pub fn qualifier(&self) -> Option<&str> {
        self.column.split_once(':').map(|(_, q)| q)
    }
}

/// An ordered list of column specifications.
///
/// Each entry is either a column family (`"cf"`) or a family and qualifier
/// (`"cf:name"`). Most operations accept anything that converts into `Columns`:
/// ```
/// use hbase_rest_rust_sdk::Columns;
/// let one: Columns = "cf:a".into();
/// let many: Columns = vec!["cf:a", "cf:b"].into();
/// assert_eq!(many.len(), 2);
/// # assert_eq!(one.len(), 1);
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Columns(Vec<String>);

impl Columns {
    pub fn new() -> Columns {
        Columns(Vec::new())
    }

    /// Append a column specification.
    pub fn column(mut self, column: &str) -> Columns {
        self.0.push(column.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub(crate) fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for Columns {
    fn from(c: &str) -> Self {
        Columns(vec![c.to_string()])
    }
}

impl From<String> for Columns {
    fn from(c: String) -> Self {
        Columns(vec![c])
    }
}

impl From<&String> for Columns {
    fn from(c: &String) -> Self {
        Columns(vec![c.clone()])
    }
}

impl From<Vec<String>> for Columns {
    fn from(c: Vec<String>) -> Self {
        Columns(c)
    }
}

impl From<Vec<&str>> for Columns {
    fn from(c: Vec<&str>) -> Self {
        Columns(c.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Columns {
    fn from(c: &[&str]) -> Self {
        Columns(c.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Columns {
    fn from(c: [&str; N]) -> Self {
        Columns(c.iter().map(|s| s.to_string()).collect())
    }
}

/// Optional parameters for [`Row::get()`](crate::Row::get()).
///
/// ```
/// use hbase_rest_rust_sdk::GetOptions;
/// let opts = GetOptions::new().start(1285942515900).versions(3);
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GetOptions {
    pub(crate) start: Option<i64>,
    pub(crate) end: Option<i64>,
    pub(crate) versions: Option<u32>,
}

impl GetOptions {
    pub fn new() -> GetOptions {
        GetOptions::default()
    }

    /// Only return cells with a timestamp greater than or equal to `start` (milliseconds).
    pub fn start(mut self, start: i64) -> GetOptions {
        self.start = Some(start);
        self
    }

    /// Only return cells with a timestamp lower than `end` (milliseconds).
    pub fn end(mut self, end: i64) -> GetOptions {
        self.end = Some(end);
        self
    }

    /// Return at most `v` versions of each cell.
    pub fn versions(mut self, v: u32) -> GetOptions {
        self.versions = Some(v);
        self
    }
}

/// The data written by a [`Row::put()`](crate::Row::put()) call.
///
/// There are two shapes:
/// - [`PutCells::ColumnValues`]: parallel lists of columns, values and optional
///   timestamps, all written to the row key of the [`Row`](crate::Row).
/// - [`PutCells::Cells`]: a list of [`Cell`]s, each of which may name its own
///   row key. This allows writing to many rows in one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutCells {
    ColumnValues {
        columns: Vec<String>,
        values: Vec<Vec<u8>>,
        timestamps: Option<Vec<i64>>,
    },
    Cells(Vec<Cell>),
}

impl PutCells {
    /// Write one value into one column.
    pub fn column<V: AsRef<[u8]>>(column: &str, value: V) -> PutCells {
        PutCells::ColumnValues {
            columns: vec![column.to_string()],
            values: vec![value.as_ref().to_vec()],
            timestamps: None,
        }
    }

    /// Write several columns at once. `columns` and `values` must have the same length.
    pub fn columns<C, I, V>(columns: C, values: I) -> Result<PutCells, HBaseError>
    where
        C: Into<Columns>,
        I: IntoIterator<Item = V>,
        V: AsRef<[u8]>,
    {
        let columns = columns.into().into_vec();
        let values: Vec<Vec<u8>> = values.into_iter().map(|v| v.as_ref().to_vec()).collect();
        if columns.len() != values.len() {
            return ia_err!(
                "columns count must match values count: {} columns, {} values",
                columns.len(),
                values.len()
            );
        }
        Ok(PutCells::ColumnValues {
            columns,
            values,
            timestamps: None,
        })
    }

    /// Write a list of cells, possibly spanning several rows.
    pub fn cells(cells: Vec<Cell>) -> PutCells {
        PutCells::Cells(cells)
    }

    /// Set one timestamp per column. Only valid for [`PutCells::ColumnValues`].
    pub fn with_timestamps(self, ts: &[i64]) -> Result<PutCells, HBaseError> {
        match self {
            PutCells::ColumnValues {
                columns, values, ..
            } => {
                if ts.len() != columns.len() {
                    return ia_err!(
                        "timestamps count must match columns count: {} timestamps, {} columns",
                        ts.len(),
                        columns.len()
                    );
                }
                Ok(PutCells::ColumnValues {
                    columns,
                    values,
                    timestamps: Some(ts.to_vec()),
                })
            }
            PutCells::Cells(_) => {
                ia_err!("timestamps must be set on each cell when writing a list of cells")
            }
        }
    }

    // The enum fields are public, so shapes built by hand are checked again before sending.
    pub(crate) fn validate(&self) -> Result<(), HBaseError> {
        match self {
            PutCells::ColumnValues {
                columns,
                values,
                timestamps,
            } => {
                if columns.is_empty() {
                    return ia_err!("at least one column is required");
                }
                if columns.len() != values.len() {
                    return ia_err!(
                        "columns count must match values count: {} columns, {} values",
                        columns.len(),
                        values.len()
                    );
                }
                if let Some(ts) = timestamps {
                    if ts.len() != columns.len() {
                        return ia_err!(
                            "timestamps count must match columns count: {} timestamps, {} columns",
                            ts.len(),
                            columns.len()
                        );
                    }
                }
            }
            PutCells::Cells(cells) => {
                if cells.is_empty() {
                    return ia_err!("at least one cell is required");
                }
                for c in cells {
                    if c.column.is_empty() {
                        return ia_err!("cell is missing a column name");
                    }
                }
            }
        }
        Ok(())
    }
}
