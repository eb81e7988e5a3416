//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
//! Base64 and REST path helpers.
//!
//! The HBase REST interface carries row keys, column names and cell values as
//! base64 inside JSON bodies, and addresses rows with paths of the form
//! `/{table}/{key}[/{columns}][?start=..&end=..&v=..]`.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::HBaseError;
use crate::error::HBaseErrorCode::BadProtocolMessage;

/// Encode arbitrary bytes as standard (padded) base64.
pub fn encode_base64<T: AsRef<[u8]>>(data: T) -> String {
    BASE64_STANDARD.encode(data)
}

/// Decode a standard base64 string into raw bytes.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, HBaseError> {
    Ok(BASE64_STANDARD.decode(data)?)
}

/// Decode a base64 string that must hold UTF-8 text, such as a row key or column name.
pub fn decode_base64_string(data: &str) -> Result<String, HBaseError> {
    let bytes = decode_base64(data)?;
    String::from_utf8(bytes).map_err(|e| {
        HBaseError::new(
            BadProtocolMessage,
            &format!("base64 value is not valid utf-8: {}", e),
        )
    })
}

// Characters left as-is inside a path segment. `:` separates family and
// qualifier, `*` is the glob suffix. Everything else that is not alphanumeric,
// including `/`, `,`, `?`, `#`, `%` and `+`, is percent-encoded.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b':')
    .remove(b'*')
    .remove(b'@');

fn encode_segment(s: &str) -> String {
    utf8_percent_encode(s, SEGMENT).to_string()
}

/// Build the REST resource path for a row.
///
/// `columns`, when non-empty, is appended as one segment joined with `,`.
/// `start` and `end` bound the cell timestamps; they are written to the query
/// string first, followed by `params` in the order given.
///
/// Table, key and each column are percent-encoded, so a key such as `a/b` or
/// `a#b` addresses exactly that row:
/// ```
/// use hbase_rest_rust_sdk::encoding::encode_path;
/// assert_eq!(encode_path("t", "a/b", None, None, None, &[]), "/t/a%2Fb");
/// ```
pub fn encode_path(
    table: &str,
    key: &str,
    columns: Option<&[String]>,
    start: Option<i64>,
    end: Option<i64>,
    params: &[(&str, String)],
) -> String {
    let mut path = format!("/{}/{}", encode_segment(table), encode_segment(key));
    if let Some(cols) = columns {
        if !cols.is_empty() {
            let cols: Vec<String> = cols.iter().map(|c| encode_segment(c)).collect();
            path.push('/');
            path.push_str(&cols.join(","));
        }
    }
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    let mut has_query = false;
    if let Some(s) = start {
        query.append_pair("start", &s.to_string());
        has_query = true;
    }
    if let Some(e) = end {
        query.append_pair("end", &e.to_string());
        has_query = true;
    }
    for (k, v) in params {
        query.append_pair(k, v);
        has_query = true;
    }
    if has_query {
        path.push('?');
        path.push_str(&query.finish());
    }
    path
}

/// Returns true if `key` designates a multi-row scan (suffix glob).
pub(crate) fn is_glob(key: &str) -> bool {
    key.ends_with('*')
}
