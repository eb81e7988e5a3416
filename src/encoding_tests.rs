//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use crate::connection::HttpConnection;
use crate::encoding::*;
use crate::error::{HBaseError, HBaseErrorCode};
use crate::model::{CellModel, CellSet, RowModel};
use serde_json::json;
use std::error::Error;
use std::result::Result;
use std::time::Duration;

#[test]
fn test_base64() -> Result<(), Box<dyn Error>> {
    assert_eq!(encode_base64("my_row"), "bXlfcm93");
    assert_eq!(encode_base64("cf:c1"), "Y2Y6YzE=");
    assert_eq!(encode_base64(""), "");
    assert_eq!(decode_base64("bXlfcm93")?, b"my_row".to_vec());
    assert_eq!(decode_base64_string("Y2Y6YzE=")?, "cf:c1");
    let binary = vec![0u8, 255, 1, 254, 10];
    assert_eq!(decode_base64(&encode_base64(&binary))?, binary);
    Ok(())
}

#[test]
fn test_base64_errors() {
    let err = decode_base64("not base64!").unwrap_err();
    assert_eq!(err.code, HBaseErrorCode::BadProtocolMessage);
    // 0xff 0xfe is not utf-8
    let err = decode_base64_string(&encode_base64([0xffu8, 0xfe])).unwrap_err();
    assert_eq!(err.code, HBaseErrorCode::BadProtocolMessage);
}

#[test]
fn test_encode_path() {
    assert_eq!(
        encode_path("my_table", "my_row", None, None, None, &[]),
        "/my_table/my_row"
    );
    let one = vec!["cf:c1".to_string()];
    assert_eq!(
        encode_path("my_table", "my_row", Some(one.as_slice()), None, None, &[]),
        "/my_table/my_row/cf:c1"
    );
    let two = vec!["cf:c1".to_string(), "cf2".to_string()];
    assert_eq!(
        encode_path("my_table", "key_*", Some(two.as_slice()), None, None, &[]),
        "/my_table/key_*/cf:c1,cf2"
    );
    // empty column list adds nothing
    let none: Vec<String> = Vec::new();
    assert_eq!(
        encode_path("t", "r", Some(none.as_slice()), None, None, &[]),
        "/t/r"
    );
}

#[test]
fn test_encode_path_reserved_characters() {
    let col = vec!["b".to_string()];
    let slash_key = encode_path("t", "a/b", None, None, None, &[]);
    assert_eq!(slash_key, "/t/a%2Fb");
    assert_ne!(
        slash_key,
        encode_path("t", "a", Some(col.as_slice()), None, None, &[])
    );
    assert_eq!(encode_path("t", "a#b", None, None, None, &[]), "/t/a%23b");
    assert_eq!(encode_path("t", "a?b", None, None, None, &[]), "/t/a%3Fb");
    assert_eq!(encode_path("t", "50%", None, None, None, &[]), "/t/50%25");
    assert_eq!(encode_path("t", "é", None, None, None, &[]), "/t/%C3%A9");
    let cols = vec!["cf:a,b".to_string(), "cf:c".to_string()];
    assert_eq!(
        encode_path("t", "key_*", Some(cols.as_slice()), None, None, &[]),
        "/t/key_*/cf:a%2Cb,cf:c"
    );
}

#[test]
fn test_http_connection_url_keeps_whole_key() -> Result<(), Box<dyn Error>> {
    let conn = HttpConnection::new(
        reqwest::Client::new(),
        "http://localhost:8080/",
        Duration::from_secs(5),
    );
    let url = conn.url(&encode_path("t", "a#b", None, None, None, &[]))?;
    assert_eq!(url.path(), "/t/a%23b");
    assert_eq!(url.fragment(), None);

    let url = conn.url(&encode_path("t", "a?b", None, None, None, &[("v", "1".to_string())]))?;
    assert_eq!(url.path(), "/t/a%3Fb");
    assert_eq!(url.query(), Some("v=1"));

    let url = conn.url(&encode_path("t", "a/b", None, None, None, &[]))?;
    assert_eq!(url.path_segments().map(|s| s.count()), Some(2));
    assert_eq!(url.as_str(), "http://localhost:8080/t/a%2Fb");
    Ok(())
}

#[test]
fn test_encode_path_query() {
    let cols = vec!["cf".to_string()];
    assert_eq!(
        encode_path(
            "t",
            "r",
            Some(cols.as_slice()),
            Some(1285942515900),
            Some(1285942722246),
            &[("v", "2".to_string())]
        ),
        "/t/r/cf?start=1285942515900&end=1285942722246&v=2"
    );
    assert_eq!(
        encode_path("t", "r", None, None, Some(10), &[]),
        "/t/r?end=10"
    );
    assert_eq!(
        encode_path("t", "r", None, None, None, &[("v", "1".to_string())]),
        "/t/r?v=1"
    );
}

#[test]
fn test_glob() {
    assert!(is_glob("key_*"));
    assert!(is_glob("*"));
    assert!(!is_glob("key_1"));
    assert!(!is_glob("ke*y"));
}

#[test]
fn test_cell_set_wire_format() -> Result<(), Box<dyn Error>> {
    let set = CellSet {
        rows: vec![RowModel {
            key: encode_base64("r1"),
            cells: vec![
                CellModel {
                    column: encode_base64("cf:a"),
                    timestamp: Some("42".to_string()),
                    value: encode_base64("v1"),
                },
                CellModel {
                    column: encode_base64("cf:b"),
                    timestamp: None,
                    value: encode_base64("v2"),
                },
            ],
        }],
    };
    assert_eq!(
        serde_json::to_value(&set)?,
        json!({"Row": [{"key": "cjE=", "Cell": [
            {"column": "Y2Y6YQ==", "timestamp": "42", "$": "djE="},
            {"column": "Y2Y6Yg==", "$": "djI="}
        ]}]})
    );
    Ok(())
}

#[test]
fn test_cell_set_response_timestamps() -> Result<(), Box<dyn Error>> {
    // servers send numeric timestamps; strings and null are accepted too
    let set: CellSet = serde_json::from_value(json!({"Row": [{"key": "cjE=", "Cell": [
        {"column": "Y2Y6YQ==", "timestamp": 1285942722246i64, "$": "djE="},
        {"column": "Y2Y6Yg==", "timestamp": "17", "$": "djI="},
        {"column": "Y2Y6Yw==", "timestamp": null, "$": "djM="},
        {"column": "Y2Y6ZA==", "$": "djQ="}
    ]}]}))?;
    let ts: Vec<Option<String>> = set.rows[0]
        .cells
        .iter()
        .map(|c| c.timestamp.clone())
        .collect();
    assert_eq!(
        ts,
        vec![
            Some("1285942722246".to_string()),
            Some("17".to_string()),
            None,
            None
        ]
    );
    Ok(())
}

#[test]
fn test_error_from_status() {
    let e = HBaseError::from_http_status(404, "not found");
    assert_eq!(e.code, HBaseErrorCode::NotFound);
    assert_eq!(e.status, Some(404));
    assert!(e.is_not_found());
    let e = HBaseError::from_http_status(503, "unavailable");
    assert_eq!(e.code, HBaseErrorCode::ServiceUnavailable);
    let e = HBaseError::from_http_status(418, "teapot");
    assert_eq!(e.code, HBaseErrorCode::UnknownError);
    assert_eq!(e.status, Some(418));
    // local codes are never produced from a status
    let e = HBaseError::from_http_status(1, "odd");
    assert_eq!(e.code, HBaseErrorCode::UnknownError);
    assert!(format!("{}", e).contains("status=1"));
    // there is no code for success
    assert!(HBaseErrorCode::try_from(0).is_err());
    assert_eq!(HBaseErrorCode::try_from(1).ok(), Some(HBaseErrorCode::IllegalArgument));
}
