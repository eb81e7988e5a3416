//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use hbase_rest_rust_sdk::encoding::{decode_base64, decode_base64_string, encode_base64};
use hbase_rest_rust_sdk::{
    Cell, Client, ClientBuilder, Connection, GetOptions, HBaseError, HBaseErrorCode, PutCells,
};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

type StoredCell = (String, i64, Vec<u8>);

// A tiny in-memory REST gateway: enough of the path and body handling to
// exercise the client end to end without a running HBase.
#[derive(Debug, Default)]
struct MemoryGateway {
    rows: Mutex<BTreeMap<(String, String), Vec<StoredCell>>>,
    clock: AtomicI64,
}

fn not_found() -> HBaseError {
    HBaseError::from_http_status(404, "Not found")
}

fn split_path(path: &str) -> (String, String, Vec<String>) {
    let path = path.split('?').next().unwrap_or_default();
    let mut parts = path.trim_start_matches('/').splitn(3, '/');
    let table = parts.next().unwrap_or_default().to_string();
    let key = parts.next().unwrap_or_default().to_string();
    let columns = match parts.next() {
        Some(c) if !c.is_empty() => c.split(',').map(String::from).collect(),
        _ => Vec::new(),
    };
    (table, key, columns)
}

fn column_matches(column: &str, specs: &[String]) -> bool {
    specs.is_empty()
        || specs.iter().any(|s| {
            if s.contains(':') {
                s == column
            } else {
                column.split(':').next() == Some(s.as_str())
            }
        })
}

impl Connection for MemoryGateway {
    async fn get(&self, path: &str) -> Result<Value, HBaseError> {
        let (table, key, columns) = split_path(path);
        let rows = self.rows.lock().unwrap();
        let mut out = Vec::new();
        for ((t, k), cells) in rows.iter() {
            let hit = match key.strip_suffix('*') {
                Some(prefix) => k.starts_with(prefix),
                None => *k == key,
            };
            if *t != table || !hit {
                continue;
            }
            let cells: Vec<Value> = cells
                .iter()
                .filter(|(c, _, _)| column_matches(c, &columns))
                .map(|(c, ts, v)| {
                    json!({"column": encode_base64(c), "timestamp": ts, "$": encode_base64(v)})
                })
                .collect();
            if !cells.is_empty() {
                out.push(json!({"key": encode_base64(k), "Cell": cells}));
            }
        }
        if out.is_empty() {
            return Err(not_found());
        }
        Ok(json!({ "Row": out }))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, HBaseError> {
        let (table, _, _) = split_path(path);
        let mut rows = self.rows.lock().unwrap();
        for row in body["Row"].as_array().cloned().unwrap_or_default() {
            let key = decode_base64_string(row["key"].as_str().unwrap_or_default())?;
            let stored = rows.entry((table.clone(), key)).or_default();
            for cell in row["Cell"].as_array().cloned().unwrap_or_default() {
                let column = decode_base64_string(cell["column"].as_str().unwrap_or_default())?;
                let ts = match cell["timestamp"].as_str() {
                    Some(t) => t.parse::<i64>().map_err(|_| {
                        HBaseError::from_http_status(400, "bad timestamp")
                    })?,
                    None => self.clock.fetch_add(1, Ordering::Relaxed) + 1000,
                };
                let value = decode_base64(cell["$"].as_str().unwrap_or_default())?;
                stored.retain(|(c, t, _)| !(*c == column && *t == ts));
                stored.push((column, ts, value));
            }
        }
        Ok(Value::Null)
    }

    async fn delete(&self, path: &str) -> Result<(), HBaseError> {
        let (table, key, columns) = split_path(path);
        let mut rows = self.rows.lock().unwrap();
        let id = (table, key);
        if columns.is_empty() {
            return rows.remove(&id).map(|_| ()).ok_or_else(not_found);
        }
        let cells = rows.get_mut(&id).ok_or_else(not_found)?;
        cells.retain(|(c, _, _)| !column_matches(c, &columns));
        if cells.is_empty() {
            rows.remove(&id);
        }
        Ok(())
    }
}

#[tokio::test]
async fn put_get_exists_delete() -> Result<(), Box<dyn Error>> {
    let client = Client::with_connection(MemoryGateway::default());
    let row = client.row("users", "user_1");

    assert!(!row.exists(None).await?);
    assert!(row.put_column("info:name", "jane").await?);
    assert!(
        row.put_columns(vec!["info:city", "info:zip"], vec!["Anytown", "12345"])
            .await?
    );
    assert!(row.exists(None).await?);
    assert!(row.exists(Some("info:city".into())).await?);
    assert!(!row.exists(Some("info:missing".into())).await?);

    let cells = row.get(Some("info".into()), GetOptions::new()).await?;
    assert_eq!(cells.len(), 3);
    let name = cells.iter().find(|c| c.column == "info:name").unwrap();
    assert_eq!(name.value_str(), Some("jane"));
    assert!(name.key.is_none());
    assert!(name.datetime().is_some());

    let err = row
        .get(Some("info:missing".into()), GetOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.code, HBaseErrorCode::NotFound);

    assert!(row.delete(Some("info:zip".into())).await?);
    assert!(!row.exists(Some("info:zip".into())).await?);
    assert!(row.delete(None).await?);
    assert!(!row.exists(None).await?);
    Ok(())
}

#[tokio::test]
async fn batch_put_and_glob_get() -> Result<(), Box<dyn Error>> {
    let client = Client::with_connection(MemoryGateway::default());
    client
        .row("events", None)
        .put(PutCells::cells(vec![
            Cell::new("cf:c1", "one").row_key("evt_1").timestamp(1),
            Cell::new("cf:c2", "two").row_key("evt_1").timestamp(2),
            Cell::new("cf:c1", "three").row_key("evt_2").timestamp(3),
            Cell::new("cf:c1", "other").row_key("other").timestamp(4),
        ]))
        .await?;

    let cells = client
        .row("events", "evt_*")
        .get(Some("cf:c1".into()), GetOptions::new())
        .await?;
    let seen: Vec<(Option<String>, String)> = cells
        .into_iter()
        .map(|c| (c.key.clone(), String::from_utf8(c.value).unwrap()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (Some("evt_1".to_string()), "one".to_string()),
            (Some("evt_2".to_string()), "three".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn binary_values_round_trip() -> Result<(), Box<dyn Error>> {
    let client = Client::with_connection(MemoryGateway::default());
    let row = client.row("blobs", "b1");
    let data: Vec<u8> = (0..=255u8).collect();
    let put = PutCells::column("d:raw", &data).with_timestamps(&[1285942515955])?;
    row.put(put).await?;
    let cells = row.get(Some("d:raw".into()), GetOptions::new()).await?;
    assert_eq!(cells[0].value, data);
    assert_eq!(cells[0].timestamp, Some(1285942515955));
    Ok(())
}

#[test]
fn builder_requires_endpoint() {
    let err = ClientBuilder::new().build().unwrap_err();
    assert_eq!(err.code, HBaseErrorCode::IllegalArgument);
    assert!(Client::builder().endpoint("  ").is_err());
    assert!(Client::builder()
        .timeout(Duration::from_secs(0))
        .is_err());
}

#[test]
fn builder_normalizes_endpoint() -> Result<(), Box<dyn Error>> {
    let client = Client::builder().endpoint("localhost:8080/")?.build()?;
    assert_eq!(client.connection().endpoint(), "http://localhost:8080");
    assert!(client.treats_unavailable_as_absent());

    let client = Client::builder()
        .endpoint("https://hbase-rest.example.com:8443")?
        .timeout(Duration::from_secs(5))?
        .unavailable_as_absent(false)?
        .build()?;
    assert_eq!(
        client.connection().endpoint(),
        "https://hbase-rest.example.com:8443"
    );
    assert!(!client.treats_unavailable_as_absent());
    assert!(!client.row("t", "r").clone().is_glob());
    Ok(())
}

// The only test that touches HBASE_REST_* variables, so it does not race other tests.
#[test]
fn builder_from_environment() -> Result<(), Box<dyn Error>> {
    std::env::set_var("HBASE_REST_ENDPOINT", "http://envhost:9090");
    std::env::set_var("HBASE_REST_TIMEOUT_MS", "2500");
    std::env::set_var("HBASE_REST_UNAVAILABLE_AS_ABSENT", "false");
    let client = Client::builder().from_environment()?.build()?;
    assert_eq!(client.connection().endpoint(), "http://envhost:9090");
    assert!(!client.treats_unavailable_as_absent());

    std::env::set_var("HBASE_REST_TIMEOUT_MS", "soon");
    let err = Client::builder().from_environment().unwrap_err();
    assert_eq!(err.code, HBaseErrorCode::IllegalArgument);

    std::env::remove_var("HBASE_REST_ENDPOINT");
    std::env::remove_var("HBASE_REST_TIMEOUT_MS");
    std::env::remove_var("HBASE_REST_UNAVAILABLE_AS_ABSENT");
    Ok(())
}

// Runs against a live REST gateway when HBASE_REST_SMOKE_ENDPOINT is set, for example:
//   HBASE_REST_SMOKE_ENDPOINT=http://localhost:8080 RUST_LOG=debug cargo test smoke_test
// The table "rust_sdk_test" with column family "cf" must exist.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn smoke_test() -> Result<(), Box<dyn Error>> {
    let endpoint = match std::env::var("HBASE_REST_SMOKE_ENDPOINT") {
        Ok(e) => e,
        Err(_) => return Ok(()),
    };
    // Set up a tracing subscriber to see output based on RUST_LOG environment setting
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_ansi(false)
        .compact()
        .try_init();

    let client = Client::builder()
        .endpoint(&endpoint)?
        .timeout(Duration::from_secs(10))?
        .build()?;
    let row = client.row("rust_sdk_test", "smoke_row");
    row.put_columns(["cf:a", "cf:b"], ["1", "2"]).await?;
    let cells = row.get(Some("cf".into()), GetOptions::new().versions(1)).await?;
    println!("cells={:?}", cells);
    assert!(cells.len() >= 2);
    assert!(row.exists(Some("cf:a".into())).await?);
    row.delete(None).await?;
    assert!(!row.exists(None).await?);
    Ok(())
}
