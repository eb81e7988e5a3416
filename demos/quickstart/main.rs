//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//

// This is an example program showing the row operations of the HBase REST
// client. It writes a few cells, reads them back (one row, then several rows
// through a glob key), tests for existence and deletes what it wrote.
//
// The table must already exist, for example from the hbase shell:
//    create 'testusers', 'info'
//
// To run this example against a REST gateway on localhost:8080:
//    cargo run --example quickstart
//
// for extra output:
//    RUST_LOG=debug cargo run --example quickstart
//
// or, for a LOT of tracing output:
//    RUST_LOG=trace cargo run --example quickstart

use hbase_rest_rust_sdk::{Cell, Client, GetOptions, HBaseError, HBaseErrorCode, PutCells};
use std::error::Error;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::info;

// This method shows various ways to configure a Client.
fn get_client() -> Result<Client, HBaseError> {
    // Note: later methods called on this builder will override earlier methods.
    // This allows for setting desired defaults that can be overridden by, for example,
    // .from_environment().
    Client::builder()
        .endpoint("http://localhost:8080")?
        //
        // For a secure gateway with a private CA:
        // .endpoint("https://hbase-rest.my.company.com:8443")?
        // .add_cert_from_pemfile("/path/to/certificate.pem")?
        //
        // To report 503 responses from exists() as errors:
        // .unavailable_as_absent(false)?
        //
        // Override any of the above from HBASE_REST_* environment variables
        .from_environment()?
        //
        // Optional: set a different default timeout (default is 30 seconds)
        .timeout(Duration::from_secs(15))?
        //
        // Build the client
        .build()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Set up a tracing subscriber to see output based on RUST_LOG environment setting
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_ansi(false)
        .compact()
        .init();

    // Create a client. This should be used throughout the program
    info!("Creating new client...");
    let client = get_client()?;

    // Write a single column
    let row = client.row("testusers", "user_10");
    row.put_column("info:name", "jane").await?;

    // Write several columns at once, with explicit timestamps
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as i64;
    let data = PutCells::columns(["info:city", "info:zip"], ["Anytown", "12345"])?
        .with_timestamps(&[now, now])?;
    row.put(data).await?;

    // Read the row back
    let cells = row.get(Some("info".into()), GetOptions::new()).await?;
    for cell in &cells {
        println!(
            "{} {} = {:?}",
            cell.column,
            cell.timestamp.unwrap_or_default(),
            cell.value_str()
        );
    }

    // Write cells for several rows in one request
    let mut batch = Vec::new();
    for i in 20..30 {
        batch.push(Cell::new("info:name", "somename").row_key(&format!("user_{}", i)));
    }
    client.row("testusers", None).put_cells(batch).await?;

    // Read several rows through a glob row key; each cell carries its row key
    let cells = client
        .row("testusers", "user_2*")
        .get(Some("info:name".into()), GetOptions::new().versions(1))
        .await?;
    println!("glob read returned {} cells", cells.len());
    for cell in &cells {
        println!("{:?} {} = {:?}", cell.key, cell.column, cell.value_str());
    }

    // A missing column is reported as NotFound by get(), and as false by exists()
    match row
        .get(Some("info:missing".into()), GetOptions::new())
        .await
    {
        Err(e) if e.code == HBaseErrorCode::NotFound => println!("info:missing not found"),
        Err(e) => return Err(e.into()),
        Ok(c) => println!("unexpected cells: {:?}", c),
    }
    println!(
        "exists(info:zip)={}",
        row.exists(Some("info:zip".into())).await?
    );

    // Remove one column, then whole rows
    row.delete(Some("info:zip".into())).await?;
    row.delete(None).await?;
    for i in 20..30 {
        client
            .row("testusers", format!("user_{}", i).as_str())
            .delete(None)
            .await?;
    }
    println!("exists(user_10)={}", row.exists(None).await?);

    Ok(())
}
