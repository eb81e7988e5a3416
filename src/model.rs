//
// Copyright (c) 2024, 2025 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use serde::de::{self, Deserializer, Visitor};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

// JSON shape of the HBase REST "CellSet" envelope:
// { "Row": [ { "key": b64, "Cell": [ { "column": b64, "timestamp": .., "$": b64 } ] } ] }

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellSet {
    #[serde(rename = "Row", default)]
    pub(crate) rows: Vec<RowModel>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RowModel {
    pub(crate) key: String,
    #[serde(rename = "Cell", default)]
    pub(crate) cells: Vec<CellModel>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CellModel {
    pub(crate) column: String,
    // Sent as a string; the server answers with a number.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub(crate) timestamp: Option<String>,
    #[serde(rename = "$", default)]
    pub(crate) value: String,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimestampVisitor;

    impl<'de> Visitor<'de> for TimestampVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a timestamp as an integer or a string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(TimestampVisitor)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_option(TimestampVisitor)
}
