// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field-name matching example for the hexini crate.
//!
//! Configuration keys are matched to struct fields by splitting the field
//! name into words and accepting any of the usual spellings, ignoring case.
//! A serde name starting with `=` accepts only its exact spelling.
//!
//! To run this example:
//! ```bash
//! cargo run --example field_names
//! ```

use hexini::prelude::*;
use hexini::FieldName;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Pool {
    max_connections: u32,
    #[serde(rename = "idleTimeoutSecs")]
    idle_timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
struct Legacy {
    #[serde(rename = "=AppName")]
    app_name: String,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexini: Field Names ===\n");

    println!("--- Spellings Accepted for a Field ---");
    for field in ["max_connections", "HTTPServerPort", "idleTimeoutSecs"] {
        let name = FieldName::new(field);
        println!("{:<18} words {:?}", field, name.words());
        println!("{:<18} keys  {:?}", "", name.variants());
    }

    println!("\n--- Decoding With Different Spellings ---");
    for text in [
        "max_connections = 10\nidle_timeout_secs = 30",
        "MaxConnections = 20\nIdle Timeout Secs = 60",
        "max-connections = 30\nidleTimeoutSecs = 90",
    ] {
        let pool: Pool = hexini::from_str(text)?;
        println!("{:?}", pool);
    }

    println!("\n--- Exact Names Take Priority ---");
    let pool: Pool = hexini::from_str("MaxConnections = 1\nmax_connections = 2")?;
    println!("max_connections = {} (the exact key wins)", pool.max_connections);

    println!("\n--- Exact-Only Names ---");
    for text in ["app_name = ignored", "AppName = legacy"] {
        let legacy: Legacy = hexini::from_str(text)?;
        println!("{:<20} -> {:?}", text, legacy.app_name);
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
