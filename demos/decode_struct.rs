// SPDX-License-Identifier: MIT OR Apache-2.0

//! Decoding example for the hexini crate.
//!
//! This example demonstrates:
//! - Decoding a configuration into nested structs with serde
//! - Durations, timestamps, lists and enums as field types
//! - Zero values for missing fields
//! - Errors that name the offending section and key
//!
//! To run this example:
//! ```bash
//! cargo run --example decode_struct
//! ```

use std::time::Duration;

use hexini::prelude::*;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Mode {
    Development,
    Production,
}

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    port: u16,
    read_timeout: Duration,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Maintenance {
    window_start: Timestamp,
    retry_delays: Vec<Duration>,
}

#[derive(Debug, Deserialize)]
struct AppConfig {
    name: String,
    mode: Mode,
    workers: u32,
    server: Server,
    maintenance: Maintenance,
    limits: Option<Limits>,
}

#[derive(Debug, Deserialize)]
struct Limits {
    #[allow(dead_code)]
    max_body: u64,
}

const INI: &str = "\
name = storefront
mode = production

[server]
host = 0.0.0.0
port = 8443
ReadTimeout = 30s
allowed-origins = https://example.com, https://admin.example.com

[maintenance]
window start = 2024-03-10 02:00
retry delays = 1s, 5s, 30s
";

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexini: Decoding Structs ===\n");

    let config: AppConfig = hexini::from_str(INI)?;

    println!("--- Decoded Configuration ---");
    println!("name:        {}", config.name);
    println!("mode:        {:?}", config.mode);
    println!("workers:     {} (missing, zero value)", config.workers);
    println!("server:      {}:{}", config.server.host, config.server.port);
    println!("timeout:     {:?}", config.server.read_timeout);
    println!("origins:     {:?}", config.server.allowed_origins);
    println!("maintenance: {}", config.maintenance.window_start);
    println!("retries:     {:?}", config.maintenance.retry_delays);
    println!("limits:      {:?} (no [limits] section)", config.limits);

    if let Mode::Development = config.mode {
        println!("\nRunning in development mode");
    }

    println!("\n--- Decode Errors ---");
    let broken = INI.replace("port = 8443", "port = 84430");
    match hexini::from_str::<AppConfig>(&broken) {
        Ok(_) => println!("✗ unexpectedly decoded"),
        Err(e) => {
            println!("✓ {}", e);
            println!("  overflow: {}", e.root_cause().is_overflow_error());
        }
    }

    match hexini::parse_str("port = 80")?.decode::<Vec<u16>>() {
        Ok(_) => println!("✗ unexpectedly decoded"),
        Err(e) => println!("✓ {}", e),
    }

    println!("\n=== Example Complete ===");

    Ok(())
}
