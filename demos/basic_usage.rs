// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the hexini crate.
//!
//! This example demonstrates:
//! - Parsing INI text into a `Configuration`
//! - Reading raw values from the global section and named sections
//! - Typed views over raw values (int, bool, duration, list)
//! - Reporting syntax errors with their line number
//! - Rendering a configuration back to canonical INI text
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use hexini::prelude::*;

const INI: &str = r#"
; application settings
app name = "My Application"
debug = on

[database]
host = localhost
port = 5432            # default postgres port
timeout = 2.5s

[api]
endpoints = /users, /orders , /health
greeting = "  hello; world  "
"#;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexini: Basic Usage ===\n");

    let config = hexini::parse_str(INI)?;
    println!(
        "Parsed {} sections (including the global section).\n",
        config.len()
    );

    // Example 1: Raw string values
    println!("--- Example 1: String Values ---");
    match config.get(GLOBAL_SECTION, "app name") {
        Some(name) => println!("✓ app name: {}", name),
        None => println!("✗ app name not found"),
    }
    if let Some(greeting) = config.get("api", "greeting") {
        println!("✓ api.greeting keeps its quoted whitespace: {:?}", greeting);
    }

    // Example 2: Typed views
    println!("\n--- Example 2: Typed Values ---");
    if let Some(database) = config.section("database") {
        match database.value("port").map(ConfigValue::as_u16) {
            Some(Ok(port)) => println!("✓ database.port: {} (as u16)", port),
            Some(Err(e)) => println!("✗ database.port failed to convert: {}", e),
            None => println!("✗ database.port not found"),
        }
        if let Some(Ok(timeout)) = database.value("timeout").map(ConfigValue::as_duration) {
            println!("✓ database.timeout: {:?} (as Duration)", timeout);
        }
    }
    let debug: Option<bool> = config.get_as(GLOBAL_SECTION, "debug")?;
    println!("✓ debug: {:?} (as bool)", debug);

    // Example 3: Lists
    println!("\n--- Example 3: Lists ---");
    let endpoints: Option<Vec<String>> = config.get_as("api", "endpoints")?;
    println!("✓ api.endpoints: {:?}", endpoints.unwrap_or_default());

    // Example 4: Syntax errors
    println!("\n--- Example 4: Syntax Errors ---");
    for broken in ["[server]\nport = 80\nport = 81", "[server", "key \"value\""] {
        match hexini::parse_str(broken) {
            Ok(_) => println!("✗ unexpectedly parsed {:?}", broken),
            Err(e) => println!("✓ {:?} -> {}", broken, e),
        }
    }

    // Example 5: Canonical output
    println!("\n--- Example 5: Formatting ---");
    print!("{}", config);

    println!("\n=== Example Complete ===");

    Ok(())
}
