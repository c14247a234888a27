// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the envcfg crate.
//!
//! This example demonstrates:
//! - Loading a YAML file into an environment-aware store
//! - Environment, `default` section and top-level fallback
//! - Using default values for missing keys
//! - Writing entries into an environment at runtime
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use envcfg::prelude::*;
use std::io::Write;

const CONFIG: &str = r#"
default:
  database:
    host: localhost
    port: 5432
  workers: 4
production:
  database:
    host: db.example.com
    port: 5432
app_name: demo
"#;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== envcfg: Basic Usage ===\n");

    let mut file = tempfile::Builder::new().suffix(".yml").tempfile()?;
    file.write_all(CONFIG.as_bytes())?;

    let mut store = FileConfigStore::open_with_environment(file.path(), "production")?;
    println!("Loaded {}\n", store.path().display());

    println!("--- Environment: {} ---", store.environment());
    println!("database = {}", store.get("database")?);
    println!("workers  = {}", store.get_i64("workers")?);
    println!("app_name = {}", store.get_str("app_name")?);

    store.set_environment("development");
    println!("\n--- Environment: {} ---", store.environment());
    println!("database = {}", store.get("database")?);

    println!("\n--- Defaults ---");
    println!("timeout  = {}", store.get_or("timeout", 30));
    println!("verbose  = {}", store.get_or("verbose", false));
    match store.get("timeout") {
        Ok(value) => println!("timeout  = {}", value),
        Err(e) => println!("error    : {}", e),
    }

    println!("\n--- Runtime writes ---");
    store.set_in("workers", 1, "development");
    println!("workers  = {}", store.get_i64("workers")?);

    println!("\n--- Whole tree ---");
    println!("{}", store.print());

    Ok(())
}
