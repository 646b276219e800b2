//! Swagger Declare - Command-line tool for generating and serving a Swagger 2.0 document.
//!
//! The binary declares the sample product API, generates its document once, and then
//! prints it, writes it to a file, or serves it together with a viewer.
//!
//! # Usage
//!
//! ```bash
//! swagger-declare [OPTIONS]
//! ```
//!
//! # Examples
//!
//! Print the JSON document:
//! ```bash
//! swagger-declare
//! ```
//!
//! Export YAML to a file:
//! ```bash
//! swagger-declare -f yaml -o swagger.yaml
//! ```
//!
//! Serve the document and viewer assets:
//! ```bash
//! swagger-declare --serve 127.0.0.1:8080 --assets ./swagger-ui -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use swagger_declare::cli;

fn main() -> Result<()> {
    // Parse once to read the verbose flag, validate after the logger is up
    let args_for_verbose = cli::CliArgs::parse();

    let rust_log = std::env::var("RUST_LOG").ok();
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(level) = cli::log_level(args_for_verbose.verbose, rust_log.as_deref()) {
        builder.filter_level(level);
    }
    builder.init();

    info!("Swagger Declare starting...");

    let args = cli::parse_args_from_parsed(args_for_verbose)?;

    cli::run(args)?;

    info!("Swagger document generation completed successfully");

    Ok(())
}
