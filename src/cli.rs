use crate::server::{DocumentServer, ServerConfig, DEFAULT_DOC_PATH, DEFAULT_UI_PATH};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Swagger Declare - Generate and serve a Swagger 2.0 document for the sample product API
#[derive(Parser, Debug)]
#[command(name = "swagger-declare")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// API title placed in the document info
    #[arg(long = "title", default_value = "Swagger API")]
    pub title: String,

    /// API version placed in the document info
    #[arg(long = "api-version", default_value = "1.0")]
    pub api_version: String,

    /// Base path of the documented API
    #[arg(long = "base-path", default_value = "/")]
    pub base_path: String,

    /// Serve the document and viewer on this address instead of exiting
    #[arg(short = 's', long = "serve", value_name = "ADDR")]
    pub serve: Option<SocketAddr>,

    /// Directory with the viewer's static files, served under the UI path
    #[arg(long = "assets", value_name = "DIR")]
    pub assets_dir: Option<PathBuf>,

    /// Path the JSON document is served at
    #[arg(long = "doc-path", default_value = DEFAULT_DOC_PATH)]
    pub doc_path: String,

    /// Path that redirects to the viewer
    #[arg(long = "ui-path", default_value = DEFAULT_UI_PATH)]
    pub ui_path: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Global log level to apply on top of `RUST_LOG`, if any
///
/// `--verbose` always turns on debug output. Otherwise a non-empty `RUST_LOG` is left in
/// charge, and without one the level is `Info`.
pub fn log_level(verbose: bool, rust_log: Option<&str>) -> Option<log::LevelFilter> {
    if verbose {
        Some(log::LevelFilter::Debug)
    } else if rust_log.is_some_and(|filters| !filters.trim().is_empty()) {
        None
    } else {
        Some(log::LevelFilter::Info)
    }
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliArgs> {
    let args = CliArgs::parse();
    parse_args_from_parsed(args)
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    for (flag, path) in [
        ("--base-path", &args.base_path),
        ("--doc-path", &args.doc_path),
        ("--ui-path", &args.ui_path),
    ] {
        if !path.starts_with('/') {
            anyhow::bail!("{} must start with '/': {}", flag, path);
        }
    }

    if let Some(ref assets) = args.assets_dir {
        if args.serve.is_none() {
            anyhow::bail!("--assets requires --serve");
        }
        if !assets.is_dir() {
            anyhow::bail!("Assets path is not a directory: {}", assets.display());
        }
    }

    info!("Output format: {:?}", args.output_format);
    if let Some(ref output) = args.output_path {
        info!("Output file: {}", output.display());
    } else if args.serve.is_none() {
        info!("Output: stdout");
    }
    if let Some(addr) = args.serve {
        info!("Serve address: {}", addr);
    }

    Ok(args)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::demo;
    use crate::generator::DocumentGenerator;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting Swagger document generation...");

    // Step 1: Declare the API
    let security = demo::security_catalog();
    let tags = demo::tag_catalog();
    let registry = demo::registry(&security).context("Failed to declare endpoints")?;
    info!("Declared {} endpoints", registry.len());

    // Step 2: Generate once; nothing is written or served if this fails
    let document = DocumentGenerator::new(&args.title, &args.api_version)
        .with_base_path(&args.base_path)
        .generate(&registry, &security, &tags)
        .context("Failed to generate the Swagger document")?;

    // Step 3: Export
    let render = || -> Result<String> {
        info!("Serializing to {:?} format...", args.output_format);
        Ok(match args.output_format {
            OutputFormat::Yaml => serialize_yaml(&document)?,
            OutputFormat::Json => serialize_json(&document)?,
        })
    };
    if let Some(output_path) = &args.output_path {
        write_to_file(&render()?, output_path)?;
        info!("Successfully wrote Swagger document to {}", output_path.display());
    } else if args.serve.is_none() {
        println!("{}", render()?);
    }

    info!("Summary:");
    info!("  - Paths: {}", document.paths.len());
    info!("  - Definitions: {}", document.definitions.len());
    info!("  - Security schemes: {}", document.security_definitions.len());
    info!("  - Tags: {}", document.tags.len());

    // Step 4: Serve
    if let Some(addr) = args.serve {
        let config = ServerConfig {
            doc_path: args.doc_path.clone(),
            ui_path: args.ui_path.clone(),
            assets_dir: args.assets_dir.clone(),
        };
        let server = DocumentServer::new(&document, config)?;

        let runtime =
            tokio::runtime::Runtime::new().context("Failed to start the tokio runtime")?;
        runtime
            .block_on(server.serve(addr))
            .with_context(|| format!("Server on {} stopped with an error", addr))?;
    }

    Ok(())
}
