//! OpenAPI from comments - Command-line tool for generating OpenAPI documentation.
//!
//! Reads one annotated Lua source file and writes one OpenAPI document built
//! from its route comments and its components block.
//!
//! # Usage
//!
//! ```bash
//! openapi-from-comments --input <FILE> --output <FILE> [OPTIONS]
//! ```
//!
//! # Examples
//!
//! Generate JSON documentation:
//! ```bash
//! openapi-from-comments -i app/routes.lua -o docs/openapi.json
//! ```
//!
//! Generate YAML documentation with a custom title:
//! ```bash
//! openapi-from-comments -i app/routes.lua -o docs/openapi.yaml -f yaml --title "Search API"
//! ```
//!
//! Enable verbose logging:
//! ```bash
//! openapi-from-comments -i app/routes.lua -o openapi.json -v
//! ```

use anyhow::Result;
use clap::Parser;
use log::info;
use openapi_from_comments::cli;

fn main() -> Result<()> {
    let args = cli::CliArgs::parse();

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    info!("OpenAPI from comments starting...");

    let args = cli::parse_args_from_parsed(args)?;

    cli::run(args)?;

    info!("OpenAPI document generation completed successfully");

    Ok(())
}
