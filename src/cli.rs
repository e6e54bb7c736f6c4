use crate::config::GeneratorConfig;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::PathBuf;

/// OpenAPI from comments - Generate OpenAPI documentation from annotated Lua routes
#[derive(Parser, Debug)]
#[command(name = "openapi-from-comments")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to the annotated source file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Path of the generated document
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// YAML file overriding the generator defaults
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Document title (overrides the config file)
    #[arg(long = "title")]
    pub title: Option<String>,

    /// Document description (overrides the config file)
    #[arg(long = "description")]
    pub description: Option<String>,

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

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.input.is_file() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    info!("Input file: {}", args.input.display());
    info!("Output file: {}", args.output.display());
    info!("Output format: {:?}", args.output_format);

    Ok(args)
}

/// Resolve the generator config from the config file and CLI overrides
pub fn load_config(args: &CliArgs) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Using config file: {}", path.display());
            GeneratorConfig::from_file(path)?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(title) = &args.title {
        config = config.with_title(title.clone());
    }
    if let Some(description) = &args.description {
        config = config.with_description(description.clone());
    }

    debug!("Generator config: {:?}", config);
    Ok(config)
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::generate_from_file;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting OpenAPI document generation...");

    // Step 1: Resolve defaults
    let config = load_config(&args)?;

    // Step 2: Read, locate, parse and assemble. Any malformed route
    // declaration aborts here, before the output file is touched.
    info!("Extracting annotated routes...");
    let document = generate_from_file(&args.input, &config)
        .with_context(|| format!("Failed to generate document from {}", args.input.display()))?;

    let operation_count: usize = document.paths.values().map(|item| item.len()).sum();
    if document.paths.is_empty() {
        log::warn!("No annotated routes found in {}", args.input.display());
    }

    // Step 3: Serialize to requested format
    info!("Serializing to {:?} format...", args.output_format);
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&document)?,
        OutputFormat::Yaml => serialize_yaml(&document)?,
    };

    // Step 4: Write output
    write_to_file(&content, &args.output)?;
    info!("Successfully wrote API document to {}", args.output.display());

    info!("Summary:");
    info!("  - Paths: {}", document.paths.len());
    info!("  - Operations: {}", operation_count);
    info!(
        "  - Components: {}",
        document.components.as_object().map_or(0, |c| c.len())
    );

    Ok(())
}
