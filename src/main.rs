//! xmlbridge CLI entry point.
//!
//! Decodes XML documents to JSON trees and encodes JSON trees into wrapped
//! XML documents using the conversion engine.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use xmlbridge::{EngineConfig, ErrorDescriptor, XmlEngine};

#[derive(Parser, Debug)]
#[command(name = "xmlbridge")]
#[command(
    author,
    version,
    about = "XML <-> JSON tree conversion with SOAP-style envelope wrapping"
)]
struct Args {
    /// Configuration file path (YAML or JSON)
    #[arg(short, long, env = "XMLBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Print example configuration and exit.
    #[arg(long)]
    example_config: bool,

    /// Validate configuration and exit.
    #[arg(long)]
    validate: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode an XML document into its JSON tree form.
    Decode {
        /// Input file; reads stdin when absent.
        input: Option<PathBuf>,
    },
    /// Wrap a JSON tree in the configured envelope and emit XML.
    Encode {
        /// Input file; reads stdin when absent.
        input: Option<PathBuf>,
    },
    /// Render an error descriptor as a wrapped XML fault.
    Fault {
        /// Human-readable fault message.
        message: String,

        /// Application error code (overrides the status-derived code).
        #[arg(long)]
        code: Option<String>,

        /// HTTP-like status code (default 500).
        #[arg(long)]
        status: Option<u16>,
    },
}

fn print_example_config() {
    let example = r#"# xmlbridge configuration example
parser:
  # Keep the root element name as the top-level tree key
  explicit_root: false
  # Drop element attributes instead of collecting them under attribute_key
  ignore_attributes: true
  attribute_key: "$"
  text_key: "_"

serializer:
  pretty: false
  xml_declaration: true

# Outbound payloads are inserted at the first non-ignored key path
wrapper:
  "env:Envelope":
    "$":
      "xmlns:env": "http://www.w3.org/2003/05/soap-envelope"
    "env:Body": {}

# Collapse single-element arrays produced by the generic parser
collapse_singleton_arrays: true
# Strip "prefix:" namespace segments from tree keys
strip_namespace_prefixes: false
# Recursion ceiling for the normalizers
max_depth: 30
# Return the original XML text alongside the decoded tree
propagate_raw_xml: false
"#;
    println!("{}", example);
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    if args.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    if args.example_config {
        print_example_config();
        return Ok(());
    }

    // Load configuration
    let config: EngineConfig = if let Some(config_path) = &args.config {
        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
        if config_path
            .extension()
            .is_some_and(|e| e == "yaml" || e == "yml")
        {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        }
    } else {
        EngineConfig::default()
    };

    if args.validate {
        let _engine = XmlEngine::new(config);
        info!("Configuration is valid");
        return Ok(());
    }

    let engine = XmlEngine::new(config);

    match args.command {
        Some(Command::Decode { input }) => {
            let xml = read_input(input.as_ref())?;
            let decoded = engine
                .decode(&xml, None)
                .context("Failed to decode XML input")?;
            println!("{}", serde_json::to_string_pretty(&decoded.tree)?);
        }
        Some(Command::Encode { input }) => {
            let text = read_input(input.as_ref())?;
            let tree: serde_json::Value =
                serde_json::from_str(&text).context("Input is not valid JSON")?;
            let xml = engine
                .encode(&tree, None)
                .context("Failed to encode tree as XML")?;
            println!("{}", xml);
        }
        Some(Command::Fault {
            message,
            code,
            status,
        }) => {
            let mut error = ErrorDescriptor::new(message);
            error.code = code;
            error.status_code = status;
            let xml = engine
                .encode_fault(&error, None)
                .context("Failed to render fault")?;
            println!("{}", xml);
        }
        None => {
            anyhow::bail!("No command given; try `xmlbridge decode`, `encode`, or `fault`");
        }
    }

    Ok(())
}
