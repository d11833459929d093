//! `geoql` CLI: validate documents and normalize scalar values from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Check required arguments of a JSON-encoded document against a schema
//! geoql validate --schema schema.json -i document.json
//!
//! # Normalize a serialized geometry (stdin → stdout)
//! echo '{"type":"Point","coordinates":[30,10]}' | geoql serialize --type PointInput
//!
//! # Print a value as literal syntax
//! geoql print --type Geometry -i point.json
//!
//! # Trace scalar selection in the composite type
//! RUST_LOG=geoql_core=trace geoql serialize --type Geometry -i point.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use geoql_core::document::Document;
use geoql_core::{validate, ScalarRegistry, ScalarType, Schema, Value};
use serde_json::Value as JsonValue;
use std::io::{self, Read};
use std::process;
use std::sync::Arc;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "geoql",
    version,
    about = "Required-argument validation and GeoJSON scalar coercion"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a JSON-encoded document against a schema
    Validate {
        /// Schema file (JSON)
        #[arg(long)]
        schema: String,
        /// Document file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Deserialize then serialize a JSON value through a scalar type
    Serialize {
        /// Scalar type name (e.g. PointInput, Geometry, Int)
        #[arg(long = "type")]
        type_name: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print a JSON value as literal syntax through a scalar type
    Print {
        /// Scalar type name (e.g. PointInput, Geometry, Int)
        #[arg(long = "type")]
        type_name: String,
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            schema: schema_path,
            input,
        } => {
            let schema: Schema = serde_json::from_str(&read_input(Some(schema_path.as_str()))?)
                .with_context(|| format!("Failed to parse schema: {}", schema_path))?;
            let document: Document = serde_json::from_str(&read_input(input.as_deref())?)
                .context("Failed to parse document")?;

            let errors = validate(&document, &schema);
            println!("{}", serde_json::to_string_pretty(&errors)?);
            if !errors.is_empty() {
                process::exit(1);
            }
        }
        Commands::Serialize {
            type_name,
            input,
            output,
        } => {
            let scalar = lookup(&type_name)?;
            let value = read_json(input.as_deref())?;
            let runtime = scalar
                .deserialize(Some(Value::Json(value)))
                .with_context(|| format!("Failed to deserialize value as {}", type_name))?;
            let serialized = scalar
                .serialize(runtime)
                .with_context(|| format!("Failed to serialize value as {}", type_name))?;
            let json = into_json(serialized)?;
            write_output(output.as_deref(), &serde_json::to_string_pretty(&json)?)?;
        }
        Commands::Print { type_name, input } => {
            let scalar = lookup(&type_name)?;
            let value = read_json(input.as_deref())?;
            let literal = scalar
                .parse_result(Some(&Value::Json(value)))
                .with_context(|| format!("Failed to convert value to a {} literal", type_name))?;
            println!("{}", literal);
        }
    }

    Ok(())
}

fn lookup(type_name: &str) -> Result<Arc<dyn ScalarType>> {
    let registry = ScalarRegistry::standard();
    match registry.get(type_name) {
        Some(scalar) => Ok(Arc::clone(scalar)),
        None => {
            let known: Vec<&str> = registry.names().collect();
            anyhow::bail!(
                "Unknown scalar type: '{}'. Available types: {}",
                type_name,
                known.join(", ")
            )
        }
    }
}

fn into_json(value: Option<Value>) -> Result<JsonValue> {
    match value {
        None => Ok(JsonValue::Null),
        Some(Value::Json(json)) => Ok(json),
        Some(other) => anyhow::bail!("Serializer returned a {} instead of JSON", other.describe()),
    }
}

fn read_json(path: Option<&str>) -> Result<JsonValue> {
    let text = read_input(path)?;
    serde_json::from_str(&text).context("Failed to parse input as JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path, "reading input file");
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
