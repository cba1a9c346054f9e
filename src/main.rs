//! vibebridge - inspect what the translation layer hands to the engine

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fmt::Debug;
use std::path::PathBuf;
use vibebridge::sql::parse_condition;
use vibebridge::{
    build_column, build_columns, encode_constant, load_table_spec, translate_condition, wire,
    Value,
};

/// Translate filter conditions, literals and column specs into engine structures
#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Debug, global = true)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate a filter condition, e.g. "age > 18 AND name = 'x'"
    Filter { expr: String },

    /// Encode a JSON value as a constant expression
    Constant { json: String },

    /// Build a column descriptor from a JSON column spec
    Column {
        name: String,
        spec: String,

        /// Ordinal position of the column
        #[arg(long, default_value = "0")]
        id: usize,
    },

    /// Build every column descriptor of a JSON table spec file
    Schema { file: PathBuf },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Debug,
    Json,
    /// Hex dump of the bincode payload
    Wire,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Filter { expr } => {
            let node = parse_condition(&expr).context("Failed to parse filter condition")?;
            let parsed = translate_condition(&node, None).context("Failed to translate filter")?;
            emit(&parsed, args.format)
        }
        Command::Constant { json } => {
            let value = parse_json(&json)?;
            let constant = encode_constant(&value).context("Failed to encode constant")?;
            emit(&constant, args.format)
        }
        Command::Column { name, spec, id } => {
            let Value::Map(spec) = parse_json(&spec)? else {
                bail!("Column spec must be a JSON object");
            };
            let column = build_column(&name, &spec, id)
                .with_context(|| format!("Failed to build column '{}'", name))?;
            emit(&column, args.format)
        }
        Command::Schema { file } => {
            let table = load_table_spec(&file)
                .with_context(|| format!("Failed to load table spec {}", file.display()))?;
            let columns = build_columns(&table).context("Failed to build table schema")?;
            emit(&columns, args.format)
        }
    }
}

fn parse_json(text: &str) -> Result<Value> {
    let json: serde_json::Value = serde_json::from_str(text).context("Invalid JSON")?;
    Ok(Value::from(json))
}

fn emit<T: Serialize + Debug>(value: &T, format: Format) -> Result<()> {
    match format {
        Format::Debug => println!("{:#?}", value),
        Format::Json => println!("{}", serde_json::to_string_pretty(value)?),
        Format::Wire => {
            let payload = wire::encode(value)?;
            let hex: String = payload.iter().map(|b| format!("{:02x}", b)).collect();
            println!("{}", hex);
        }
    }
    Ok(())
}
