//! nvfields CLI
//!
//! Inspect and edit a file-backed field store from the command line.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use nvfields::{
    Config, FieldDescriptor, FileDevice, NvmError, RecordStore, Schema, TracingDiagnostics,
    ValidationMode,
};
use tracing_subscriber::{fmt, EnvFilter};

/// nvfields CLI
#[derive(Parser, Debug)]
#[command(name = "nvfields-cli")]
#[command(about = "Named, checksummed string fields in a non-volatile byte store")]
#[command(version)]
struct Args {
    /// File emulating the non-volatile memory
    #[arg(short, long, default_value = "./nvfields.bin")]
    data_file: String,

    /// Field declaration, repeatable, in layout order
    #[arg(short, long = "field", value_name = "NAME:LEN[:DEFAULT]", value_parser = parse_field)]
    fields: Vec<FieldDescriptor>,

    /// Refuse schemas with issues instead of warning
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the value of a field
    Get {
        /// Field name
        name: String,
    },

    /// Store a value in a field
    Put {
        /// Field name
        name: String,

        /// Value (truncated to the field length)
        value: String,
    },

    /// Hex dump of the used storage
    Dump {
        /// Prefix for every line
        #[arg(short, long)]
        prefix: Option<String>,
    },

    /// List the layout
    Fields,
}

/// Parse `name:len[:default]`
fn parse_field(spec: &str) -> Result<FieldDescriptor, NvmError> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default();
    let len = parts
        .next()
        .ok_or_else(|| NvmError::Config(format!("field '{}' is missing a length", spec)))?;
    let max_len = len
        .parse::<usize>()
        .map_err(|e| NvmError::Config(format!("field '{}' has bad length '{}': {}", name, len, e)))?;
    let default = parts.next().unwrap_or_default();
    Ok(FieldDescriptor::new(name, default, max_len))
}

fn run(args: Args) -> nvfields::Result<()> {
    let validation = if args.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };

    let config = Config::builder()
        .data_path(&args.data_file)
        .validation(validation)
        .build();

    let schema = Schema::with_mode(args.fields, config.validation, &TracingDiagnostics)?;
    let device = FileDevice::from_config(&config);
    tracing::debug!("Data file: {}", device.path().display());
    let mut store = RecordStore::open(&schema, device, Arc::new(TracingDiagnostics))?;

    match args.command {
        Commands::Get { name } => {
            let value = store.read(&name)?;
            println!("{}", value.to_string_lossy());
        }
        Commands::Put { name, value } => {
            let stored = store.put(&name, &value)?;
            if stored < value.len() {
                tracing::info!("'{}' truncated to {} bytes", name, stored);
            }
        }
        Commands::Dump { prefix } => {
            let prefix = prefix.unwrap_or_else(|| config.dump_prefix.clone());
            for line in store.dump_lines(&prefix)? {
                println!("{}", line);
            }
        }
        Commands::Fields => {
            for (index, field) in schema.iter().enumerate() {
                let offset = store.offsets().offset(index).unwrap_or_default();
                println!(
                    "{:>3} {:04x} {:<20} len={:<3} default='{}'",
                    index, offset, field.name, field.max_len, field.default
                );
            }
            println!("capacity {} bytes", store.required_capacity());
        }
    }

    store.close()
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,nvfields=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("nvfields CLI v{}", nvfields::VERSION);

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
