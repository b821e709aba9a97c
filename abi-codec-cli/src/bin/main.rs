use std::path::PathBuf;

use abi_codec_cli::buffer::{parse_buffers, BufferEncoding};
use abi_codec_cli::cli::{load_abi, load_config, print_abi_summary};
use abi_codec_cli::{AbiCodec, ActionTransformer, TypeNameConverter};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "abi-codec", version, about = "Decode contract call data and build actions from an ABI")]
struct Cli {
    /// JSON settings file (codec and transform options)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode buffers against an ABI type name
    Decode {
        /// ABI JSON file
        #[arg(long)]
        abi: PathBuf,

        /// ABI type name, e.g. `List<Pair>`
        #[arg(long = "type")]
        type_name: String,

        /// Encoding of the buffers
        #[arg(long, value_enum, default_value_t = BufferEncoding::Base64)]
        encoding: BufferEncoding,

        /// Buffers to decode
        buffers: Vec<String>,
    },

    /// Decode a query response for an endpoint
    Query {
        #[arg(long)]
        abi: PathBuf,

        #[arg(long)]
        endpoint: String,

        /// Base64 `returnData` entries
        buffers: Vec<String>,
    },

    /// Convert an ABI type name to its type descriptor
    Convert {
        #[arg(long)]
        abi: PathBuf,

        type_name: String,
    },

    /// Build the action definition for an endpoint
    Action {
        #[arg(long)]
        abi: PathBuf,

        /// Contract address (erd1...)
        #[arg(long)]
        contract: String,

        /// Endpoint name; all non-readonly endpoints when omitted
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// List endpoints and custom types with their descriptors
    Types {
        #[arg(long)]
        abi: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "abi_codec=info,abi_codec_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Decode { abi, type_name, encoding, buffers } => {
            let abi = load_abi(&abi)?;
            let codec = AbiCodec::new(&abi, config.codec);
            let buffers = parse_buffers(&buffers, encoding)?;
            let value = codec
                .decode(&buffers, &type_name)
                .with_context(|| format!("decoding as {}", type_name))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Query { abi, endpoint, buffers } => {
            let abi = load_abi(&abi)?;
            let codec = AbiCodec::new(&abi, config.codec);
            let buffers = parse_buffers(&buffers, BufferEncoding::Base64)?;
            info!(endpoint = %endpoint, buffers = buffers.len(), "decoding query response");
            let value = codec
                .decode_endpoint_output(&endpoint, &buffers)
                .with_context(|| format!("decoding output of {}", endpoint))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Commands::Convert { abi, type_name } => {
            let abi = load_abi(&abi)?;
            let converter = TypeNameConverter::new(&abi);
            println!("{}", converter.convert(&type_name)?);
        }
        Commands::Action { abi, contract, endpoint } => {
            let abi = load_abi(&abi)?;
            let transformer = ActionTransformer::new(&abi, config.transform);
            match endpoint {
                Some(name) => {
                    let action = transformer.transform(&contract, &name)?;
                    println!("{}", action.to_json_pretty()?);
                }
                None => {
                    let actions = transformer.transform_all(&contract)?;
                    println!("{}", serde_json::to_string_pretty(&actions)?);
                }
            }
        }
        Commands::Types { abi } => {
            let abi = load_abi(&abi)?;
            print_abi_summary(&abi, &TypeNameConverter::new(&abi));
        }
    }
    Ok(())
}
