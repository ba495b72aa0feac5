use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "companion-check")]
#[command(about = "Validate companion manifests emitted by ledger binding generators")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file (default: .ledger-bindings/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build every companion in a manifest and report failures
    Validate {
        /// Manifest path (default: from config or LEDGER_BINDINGS_MANIFEST)
        manifest: Option<PathBuf>,
    },

    /// List the choices of one template or interface
    Choices {
        /// Full id, <package>:<Module>:<Entity>
        template_id: String,

        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Describe an error code
    Explain { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}
