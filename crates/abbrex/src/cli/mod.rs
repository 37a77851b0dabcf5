pub mod ask;
pub mod extract;

use std::path::PathBuf;

use abbrex_core::LlmProvider;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "abbrex",
    about = "Extract abbreviations from documents and ask an LLM about them",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the abbreviations defined in a document
    Extract {
        /// Document to read (.txt, .pdf, .docx, .html)
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Keep full terms as written instead of title-casing them
        #[arg(long)]
        raw_case: bool,
    },
    /// Ask a question, optionally about a document
    Ask(AskArgs),
}

#[derive(Args)]
pub struct AskArgs {
    /// The question to send
    pub question: String,
    /// Document whose text is sent as context
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// LLM backend (defaults to ABBREX_LLM_PROVIDER, then gemini)
    #[arg(long)]
    pub provider: Option<LlmProvider>,
    /// Model name
    #[arg(long)]
    pub model: Option<String>,
    /// Base URL of the LLM API
    #[arg(long)]
    pub endpoint: Option<String>,
    /// API key (Gemini); falls back to GEMINI_API_KEY
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned two-column table
    Table,
    /// Tab-separated with a header row
    Tsv,
    /// JSON array of entries
    Json,
}
