//! CLI interface for the legal summarizer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legal-summarizer")]
#[command(about = "AI-powered legal document summarization with paragraph mapping")]
#[command(
    long_about = "Extract paragraphs from a legal document, generate a bullet-point summary with a hosted LLM, and map every summary point back to its source paragraph using embeddings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a document and map insights to paragraphs
    Summarize {
        /// Path to the document (PDF, DOCX, TXT)
        #[arg(short, long)]
        file: PathBuf,

        /// Format hint; defaults to the file extension
        #[arg(long)]
        format: Option<String>,

        /// Read summary bullets from a file (one per line) instead of
        /// calling the hosted API
        #[arg(short, long)]
        bullets: Option<PathBuf>,

        /// Summarization model to use
        #[arg(short, long)]
        model: Option<String>,

        /// Embedding model to use
        #[arg(short, long)]
        embedding: Option<String>,

        /// Output format: console, json, markdown (defaults to the
        /// configured format)
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include full paragraph text in the output
        #[arg(short, long)]
        detailed: bool,
    },

    /// Embedding model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model name or HuggingFace repo ID
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show model information
    Info {
        /// Model name
        model: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
