//! Legal summarizer: AI-powered document summarization with paragraph mapping

mod cli;
mod config;
mod error;
mod input;
mod llm;
mod output;
mod processing;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, ModelAction};
use config::Config;
use error::{Result, SummarizerError};
use indicatif::ProgressBar;
use input::manager::InputManager;
use llm::client::{GeminiClient, Summarizer};
use llm::prompts::parse_bullets;
use log::{error, info};
use output::formatter;
use processing::embedding_manager::EmbeddingModelManager;
use processing::embeddings::EmbeddingEngine;
use processing::pipeline::SummaryPipeline;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Summarize {
            file,
            format,
            bullets,
            model,
            embedding,
            output,
            save,
            detailed,
        } => {
            info!("Starting document summarization");

            if format.is_none() {
                cli::validate_file_extension(&file, &["pdf", "docx", "txt"])
                    .map_err(SummarizerError::InvalidInput)?;
            }

            let output_format = match &output {
                Some(requested) => {
                    cli::parse_output_format(requested).map_err(SummarizerError::InvalidInput)?
                }
                None => config.output.format.clone(),
            };
            let detailed = detailed || config.output.detailed;

            if !config.output.color_output {
                colored::control::set_override(false);
            }

            println!("📄 Document: {}", file.display());

            // Load the document into memory once; the extractor and the
            // summarizer both work from these bytes.
            let mut input_manager =
                InputManager::new().with_cache(config.processing.enable_caching);
            let source = input_manager.load(&file, format.as_deref()).await?;

            // The embedding model is the expensive shared resource: loaded
            // once, shared behind an Arc for the rest of the run.
            let embedding_model = embedding
                .unwrap_or_else(|| config.models.default_embedding_model.clone());
            let model_path = ensure_embedding_model(&config, &embedding_model).await?;
            let engine = EmbeddingEngine::new(&model_path, &embedding_model)?;
            let pipeline = SummaryPipeline::new(Arc::new(engine), embedding_model.clone());

            let started = Instant::now();

            // Stage 1: extract paragraphs
            let spinner = stage_spinner("🔍 Extracting paragraphs...");
            let paragraphs = pipeline.extract(&source)?;
            spinner.finish_with_message(format!("✅ Extracted {} paragraphs", paragraphs.len()));

            if paragraphs.is_empty() {
                return Err(SummarizerError::InsufficientData(
                    "document yielded no paragraphs".to_string(),
                ));
            }

            // Stage 2: obtain summary bullets, either from a local file or
            // from the hosted API
            let (summary_points, summarizer_model) = match bullets {
                Some(bullets_path) => {
                    info!("Reading summary bullets from {}", bullets_path.display());
                    let content = tokio::fs::read_to_string(&bullets_path).await?;
                    (parse_bullets(&content), None)
                }
                None => {
                    let client = GeminiClient::from_config(&config, model)?;
                    let spinner = stage_spinner("🤖 Generating AI summary...");
                    let points = pipeline.summarize(&source, &client).await?;
                    spinner.finish_with_message(format!(
                        "✅ Summary generated with {} key insights",
                        points.len()
                    ));
                    (points, Some(client.model().to_string()))
                }
            };

            // Stage 3: map every insight back to its source paragraph
            let spinner = stage_spinner("🎯 Mapping insights to paragraphs...");
            let mapping = pipeline.align(&paragraphs, &summary_points)?;
            spinner.finish_with_message("✅ Mapping completed".to_string());

            let report =
                pipeline.assemble(&source, paragraphs, mapping, summarizer_model, started);

            let rendered = formatter::render(&report, &output_format, detailed)?;
            match save {
                Some(save_path) => {
                    tokio::fs::write(&save_path, rendered.as_bytes()).await?;
                    println!("💾 Report saved to {}", save_path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Models { action } => match action {
            ModelAction::List => {
                let manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

                println!("🧠 Embedding Models\n");
                for model_info in manager.list_available_models() {
                    let model_id = manager
                        .resolve_model_id(&model_info.repo_id)
                        .unwrap_or_else(|| model_info.repo_id.clone());
                    let status = if manager.is_model_downloaded(&model_id) {
                        "✅ Downloaded"
                    } else {
                        "⬇️  Available"
                    };

                    println!(
                        "  • {} ({}) - {} MB [{}]",
                        model_info.name, model_info.repo_id, model_info.size_mb, status
                    );
                    println!("    {}", model_info.description);
                    if !manager.is_model_downloaded(&model_id) {
                        println!("    💡 Download: legal-summarizer models download {}", model_id);
                    }
                    println!();
                }
            }

            ModelAction::Download { model, force } => {
                let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

                let model_id = manager.resolve_model_id(&model).ok_or_else(|| {
                    SummarizerError::ModelError(format!("Unknown embedding model: {}", model))
                })?;

                if !force && manager.is_model_downloaded(&model_id) {
                    println!("✅ Model '{}' is already downloaded!", model_id);
                    println!("💡 Use --force to re-download");
                    return Ok(());
                }

                println!("⬇️  Downloading model: {}", model_id);
                let model_path = manager.download_model(&model_id).await?;
                println!("✅ Model '{}' downloaded successfully!", model_id);
                println!("📁 Location: {}", model_path.display());
            }

            ModelAction::Info { model } => {
                let manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

                let model_id = manager
                    .resolve_model_id(&model)
                    .ok_or_else(|| SummarizerError::ModelError(format!("Unknown model: {}", model)))?;
                let model_info = manager.get_model_info(&model_id).ok_or_else(|| {
                    SummarizerError::ModelError(format!("Unknown model: {}", model))
                })?;

                println!("📋 Model Information for '{}'\n", model_id);
                println!("Name: {}", model_info.name);
                println!("Repository: {}", model_info.repo_id);
                println!("Size: {} MB", model_info.size_mb);
                println!("Dimensions: {}", model_info.dimensions);
                println!("Description: {}", model_info.description);

                if manager.is_model_downloaded(&model_id) {
                    if let Some(model_path) = manager.get_model_path(&model_id) {
                        println!("Status: ✅ Downloaded");
                        println!("Location: {}", model_path.display());
                    }
                } else {
                    println!("Status: ⬇️  Available for download");
                    println!("\n💡 To download this model, run:");
                    println!("   legal-summarizer models download {}", model_id);
                }
            }
        },

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Models Directory: {}", config.models_dir().display());
                println!(
                    "Default Embedding Model: {}",
                    config.models.default_embedding_model
                );
                println!("Summarizer Model: {}", config.summarizer.model);
                println!("Summarizer Endpoint: {}", config.summarizer.endpoint);
                println!("Summarizer Timeout: {}s", config.summarizer.timeout_secs);
                let key_source = if std::env::var("GEMINI_API_KEY").is_ok() {
                    "environment"
                } else if config.summarizer.api_key.is_some() {
                    "config file"
                } else {
                    "not set"
                };
                println!("API Key: {}", key_source);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

/// Resolve the embedding model to a local directory, downloading it on
/// first use.
async fn ensure_embedding_model(config: &Config, model: &str) -> Result<PathBuf> {
    config.ensure_models_dir()?;
    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;

    let model_id = manager.resolve_model_id(model).ok_or_else(|| {
        SummarizerError::ModelError(format!("Unknown embedding model: {}", model))
    })?;

    manager.ensure_model_available(&model_id).await
}

fn stage_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
