use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use narrate_cli::{format_bytes, init_tracing};
use narrate_core::{join_key, Config, JobLayout};
use narrate_pipeline::{Job, Pipeline};
use narrate_speech::{PollySynthesizer, Synthesizer, VoiceSpec};
use narrate_storage::create_storage;

#[derive(Parser, Debug)]
#[command(name = "narrate")]
#[command(about = "Turn text objects in storage into narrated audio archives")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch a text object, synthesize it, and archive the audio
    Run {
        /// Input file name under the configured remote path (default: NARRATE_INPUT)
        name: Option<String>,

        /// Upload the finished archive back to storage
        #[arg(long)]
        upload: bool,
    },

    /// List available synthesis voices
    Voices {
        /// Engine to filter by (default: configured engine)
        #[arg(long)]
        engine: Option<String>,

        /// Language code to filter by (default: configured language)
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Run { name, upload } => run_job(&config, name, upload).await,
        Commands::Voices { engine, language } => list_voices(&config, engine, language).await,
    }
}

async fn run_job(config: &Config, name: Option<String>, upload: bool) -> Result<()> {
    let storage = create_storage(config).await?;
    info!(backend = %storage.backend_type(), "Storage ready");

    let synthesizer: Arc<dyn Synthesizer> =
        Arc::new(PollySynthesizer::new(&config.region).await);
    let pipeline = Pipeline::new(
        storage,
        synthesizer,
        JobLayout::new(config.work_dir.as_str()),
    );

    let job = Job {
        input_name: name.unwrap_or_else(|| config.input_name.clone()),
        remote_dir: join_key(&[&config.base_path, &config.prefix]),
        voice: VoiceSpec {
            voice: config.voice.clone(),
            engine: config.engine.clone(),
            format: config.format,
        },
        upload_results: upload || config.upload_results,
    };

    match pipeline.run(&job).await {
        Ok(outcome) => {
            info!(
                audio = %format_bytes(outcome.audio_bytes),
                archive = %format_bytes(outcome.archive_bytes),
                "Narration complete"
            );
            print_json(&outcome)
        }
        Err(err) => {
            error!(
                stage = %err.stage,
                fatal = err.is_fatal(),
                error = %err,
                "Narration job failed"
            );
            Err(err.into())
        }
    }
}

async fn list_voices(
    config: &Config,
    engine: Option<String>,
    language: Option<String>,
) -> Result<()> {
    let engine = engine.unwrap_or_else(|| config.engine.clone());
    let language = language.unwrap_or_else(|| config.language.clone());

    let synthesizer = PollySynthesizer::new(&config.region).await;
    let voices = synthesizer.voices(Some(&engine), Some(&language)).await?;
    info!(
        count = voices.len(),
        engine = %engine,
        language = %language,
        "Fetched voice list"
    );
    print_json(&voices)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
