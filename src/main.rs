use std::fs::{self, File};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, info_span};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use aspectrank::aspects::sentences::{filter_samples, load_sentences};
use aspectrank::aspects::store::AspectStore;
use aspectrank::config::{Config, Profile};
use aspectrank::output::terminal;
use aspectrank::pipeline::evaluation;
use aspectrank::ranking::precision;
use aspectrank::ranking::ranker::AspectRanker;
use aspectrank::vectorize::preprocess::NlpPipeline;
use aspectrank::vectorize::tfidf::TfidfModel;
use aspectrank::vectorize::traits::TextVectorizer;

/// aspectrank: which section of an entity's reference page does a sentence
/// talk about?
///
/// Ranks each entity's aspects against labeled sentences with a pre-fitted
/// TF-IDF model and reports precision at 1.
#[derive(Parser)]
#[command(name = "aspectrank", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank every labeled sentence and report precision @1
    Evaluate {
        /// Data set to evaluate (overrides ASPECTRANK_PROFILE)
        #[arg(long, value_enum)]
        profile: Option<Profile>,

        /// Relative tolerance for the convergence check (default: 0.001)
        #[arg(long)]
        tolerance: Option<f64>,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },

    /// Rank the aspects of one entity against a single sentence
    Predict {
        /// Entity identifier (e.g. Ada_Lovelace)
        entity: String,

        /// The sentence mentioning the entity
        sentence: String,

        /// Data set whose model and aspects to use
        #[arg(long, value_enum)]
        profile: Option<Profile>,
    },

    /// Show the resolved configuration and input files
    Status {
        #[arg(long, value_enum)]
        profile: Option<Profile>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    let _log_guard = init_logging(None);

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            profile,
            tolerance,
            no_progress,
        } => {
            let config = Config::load(profile, tolerance)?;

            fs::create_dir_all(&config.log_dir).with_context(|| {
                format!("Failed to create log directory {}", config.log_dir.display())
            })?;
            let log_path = config.log_path();
            let log_file = File::create(&log_path)
                .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
            let _run_guard = init_logging(Some(log_file));

            info!("Source data set to {}", config.profile);

            let ranker = load_ranker(&config)?;
            let sentences_path = config.sentences_path();
            let sentences = load_sentences(&sentences_path)?;
            info!(
                rows = sentences.len(),
                "Training files loaded: {}",
                sentences_path.display()
            );

            info!("Filtering sentence samples");
            let sentences = filter_samples(ranker.store(), sentences);
            info!("The total number of trained sentences is {}", sentences.len());

            println!("Ranking {} sentences...", sentences.len());
            let run = evaluation::run(&ranker, &sentences, !no_progress);

            info!("Calculating the average precision @1");
            let report = precision::evaluate(&run.indicators, config.tolerance)?;

            terminal::display_report(&report, &run);
            println!(
                "{}",
                format!("Log written to {}", log_path.display()).dimmed()
            );
        }

        Commands::Predict {
            entity,
            sentence,
            profile,
        } => {
            let config = Config::load(profile, None)?;
            let ranker = load_ranker(&config)?;
            let scores = ranker.scores(&sentence, &entity);
            terminal::display_scores(&entity, &sentence, &scores);
        }

        Commands::Status { profile } => {
            let config = Config::load(profile, None)?;
            if !aspectrank::status::show(&config) {
                println!("\nSome inputs are missing; `aspectrank evaluate` will fail.");
            }
        }
    }

    Ok(())
}

/// Install a subscriber for the rest of the current scope.
///
/// Events go to stderr (RUST_LOG, default aspectrank=info) and, when a file
/// is given, also to that file without ANSI colors. The returned guard
/// restores the previous subscriber when dropped.
fn init_logging(log_file: Option<File>) -> tracing::subscriber::DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("aspectrank=info"));
    let file_layer = log_file.map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_writer(Mutex::new(file))
    });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer);

    tracing::subscriber::set_default(subscriber)
}

/// Load the model and aspect store for the configured profile.
fn load_ranker(config: &Config) -> Result<AspectRanker> {
    let model_path = config.model_path();
    let model = TfidfModel::load(&model_path)?;
    info!(
        dimensions = model.dimensions(),
        "Started TF-IDF ranking with model file: {}",
        model_path.display()
    );

    let store = AspectStore::load(&config.aspects_path())?;
    info!(entities = store.len(), "Aspect store loaded");

    Ok(
        AspectRanker::new(Box::new(model), Box::new(NlpPipeline::new()), store)
            .with_span(info_span!("ranking", profile = %config.profile)),
    )
}
