use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sift::{
    ClassifierConfig, DatasetSource, RankingStats, RecommendRequest, Recommender, SearchRanker,
    SearchRequest, SearchResponse, SpamClassifier,
};
use sift_classifier::DEFAULT_DATASET_URL;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Text vectorization and scoring: search ranking, recommendations and spam detection
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "TF-IDF search ranking, recommendations and spam detection", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path of the persisted spam model
    #[arg(long, global = true, default_value = sift_classifier::DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    /// Training dataset, URL or file path
    #[arg(long, global = true, default_value = DEFAULT_DATASET_URL)]
    dataset: String,

    /// Log level
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank listings against a free-text query
    Search {
        /// JSON request body, `-` for stdin
        #[arg(short, long)]
        request: PathBuf,
    },
    /// Find services similar to a base service
    Recommend {
        /// JSON request body, `-` for stdin
        #[arg(short, long)]
        request: PathBuf,
    },
    /// Classify a message as spam or ham
    Predict {
        #[arg(short, long)]
        text: String,
    },
    /// Load or train the spam model and report its state
    Warm,
}

#[derive(Serialize)]
struct WarmReport {
    #[serde(flatten)]
    state: sift::Lifecycle,
    origin: Option<sift_classifier::ModelOrigin>,
    model_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // stdout carries the JSON response
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting sift v{}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Command::Search { request } => {
            let request: SearchRequest = read_request(request)?;
            let ranker = SearchRanker::new(request.config())?;
            let ranked = ranker.rank(&request.query, &request.listings)?;

            let stats = RankingStats::for_search(&ranked, request.listings.len());
            info!(
                candidates = stats.candidates_count,
                results = stats.results_count,
                best = stats.best_score,
                "search complete"
            );
            print_json(&SearchResponse::new(ranked))
        }
        Command::Recommend { request } => {
            let request: RecommendRequest = read_request(request)?;
            let recommender = Recommender::new(request.config())?;
            let recommendations = recommender.recommend(&request.base_service, &request.candidates)?;

            let stats = RankingStats::for_recommendations(&recommendations, request.candidates.len());
            info!(
                candidates = stats.candidates_count,
                results = stats.results_count,
                best = stats.best_score,
                "recommend complete"
            );
            print_json(&recommendations)
        }
        Command::Predict { text } => {
            let classifier = SpamClassifier::install(classifier_config(&args));
            let prediction = classifier.predict(text)?;
            print_json(&prediction)
        }
        Command::Warm => {
            let classifier = SpamClassifier::install(classifier_config(&args));
            classifier.ensure_ready()?;
            print_json(&WarmReport {
                state: classifier.state(),
                origin: classifier.origin(),
                model_path: args.model_path.clone(),
            })
        }
    }
}

fn classifier_config(args: &Args) -> ClassifierConfig {
    ClassifierConfig::default()
        .with_model_path(&args.model_path)
        .with_dataset(DatasetSource::parse(&args.dataset))
}

fn read_request<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let body = if path == Path::new("-") {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        body
    } else {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?
    };
    serde_json::from_str(&body).with_context(|| format!("invalid request body in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
