use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use quiz_app::{Quiz, QuizError, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the questions API; `/questions` is appended
    #[arg(short, long)]
    api_url: Option<String>,

    /// TOML settings file (defaults to ./quiz.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// File to write logs to
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn load_settings(args: &Args) -> Result<Settings, QuizError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(url) = &args.api_url {
        settings.set_api_url(url)?;
    }
    if let Some(secs) = args.timeout_secs {
        settings.set_timeout_secs(secs)?;
    }
    if let Some(path) = &args.log_file {
        settings.log_file = path.clone();
    }
    Ok(settings)
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_tracing(path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = init_tracing(&settings.log_file) {
        eprintln!(
            "warning: cannot log to {}: {}",
            settings.log_file.display(),
            e
        );
    }

    let result = match Quiz::from_settings(&settings) {
        Ok(quiz) => quiz.run().await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
