use clap::Parser;
use phishing_detector::classifiers::{load_classifier, LoadedClassifier};
use phishing_detector::*;
use std::path::PathBuf;

/// URL Phishing Detector - Check if a URL looks like phishing
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// URL to check (http:// is assumed when no scheme is given)
    #[arg(value_name = "URL")]
    url: String,

    /// Directory containing the trained model
    #[arg(short, long, default_value = "models")]
    models: PathBuf,

    /// JSON file overriding trusted domains, brand tokens or keywords
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Exit codes: 0 = benign, 1 = phishing, 3 = cannot analyze
const EXIT_PHISHING: i32 = 1;
const EXIT_ERROR: i32 = 3;

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        "phishing_detector=debug"
    } else {
        "phishing_detector=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(outcome) => {
            if args.json {
                match serde_json::to_string_pretty(&outcome) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("❌ Failed to serialize result: {}", e);
                        std::process::exit(EXIT_ERROR);
                    }
                }
            } else {
                println!("{}", outcome);
            }

            match outcome.verdict() {
                Some(verdict) if verdict.is_phishing => std::process::exit(EXIT_PHISHING),
                Some(_) => std::process::exit(0),
                None => std::process::exit(EXIT_ERROR),
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

fn run(args: &Args) -> Result<Outcome> {
    let config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };
    let detector = PhishingDetector::new(&config);

    let model = load_model(args);
    if !args.json {
        let name = model.as_ref().map_or("Demo Mode (no model)", |m| m.name.as_str());
        println!("🛡️  URL Phishing Detector - {}\n", name);
    }

    let url = complete_scheme(&args.url);
    let classifier = model.as_ref().map(LoadedClassifier::as_classifier);

    Ok(detector.analyze(&url, classifier))
}

/// A missing or broken model is not fatal: the detector runs on its defaults
fn load_model(args: &Args) -> Option<LoadedClassifier> {
    match load_classifier(&args.models) {
        Ok(Some(model)) => Some(model),
        Ok(None) => {
            tracing::warn!("Model not available, running in demo mode");
            None
        }
        Err(e) => {
            tracing::warn!("Failed to load model, running in demo mode: {}", e);
            None
        }
    }
}

fn complete_scheme(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("http://{}", input)
    }
}
