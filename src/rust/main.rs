use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use disaster_tweet::labels;
use disaster_tweet::{
    ClientConfig, FeatureOption, FormDisplay, HttpPredictionClient, ModelOption,
    PredictionController, FEATURE_OPTIONS, MODEL_OPTIONS,
};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tweet content to classify
    #[arg(short, long)]
    text: Option<String>,

    /// Classification model, e.g. "Random Forest"
    #[arg(short, long)]
    model: Option<ModelOption>,

    /// Feature extraction method, e.g. "tf_idf"
    #[arg(short, long)]
    feature: Option<FeatureOption>,

    /// Prediction endpoint (defaults to $DISASTER_TWEET_ENDPOINT or the public service)
    #[arg(long)]
    endpoint: Option<String>,

    /// Give up on the request after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the available models and feature extraction methods
    #[arg(long)]
    list_options: bool,
}

fn print_options() {
    println!("{}", labels::PAGE_HEADING);
    println!("{}\n", labels::FORM_DESCRIPTION);
    println!("{}:", labels::MODEL_PLACEHOLDER);
    for model in MODEL_OPTIONS {
        println!("  {}", model);
    }
    println!("{}:", labels::FEATURE_PLACEHOLDER);
    for feature in FEATURE_OPTIONS {
        println!("  {:<14} {}", feature.value(), feature.label());
    }
}

fn build_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint(endpoint)?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_options {
        print_options();
        return Ok(());
    }

    let config = build_config(&args)?;
    info!("Using prediction endpoint {}", config.endpoint);
    let client = HttpPredictionClient::new(&config).context("Failed to build HTTP client")?;

    let form = PredictionController::new(client);
    form.subscribe(|state| {
        if state.is_submitting {
            println!("{}", labels::submit_label(true));
        }
    });
    if let Some(text) = args.text {
        form.set_text(text);
    }
    if let Some(model) = args.model {
        form.set_model(model);
    }
    if let Some(feature) = args.feature {
        form.set_feature(feature);
    }

    if !form.can_submit() {
        bail!("Missing required fields: {}", form.state().missing_fields().join(", "));
    }

    println!("{}", labels::FORM_TITLE);
    form.submit().await;

    let state = form.state();
    match state.display() {
        FormDisplay::Prediction(label) => {
            println!("{}", labels::RESULT_HEADING);
            println!("  {} {}", labels::tone_marker(label), label.description());
            info!("Prediction label: {}", label);
            Ok(())
        }
        FormDisplay::Error(message) => {
            eprintln!("{}: {}", labels::ERROR_TITLE, message);
            std::process::exit(1);
        }
        FormDisplay::Idle | FormDisplay::Submitting => bail!("Submission did not complete"),
    }
}
