mod settings;

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use saunter_core::extraction::domain::entity_extractor::EntityExtractor;
use saunter_core::extraction::infrastructure::http_entity_recognizer::HttpEntityRecognizer;
use saunter_core::geocoding::domain::geocoder::Geocoder;
use saunter_core::geocoding::infrastructure::memoizing_geocoder::MemoizingGeocoder;
use saunter_core::geocoding::infrastructure::nominatim_geocoder::{
    NominatimConfig, NominatimGeocoder,
};
use saunter_core::path::domain::reconciler::Reconciler;
use saunter_core::pipeline::build_path_use_case::{
    BuildPathUseCase, PipelineError, ReverseLookupOptions,
};
use saunter_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use saunter_core::transcript::infrastructure::json_transcript_source::JsonTranscriptSource;

use settings::Settings;

const EXIT_FAILURE: i32 = 1;
const EXIT_CLIENT_ERROR: i32 = 2;

/// Turn a video's transcript into a time-ordered trail of map waypoints.
#[derive(Parser)]
#[command(name = "saunter", version)]
struct Cli {
    /// Video URL (watch, short or embed link).
    url: String,

    /// Settings file (default: <config dir>/Saunter/settings.json).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding <video_id>.json transcript files.
    #[arg(long)]
    transcripts: Option<PathBuf>,

    /// Write the path JSON here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Nominatim-compatible geocoder base URL.
    #[arg(long)]
    geocoder_url: Option<String>,

    /// spaCy-style NER service base URL.
    #[arg(long)]
    ner_url: Option<String>,

    /// NER model name passed to the service.
    #[arg(long)]
    ner_model: Option<String>,

    /// Language for reverse-geocoded addresses.
    #[arg(long)]
    language: Option<String>,

    /// Timeout for each external call, in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Minimum spacing between geocoder requests, in milliseconds.
    #[arg(long)]
    min_interval_ms: Option<u64>,

    /// Merge window for adjacent waypoints, in seconds (inclusive).
    #[arg(long)]
    window_secs: Option<f64>,

    /// Reuse answers for repeated place names within this run.
    #[arg(long)]
    memoize: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        let code = match e.downcast_ref::<PipelineError>() {
            Some(pe) if pe.is_client_error() => EXIT_CLIENT_ERROR,
            _ => EXIT_FAILURE,
        };
        process::exit(code);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;
    settings.validate()?;

    let mut use_case = build_use_case(&settings)?;
    let report = use_case.execute(&cli.url)?;
    let json = report.to_json(cli.pretty)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, json)?;
            log::info!(
                "Wrote {} waypoints to {}",
                report.path.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Settings file first, then command-line overrides.
fn resolve_settings(cli: &Cli) -> Result<Settings, Box<dyn std::error::Error>> {
    let mut settings = Settings::load(cli.config.as_deref())?;

    if let Some(dir) = &cli.transcripts {
        settings.transcripts_dir = dir.clone();
    }
    if let Some(url) = &cli.geocoder_url {
        settings.geocoder_url = url.clone();
    }
    if let Some(url) = &cli.ner_url {
        settings.ner_url = url.clone();
    }
    if let Some(model) = &cli.ner_model {
        settings.ner_model = model.clone();
    }
    if let Some(language) = &cli.language {
        settings.language = language.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        settings.timeout_secs = secs;
    }
    if let Some(ms) = cli.min_interval_ms {
        settings.min_interval_ms = ms;
    }
    if let Some(window) = cli.window_secs {
        settings.window_secs = window;
    }
    if cli.memoize {
        settings.memoize = true;
    }
    Ok(settings)
}

fn build_use_case(settings: &Settings) -> Result<BuildPathUseCase, Box<dyn std::error::Error>> {
    let recognizer =
        HttpEntityRecognizer::new(&settings.ner_url, &settings.ner_model, settings.timeout())?;
    log::info!("Using NER service at {}", recognizer.endpoint());

    let nominatim = NominatimGeocoder::new(NominatimConfig {
        base_url: settings.geocoder_url.clone(),
        user_agent: settings.user_agent.clone(),
        timeout: settings.timeout(),
        min_interval: settings.min_interval(),
    })?;
    log::info!("Using geocoder at {}", settings.geocoder_url);

    let geocoder: Box<dyn Geocoder> = if settings.memoize {
        Box::new(MemoizingGeocoder::new(Box::new(nominatim)))
    } else {
        Box::new(nominatim)
    };

    Ok(BuildPathUseCase::new(
        Box::new(JsonTranscriptSource::new(&settings.transcripts_dir)),
        EntityExtractor::new(Box::new(recognizer)),
        geocoder,
        Reconciler::new(settings.window_secs),
        ReverseLookupOptions {
            language: settings.language.clone(),
            timeout: settings.timeout(),
        },
        Box::new(StdoutPipelineLogger::default()),
    ))
}
