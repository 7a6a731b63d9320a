use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use mgnify_fetch::app::{Pipeline, RunRequest};
use mgnify_fetch::client::{Endpoints, MgnifyHttpClient};
use mgnify_fetch::config::{ConfigLoader, Overrides};
use mgnify_fetch::domain::ExperimentType;
use mgnify_fetch::error::MgnifyError;
use mgnify_fetch::output::{ConsoleOutput, JsonOutput, OutputMode};

#[derive(Parser)]
#[command(name = "mgnify-fetch")]
#[command(about = "Fetch metadata from MGnify based on experiment type and save it as a CSV file")]
#[command(version)]
struct Cli {
    /// Experiment type to filter samples by [default: 16s-rrna-gene-amplicon]
    #[arg(long, value_enum)]
    experiment: Option<ExperimentType>,

    /// Directory the CSV file is written to [default: current directory]
    #[arg(long)]
    output_dir: Option<Utf8PathBuf>,

    /// MGnify API root
    #[arg(long)]
    base_url: Option<String>,

    /// Per-request timeout; requests never time out when unset
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// JSON settings file (experiment, output_dir, base_url, timeout_secs)
    #[arg(long)]
    config: Option<Utf8PathBuf>,

    /// Print a JSON run summary instead of console messages
    #[arg(long)]
    json: bool,

    /// Print the supported experiment types and exit
    #[arg(long)]
    list_experiments: bool,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<MgnifyError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &MgnifyError) -> u8 {
    match error {
        MgnifyError::InvalidExperiment(_)
        | MgnifyError::ConfigRead(_)
        | MgnifyError::ConfigParse(_) => 2,
        MgnifyError::Http(_) | MgnifyError::ListingStatus { .. } => 3,
        MgnifyError::NoSamples(_) => 4,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Console
    };

    if cli.list_experiments {
        match output_mode {
            OutputMode::Json => JsonOutput::print_experiments().into_diagnostic()?,
            OutputMode::Console => ConsoleOutput::print_experiments(),
        }
        return Ok(());
    }

    let overrides = Overrides {
        experiment: cli.experiment,
        output_dir: cli.output_dir,
        base_url: cli.base_url,
        timeout_secs: cli.timeout_secs,
    };
    let settings = ConfigLoader::resolve(cli.config.as_deref(), overrides)?;
    tracing::debug!(?settings, "resolved settings");

    let client = MgnifyHttpClient::new(settings.timeout)?;
    let pipeline = Pipeline::new(client, Endpoints::new(&settings.base_url));
    let request = RunRequest {
        experiment: settings.experiment,
        output_dir: settings.output_dir,
    };

    match output_mode {
        OutputMode::Json => {
            let summary = pipeline.run(&request, &JsonOutput)?;
            JsonOutput::print_summary(&summary).into_diagnostic()?;
        }
        OutputMode::Console => {
            ConsoleOutput::print_banner(request.experiment);
            let summary = pipeline.run(&request, &ConsoleOutput)?;
            ConsoleOutput::print_summary(&summary);
        }
    }
    Ok(())
}
