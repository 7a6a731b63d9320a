use std::time::{Duration, Instant};

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::client::{Endpoints, MgnifyClient};
use crate::collector::collect_accessions;
use crate::domain::{ExperimentType, SampleAccession};
use crate::error::MgnifyError;
use crate::fetcher::fetch_metadata;
use crate::table::write_csv_atomic;

#[derive(Debug, Clone)]
pub struct RunRequest {
    pub experiment: ExperimentType,
    pub output_dir: Utf8PathBuf,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub experiment: ExperimentType,
    pub label: String,
    pub accessions_listed: usize,
    pub records_written: usize,
    pub skipped: Vec<SampleAccession>,
    pub output_path: String,
    pub finished_at: String,
}

#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub message: String,
    pub elapsed: Option<Duration>,
}

impl ProgressEvent {
    pub fn new(message: String) -> Self {
        Self {
            message,
            elapsed: None,
        }
    }
}

pub trait ProgressSink {
    fn event(&self, event: ProgressEvent);
}

#[derive(Clone)]
pub struct Pipeline<C: MgnifyClient> {
    client: C,
    endpoints: Endpoints,
}

impl<C: MgnifyClient> Pipeline<C> {
    pub fn new(client: C, endpoints: Endpoints) -> Self {
        Self { client, endpoints }
    }

    pub fn output_path(request: &RunRequest) -> Utf8PathBuf {
        request
            .output_dir
            .join(request.experiment.output_file_name())
    }

    /// Runs listing, detail fetch and CSV output once.
    ///
    /// Nothing is written unless both network stages complete.
    pub fn run(
        &self,
        request: &RunRequest,
        sink: &dyn ProgressSink,
    ) -> Result<RunSummary, MgnifyError> {
        let start = Instant::now();
        let accessions =
            collect_accessions(&self.client, &self.endpoints, request.experiment, sink)?;
        if accessions.is_empty() {
            return Err(MgnifyError::NoSamples(request.experiment));
        }

        let outcome = fetch_metadata(
            &self.client,
            &self.endpoints,
            &accessions,
            request.experiment,
            sink,
        )?;

        let output_path = Self::output_path(request);
        write_csv_atomic(&output_path, &outcome.records)?;
        sink.event(ProgressEvent {
            message: format!("✅ Metadata saved to '{output_path}'."),
            elapsed: Some(start.elapsed()),
        });

        Ok(RunSummary {
            experiment: request.experiment,
            label: request.experiment.label().to_string(),
            accessions_listed: accessions.len(),
            records_written: outcome.records.len(),
            skipped: outcome.skipped,
            output_path: output_path.to_string(),
            finished_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
