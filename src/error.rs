use camino::Utf8PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::domain::ExperimentType;

#[derive(Debug, Error, Diagnostic)]
pub enum MgnifyError {
    #[error("invalid experiment type: {0}")]
    #[diagnostic(help(
        "expected one of: metagenomic, 16s-rrna-gene-amplicon, 18s-rrna-gene-amplicon, its-gene-amplicon"
    ))]
    InvalidExperiment(String),

    #[error("failed to read config file at {0}")]
    ConfigRead(Utf8PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("MGnify request failed: {0}")]
    Http(String),

    #[error("MGnify listing returned status {status} for {url}")]
    ListingStatus { status: u16, url: String },

    #[error("malformed MGnify response from {url}: {message}")]
    MalformedResponse { url: String, message: String },

    #[error("sample {accession} has no study relationship")]
    MissingStudy { accession: String },

    #[error("no samples found for experiment type {0}")]
    NoSamples(ExperimentType),

    #[error("filesystem error: {0}")]
    Filesystem(String),

    #[error("failed to write CSV: {0}")]
    Csv(String),
}
