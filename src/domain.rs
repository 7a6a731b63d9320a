use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::MgnifyError;

/// Cell value written when the remote record omits an attribute.
pub const MISSING: &str = "N/A";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, ValueEnum,
)]
pub enum ExperimentType {
    #[serde(rename = "metagenomic")]
    #[value(name = "metagenomic")]
    Metagenomic,
    #[default]
    #[serde(rename = "16s-rrna-gene-amplicon")]
    #[value(name = "16s-rrna-gene-amplicon")]
    Amplicon16s,
    #[serde(rename = "18s-rrna-gene-amplicon")]
    #[value(name = "18s-rrna-gene-amplicon")]
    Amplicon18s,
    #[serde(rename = "its-gene-amplicon")]
    #[value(name = "its-gene-amplicon")]
    AmpliconIts,
}

impl ExperimentType {
    pub const ALL: [ExperimentType; 4] = [
        ExperimentType::Metagenomic,
        ExperimentType::Amplicon16s,
        ExperimentType::Amplicon18s,
        ExperimentType::AmpliconIts,
    ];

    /// Value used by the `experiment-type` filter of the samples endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperimentType::Metagenomic => "metagenomic",
            ExperimentType::Amplicon16s => "16s-rrna-gene-amplicon",
            ExperimentType::Amplicon18s => "18s-rrna-gene-amplicon",
            ExperimentType::AmpliconIts => "its-gene-amplicon",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExperimentType::Metagenomic => "Shotgun Metagenomics",
            ExperimentType::Amplicon16s => "16S rRNA Gene Amplicon (Default)",
            ExperimentType::Amplicon18s => "18S rRNA Gene Amplicon",
            ExperimentType::AmpliconIts => "ITS Gene Amplicon (Fungal)",
        }
    }

    pub fn output_file_name(&self) -> String {
        format!(
            "mgnify_samples_metadata_{}.csv",
            self.as_str().replace('-', "_")
        )
    }
}

impl fmt::Display for ExperimentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExperimentType {
    type Err = MgnifyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        ExperimentType::ALL
            .into_iter()
            .find(|experiment| experiment.as_str() == trimmed)
            .ok_or_else(|| MgnifyError::InvalidExperiment(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SampleAccession(String);

impl SampleAccession {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SampleAccession {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for SampleAccession {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SampleAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One CSV row. Field order is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleMetadataRecord {
    pub sample_accession: String,
    pub biome: String,
    pub environment: String,
    pub temperature: String,
    pub salinity: String,
    #[serde(rename = "pH")]
    pub ph: String,
    pub latitude: String,
    pub longitude: String,
    pub collection_date: String,
    pub study_accession: String,
    pub experiment_type: String,
}

impl SampleMetadataRecord {
    pub const COLUMNS: [&'static str; 11] = [
        "sample_accession",
        "biome",
        "environment",
        "temperature",
        "salinity",
        "pH",
        "latitude",
        "longitude",
        "collection_date",
        "study_accession",
        "experiment_type",
    ];
}
