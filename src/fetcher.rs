use serde_json::Value;

use crate::app::{ProgressEvent, ProgressSink};
use crate::client::{Endpoints, MgnifyClient};
use crate::domain::{ExperimentType, MISSING, SampleAccession, SampleMetadataRecord};
use crate::error::MgnifyError;

#[derive(Debug, Clone, Default)]
pub struct FetchOutcome {
    pub records: Vec<SampleMetadataRecord>,
    /// Accessions whose detail request came back with a non-success status.
    pub skipped: Vec<SampleAccession>,
}

/// Fetches the detail resource of every accession, in order.
///
/// A non-success status skips that sample; transport failures and a missing
/// study relationship abort the whole fetch.
pub fn fetch_metadata<C: MgnifyClient>(
    client: &C,
    endpoints: &Endpoints,
    accessions: &[SampleAccession],
    fallback_experiment: ExperimentType,
    sink: &dyn ProgressSink,
) -> Result<FetchOutcome, MgnifyError> {
    sink.event(ProgressEvent::new(
        "🔄 Fetching metadata for each sample...".to_string(),
    ));

    let mut outcome = FetchOutcome::default();
    for accession in accessions {
        let url = endpoints.detail_url(accession);
        let response = client.get(&url)?;
        if !response.is_success() {
            tracing::debug!(%accession, status = response.status, "skipping sample");
            outcome.skipped.push(accession.clone());
            continue;
        }
        let document: Value = response.json(&url)?;
        outcome
            .records
            .push(project_record(accession, &document, fallback_experiment)?);
    }

    tracing::info!(
        records = outcome.records.len(),
        skipped = outcome.skipped.len(),
        "metadata fetch complete"
    );
    sink.event(ProgressEvent::new(format!(
        "✅ Retrieved metadata for {} samples.",
        outcome.records.len()
    )));
    Ok(outcome)
}

/// Flattens one sample document into a CSV row.
///
/// Accepts either the JSON-API envelope (`{"data": {...}}`) or the bare
/// resource object.
pub fn project_record(
    accession: &SampleAccession,
    document: &Value,
    fallback_experiment: ExperimentType,
) -> Result<SampleMetadataRecord, MgnifyError> {
    let resource = document
        .get("data")
        .filter(|data| data.is_object())
        .unwrap_or(document);
    let attributes = resource.get("attributes");
    let attribute = |key: &str| {
        attributes
            .and_then(|attributes| attributes.get(key))
            .map(cell_text)
            .unwrap_or_else(|| MISSING.to_string())
    };

    let study_accession = resource
        .get("relationships")
        .and_then(|value| value.get("study"))
        .and_then(|value| value.get("data"))
        .and_then(|value| value.get("id"))
        .map(cell_text)
        .ok_or_else(|| MgnifyError::MissingStudy {
            accession: accession.to_string(),
        })?;

    let experiment_type = attributes
        .and_then(|attributes| attributes.get("experiment_type"))
        .map(cell_text)
        .unwrap_or_else(|| fallback_experiment.as_str().to_string());

    Ok(SampleMetadataRecord {
        sample_accession: accession.to_string(),
        biome: attribute("biome"),
        environment: attribute("environment_material"),
        temperature: attribute("environment_temperature"),
        salinity: attribute("environment_salinity"),
        ph: attribute("environment_ph"),
        latitude: attribute("latitude"),
        longitude: attribute("longitude"),
        collection_date: attribute("collection_date"),
        study_accession,
        experiment_type,
    })
}

// A present-but-null attribute becomes an empty cell, not the missing sentinel.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    #[test]
    fn cell_text_variants() {
        assert_eq!(cell_text(&json!("soil")), "soil");
        assert_eq!(cell_text(&json!(12.5)), "12.5");
        assert_eq!(cell_text(&json!(7)), "7");
        assert_eq!(cell_text(&json!(true)), "True");
        assert_eq!(cell_text(&json!(false)), "False");
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!(["a", 1])), r#"["a",1]"#);
    }

    #[test]
    fn bare_resource_is_accepted() {
        let document = json!({
            "attributes": {"biome": "root:Environmental"},
            "relationships": {"study": {"data": {"id": "MGYS00000001"}}}
        });
        let accession = SampleAccession::from("SRS1");
        let record = project_record(&accession, &document, ExperimentType::Metagenomic).unwrap();
        assert_eq!(record.biome, "root:Environmental");
        assert_eq!(record.environment, MISSING);
        assert_eq!(record.experiment_type, "metagenomic");
    }

    #[test]
    fn missing_attributes_object_defaults_every_cell() {
        let document = json!({
            "data": {"relationships": {"study": {"data": {"id": "MGYS00000002"}}}}
        });
        let accession = SampleAccession::from("SRS2");
        let record = project_record(&accession, &document, ExperimentType::Amplicon18s).unwrap();
        assert_eq!(record.sample_accession, "SRS2");
        assert_eq!(record.biome, MISSING);
        assert_eq!(record.collection_date, MISSING);
        assert_eq!(record.study_accession, "MGYS00000002");
        assert_eq!(record.experiment_type, "18s-rrna-gene-amplicon");
    }

    #[test]
    fn missing_study_is_an_error() {
        let document = json!({"data": {"attributes": {}, "relationships": {}}});
        let accession = SampleAccession::from("SRS3");
        let err = project_record(&accession, &document, ExperimentType::Amplicon16s).unwrap_err();
        assert_matches!(err, MgnifyError::MissingStudy { accession } if accession == "SRS3");
    }
}
