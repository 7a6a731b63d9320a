use serde::Deserialize;

use crate::app::{ProgressEvent, ProgressSink};
use crate::client::{Endpoints, MgnifyClient};
use crate::domain::{ExperimentType, SampleAccession};
use crate::error::MgnifyError;

#[derive(Debug, Deserialize)]
struct ListingPage {
    data: Vec<ListingEntry>,
    #[serde(default)]
    links: Option<PageLinks>,
}

#[derive(Debug, Deserialize)]
struct ListingEntry {
    id: String,
}

#[derive(Debug, Deserialize)]
struct PageLinks {
    #[serde(default)]
    next: Option<String>,
}

impl ListingPage {
    fn next_url(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_deref())
            .map(str::trim)
            .filter(|next| !next.is_empty())
    }
}

/// Walks the paginated samples listing for `experiment` and returns every
/// accession in page order, then within-page order.
///
/// A non-success status on any page aborts the walk.
pub fn collect_accessions<C: MgnifyClient>(
    client: &C,
    endpoints: &Endpoints,
    experiment: ExperimentType,
    sink: &dyn ProgressSink,
) -> Result<Vec<SampleAccession>, MgnifyError> {
    sink.event(ProgressEvent::new(format!(
        "🔄 Fetching samples for '{}'...",
        experiment.label()
    )));

    let mut accessions = Vec::new();
    let mut next_page = Some(endpoints.listing_url(experiment));
    let mut pages = 0usize;

    while let Some(url) = next_page.take() {
        let response = client.get(&url)?;
        if !response.is_success() {
            return Err(MgnifyError::ListingStatus {
                status: response.status,
                url,
            });
        }
        let page: ListingPage = response.json(&url)?;
        pages += 1;
        tracing::debug!(page = pages, entries = page.data.len(), %url, "listing page");

        next_page = page.next_url().map(str::to_string);
        accessions.extend(
            page.data
                .into_iter()
                .map(|entry| SampleAccession::from(entry.id)),
        );
    }

    tracing::info!(
        experiment = experiment.as_str(),
        pages,
        accessions = accessions.len(),
        "listing complete"
    );
    sink.event(ProgressEvent::new(format!(
        "✅ Retrieved {} sample accessions.",
        accessions.len()
    )));
    Ok(accessions)
}
