use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::domain::{ExperimentType, SampleAccession};
use crate::error::MgnifyError;

pub const DEFAULT_BASE_URL: &str = "https://www.ebi.ac.uk/metagenomics/api/latest";

/// Status and raw body of one GET. Status policy is left to the caller.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MgnifyError> {
        serde_json::from_str(&self.body).map_err(|err| MgnifyError::MalformedResponse {
            url: url.to_string(),
            message: err.to_string(),
        })
    }
}

pub trait MgnifyClient: Send + Sync {
    fn get(&self, url: &str) -> Result<ApiResponse, MgnifyError>;
}

impl<C: MgnifyClient + ?Sized> MgnifyClient for &C {
    fn get(&self, url: &str) -> Result<ApiResponse, MgnifyError> {
        (**self).get(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Endpoints {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn listing_url(&self, experiment: ExperimentType) -> String {
        format!(
            "{}/samples?experiment-type={}",
            self.base_url,
            experiment.as_str()
        )
    }

    pub fn detail_url(&self, accession: &SampleAccession) -> String {
        format!("{}/samples/{}", self.base_url, accession.as_str())
    }
}

#[derive(Clone)]
pub struct MgnifyHttpClient {
    client: Client,
}

impl MgnifyHttpClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self, MgnifyError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("mgnify-fetch/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| MgnifyError::Http(err.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        // reqwest's blocking client defaults to a 30s timeout; `None` disables it.
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|err| MgnifyError::Http(err.to_string()))?;
        Ok(Self { client })
    }
}

impl MgnifyClient for MgnifyHttpClient {
    fn get(&self, url: &str) -> Result<ApiResponse, MgnifyError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| MgnifyError::Http(err.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|err| MgnifyError::Http(err.to_string()))?;
        tracing::debug!(url, status, bytes = body.len(), "response");
        Ok(ApiResponse { status, body })
    }
}
