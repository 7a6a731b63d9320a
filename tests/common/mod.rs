//! Scripted MGnify responses for pipeline tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use mgnify_fetch::app::{ProgressEvent, ProgressSink};
use mgnify_fetch::client::{ApiResponse, Endpoints, MgnifyClient};
use mgnify_fetch::error::MgnifyError;

pub const BASE_URL: &str = "http://mgnify.test/api";

pub fn endpoints() -> Endpoints {
    Endpoints::new(BASE_URL)
}

enum Route {
    Respond(ApiResponse),
    TransportError(String),
}

#[derive(Default)]
pub struct ScriptedClient {
    routes: HashMap<String, Route>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(mut self, url: impl Into<String>, status: u16, body: Value) -> Self {
        self.routes.insert(
            url.into(),
            Route::Respond(ApiResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn raw(mut self, url: impl Into<String>, status: u16, body: &str) -> Self {
        self.routes.insert(
            url.into(),
            Route::Respond(ApiResponse {
                status,
                body: body.to_string(),
            }),
        );
        self
    }

    pub fn transport_error(mut self, url: impl Into<String>) -> Self {
        self.routes
            .insert(url.into(), Route::TransportError("connection reset".to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|url| url.starts_with(&format!("{BASE_URL}/samples/")))
            .count()
    }
}

impl MgnifyClient for ScriptedClient {
    fn get(&self, url: &str) -> Result<ApiResponse, MgnifyError> {
        self.calls.lock().unwrap().push(url.to_string());
        match self.routes.get(url) {
            Some(Route::Respond(response)) => Ok(response.clone()),
            Some(Route::TransportError(message)) => Err(MgnifyError::Http(message.clone())),
            None => Ok(ApiResponse {
                status: 404,
                body: r#"{"errors": [{"detail": "Not found."}]}"#.to_string(),
            }),
        }
    }
}

#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingSink {
    fn event(&self, event: ProgressEvent) {
        self.messages.lock().unwrap().push(event.message);
    }
}

pub struct Silent;

impl ProgressSink for Silent {
    fn event(&self, _event: ProgressEvent) {}
}

pub fn page_url(experiment: &str, page: usize) -> String {
    if page == 1 {
        format!("{BASE_URL}/samples?experiment-type={experiment}")
    } else {
        format!("{BASE_URL}/samples?experiment-type={experiment}&page={page}")
    }
}

pub fn listing_page(ids: &[&str], next: Option<String>) -> Value {
    let data = ids
        .iter()
        .map(|id| json!({"type": "samples", "id": id, "attributes": {"accession": id}}))
        .collect::<Vec<_>>();
    json!({
        "links": {"first": "ignored", "next": next},
        "data": data,
        "meta": {"pagination": {"count": ids.len()}}
    })
}

/// Scripts the listing for `experiment`, one page per chunk.
pub fn with_listing(client: ScriptedClient, experiment: &str, pages: &[&[&str]]) -> ScriptedClient {
    let mut client = client;
    for (index, ids) in pages.iter().enumerate() {
        let page = index + 1;
        let next = (page < pages.len()).then(|| page_url(experiment, page + 1));
        client = client.json(page_url(experiment, page), 200, listing_page(ids, next));
    }
    client
}

pub fn detail_url(accession: &str) -> String {
    format!("{BASE_URL}/samples/{accession}")
}

pub fn sample_detail(accession: &str, study: &str, attributes: Value) -> Value {
    json!({
        "data": {
            "type": "samples",
            "id": accession,
            "attributes": attributes,
            "relationships": {
                "study": {"data": {"type": "studies", "id": study}}
            }
        }
    })
}

pub fn full_attributes() -> Value {
    json!({
        "biome": "root:Environmental:Aquatic:Marine",
        "environment_material": "sea water",
        "environment_temperature": 14.2,
        "environment_salinity": 35,
        "environment_ph": 8.1,
        "latitude": 43.68,
        "longitude": -8.99,
        "collection_date": "2016-05-12",
        "experiment_type": "amplicon"
    })
}
