//! Fetch MGnify sample metadata for one experiment type and write it as CSV.
//!
//! The run is a two-stage pipeline: [`collector`] walks the paginated samples
//! listing, [`fetcher`] pulls each sample's detail resource, and [`table`]
//! serializes the flattened rows.

pub mod app;
pub mod client;
pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod fetcher;
pub mod output;
pub mod table;
