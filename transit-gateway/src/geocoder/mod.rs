//! Geocoding adapter.
//!
//! Wraps a geocoding backend behind a single `resolve(text)` operation.
//! The gateway ships a Solr client; [`crate::cache::CachedGeocoder`] adds
//! memoisation in front of any implementation.

mod client;
mod error;

pub use client::{Geocoder, GeocoderConfig, SolrDoc, SolrGeocoder};
pub use error::GeocodeError;
