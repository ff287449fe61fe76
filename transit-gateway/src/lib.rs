//! Transit trip-planning gateway.
//!
//! Sits between rider-facing trip requests and an external, date-unaware
//! trip planner plus a geocoder, and serves a date-aware transit index of
//! routes and agencies.

pub mod cache;
pub mod config;
pub mod content;
pub mod domain;
pub mod geocoder;
pub mod otp;
pub mod planner;
pub mod transit;
pub mod web;
