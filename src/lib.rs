//! Situational betting-trends engine.
//!
//! Per-team trend rows are paired into two-sided games ([`trends::grouping`]),
//! resolved into per-category consensus ([`trends::consensus`]), scored
//! ([`trends::scoring`]) and ranked for display ([`trends::ranking`]).  The
//! engine is pure and synchronous; fetching rows ([`source`]) and serving
//! them ([`dashboard`]) live around it.

pub mod config;
pub mod dashboard;
pub mod source;
pub mod trends;
