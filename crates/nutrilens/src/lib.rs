//! Personalized food-scan analysis.
//!
//! The [`scan`] module holds the engine: it takes an already-fetched product
//! payload plus a health profile and produces ingredient buckets, allergen
//! matches, nutrient ratings against profile-adjusted thresholds, ranked
//! impact insights and on-demand substitute suggestions. Everything in it is
//! synchronous and side-effect-free apart from `tracing` events.

pub mod config;
pub mod error;
pub mod scan;
pub mod telemetry;
