#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Capacity aggregation over the station working set.
//!
//! Groups stations by zone, computes global capacity quantiles, and
//! derives the figures the presentation layer shows for a filtered
//! selection of zones. Every function is pure and total: an empty working
//! set yields empty but well-formed results.

pub mod aggregate;
pub mod overview;
pub mod stats;

pub use aggregate::{global_stats, summarize_by_zone};
pub use overview::{filter_by_zones, filter_options, network_overview, paris_split, top_zone};
