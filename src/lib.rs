//! # EA Charge Report
//!
//! A batch tool that turns Electrify America charging-session receipt emails
//! into a CSV of structured session records and a pair of descriptive charts.
//!
//! ## Overview
//!
//! The pipeline is strictly linear, one email at a time:
//! - load each `.eml` file and pull out the plain-text body
//! - extract named fields with fixed regex patterns
//! - derive metrics (estimated starting charge, effective speed, minutes)
//! - look up the outdoor temperature at session start from a weather archive
//! - append everything to a CSV sink
//!
//! If the output CSV already exists it is treated as a cache and read back
//! verbatim instead of reprocessing; delete it to force a rerun. The chart
//! renderers consume the CSV independently of the pipeline.
//!
//! Extraction is best effort: a field whose pattern does not match is left
//! empty, a derived metric with a missing or malformed input stays empty, and
//! a failed weather lookup only costs that record its temperature. Only sink
//! and chart I/O failures abort a run.

/// Chart rendering over the persisted CSV
pub mod charts;

/// Command-line argument parsing and configuration
pub mod cli;

/// Email file discovery and MIME body extraction
pub mod email;

/// Regex field extraction from receipt bodies
pub mod extract;

/// Derived metric computation
pub mod metrics;

/// Data model for charging session records
pub mod models;

/// Pipeline orchestration and cache semantics
pub mod pipeline;

/// CSV persistence and cache-hit loading
pub mod sink;

/// Historical weather lookup
pub mod weather;
