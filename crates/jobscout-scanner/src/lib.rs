//! JobScout Scanner - Career page scraping and run orchestration.
//!
//! This crate turns configured career pages into job postings. Each target is
//! matched to one of a closed set of extraction strategies, scraped through a
//! shared browser page and the results are stored and reported once per run.
//!
//! # Features
//!
//! - Table-driven strategy resolution from a target's URL and name
//! - Heuristic extraction for arbitrary career pages
//! - Dedicated extraction for Workday, Greenhouse and Lever boards
//! - Per-keyword search for Google and Netflix careers sites
//! - Incremental scrolling for lazily rendered listings
//! - Per-target failure isolation and an exclusive run-lock
//!
//! # Example
//!
//! ```rust,ignore
//! use jobscout_scanner::ScrapeOrchestrator;
//! use std::sync::Arc;
//!
//! let orchestrator = ScrapeOrchestrator::new(
//!     Arc::new(database),
//!     Arc::new(browser_engine),
//!     Arc::new(notifier),
//! )
//! .with_recipient("me@example.com");
//!
//! let summary = orchestrator.run().await?;
//! println!("{} new postings", summary.postings_new);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod dedup;
#[allow(missing_docs)]
pub mod dom;
#[allow(missing_docs)]
pub mod error;
#[allow(missing_docs)]
pub mod filter;
pub mod orchestrator;
#[allow(missing_docs)]
pub mod resolver;
#[allow(missing_docs)]
pub mod scroll;
#[allow(missing_docs)]
pub mod strategies;

// Re-export commonly used types
pub use dedup::dedup_by_url;
pub use error::{Result, ScanError};
pub use filter::KeywordFilter;
pub use orchestrator::{RunSummary, ScrapeOrchestrator};
pub use resolver::{resolve, StrategyKind};
pub use scroll::ScrollDriver;
pub use strategies::{ExtractionContext, ScanSettings, Strategy};
