//! Page control for career-site extraction.
//!
//! Exposes the [`PageControl`] capability the scanner is written against,
//! a headless Chrome implementation ([`BrowserEngine`] / [`ChromePage`]) and a
//! deterministic in-memory implementation ([`FixturePage`]) for tests.

pub mod actions;
pub mod engine;
pub mod error;
pub mod fixture;
pub mod identity;

pub use actions::{LoadSignal, PageControl, ScrollMetrics, SessionProvider, WaitOutcome};
pub use engine::{BrowserEngine, ChromePage};
pub use error::{BrowserError, Result};
pub use fixture::{FixturePage, FixtureProvider, FixtureSite, NavigationRecord};
pub use identity::ClientIdentity;
