//! Strategy resolution from a target's URL and display name.
//!
//! Resolution is a fixed, ordered rule table: the first matching rule wins
//! and anything unmatched falls back to [`StrategyKind::Generic`]. Domain
//! rules sit above name rules, so an employer hosted on a known ATS gets the
//! ATS strategy even when its name matches a custom one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    Generic,
    Workday,
    Greenhouse,
    Lever,
    GoogleCustom,
    NetflixCustom,
}

impl StrategyKind {
    /// Human-readable strategy name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::Generic => "Universal Smart Scraper",
            Self::Workday => "Workday/Enterprise",
            Self::Greenhouse => "Greenhouse",
            Self::Lever => "Lever",
            Self::GoogleCustom => "Google Custom",
            Self::NetflixCustom => "Netflix Custom",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Url,
    Name,
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    field: Field,
    marker: &'static str,
    kind: StrategyKind,
}

const RULES: &[Rule] = &[
    Rule {
        field: Field::Url,
        marker: "myworkdayjobs.com",
        kind: StrategyKind::Workday,
    },
    // Pinned tenant whose careers site runs on Workday behind its own domain.
    Rule {
        field: Field::Url,
        marker: "adobe.com",
        kind: StrategyKind::Workday,
    },
    Rule {
        field: Field::Url,
        marker: "greenhouse.io",
        kind: StrategyKind::Greenhouse,
    },
    Rule {
        field: Field::Url,
        marker: "lever.co",
        kind: StrategyKind::Lever,
    },
    Rule {
        field: Field::Name,
        marker: "google",
        kind: StrategyKind::GoogleCustom,
    },
    Rule {
        field: Field::Name,
        marker: "netflix",
        kind: StrategyKind::NetflixCustom,
    },
];

/// Pick the strategy for a target. Total and deterministic.
pub fn resolve(url: &str, display_name: &str) -> StrategyKind {
    let url = url.to_lowercase();
    let name = display_name.to_lowercase();

    RULES
        .iter()
        .find(|rule| {
            let haystack = match rule.field {
                Field::Url => &url,
                Field::Name => &name,
            };
            haystack.contains(rule.marker)
        })
        .map_or(StrategyKind::Generic, |rule| rule.kind)
}
