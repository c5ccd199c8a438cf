//! Staleness detection.
//!
//! Compares source and artifact timestamps by unit name. With no artifacts at
//! all the build is `Fresh` and every source is stale. Otherwise it is
//! `Incremental` and a unit is stale when its source is strictly newer than
//! its artifact, when either timestamp is unknown, or when it has no artifact
//! yet. Artifacts without a source are ignored.

use crate::timestamp::Stamp;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Fresh,
    Incremental,
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildMode::Fresh => write!(f, "fresh"),
            BuildMode::Incremental => write!(f, "incremental"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    NoPriorArtifacts,
    SourceNewer,
    NewSource,
    UnknownTimestamp,
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StaleReason::NoPriorArtifacts => "no prior artifacts",
            StaleReason::SourceNewer => "source newer than artifact",
            StaleReason::NewSource => "no artifact for source",
            StaleReason::UnknownTimestamp => "timestamp unknown",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Staleness {
    pub mode: BuildMode,
    pub stale: BTreeMap<String, StaleReason>,
}

impl Staleness {
    pub fn is_stale(&self, name: &str) -> bool {
        self.stale.contains_key(name)
    }

    pub fn stale_names(&self) -> BTreeSet<&str> {
        self.stale.keys().map(String::as_str).collect()
    }
}

pub fn classify(
    sources: &BTreeMap<String, Stamp>,
    artifacts: &BTreeMap<String, Stamp>,
) -> Staleness {
    if artifacts.is_empty() {
        return Staleness {
            mode: BuildMode::Fresh,
            stale: sources
                .keys()
                .map(|name| (name.clone(), StaleReason::NoPriorArtifacts))
                .collect(),
        };
    }

    let mut stale = BTreeMap::new();
    for (name, source) in sources {
        let reason = match artifacts.get(name) {
            None => Some(StaleReason::NewSource),
            Some(artifact) => match source.is_newer_than(artifact) {
                Some(true) => Some(StaleReason::SourceNewer),
                Some(false) => None,
                None => Some(StaleReason::UnknownTimestamp),
            },
        };
        if let Some(reason) = reason {
            stale.insert(name.clone(), reason);
        }
    }

    Staleness {
        mode: BuildMode::Incremental,
        stale,
    }
}
