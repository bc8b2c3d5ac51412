use std::fmt;

use thiserror::Error;

/// Errors returned by the matcher and the tagging applier.
#[derive(Debug, Error)]
pub enum AutotagError {
    /// A catalog lookup failed; nothing was matched or tagged past this point.
    #[error("Lookup failed: {0}")]
    Lookup(#[source] anyhow::Error),

    /// One or more relation writes failed; the rest of the batch was applied.
    #[error("{} tagging operation(s) failed: {}", .0.len(), join_failures(.0))]
    Relations(Vec<RelationFailure>),
}

impl AutotagError {
    /// Returns the individual relation failures, if any.
    pub fn failures(&self) -> &[RelationFailure] {
        match self {
            Self::Relations(failures) => failures,
            Self::Lookup(_) => &[],
        }
    }
}

/// A single failed attempt to associate an entity with a media record.
#[derive(Debug)]
pub struct RelationFailure {
    pub target_kind: &'static str,
    pub target_name: String,
    pub entity_kind: &'static str,
    pub entity_name: String,
    pub source: anyhow::Error,
}

impl fmt::Display for RelationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error adding {} '{}' to {} '{}': {}",
            self.target_kind, self.target_name, self.entity_kind, self.entity_name, self.source
        )
    }
}

fn join_failures(failures: &[RelationFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
