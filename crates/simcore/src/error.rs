//! Crate-wide error taxonomy.
//!
//! Physical stepping is total (§7): the only fallible operations are the
//! boundary setters that accept an external identifier or gain set.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    #[error("unknown algorithm id: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown trajectory pattern id: {0}")]
    UnknownPattern(String),

    #[error("invalid gain set for {algorithm}: {reason}")]
    InvalidGainSet { algorithm: String, reason: String },

    #[error("invalid waypoint list: {0}")]
    InvalidWaypointList(String),
}
