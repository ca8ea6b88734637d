use thiserror::Error;

/// Errors returned by overlay operations.
///
/// Only [OverlayError::InvalidInput] is final from the point of view of the robust
/// orchestrator; every other variant triggers the next noding strategy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    /// Malformed input geometry, rejected before any noding.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Noded linework failed validation or labeling found an inconsistency caused by noding.
    #[error("noding failure: {message}{}", fmt_location(.location))]
    NodingFailure {
        message: String,
        location: Option<(f64, f64)>,
    },
    /// The inputs could not be reconciled into a valid topology.
    #[error("topology exception: {message}{}", fmt_location(.location))]
    Topology {
        message: String,
        location: Option<(f64, f64)>,
    },
    /// A hole ring produced by the polygon builder was not contained by any shell.
    #[error("unable to assign free hole to a shell at or near ({} {})", .location.0, .location.1)]
    UnassignedHole { location: (f64, f64) },
}

fn fmt_location(location: &Option<(f64, f64)>) -> String {
    match location {
        Some((x, y)) => format!(" at or near ({x} {y})"),
        None => String::new(),
    }
}

impl OverlayError {
    pub(crate) fn topology(message: impl Into<String>) -> Self {
        OverlayError::Topology {
            message: message.into(),
            location: None,
        }
    }

    pub(crate) fn topology_at(message: impl Into<String>, x: f64, y: f64) -> Self {
        OverlayError::Topology {
            message: message.into(),
            location: Some((x, y)),
        }
    }

    pub(crate) fn noding_at(message: impl Into<String>, x: f64, y: f64) -> Self {
        OverlayError::NodingFailure {
            message: message.into(),
            location: Some((x, y)),
        }
    }

    /// Returns `true` if a different noding strategy may succeed where this error occurred.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, OverlayError::InvalidInput(_))
    }

    /// Converts an internal noding failure into the caller facing topology error, other
    /// variants are returned unchanged.
    pub fn into_surfaced(self) -> Self {
        match self {
            OverlayError::NodingFailure { message, location } => {
                OverlayError::Topology { message, location }
            }
            other => other,
        }
    }
}

pub type OverlayResult<T> = Result<T, OverlayError>;
