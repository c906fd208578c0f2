//! Error types for Labelshift operations.
//!
//! Gesture handling itself never fails: a tool that cannot act simply
//! declines. [`LabelShiftError`] covers building and editing a
//! [`MemoryDiagram`](crate::model::MemoryDiagram), loading configuration, and
//! reading gesture scenarios.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Labelshift operations.
#[derive(Debug, Error)]
pub enum LabelShiftError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report error: {0}")]
    Report(String),

    /// A scenario document could not be read. Keeps the source text so the
    /// offending span can be shown.
    #[error("Invalid scenario: {message}")]
    Scenario {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),

    #[error("Unknown part: {0}")]
    UnknownPart(String),

    #[error("Unknown element: {0}")]
    UnknownElement(String),

    #[error("Part `{0}` is not a link")]
    NotALink(String),

    #[error("Element `{element}` cannot be nested in `{parent}`: {reason}")]
    InvalidNesting {
        element: String,
        parent: String,
        reason: &'static str,
    },
}

impl LabelShiftError {
    /// Creates a [`LabelShiftError::Scenario`] pointing at `span` in `src`.
    pub fn new_scenario_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        LabelShiftError::Scenario {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}
