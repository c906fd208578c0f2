//! Error adapter for converting LabelShiftError to miette diagnostics.
//!
//! This module provides the bridge between the library's error type and
//! miette's rich diagnostic formatting used in the CLI. Scenario errors keep
//! their source text and are rendered with the offending span highlighted.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use labelshift::LabelShiftError;

/// Adapter for a [`LabelShiftError`].
pub struct ErrorAdapter<'a>(pub &'a LabelShiftError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LabelShiftError::Io(_) => "labelshift::io",
            LabelShiftError::Config(_) => "labelshift::config",
            LabelShiftError::Report(_) => "labelshift::report",
            LabelShiftError::Scenario { .. } => "labelshift::scenario",
            LabelShiftError::DuplicateId(_)
            | LabelShiftError::UnknownPart(_)
            | LabelShiftError::UnknownElement(_)
            | LabelShiftError::NotALink(_)
            | LabelShiftError::InvalidNesting { .. } => "labelshift::model",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            LabelShiftError::UnknownPart(_) | LabelShiftError::UnknownElement(_) => {
                "declare nodes and links before the labels and children that refer to them"
            }
            LabelShiftError::NotALink(_) => "labels can only be attached to links",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            LabelShiftError::Scenario { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let LabelShiftError::Scenario {
            message,
            span: Some(span),
            ..
        } = &self.0
        else {
            return None;
        };
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(
            LabeledSpan::new_primary_with_span(Some(message.clone()), span),
        )))
    }
}

/// Wraps a [`LabelShiftError`] for rendering by miette.
pub fn to_reportable(err: &LabelShiftError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}
