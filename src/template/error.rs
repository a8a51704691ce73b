//! Error types for template filling

use std::path::PathBuf;

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use super::lexer::Span;

/// Errors that can occur while filling a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No template file under the templates directory
    #[error("template not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Placeholder with no binding
    #[error("no value for placeholder '${key}'")]
    MissingKey { key: String, span: Span },

    /// `$` that does not start a valid placeholder
    #[error("invalid placeholder at line {line}, column {column}")]
    InvalidPlaceholder {
        span: Span,
        line: usize,
        column: usize,
    },

    /// Merged bindings lack the `name` used for the output file
    #[error("no 'name' binding to derive the output file name from")]
    MissingOutputName,

    /// Reading the template or writing the script failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl TemplateError {
    pub fn missing_key(key: impl Into<String>, span: Span) -> Self {
        Self::MissingKey {
            key: key.into(),
            span,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get the template span if available
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::MissingKey { span, .. } => Some(span),
            Self::InvalidPlaceholder { span, .. } => Some(span),
            _ => None,
        }
    }

    /// Format the error with template context using ariadne.
    ///
    /// Errors without a span fall back to their display message.
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return self.to_string();
        };

        let label = match self {
            Self::MissingKey { key, .. } => format!("'{}' is not bound", key),
            _ => "expected '$$', '$name' or '${name}'".to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(self.to_string())
            .with_label(
                Label::new((filename, span.clone()))
                    .with_message(label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}
