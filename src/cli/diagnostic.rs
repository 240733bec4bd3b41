//! Miette-based error diagnostics for CLI error presentation.
//!
//! Configuration syntax errors are rendered with the offending TOML source
//! and a labeled span instead of a bare message.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::error::{ConfigError, Error};

/// Configuration error with source location context.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(maxbid::config))]
pub struct ConfigDiagnostic {
    pub message: String,

    #[source_code]
    pub src: NamedSource<String>,

    #[label("here")]
    pub span: Option<SourceSpan>,

    #[help]
    pub help: Option<String>,
}

impl ConfigDiagnostic {
    #[must_use]
    pub fn new(message: impl Into<String>, name: &str, src: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            src: NamedSource::new(name, src.into()),
            span: None,
            help: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, offset: usize, len: usize) -> Self {
        self.span = Some((offset, len).into());
        self
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Build a diagnostic for errors that carry source text.
    #[must_use]
    pub fn from_error(err: &Error) -> Option<Self> {
        let Error::Config(ConfigError::Parse { path, src, error }) = err else {
            return None;
        };

        let mut diagnostic = Self::new(
            format!("invalid configuration: {}", error.message()),
            &path.display().to_string(),
            src.clone(),
        )
        .with_help("see config.toml.example for every supported key");

        if let Some(span) = error.span() {
            diagnostic = diagnostic.with_span(span.start, span.len().max(1));
        }

        Some(diagnostic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::path::Path;

    #[test]
    fn parse_errors_produce_spanned_diagnostics() {
        let err = Config::parse(Path::new("bad.toml"), "[solver]\nbisection_iterations = \"x\"\n".into())
            .unwrap_err();
        let diagnostic = ConfigDiagnostic::from_error(&err).expect("diagnostic");
        assert!(diagnostic.span.is_some());
        assert!(diagnostic.message.starts_with("invalid configuration"));
    }

    #[test]
    fn other_errors_have_no_diagnostic() {
        let err = Error::Config(ConfigError::MissingField {
            field: "logging.level",
        });
        assert!(ConfigDiagnostic::from_error(&err).is_none());
    }
}
