//! User-facing diagnostics
//!
//! Every failure that leaves the provider layer is rendered as a [`Diagnostic`]:
//! a short summary, a detail message and, for configuration problems, the
//! attribute it refers to.

use crate::error::OperationError;
use serde::Serialize;
use std::error::Error as _;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub summary: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute: Option<String>,
}

impl Diagnostic {
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            attribute: None,
        }
    }

    /// Diagnostic scoped to a single configuration attribute
    pub fn attribute(
        attribute: impl Into<String>,
        summary: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            summary: summary.into(),
            detail: detail.into(),
            attribute: Some(attribute.into()),
        }
    }
}

impl From<&OperationError> for Diagnostic {
    fn from(err: &OperationError) -> Self {
        let mut detail = err.source.to_string();
        let mut cause = err.source.source();
        while let Some(inner) = cause {
            let text = inner.to_string();
            if !detail.contains(&text) {
                detail.push_str(": ");
                detail.push_str(&text);
            }
            cause = inner.source();
        }
        Self::error(err.summary.clone(), detail)
    }
}

impl From<OperationError> for Diagnostic {
    fn from(err: OperationError) -> Self {
        Self::from(&err)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attr) => write!(f, "{} [{}]: {}", self.summary, attr, self.detail),
            None => write!(f, "{}: {}", self.summary, self.detail),
        }
    }
}
