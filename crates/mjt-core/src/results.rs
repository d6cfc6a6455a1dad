//! Check records and the exported report document.
//!
//! The JSON field names (`type`, `info_str`, `filepath`) are the report
//! contract consumed by downstream tooling.

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::kinds::CheckKind;

/// One outcome of one check against one path. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    #[serde(rename = "type")]
    pub kind: CheckKind,
    pub passed: bool,
    /// Human-readable summary, empty on success.
    pub message: String,
    /// Extra failure context (parser position, decoder text), usually empty.
    #[serde(rename = "info_str")]
    pub detail: String,
    /// Path the check ran against, `/`-separated.
    #[serde(rename = "filepath")]
    pub path: String,
}

impl CheckResult {
    #[must_use]
    pub fn pass(kind: CheckKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            passed: true,
            message: String::new(),
            detail: String::new(),
            path: path.into(),
        }
    }

    #[must_use]
    pub fn fail(
        kind: CheckKind,
        path: impl Into<String>,
        message: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            passed: false,
            message: message.into(),
            detail: detail.into(),
            path: path.into(),
        }
    }
}

/// Pass/fail counts over a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
}

/// The exported document: `{"checks": [...]}` in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckReport {
    pub checks: Vec<CheckResult>,
}

impl CheckReport {
    #[must_use]
    pub const fn new(checks: Vec<CheckResult>) -> Self {
        Self { checks }
    }

    #[must_use]
    pub fn summary(&self) -> ReportSummary {
        let passed = self.checks.iter().filter(|check| check.passed).count();
        ReportSummary {
            total: self.checks.len(),
            passed,
            failed: self.checks.len() - passed,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.checks.iter().filter(|check| !check.passed)
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.checks.iter().any(|check| !check.passed)
    }

    /// Encode with four-space indentation.
    ///
    /// # Errors
    ///
    /// [`CoreError::Json`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, CoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8.
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Decode a `{"checks": [...]}` document.
    ///
    /// # Errors
    ///
    /// [`CoreError::Json`] when `input` is not a valid report.
    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        serde_json::from_str(input).map_err(CoreError::from)
    }
}
