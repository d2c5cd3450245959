//! JSON report formatter.
//!
//! Emits one pretty-printed object for tooling integration.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::{Issue, Report, ReportFormatter, SatisfiedPeer, Summary};

/// Formats a report as JSON.
pub struct JsonFormatter {
    strict: bool,
    include_satisfied: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    store_root: &'a Path,
    project_root: &'a Path,
    strict: bool,
    passed: bool,
    summary: &'a Summary,
    packages: &'a BTreeMap<String, Summary>,
    issues: &'a [Issue],
    #[serde(skip_serializing_if = "Option::is_none")]
    satisfied: Option<&'a [SatisfiedPeer]>,
}

impl JsonFormatter {
    /// Create a JSON formatter.
    ///
    /// `strict` is echoed into the output and decides `passed`; satisfied
    /// peers are listed only when `include_satisfied` is set.
    pub fn new(strict: bool, include_satisfied: bool) -> Self {
        Self {
            strict,
            include_satisfied,
        }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        let output = JsonOutput {
            store_root: &report.store_root,
            project_root: &report.project_root,
            strict: self.strict,
            passed: report.exit_status(self.strict) == super::ExitStatus::Pass,
            summary: &report.summary,
            packages: &report.packages,
            issues: &report.issues,
            satisfied: self
                .include_satisfied
                .then_some(report.satisfied.as_slice()),
        };

        serde_json::to_writer_pretty(&mut *writer, &output).map_err(std::io::Error::other)?;
        writeln!(writer)
    }
}
