//! Human-readable report formatter.
//!
//! Issues are grouped under the consumer that declared them, each followed
//! by its remediation hint. Summary tables close the report.

use std::io::Write;

use super::{Issue, Report, ReportFormatter, Summary};
use crate::peers::PeerStatus;
use crate::ui::{OutputMode, PeercheckTheme, Table};

/// Formats a report for terminal display.
pub struct HumanFormatter {
    mode: OutputMode,
    theme: PeercheckTheme,
}

impl HumanFormatter {
    /// Create a new human formatter.
    pub fn new(mode: OutputMode, use_color: bool) -> Self {
        Self {
            mode,
            theme: PeercheckTheme::for_color(use_color),
        }
    }

    fn issue_line(&self, issue: &Issue) -> String {
        let icon = PeercheckTheme::status_icon(issue.status);
        let style = self.theme.status_style(issue.status);
        let detail = match issue.status {
            PeerStatus::Missing => format!("missing (requires {})", issue.range),
            PeerStatus::Mismatched => format!(
                "{} installed, requires {}",
                issue.installed_version.as_deref().unwrap_or("?"),
                issue.range
            ),
            PeerStatus::InvalidRange => format!("cannot check range '{}'", issue.range),
            PeerStatus::InvalidVersion => format!(
                "cannot check installed version '{}'",
                issue.installed_version.as_deref().unwrap_or("?")
            ),
            PeerStatus::Satisfied => format!("satisfies {}", issue.range),
        };
        format!(
            "  {} {} {}",
            style.apply_to(icon),
            self.theme.highlight.apply_to(&issue.peer),
            style.apply_to(detail)
        )
    }

    fn write_issues<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        for (package, issues) in report.issues_by_package() {
            let version = issues
                .first()
                .map(|i| i.package_version.as_str())
                .unwrap_or_default();
            writeln!(
                writer,
                "{}",
                self.theme
                    .header
                    .apply_to(format!("{}@{}", package, version))
            )?;
            for issue in issues {
                writeln!(writer, "{}", self.issue_line(issue))?;
                match issue.status {
                    PeerStatus::Missing => {
                        if let Some(from) = &issue.searched_from {
                            writeln!(
                                writer,
                                "    {}",
                                self.theme
                                    .dim
                                    .apply_to(format!("searched upward from {}", from.display()))
                            )?;
                        }
                    }
                    PeerStatus::Mismatched | PeerStatus::InvalidVersion => {
                        if let Some(found) = &issue.resolved_from {
                            writeln!(
                                writer,
                                "    {}",
                                self.theme
                                    .dim
                                    .apply_to(format!("resolved from {}", found.display()))
                            )?;
                        }
                    }
                    PeerStatus::InvalidRange | PeerStatus::Satisfied => {}
                }
                if !issue.is_blocking() {
                    writeln!(writer, "    {}", self.theme.dim.apply_to(&issue.reason))?;
                }
                if let Some(suggestion) = &issue.suggestion {
                    writeln!(
                        writer,
                        "    = help: run {}",
                        self.theme.command.apply_to(suggestion)
                    )?;
                }
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    fn write_satisfied<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        if report.satisfied.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", self.theme.header.apply_to("Satisfied peers"))?;
        for peer in &report.satisfied {
            writeln!(
                writer,
                "  {} {} {}@{} satisfies {}",
                self.theme.success.apply_to("✓"),
                peer.package,
                peer.peer,
                peer.version,
                peer.range
            )?;
        }
        writeln!(writer)
    }

    fn summary_table(summary: &Summary) -> Table {
        let mut table = Table::new(&["Status", "Count"]).numeric();
        let rows = [
            (PeerStatus::Satisfied, summary.satisfied),
            (PeerStatus::Mismatched, summary.mismatched),
            (PeerStatus::Missing, summary.missing),
            (PeerStatus::InvalidRange, summary.invalid_range),
            (PeerStatus::InvalidVersion, summary.invalid_version),
        ];
        for (status, count) in rows {
            let unverifiable =
                matches!(status, PeerStatus::InvalidRange | PeerStatus::InvalidVersion);
            if unverifiable && count == 0 {
                continue;
            }
            table.add_row(&[status.as_str().to_string(), count.to_string()]);
        }
        table
    }

    fn package_table(report: &Report) -> Table {
        let mut table =
            Table::new(&["Package", "Satisfied", "Mismatched", "Missing", "Unchecked"]).numeric();
        for (package, summary) in &report.packages {
            table.add_row(&[
                package.clone(),
                summary.satisfied.to_string(),
                summary.mismatched.to_string(),
                summary.missing.to_string(),
                (summary.invalid_range + summary.invalid_version).to_string(),
            ]);
        }
        table
    }
}

impl ReportFormatter for HumanFormatter {
    fn format<W: Write>(&self, report: &Report, writer: &mut W) -> std::io::Result<()> {
        self.write_issues(report, writer)?;

        if self.mode.shows_satisfied() {
            self.write_satisfied(report, writer)?;
        }

        if report.summary.total() == 0 {
            writeln!(
                writer,
                "No peer dependencies declared under {}",
                report.store_root.display()
            )?;
            return Ok(());
        }

        writeln!(writer, "{}", self.theme.header.apply_to("Peer dependency summary"))?;
        writeln!(writer, "{}", Self::summary_table(&report.summary).render())?;

        if self.mode.shows_package_table() {
            writeln!(writer)?;
            writeln!(writer, "{}", self.theme.header.apply_to("Per-package summary"))?;
            writeln!(writer, "{}", Self::package_table(report).render())?;
        }

        Ok(())
    }
}
