//! Output formatting and notification for reconciliation reports.

use std::io::Write;

use data_contract_core::{Contract, Issue, IssueKind, ReconciliationReport};
use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// Supported report formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
    Markdown,
}

/// Serialized view of a report: issues carry their rendered message next to
/// their structured fields.
#[derive(Serialize)]
struct ReportView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    format_version: Option<&'a str>,
    compliant: bool,
    contract: &'a Contract,
    contract_fingerprint: &'a str,
    issues: Vec<IssueView<'a>>,
}

#[derive(Serialize)]
struct IssueView<'a> {
    #[serde(flatten)]
    issue: &'a Issue,
    message: String,
}

impl<'a> ReportView<'a> {
    fn new(report: &'a ReconciliationReport) -> Self {
        Self {
            format_version: report.format_version.as_deref(),
            compliant: report.is_compliant(),
            contract: &report.contract,
            contract_fingerprint: &report.contract_fingerprint,
            issues: report
                .issues
                .iter()
                .map(|issue| IssueView {
                    issue,
                    message: issue.to_string(),
                })
                .collect(),
        }
    }
}

/// Formats a reconciliation report in the requested output format.
///
/// # Errors
///
/// Returns [`LoaderError::Serialize`] if JSON or YAML serialization fails.
pub fn format_report(report: &ReconciliationReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = contract_to_text(&report.contract);
            out.push_str(&issues_to_text(&report.issues));
            Ok(out)
        }
        OutputFormat::Json => serde_json::to_string_pretty(&ReportView::new(report))
            .map(|mut json| {
                json.push('\n');
                json
            })
            .map_err(|e| LoaderError::Serialize(format!("JSON serialization failed: {e}"))),
        OutputFormat::Yaml => serde_yaml::to_string(&ReportView::new(report))
            .map_err(|e| LoaderError::Serialize(format!("YAML serialization failed: {e}"))),
        OutputFormat::Markdown => Ok(report_to_markdown(report)),
    }
}

/// Formats a contract on its own as a `{"columns": {...}}` JSON document.
pub fn format_contract_json(contract: &Contract) -> Result<String> {
    serde_json::to_string_pretty(contract)
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| LoaderError::Serialize(format!("JSON serialization failed: {e}")))
}

fn contract_to_text(contract: &Contract) -> String {
    let mut out = String::from("Generated Data Contract:\n\n");
    for (column, type_label) in contract.iter() {
        out.push_str(&format!("- {column}: {type_label}\n"));
    }
    out.push('\n');
    out
}

fn issues_to_text(issues: &[Issue]) -> String {
    if issues.is_empty() {
        return "All data conforms to the contract!\n\n".to_string();
    }

    let mut out = String::from("Contract Enforcement Issues:\n\n");
    for issue in issues {
        out.push_str(&format!("- {issue}\n"));
    }
    out.push('\n');
    out
}

fn report_to_markdown(report: &ReconciliationReport) -> String {
    let mut out = String::from("# Data Contract\n\n");

    out.push_str(&format!(
        "**Fingerprint:** `{}`\n\n",
        report.contract_fingerprint
    ));

    if !report.contract.is_empty() {
        out.push_str("| Column | Type |\n");
        out.push_str("|--------|------|\n");
        for (column, type_label) in report.contract.iter() {
            out.push_str(&format!("| `{column}` | `{type_label}` |\n"));
        }
        out.push('\n');
    }

    out.push_str("## Issues\n\n");
    if report.is_compliant() {
        out.push_str("All data conforms to the contract.\n");
        return out;
    }

    out.push_str("| Kind | Column | Detail |\n");
    out.push_str("|------|--------|--------|\n");
    for issue in &report.issues {
        out.push_str(&format!(
            "| {} | `{}` | {} |\n",
            kind_label(issue.kind()),
            issue.column(),
            issue
        ));
    }
    out
}

fn kind_label(kind: IssueKind) -> &'static str {
    match kind {
        IssueKind::MissingRequiredColumn => "missing required column",
        IssueKind::TypeMismatch => "type mismatch",
    }
}

/// Notifies people about a contract and its enforcement issues.
///
/// Writes to any [`Write`] sink: standard output or a file in the CLI, a
/// buffer in tests. Plain text is the default rendering.
///
/// # Examples
///
/// ```
/// use data_contract_core::*;
/// use data_contract_loader::Communicator;
///
/// let producer = ProducerSchema::new().with_column("id", "int");
/// let report = reconcile(&producer, &ConsumerRequirements::new());
///
/// let mut communicator = Communicator::new(Vec::new());
/// communicator.notify(&report).unwrap();
/// let text = String::from_utf8(communicator.into_inner()).unwrap();
/// assert!(text.contains("- id: int"));
/// assert!(text.contains("All data conforms to the contract!"));
/// ```
#[derive(Debug)]
pub struct Communicator<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> Communicator<W> {
    pub fn new(writer: W) -> Self {
        Self::with_format(writer, OutputFormat::Text)
    }

    pub fn with_format(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    /// Announces the generated contract as plain text.
    pub fn notify_contract(&mut self, contract: &Contract) -> Result<()> {
        self.write(&contract_to_text(contract))
    }

    /// Announces enforcement issues as plain text, or that there are none.
    pub fn notify_issues(&mut self, issues: &[Issue]) -> Result<()> {
        self.write(&issues_to_text(issues))
    }

    /// Announces the whole report in the configured format.
    pub fn notify(&mut self, report: &ReconciliationReport) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                self.notify_contract(&report.contract)?;
                self.notify_issues(&report.issues)?;
            }
            format => {
                let rendered = format_report(report, format)?;
                self.write(&rendered)?;
            }
        }
        self.writer.flush().map_err(LoaderError::Notify)
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(LoaderError::Notify)
    }
}
