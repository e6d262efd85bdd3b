//! Shared output formatting for lint reports.

use anyhow::Result;
use dirlint_core::{LintReport, RuleReport, Violation};

use crate::OutputFormat;

/// Print a report in the specified format.
pub fn print(report: &LintReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print_compact(report),
    }
    Ok(())
}

fn print_text(report: &LintReport) {
    let summary_color = if report.is_clean() {
        "\x1b[32m"
    } else {
        "\x1b[31m"
    };
    let text = report.format_report();
    let (body, summary) = text
        .trim_end()
        .rsplit_once('\n')
        .unwrap_or(("", text.trim_end()));

    if !body.is_empty() {
        println!("{body}");
    }
    println!("{summary_color}{summary}\x1b[0m");
}

fn print_json(report: &LintReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn print_compact(report: &LintReport) {
    for (rule, violation) in report.violations() {
        println!("{}", compact_line(rule, violation));
    }
}

/// `<path>[:<line>]: [<code>] <message>`, with the message on one line.
fn compact_line(rule: &RuleReport, violation: &Violation) -> String {
    let location = match violation.line() {
        Some(line) => format!("{}:{}", violation.path().display(), line.trim()),
        None => violation.path().display().to_string(),
    };
    let message = violation
        .message()
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    format!("{location}: [{}] {message}", rule.code)
}
