//! Report rendering: console text, JSON and a standalone HTML page.

use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::generator::{FileIssues, Report};
use crate::config::ReportFormat;
use crate::error::{CodeguardError, Result};
use crate::quality::{IssueType, NormalizedIssue, SeverityTier};

/// File name of the HTML report inside the output directory.
pub const HTML_REPORT_FILE: &str = "report.html";

/// File name of the JSON report inside the output directory.
pub const JSON_REPORT_FILE: &str = "report.json";

// ============================================================================
// Console
// ============================================================================

fn colored_tier(tier: SeverityTier) -> colored::ColoredString {
    let label = format!("{:<8}", tier.label());
    match tier {
        SeverityTier::Blocker | SeverityTier::Critical => label.red().bold(),
        SeverityTier::Major => label.yellow(),
        SeverityTier::Minor => label.cyan(),
        SeverityTier::Info => label.dimmed(),
    }
}

/// Render the report for a terminal, grouped by file with a summary line.
#[must_use]
pub fn render_console(report: &Report) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        "Code quality report:".bold(),
        report.project_name()
    ));

    if report.files().is_empty() {
        out.push_str(&format!("{}\n", "No issues found.".green()));
    }

    for file in report.files() {
        out.push('\n');
        out.push_str(&format!("{}\n", file.path.display().to_string().underline()));
        for issue in &file.issues {
            out.push_str(&format!(
                "  {:>4}:{:<3} {} {:<14} {} {}\n",
                issue.line,
                issue.column,
                colored_tier(issue.severity),
                issue.issue_type.label(),
                issue.message,
                issue.rule_id.as_deref().unwrap_or("-").dimmed()
            ));
        }
    }

    let summary = report.summary();
    out.push('\n');
    out.push_str(&format!(
        "{} {} ({} bugs, {} vulnerabilities, {} code smells)\n",
        "Total issues:".bold(),
        summary.total_issues,
        summary.bugs,
        summary.vulnerabilities,
        summary.code_smells
    ));
    out
}

// ============================================================================
// JSON
// ============================================================================

/// Render the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

// ============================================================================
// HTML
// ============================================================================

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn tier_class(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::Blocker | SeverityTier::Critical => "tier-high",
        SeverityTier::Major => "tier-medium",
        SeverityTier::Minor | SeverityTier::Info => "tier-low",
    }
}

fn type_title(issue_type: IssueType) -> &'static str {
    match issue_type {
        IssueType::Bug => "Bugs",
        IssueType::Vulnerability => "Vulnerabilities",
        IssueType::CodeSmell => "Code Smells",
    }
}

/// Render the report as a self-contained HTML page with embedded CSS.
#[must_use]
pub fn render_html(report: &Report) -> String {
    let project_name = escape_html(report.project_name());
    let generated_at = report.generated_at().format("%Y-%m-%d %H:%M:%S UTC");
    let total = report.summary().total_issues;

    let cards: String = IssueType::ALL
        .iter()
        .map(|t| {
            format!(
                r#"<div class="card"><div class="count">{}</div><div class="label">{}</div></div>"#,
                report.summary().count(*t),
                type_title(*t)
            )
        })
        .collect();

    let files_html = if report.files().is_empty() {
        r#"<section>
            <h2>Issues</h2>
            <p class="empty-message">No issues found.</p>
        </section>"#
            .to_string()
    } else {
        report.files().iter().map(render_file_section).collect()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Code Quality Report - {project_name}</title>
    <style>
        :root {{
            --primary: #2563eb;
            --danger: #dc2626;
            --warning: #d97706;
            --info: #0891b2;
            --bg: #f8fafc;
            --card-bg: #ffffff;
            --text: #1e293b;
            --text-muted: #64748b;
            --border: #e2e8f0;
        }}
        * {{ box-sizing: border-box; margin: 0; padding: 0; }}
        body {{
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: var(--bg);
            color: var(--text);
            line-height: 1.6;
            padding: 2rem;
        }}
        .container {{ max-width: 1200px; margin: 0 auto; }}
        header {{
            text-align: center;
            margin-bottom: 2rem;
            padding-bottom: 1rem;
            border-bottom: 2px solid var(--border);
        }}
        h1 {{ font-size: 2rem; margin-bottom: 0.5rem; }}
        .subtitle {{ color: var(--text-muted); font-size: 0.875rem; }}
        .cards {{ display: flex; gap: 1rem; justify-content: center; margin: 1.5rem 0; }}
        .card {{
            background: var(--card-bg);
            border-radius: 0.5rem;
            padding: 1rem 2rem;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            text-align: center;
        }}
        .count {{ font-size: 2rem; font-weight: bold; color: var(--primary); }}
        .label {{ color: var(--text-muted); font-size: 0.875rem; }}
        section {{
            background: var(--card-bg);
            border-radius: 0.5rem;
            padding: 1.5rem;
            margin-bottom: 1.5rem;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
        }}
        h2 {{
            font-size: 1.1rem;
            margin-bottom: 1rem;
            padding-bottom: 0.5rem;
            border-bottom: 1px solid var(--border);
            font-family: monospace;
        }}
        table {{ width: 100%; border-collapse: collapse; }}
        th, td {{
            padding: 0.5rem 0.75rem;
            text-align: left;
            border-bottom: 1px solid var(--border);
        }}
        th {{ background: var(--bg); font-weight: 600; }}
        .tier {{
            display: inline-block;
            padding: 0.1rem 0.6rem;
            border-radius: 0.25rem;
            font-size: 0.8rem;
        }}
        .tier-high {{ background: #fee2e2; color: var(--danger); }}
        .tier-medium {{ background: #fef3c7; color: var(--warning); }}
        .tier-low {{ background: #cffafe; color: var(--info); }}
        .empty-message {{
            color: var(--text-muted);
            font-style: italic;
            text-align: center;
            padding: 2rem;
        }}
        footer {{
            text-align: center;
            color: var(--text-muted);
            font-size: 0.75rem;
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid var(--border);
        }}
    </style>
</head>
<body>
    <div class="container">
        <header>
            <h1>Code Quality Report</h1>
            <p class="subtitle">{project_name} - Generated {generated_at} - {total} issues</p>
            <div class="cards">{cards}</div>
        </header>

        {files_html}

        <footer>
            Generated by codeguard
        </footer>
    </div>
</body>
</html>"#
    )
}

fn render_issue_row(issue: &NormalizedIssue) -> String {
    format!(
        r#"<tr>
                    <td>{}:{}</td>
                    <td><span class="tier {}">{}</span></td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                    <td>{}</td>
                </tr>"#,
        issue.line,
        issue.column,
        tier_class(issue.severity),
        issue.severity.label(),
        issue.issue_type.label(),
        escape_html(issue.rule_id.as_deref().unwrap_or("-")),
        escape_html(&issue.message),
        escape_html(&issue.effort)
    )
}

fn render_file_section(file: &FileIssues) -> String {
    let path = escape_html(&file.path.display().to_string());
    let rows: String = file.issues.iter().map(render_issue_row).collect();
    format!(
        r#"<section>
            <h2>{path}</h2>
            <table>
                <thead>
                    <tr>
                        <th>Location</th>
                        <th>Severity</th>
                        <th>Type</th>
                        <th>Rule</th>
                        <th>Message</th>
                        <th>Effort</th>
                    </tr>
                </thead>
                <tbody>
                    {rows}
                </tbody>
            </table>
        </section>"#
    )
}

// ============================================================================
// Writing
// ============================================================================

/// Write the report files selected by `format` into `dir`, creating it if
/// needed. Returns the paths written, HTML first.
///
/// # Errors
///
/// Returns an error if the directory or a file cannot be written.
pub fn write_reports(report: &Report, format: ReportFormat, dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| {
        CodeguardError::report(format!("cannot create {}: {e}", dir.display()))
    })?;

    let mut written = Vec::new();
    if format.includes_html() {
        let path = dir.join(HTML_REPORT_FILE);
        write_file(&path, &render_html(report))?;
        written.push(path);
    }
    if format.includes_json() {
        let path = dir.join(JSON_REPORT_FILE);
        write_file(&path, &render_json(report)?)?;
        written.push(path);
    }

    info!("Wrote {} report file(s) to {}", written.len(), dir.display());
    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .map_err(|e| CodeguardError::report(format!("cannot write {}: {e}", path.display())))
}
