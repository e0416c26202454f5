//! # HTML Reporting Module / HTML 报告模块
//!
//! Generates a standalone, styled HTML report of one harness run: summary
//! tiles for every verdict bucket, a per-case table and expandable detail
//! rows for failures.
//!
//! 生成一次运行的独立样式化 HTML 报告：每个判定类别的摘要卡片、
//! 逐用例表格，以及失败用例可展开的详情行。

use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::Path;

use crate::core::models::{CaseRecord, RunTally};
use crate::infra::t;

/// Embedded CSS styles for HTML reports / HTML 报告的嵌入式 CSS 样式
const HTML_STYLE: &str = include_str!("assets/report.css");

/// Embedded JavaScript for HTML report interactivity / HTML 报告交互性的嵌入式 JavaScript
const HTML_SCRIPT: &str = include_str!("assets/report.js");

/// Writes the report for one finished run to `output_path`.
///
/// 将一次已完成运行的报告写入 `output_path`。
///
/// # Errors / 错误
/// Returns an error when the output file cannot be written.
/// 当输出文件无法写入时返回错误。
pub fn generate_html_report(
    records: &[CaseRecord],
    tally: &RunTally,
    output_path: &Path,
) -> Result<()> {
    let mut html = String::new();
    html.push_str(&format!(
        "<!DOCTYPE html><html><head><meta charset='utf-8'><title>{}</title>",
        t!("html_report.title")
    ));
    html.push_str("<style>");
    html.push_str(HTML_STYLE);
    html.push_str("</style>");
    html.push_str("</head><body>");
    html.push_str(&format!("<h1>{}</h1>", t!("html_report.main_header")));
    html.push_str(&format!(
        "<p class='generated-at'>{}</p>",
        t!(
            "html_report.generated_at",
            time = Local::now().format("%Y-%m-%d %H:%M:%S")
        )
    ));

    html.push_str("<div class='summary-container'>");
    for (count, class, label) in [
        (tally.passed, "passed-text", t!("html_report.summary.passed")),
        (tally.failed, "failed-text", t!("html_report.summary.failed")),
        (tally.warned, "warned-text", t!("html_report.summary.warned")),
        (
            tally.disabled + tally.local + tally.incompatible,
            "excluded-text",
            t!("html_report.summary.excluded"),
        ),
    ] {
        html.push_str(&format!(
            "<div class='summary-item'><span class='count {}'>{}</span><span class='label'>{}</span></div>",
            class, count, label
        ));
    }
    html.push_str(&format!(
        "<div class='summary-item'><span class='count'>{:.1}%</span><span class='label'>{}</span></div>",
        tally.pass_rate(),
        t!("html_report.summary.pass_rate")
    ));
    html.push_str("</div>");

    html.push_str("<table><thead><tr>");
    html.push_str(&format!(
        "<th>{}</th>",
        t!("html_report.table.header.name")
    ));
    html.push_str(&format!(
        "<th class='status-col'>{}</th>",
        t!("html_report.table.header.status")
    ));
    html.push_str(&format!(
        "<th>{}</th>",
        t!("html_report.table.header.detail")
    ));
    html.push_str("</tr></thead><tbody>");

    for (i, record) in records.iter().enumerate() {
        let output_id = format!("detail-{}", i);
        let detail_row = if record.verdict.is_failure() {
            format!(
                "<tr id='{}' style='display:none;'><td colspan='3'><pre class='output-content'>{}</pre></td></tr>",
                output_id,
                escape_html(&record.detail)
            )
        } else {
            String::new()
        };
        let detail_toggle = if record.verdict.is_failure() {
            format!(
                "<div class='output-toggle' onclick=\"toggleDetail('{}')\">{}</div>",
                output_id,
                t!("html_report.toggle_detail")
            )
        } else {
            String::new()
        };

        let inline_detail = if record.verdict.is_failure() {
            String::new()
        } else {
            escape_html(&record.detail)
        };

        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", escape_html(&record.name)));
        html.push_str(&format!(
            "<td class='status-col'><div class='status-cell {}'>{}</div>{}</td>",
            record.verdict.status_class(),
            escape_html(&strip_brackets(&record.verdict.status_tag())),
            detail_toggle
        ));
        html.push_str(&format!("<td>{}</td>", inline_detail));
        html.push_str("</tr>");
        html.push_str(&detail_row);
    }

    html.push_str("</tbody></table>");
    html.push_str("<script>");
    html.push_str(HTML_SCRIPT);
    html.push_str("</script></body></html>");

    fs::write(output_path, html)
        .with_context(|| format!("failed to write HTML report {}", output_path.display()))?;
    Ok(())
}

/// Simple HTML escape function to replace special characters with their HTML entities
/// 简单的 HTML 转义函数，用 HTML 实体替换特殊字符
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The console tags read `[PASSED]`; the report cells drop the brackets.
fn strip_brackets(tag: &str) -> String {
    tag.trim().trim_start_matches('[').trim_end_matches(']').to_string()
}
