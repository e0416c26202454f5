//! # JSON Reporting Module / JSON 报告模块
//!
//! Writes the machine-readable record of one run: the tally, the pass rate
//! and every case verdict, for consumption by CI dashboards.
//!
//! 输出一次运行的机器可读记录：计数、通过率和每个用例的判定，
//! 供 CI 看板消费。

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::models::{CaseRecord, RunTally};

/// Top-level shape of the JSON report file.
/// JSON 报告文件的顶层结构。
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    tally: &'a RunTally,
    pass_rate: f64,
    cases: &'a [CaseRecord],
}

/// Serializes the run record to pretty-printed JSON at `output_path`.
/// 将运行记录以带缩进的 JSON 形式写入 `output_path`。
pub fn generate_json_report(
    records: &[CaseRecord],
    tally: &RunTally,
    output_path: &Path,
) -> Result<()> {
    let report = JsonReport {
        generated_at: Utc::now(),
        tally,
        pass_rate: tally.pass_rate(),
        cases: records,
    };
    let body = serde_json::to_string_pretty(&report)
        .context("failed to serialize JSON report")?;
    fs::write(output_path, body)
        .with_context(|| format!("failed to write JSON report {}", output_path.display()))?;
    Ok(())
}
