//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` command: it loads the exclusion policy,
//! scans the plugin root, drives every active case through the pipeline and
//! streams verdicts to the console reporter, then renders the optional HTML
//! and JSON reports and derives the process exit status from the tally.
//!
//! 此模块实现 `run` 命令：加载排除策略、扫描插件根目录、
//! 驱动每个活动用例通过流水线并将判定流式输出到控制台报告器，
//! 然后渲染可选的 HTML 和 JSON 报告，并根据计数决定进程退出状态。

use anyhow::Result;
use colored::*;
use std::path::PathBuf;

use crate::{
    core::{
        execution::{RunContext, run_case},
        models::{CaseRecord, CaseVerdict, Classification, WarnKind},
        policy::ExclusionPolicy,
        registry,
    },
    infra::command::StderrMode,
    infra::t,
    reporting::{
        console::ConsoleReporter, html::generate_html_report, json::generate_json_report,
    },
};

/// Executes the run command with the provided arguments.
///
/// # Arguments
/// * `plugin` - Optional single case name; `None` runs the whole corpus
/// * `plugins_dir` - The plugin root directory
/// * `pipeline` - Path of the pipeline executable under test
/// * `exclusions` - Optional exclusion-policy file
/// * `timeout` - Optional per-case deadline in seconds
/// * `capture_stderr` - Capture pipeline stderr instead of discarding it
/// * `html` / `json` - Optional report output paths
///
/// # Returns
/// `Ok` when no case failed; an error otherwise, so the binary exits
/// nonzero.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    plugin: Option<String>,
    plugins_dir: PathBuf,
    pipeline: PathBuf,
    exclusions: Option<PathBuf>,
    timeout: Option<u64>,
    capture_stderr: bool,
    html: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let policy = ExclusionPolicy::load(exclusions.as_deref())?;
    let cases = registry::scan(&plugins_dir, plugin.as_deref())?;

    println!(
        "{}",
        t!(
            "run.corpus_header",
            path = plugins_dir.display(),
            pipeline = pipeline.display()
        )
        .cyan()
    );

    let mut ctx = RunContext::new(pipeline);
    ctx.timeout_secs = timeout;
    ctx.stderr_mode = if capture_stderr {
        StderrMode::Capture
    } else {
        StderrMode::Discard
    };

    let mut reporter = ConsoleReporter::new();
    let mut records: Vec<CaseRecord> = Vec::new();

    // A name given on the command line that matches no directory is still
    // reported as a case, so the user sees exactly one line for it.
    // 命令行指定但没有对应目录的名称仍作为用例报告，让用户恰好看到一行。
    if cases.is_empty() {
        if let Some(name) = plugin.as_deref() {
            reporter.begin_case(name);
            let verdict = CaseVerdict::Warned(WarnKind::MissingCaseDir);
            reporter.record(&verdict);
            records.push(CaseRecord::new(name, verdict));
        } else {
            println!("{}", t!("run.no_cases").yellow());
            return Ok(());
        }
    }

    for case in &cases {
        reporter.begin_case(&case.name);

        // Excluded buckets short-circuit: they never reach the pipeline
        // runner or the comparator.
        // 被排除的类别短路处理：绝不会进入流水线运行器或比较器。
        let verdict = match policy.classify(&case.name) {
            Classification::Active => run_case(case, &ctx).await,
            Classification::Disabled(reason) => CaseVerdict::Disabled(reason),
            Classification::LocalOnly(reason) => CaseVerdict::LocalOnly(reason),
            Classification::Incompatible(reason) => CaseVerdict::Incompatible(reason),
        };

        reporter.record(&verdict);
        records.push(CaseRecord::new(&case.name, verdict));
    }

    let tally = reporter.finish();

    if let Some(report_path) = &html {
        println!(
            "{}",
            t!("run.writing_report", path = report_path.display())
        );
        if let Err(e) = generate_html_report(&records, &tally, report_path) {
            eprintln!("{} {}", t!("run.report_failed").red(), e);
        }
    }
    if let Some(report_path) = &json {
        println!(
            "{}",
            t!("run.writing_report", path = report_path.display())
        );
        if let Err(e) = generate_json_report(&records, &tally, report_path) {
            eprintln!("{} {}", t!("run.report_failed").red(), e);
        }
    }

    if tally.any_failed() {
        anyhow::bail!("{}", t!("run.failed_cases", count = tally.failed));
    }
    println!("\n{}", t!("run.all_clear").green().bold());
    Ok(())
}
