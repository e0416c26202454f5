//! # Console Reporting Module / 控制台报告模块
//!
//! Streams one aligned, color-coded line per case as verdicts arrive and
//! prints the final summary block. The reporter is the sole owner of the
//! run tally: no other component may mutate the counters.
//!
//! 随着判定结果到来，为每个用例流式输出一条对齐的彩色行，
//! 并打印最终摘要块。报告器是运行计数的唯一持有者：
//! 任何其他组件都不得修改这些计数器。

use crate::core::models::{CaseVerdict, RunTally};
use crate::infra::t;
use colored::*;
use std::io::Write;

/// Width of the left-hand "Testing <name>..." column.
/// 左侧 “Testing <name>...” 列的宽度。
const NAME_COLUMN: usize = 50;

/// Streaming console reporter owning the run tally.
/// 持有运行计数的流式控制台报告器。
#[derive(Default)]
pub struct ConsoleReporter {
    tally: RunTally,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the left column for a case and flushes, so the verdict tag
    /// lands on the same line once the case finishes.
    ///
    /// 打印用例的左列并刷新输出，使判定标签在用例结束后落在同一行。
    pub fn begin_case(&self, name: &str) {
        print!(
            "{:<width$}",
            t!("report.testing", name = name),
            width = NAME_COLUMN
        );
        let _ = std::io::stdout().flush();
    }

    /// Records exactly one verdict for a case: bumps the matching counter
    /// and completes the case's line immediately (streaming, not batched).
    ///
    /// 为用例记录恰好一个判定：递增对应计数器，
    /// 并立即补全该用例的输出行（流式，而非批量）。
    pub fn record(&mut self, verdict: &CaseVerdict) {
        self.tally.record(verdict);

        let tag = verdict.status_tag();
        let tag = match verdict {
            CaseVerdict::Passed => tag.green().bold(),
            CaseVerdict::Failed(_) => tag.red().bold(),
            CaseVerdict::Warned(_) => tag.yellow().bold(),
            CaseVerdict::Disabled(_) => tag.blue().bold(),
            CaseVerdict::LocalOnly(_) => tag.magenta().bold(),
            CaseVerdict::Incompatible(_) => tag.cyan().bold(),
        };

        let detail = verdict.detail();
        if detail.is_empty() {
            println!("{}", tag);
        } else {
            println!("{} {}", tag, detail);
        }
    }

    /// Prints the end-of-run summary block and hands the tally back to the
    /// caller, which decides the process exit status from it.
    ///
    /// 打印运行结束摘要块，并将计数交还调用方，由其据此决定进程退出状态。
    pub fn finish(self) -> RunTally {
        let tally = self.tally;

        println!("\n{}", t!("report.summary_banner").bold());
        println!(
            "  {:<14} {}",
            t!("report.count_passed"),
            tally.passed.to_string().green()
        );
        println!(
            "  {:<14} {}",
            t!("report.count_failed"),
            tally.failed.to_string().red()
        );
        println!(
            "  {:<14} {}",
            t!("report.count_warned"),
            tally.warned.to_string().yellow()
        );
        println!(
            "  {:<14} {}",
            t!("report.count_disabled"),
            tally.disabled.to_string().blue()
        );
        println!(
            "  {:<14} {}",
            t!("report.count_local"),
            tally.local.to_string().magenta()
        );
        println!(
            "  {:<14} {}",
            t!("report.count_incompatible"),
            tally.incompatible.to_string().cyan()
        );

        let rate = format!("{:.1}%", tally.pass_rate());
        let rate = if tally.any_failed() {
            rate.red().bold()
        } else {
            rate.green().bold()
        };
        println!(
            "\n{} {}",
            t!("report.pass_rate", total = tally.total()),
            rate
        );

        tally
    }
}
