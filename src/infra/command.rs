//! # Subprocess Control Module / 子进程控制模块
//!
//! Invokes the external pipeline executable for one case, redirecting its
//! stdout into the example directory, and runs optional fixture-setup
//! commands beforehand. The harness is fully sequential: every invocation is
//! awaited to completion before the next case begins.
//!
//! 为一个用例调用外部流水线可执行文件，将其标准输出重定向到示例目录，
//! 并在此之前运行可选的夹具准备命令。测试工具完全顺序执行：
//! 每次调用都等待完成后才开始下一个用例。

use crate::infra::t;
use anyhow::{Context, Result};
use colored::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

/// What to do with the pipeline's stderr stream. A configuration option,
/// not a separate code path.
///
/// 如何处理流水线的标准错误流。这是一个配置选项，而不是独立的代码路径。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StderrMode {
    /// Drop stderr entirely.
    /// 完全丢弃标准错误。
    Discard,
    /// Capture stderr to a sibling error file, deleted afterwards if empty.
    /// 将标准错误捕获到同级错误文件，若为空则在运行后删除。
    Capture,
}

/// How a pipeline invocation ended.
/// 一次流水线调用的结束方式。
#[derive(Debug)]
pub enum PipelineOutcome {
    /// The process exited on its own; the comparison decides the verdict.
    /// 进程自行退出；由比较决定判定结果。
    Completed(ExitStatus),
    /// The per-case deadline expired and the child was killed.
    /// 单用例时限已到，子进程被终止。
    TimedOut,
}

/// Runs `<pipeline> <config>` to completion, stdout redirected to
/// `stdout_log`, stderr handled per `mode`. With a timeout, expiry kills the
/// child and reports `TimedOut`; without one the call blocks until exit.
///
/// 运行 `<pipeline> <config>` 直至完成，标准输出重定向到 `stdout_log`，
/// 标准错误按 `mode` 处理。设置超时后，到期会终止子进程并报告
/// `TimedOut`；未设置则阻塞直到退出。
pub async fn run_pipeline(
    pipeline: &Path,
    config: &Path,
    stdout_log: &Path,
    stderr_log: &Path,
    mode: StderrMode,
    timeout: Option<Duration>,
) -> Result<PipelineOutcome> {
    let stdout_file = File::create(stdout_log)
        .with_context(|| format!("failed to create {}", stdout_log.display()))?;

    let mut cmd = tokio::process::Command::new(pipeline);
    cmd.arg(config)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file));
    cmd.kill_on_drop(true);

    match mode {
        StderrMode::Discard => {
            cmd.stderr(Stdio::null());
        }
        StderrMode::Capture => {
            let stderr_file = File::create(stderr_log)
                .with_context(|| format!("failed to create {}", stderr_log.display()))?;
            cmd.stderr(Stdio::from(stderr_file));
        }
    }

    let mut child = cmd
        .spawn()
        .with_context(|| format!("failed to spawn pipeline {}", pipeline.display()))?;

    let outcome = match timeout {
        Some(duration) => match tokio::time::timeout(duration, child.wait()).await {
            Ok(status) => PipelineOutcome::Completed(
                status.context("failed to wait for pipeline process")?,
            ),
            Err(_) => {
                // kill_on_drop reaps the child once it is dropped here.
                // kill_on_drop 会在子进程于此处被 drop 后将其回收。
                let _ = child.start_kill();
                PipelineOutcome::TimedOut
            }
        },
        None => PipelineOutcome::Completed(
            child
                .wait()
                .await
                .context("failed to wait for pipeline process")?,
        ),
    };

    if mode == StderrMode::Capture {
        if let Ok(true) = crate::infra::fs::is_empty_file(stderr_log) {
            let _ = std::fs::remove_file(stderr_log);
        }
    }

    Ok(outcome)
}

/// Runs a fixture-setup script: one shell command per line, blank lines and
/// `#` comments skipped. Each line is environment-expanded and split with
/// shell quoting rules, then executed from the harness's working directory.
///
/// Failures here are reported but deliberately not trapped — a broken setup
/// surfaces as a comparison failure of the case itself.
///
/// 运行夹具准备脚本：每行一条 shell 命令，空行和 `#` 注释被跳过。
/// 每行先做环境变量展开，再按 shell 引用规则拆分，
/// 然后从测试工具的工作目录执行。
///
/// 此处的失败会被报告但刻意不拦截——损坏的准备步骤会表现为该用例本身的
/// 比较失败。
pub async fn run_pretest(script: &Path) {
    let contents = match std::fs::read_to_string(script) {
        Ok(contents) => contents,
        Err(e) => {
            eprintln!(
                "{}",
                t!("pretest.unreadable", path = script.display(), error = e).yellow()
            );
            return;
        }
    };

    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let expanded = match shellexpand::full(line) {
            Ok(expanded) => expanded.into_owned(),
            Err(e) => {
                eprintln!(
                    "{}",
                    t!("pretest.expand_failed", line = line, error = e).yellow()
                );
                continue;
            }
        };

        let Some(parts) = shlex::split(&expanded) else {
            eprintln!("{}", t!("pretest.parse_failed", line = line).yellow());
            continue;
        };
        let Some((program, args)) = parts.split_first() else {
            continue;
        };

        let status = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .status()
            .await;

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => {
                eprintln!(
                    "{}",
                    t!("pretest.command_failed", line = line, status = status).yellow()
                );
            }
            Err(e) => {
                eprintln!(
                    "{}",
                    t!("pretest.spawn_failed", line = line, error = e).yellow()
                );
            }
        }
    }
}
