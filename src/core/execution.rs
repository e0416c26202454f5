//! # Case Execution Module / 用例执行模块
//!
//! Drives one active plugin case through its full lifecycle: fixture
//! prechecks, config interpretation, pretest hook, stale-output cleanup,
//! the pipeline subprocess itself and the baseline comparison. Excluded
//! cases never enter this module.
//!
//! 驱动一个活动插件用例完成其完整生命周期：夹具预检查、配置解析、
//! 预备钩子、过期输出清理、流水线子进程本身以及基线比较。
//! 被排除的用例绝不会进入此模块。

use crate::core::comparator::{self, ComparatorRegistry};
use crate::core::config::{self, Interpretation};
use crate::core::models::{
    CaseVerdict, ComparisonOutcome, FailureKind, OutputTarget, PluginCase, WarnKind,
};
use crate::infra::command::{self, PipelineOutcome, StderrMode};
use crate::infra::fs::{find_baselines, produced_path, remove_stale};
use crate::infra::t;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Everything a case run needs besides the case itself. Built once per run
/// and shared read-only across all cases.
///
/// 除用例本身之外，执行一个用例所需的全部内容。
/// 每次运行构建一次，对所有用例只读共享。
pub struct RunContext {
    /// Path of the external pipeline executable under test.
    /// 被测外部流水线可执行文件的路径。
    pub pipeline: PathBuf,
    /// Optional per-case deadline in seconds.
    /// 可选的单用例时限（秒）。
    pub timeout_secs: Option<u64>,
    /// How the pipeline's stderr is handled.
    /// 如何处理流水线的标准错误。
    pub stderr_mode: StderrMode,
    /// Per-case comparison overrides.
    /// 用例级比较覆盖。
    pub comparators: ComparatorRegistry,
}

impl RunContext {
    pub fn new(pipeline: PathBuf) -> Self {
        Self {
            pipeline,
            timeout_secs: None,
            stderr_mode: StderrMode::Discard,
            comparators: ComparatorRegistry::new(),
        }
    }
}

/// Runs one active case to its terminal verdict. All failures are local to
/// the case; environmental errors (unreadable fixture files and the like)
/// are folded into a failure verdict rather than aborting the run.
///
/// 将一个活动用例运行到其最终判定。所有失败都仅限于该用例；
/// 环境错误（夹具文件不可读等）被折叠为失败判定，而不会中止整次运行。
pub async fn run_case(case: &PluginCase, ctx: &RunContext) -> CaseVerdict {
    match run_case_inner(case, ctx).await {
        Ok(verdict) => verdict,
        Err(e) => CaseVerdict::Failed(FailureKind::PipelineFailed(format!("{:#}", e))),
    }
}

async fn run_case_inner(case: &PluginCase, ctx: &RunContext) -> Result<CaseVerdict> {
    // Fixture prechecks are warnings: an incomplete fixture must not drag
    // the pass rate down.
    // 夹具预检查只产生警告：不完整的夹具不应拉低通过率。
    if !case.example_dir.is_dir() {
        return Ok(CaseVerdict::Warned(WarnKind::NoExampleDir));
    }
    if case.interactive_marker().exists() {
        return Ok(CaseVerdict::Incompatible(
            t!("incompat.interactive").to_string(),
        ));
    }

    let config_path = case.config_path();
    if !config_path.is_file() {
        return Ok(CaseVerdict::Warned(WarnKind::NoConfig));
    }
    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;

    let directive = match config::interpret(&contents, &case.name) {
        Err(_) => return Ok(CaseVerdict::Failed(FailureKind::ConfigMalformed)),
        Ok(Interpretation::NotDeclared) => {
            return Ok(CaseVerdict::Warned(WarnKind::NotDeclared));
        }
        Ok(Interpretation::Declared(directive)) => directive,
    };

    let target = directive.target();
    let baselines = match &target {
        OutputTarget::File(name) => find_baselines(&case.example_dir, name)?,
        OutputTarget::Screen => {
            let baseline = case.screen_baseline_path();
            if baseline.is_file() { vec![baseline] } else { Vec::new() }
        }
    };
    if baselines.is_empty() {
        return Ok(CaseVerdict::Warned(WarnKind::NoBaseline));
    }

    let pretest = case.pretest_path();
    if pretest.is_file() {
        command::run_pretest(&pretest).await;
    }

    // Idempotency: a leftover artifact from an earlier run must not be able
    // to pass for fresh output.
    // 幂等性：先前运行遗留的产物不得冒充新输出。
    if matches!(target, OutputTarget::File(_)) {
        for expected in &baselines {
            remove_stale(&produced_path(expected))?;
        }
    }

    let outcome = command::run_pipeline(
        &ctx.pipeline,
        &config_path,
        &case.pipeline_log_path(),
        &case.error_log_path(),
        ctx.stderr_mode,
        ctx.timeout_secs.map(Duration::from_secs),
    )
    .await?;

    if let PipelineOutcome::TimedOut = outcome {
        return Ok(CaseVerdict::Failed(FailureKind::PipelineTimeout(
            ctx.timeout_secs.unwrap_or_default(),
        )));
    }

    // The pipeline's exit status is not consulted: the comparison against
    // the baseline set is the arbiter.
    // 不参考流水线的退出状态：与基线集合的比较才是裁决者。
    let custom = ctx.comparators.get(&case.name);
    let mut failure: Option<FailureKind> = None;

    for expected in &baselines {
        let produced = match &target {
            OutputTarget::File(_) => produced_path(expected),
            OutputTarget::Screen => case.pipeline_log_path(),
        };

        let outcome =
            comparator::compare_artifact(&produced, expected, &case.diff_path(), custom)?;
        if failure.is_none() {
            match outcome {
                ComparisonOutcome::Match => {}
                ComparisonOutcome::MissingOutput => {
                    failure = Some(FailureKind::OutputNotProduced(produced));
                }
                ComparisonOutcome::Mismatch => {
                    failure = Some(FailureKind::OutputMismatch(produced));
                }
            }
        }
    }

    Ok(match failure {
        Some(kind) => CaseVerdict::Failed(kind),
        None => CaseVerdict::Passed,
    })
}
