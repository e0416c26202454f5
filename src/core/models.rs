//! # Data Models Module / 数据模型模块
//!
//! This module defines the core data structures used throughout the harness.
//! It includes the plugin case descriptor, the exclusion classification, the
//! comparison outcomes, the per-case verdict and the run tally.
//!
//! 此模块定义了整个测试工具中使用的核心数据结构。
//! 它包括插件用例描述符、排除分类、比较结果、单用例判定和运行计数。

use crate::infra::t;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Fixed name of the captured pipeline stdout log inside an example directory.
/// 示例目录中捕获的流水线标准输出日志的固定名称。
pub const PIPELINE_LOG: &str = "pluma_output.txt";

/// Fixed name of the captured pipeline stderr log (capture mode only).
/// 捕获的流水线标准错误日志的固定名称（仅捕获模式）。
pub const PIPELINE_ERR_LOG: &str = "pluma_error.txt";

/// Fixed name of the scratch diff artifact, retained only on failure.
/// 临时 diff 产物的固定名称，仅在失败时保留。
pub const DIFF_LOG: &str = "diff_output.txt";

/// Fixed name of the baseline used in screen-output mode.
/// 屏幕输出模式使用的基线的固定名称。
pub const SCREEN_BASELINE: &str = "screen.expected";

/// One plugin under test, identified by its directory name under the plugin
/// root. Immutable once created by the registry scanner.
///
/// 一个待测插件，由插件根目录下的目录名标识。
/// 由注册表扫描器创建后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginCase {
    /// The plugin name, equal to its directory name.
    /// 插件名称，等于其目录名。
    pub name: String,
    /// The plugin directory, `<root>/<name>`.
    /// 插件目录，`<root>/<name>`。
    pub directory: PathBuf,
    /// The example corpus directory, `<root>/<name>/example`.
    /// 示例语料目录，`<root>/<name>/example`。
    pub example_dir: PathBuf,
}

impl PluginCase {
    pub fn new(root: &Path, name: &str) -> Self {
        let directory = root.join(name);
        let example_dir = directory.join("example");
        Self {
            name: name.to_string(),
            directory,
            example_dir,
        }
    }

    /// Path of the example configuration file driving this case.
    pub fn config_path(&self) -> PathBuf {
        self.example_dir.join("config.txt")
    }

    /// Path the harness redirects the pipeline's stdout to.
    pub fn pipeline_log_path(&self) -> PathBuf {
        self.example_dir.join(PIPELINE_LOG)
    }

    /// Path the harness captures the pipeline's stderr to (capture mode).
    pub fn error_log_path(&self) -> PathBuf {
        self.example_dir.join(PIPELINE_ERR_LOG)
    }

    /// Path of the scratch diff artifact for this case.
    pub fn diff_path(&self) -> PathBuf {
        self.example_dir.join(DIFF_LOG)
    }

    /// Marker file flagging a user-interactive plugin.
    pub fn interactive_marker(&self) -> PathBuf {
        self.example_dir.join("interactive")
    }

    /// Optional fixture-setup script, one shell command per line.
    pub fn pretest_path(&self) -> PathBuf {
        self.example_dir.join("pretest.txt")
    }

    /// Baseline compared against captured stdout in screen-output mode.
    pub fn screen_baseline_path(&self) -> PathBuf {
        self.example_dir.join(SCREEN_BASELINE)
    }
}

/// The bucket a case lands in before execution is ever attempted.
/// Anything other than `Active` is reported immediately and excluded from
/// both execution and comparison.
///
/// 用例在尝试执行之前所归入的类别。
/// 除 `Active` 以外的任何类别都会被立即报告，并被排除在执行和比较之外。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Classification {
    /// The case is eligible for execution.
    /// 该用例可以执行。
    Active,
    /// The plugin is turned off, with a human-readable reason.
    /// 该插件已被停用，附带可读原因。
    Disabled(String),
    /// The plugin only works against local, unshareable data or licenses.
    /// 该插件仅适用于本地的、不可共享的数据或许可。
    LocalOnly(String),
    /// The plugin cannot be driven headlessly in this environment.
    /// 该插件无法在此环境中无界面驱动。
    Incompatible(String),
}

/// The declared output artifact of a case, derived from its config file.
/// 用例声明的输出产物，由其配置文件推导。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum OutputTarget {
    /// The pipeline writes a named file into the example directory.
    /// 流水线将命名文件写入示例目录。
    File(String),
    /// `outputfile none`: the observable output is the captured stdout.
    /// `outputfile none`：可观察输出为捕获的标准输出。
    Screen,
}

/// Outcome of comparing one produced artifact against one baseline.
/// 将一个产物与一个基线比较的结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOutcome {
    Match,
    Mismatch,
    /// The pipeline never produced the artifact at all.
    /// 流水线根本没有产生该产物。
    MissingOutput,
}

/// Non-fatal conditions that exclude a case from the pass/fail tally.
/// 将用例排除在通过/失败计数之外的非致命情况。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarnKind {
    /// The plugin ships no `example/` directory.
    NoExampleDir,
    /// The example directory has no `config.txt`.
    NoConfig,
    /// The config file contains no directive for this plugin.
    NotDeclared,
    /// No `.expected` baseline exists for the declared output.
    NoBaseline,
    /// A case named on the command line has no directory on disk.
    MissingCaseDir,
}

impl WarnKind {
    /// The localized human message for this warning.
    /// 此警告的本地化可读消息。
    pub fn message(&self) -> String {
        match self {
            WarnKind::NoExampleDir => t!("warn.no_example_dir").to_string(),
            WarnKind::NoConfig => t!("warn.no_config").to_string(),
            WarnKind::NotDeclared => t!("warn.not_declared").to_string(),
            WarnKind::NoBaseline => t!("warn.no_baseline").to_string(),
            WarnKind::MissingCaseDir => t!("warn.missing_case_dir").to_string(),
        }
    }
}

/// Enumerates the reasons a case can fail. Each failure is local to its case;
/// one case's failure never aborts the run.
///
/// 枚举用例失败的可能原因。每个失败仅限于其所在用例；
/// 一个用例的失败绝不会中止整次运行。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// A `Plugin` directive for this case carried something other than
    /// `outputfile` at the expected position. The fixture itself is broken.
    /// 该用例的 `Plugin` 指令在预期位置携带了 `outputfile` 以外的内容。
    /// 测试夹具本身已损坏。
    ConfigMalformed,
    /// The pipeline exited but the declared artifact was never written.
    /// 流水线已退出，但声明的产物从未被写入。
    OutputNotProduced(PathBuf),
    /// The produced artifact does not match its baseline, even after the
    /// tolerant comparison.
    /// 产生的产物与其基线不匹配，即使经过宽容比较。
    OutputMismatch(PathBuf),
    /// The pipeline exceeded the configured per-case deadline.
    /// 流水线超出了配置的单用例时限。
    PipelineTimeout(u64),
    /// The pipeline could not be spawned or waited on.
    /// 流水线无法被启动或等待。
    PipelineFailed(String),
}

impl FailureKind {
    /// The localized diagnostic printed under the verdict line. Mismatch and
    /// missing-output diagnostics name the artifact and point at the retained
    /// log for manual inspection.
    ///
    /// 打印在判定行之下的本地化诊断信息。不匹配和缺失输出的诊断会指明产物，
    /// 并指向保留的日志以供人工检查。
    pub fn message(&self) -> String {
        match self {
            FailureKind::ConfigMalformed => t!("fail.config_malformed").to_string(),
            FailureKind::OutputNotProduced(path) => {
                t!("fail.output_not_produced", path = path.display(), log = PIPELINE_LOG).to_string()
            }
            FailureKind::OutputMismatch(path) => {
                t!("fail.output_mismatch", path = path.display(), log = DIFF_LOG).to_string()
            }
            FailureKind::PipelineTimeout(secs) => {
                t!("fail.pipeline_timeout", secs = secs).to_string()
            }
            FailureKind::PipelineFailed(msg) => {
                t!("fail.pipeline_failed", error = msg).to_string()
            }
        }
    }
}

/// The terminal verdict of a single case. Every case produces exactly one
/// verdict and is reported exactly once.
///
/// 单个用例的最终判定。每个用例恰好产生一个判定，并且恰好被报告一次。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CaseVerdict {
    /// Every baseline in the set matched.
    /// 集合中的每个基线都匹配。
    Passed,
    /// At least one baseline mismatched, an artifact was missing, the config
    /// was malformed, or the pipeline itself failed.
    /// 至少一个基线不匹配、产物缺失、配置格式错误或流水线本身失败。
    Failed(FailureKind),
    /// The fixture is incomplete; the case is skipped without affecting the
    /// pass rate.
    /// 夹具不完整；跳过该用例，不影响通过率。
    Warned(WarnKind),
    /// Excluded by the policy's disabled table.
    /// 被策略的 disabled 表排除。
    Disabled(String),
    /// Excluded by the policy's local-only table.
    /// 被策略的 local-only 表排除。
    LocalOnly(String),
    /// Excluded by the policy's incompatible table, or flagged interactive.
    /// 被策略的 incompatible 表排除，或被标记为交互式。
    Incompatible(String),
}

impl CaseVerdict {
    pub fn is_failure(&self) -> bool {
        matches!(self, CaseVerdict::Failed(_))
    }

    /// Whether the case was excluded before execution.
    pub fn is_excluded(&self) -> bool {
        matches!(
            self,
            CaseVerdict::Disabled(_) | CaseVerdict::LocalOnly(_) | CaseVerdict::Incompatible(_)
        )
    }

    /// The localized bracket tag for the console report, e.g. `[PASSED]`.
    /// 控制台报告的本地化方括号标签，例如 `[PASSED]`。
    pub fn status_tag(&self) -> String {
        match self {
            CaseVerdict::Passed => t!("status.passed").to_string(),
            CaseVerdict::Failed(_) => t!("status.failed").to_string(),
            CaseVerdict::Warned(_) => t!("status.warned").to_string(),
            CaseVerdict::Disabled(_) => t!("status.disabled").to_string(),
            CaseVerdict::LocalOnly(_) => t!("status.local").to_string(),
            CaseVerdict::Incompatible(_) => t!("status.incompatible").to_string(),
        }
    }

    /// The detail message printed after the tag, empty for a plain pass.
    /// 打印在标签之后的详细信息，普通通过时为空。
    pub fn detail(&self) -> String {
        match self {
            CaseVerdict::Passed => String::new(),
            CaseVerdict::Failed(kind) => kind.message(),
            CaseVerdict::Warned(kind) => kind.message(),
            CaseVerdict::Disabled(reason)
            | CaseVerdict::LocalOnly(reason)
            | CaseVerdict::Incompatible(reason) => reason.clone(),
        }
    }

    /// CSS class used by the HTML report.
    pub fn status_class(&self) -> &'static str {
        match self {
            CaseVerdict::Passed => "status-passed",
            CaseVerdict::Failed(_) => "status-failed",
            CaseVerdict::Warned(_) => "status-warned",
            CaseVerdict::Disabled(_) => "status-disabled",
            CaseVerdict::LocalOnly(_) => "status-local",
            CaseVerdict::Incompatible(_) => "status-incompatible",
        }
    }
}

/// One reported case, kept for the optional HTML/JSON reports.
/// 一条已报告的用例记录，供可选的 HTML/JSON 报告使用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseRecord {
    pub name: String,
    pub verdict: CaseVerdict,
    /// The human-readable detail shown alongside the verdict.
    pub detail: String,
}

impl CaseRecord {
    pub fn new(name: &str, verdict: CaseVerdict) -> Self {
        let detail = verdict.detail();
        Self {
            name: name.to_string(),
            verdict,
            detail,
        }
    }
}

/// Aggregated counters for one run. Owned exclusively by the console
/// reporter: it is updated once per case and read once at the end of the run.
/// No other component mutates it.
///
/// 一次运行的聚合计数器。由控制台报告器独占持有：
/// 每个用例更新一次，在运行结束时读取一次。没有其他组件会修改它。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunTally {
    pub passed: u32,
    pub failed: u32,
    pub warned: u32,
    pub disabled: u32,
    pub local: u32,
    pub incompatible: u32,
}

impl RunTally {
    /// Increments exactly one counter for the given verdict.
    /// 为给定判定恰好递增一个计数器。
    pub fn record(&mut self, verdict: &CaseVerdict) {
        match verdict {
            CaseVerdict::Passed => self.passed += 1,
            CaseVerdict::Failed(_) => self.failed += 1,
            CaseVerdict::Warned(_) => self.warned += 1,
            CaseVerdict::Disabled(_) => self.disabled += 1,
            CaseVerdict::LocalOnly(_) => self.local += 1,
            CaseVerdict::Incompatible(_) => self.incompatible += 1,
        }
    }

    /// Total number of cases reported.
    pub fn total(&self) -> u32 {
        self.passed + self.failed + self.warned + self.disabled + self.local + self.incompatible
    }

    /// The pass rate over executed-and-compared cases, as a percentage.
    /// Returns 0.0 when nothing was tallied as passed or failed.
    ///
    /// 已执行并比较的用例的通过率（百分比）。
    /// 当没有用例被计为通过或失败时返回 0.0。
    pub fn pass_rate(&self) -> f64 {
        let denominator = self.passed + self.failed;
        if denominator == 0 {
            0.0
        } else {
            f64::from(self.passed) / f64::from(denominator) * 100.0
        }
    }

    pub fn any_failed(&self) -> bool {
        self.failed > 0
    }
}
