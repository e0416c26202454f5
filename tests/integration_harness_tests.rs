//! # Harness Integration Tests / 测试工具集成测试
//!
//! Drives single cases end-to-end through `run_case` with scripted stand-ins
//! for the pipeline executable: fixture warnings, exclusion short-circuits,
//! produced-vs-baseline verdicts, stale-output hygiene, screen mode,
//! timeouts and the per-case comparator override.
//!
//! 通过 `run_case` 以脚本替身充当流水线可执行文件，端到端驱动单个用例：
//! 夹具警告、排除短路、产物与基线判定、过期输出清理、屏幕模式、
//! 超时和用例级比较器覆盖。

mod common;

use pluma_harness::core::execution::{RunContext, run_case};
use pluma_harness::core::models::{CaseVerdict, FailureKind, PluginCase, WarnKind};
use std::fs;
use std::path::{Path, PathBuf};

fn context(pipeline: PathBuf) -> RunContext {
    RunContext::new(pipeline)
}

#[tokio::test]
async fn test_missing_example_dir_is_a_warning() {
    let (_temp, plugins) = common::corpus();
    fs::create_dir_all(plugins.join("Echo")).unwrap();
    let case = PluginCase::new(&plugins, "Echo");

    let verdict = run_case(&case, &context(PathBuf::from("/nonexistent"))).await;

    assert_eq!(verdict, CaseVerdict::Warned(WarnKind::NoExampleDir));
}

#[tokio::test]
async fn test_missing_config_is_a_warning() {
    let (_temp, plugins) = common::corpus();
    common::add_plugin(&plugins, "Echo");
    let case = PluginCase::new(&plugins, "Echo");

    let verdict = run_case(&case, &context(PathBuf::from("/nonexistent"))).await;

    assert_eq!(verdict, CaseVerdict::Warned(WarnKind::NoConfig));
}

#[tokio::test]
async fn test_undeclared_plugin_is_a_warning_not_a_failure() {
    let (_temp, plugins) = common::corpus();
    let example = common::add_plugin(&plugins, "Echo");
    // The config only drives some other plugin.
    common::write_config(&example, "Velvet", "contigs.fa");
    let case = PluginCase::new(&plugins, "Echo");

    let verdict = run_case(&case, &context(PathBuf::from("/nonexistent"))).await;

    assert_eq!(verdict, CaseVerdict::Warned(WarnKind::NotDeclared));
}

#[tokio::test]
async fn test_missing_baseline_is_a_warning() {
    let (_temp, plugins) = common::corpus();
    let example = common::add_plugin(&plugins, "Echo");
    common::write_config(&example, "Echo", "result.txt");
    let case = PluginCase::new(&plugins, "Echo");

    let verdict = run_case(&case, &context(PathBuf::from("/nonexistent"))).await;

    assert_eq!(verdict, CaseVerdict::Warned(WarnKind::NoBaseline));
}

#[tokio::test]
async fn test_malformed_config_is_a_hard_failure() {
    let (_temp, plugins) = common::corpus();
    let example = common::add_plugin(&plugins, "Echo");
    fs::write(
        example.join("config.txt"),
        "Plugin Echo inputfile in.txt parameter out.txt\n",
    )
    .unwrap();
    let case = PluginCase::new(&plugins, "Echo");

    let verdict = run_case(&case, &context(PathBuf::from("/nonexistent"))).await;

    assert_eq!(verdict, CaseVerdict::Failed(FailureKind::ConfigMalformed));
}

#[tokio::test]
async fn test_interactive_marker_short_circuits_to_incompatible() {
    let (_temp, plugins) = common::corpus();
    let example = common::add_plugin(&plugins, "Viewer");
    common::write_config(&example, "Viewer", "result.txt");
    common::write_baseline(&example, "result.txt", "anything\n");
    fs::write(example.join("interactive"), "").unwrap();
    let case = PluginCase::new(&plugins, "Viewer");

    let verdict = run_case(&case, &context(PathBuf::from("/nonexistent"))).await;

    assert!(matches!(verdict, CaseVerdict::Incompatible(_)));
}

#[cfg(unix)]
mod pipeline_tests {
    use super::*;
    use pluma_harness::core::comparator::CaseComparator;

    #[tokio::test]
    async fn test_echo_scenario_passes_end_to_end() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "hello\n");
        let pipeline = common::fake_pipeline(
            temp.path(),
            &format!("echo hello > '{}'", example.join("result.txt").display()),
        );
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert_eq!(verdict, CaseVerdict::Passed);
    }

    #[tokio::test]
    async fn test_missing_output_fails_the_case() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "hello\n");
        let pipeline = common::inert_pipeline(temp.path());
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert!(matches!(
            verdict,
            CaseVerdict::Failed(FailureKind::OutputNotProduced(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_output_never_causes_a_false_pass() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "hello\n");
        // A leftover from an earlier run that matches the baseline exactly.
        fs::write(example.join("result.txt"), "hello\n").unwrap();
        let pipeline = common::inert_pipeline(temp.path());
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert!(matches!(
            verdict,
            CaseVerdict::Failed(FailureKind::OutputNotProduced(_))
        ));
    }

    #[tokio::test]
    async fn test_mismatched_output_fails_and_retains_the_diff() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "hello\n");
        let pipeline = common::pipeline_writing(
            temp.path(),
            &example.join("result.txt"),
            "goodbye\n",
        );
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert!(matches!(
            verdict,
            CaseVerdict::Failed(FailureKind::OutputMismatch(_))
        ));
        assert!(case.diff_path().exists());
    }

    #[tokio::test]
    async fn test_screen_mode_compares_captured_stdout() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "none");
        fs::write(example.join("screen.expected"), "hello\n").unwrap();
        let pipeline = common::fake_pipeline(temp.path(), "echo hello");
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert_eq!(verdict, CaseVerdict::Passed);
        assert_eq!(
            fs::read_to_string(case.pipeline_log_path()).unwrap(),
            "hello\n"
        );
    }

    #[tokio::test]
    async fn test_screen_mode_mismatch_fails() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "none");
        fs::write(example.join("screen.expected"), "goodbye\n").unwrap();
        let pipeline = common::fake_pipeline(temp.path(), "echo hello");
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert!(matches!(
            verdict,
            CaseVerdict::Failed(FailureKind::OutputMismatch(_))
        ));
    }

    #[tokio::test]
    async fn test_timeout_expiry_is_a_distinct_failure() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Sleeper");
        common::write_config(&example, "Sleeper", "result.txt");
        common::write_baseline(&example, "result.txt", "never\n");
        let pipeline = common::fake_pipeline(temp.path(), "sleep 5");
        let case = PluginCase::new(&plugins, "Sleeper");

        let mut ctx = context(pipeline);
        ctx.timeout_secs = Some(1);

        let verdict = run_case(&case, &ctx).await;

        assert_eq!(
            verdict,
            CaseVerdict::Failed(FailureKind::PipelineTimeout(1))
        );
    }

    #[tokio::test]
    async fn test_unspawnable_pipeline_is_a_local_failure() {
        let (_temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "hello\n");
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(PathBuf::from("/nonexistent/pluma"))).await;

        assert!(matches!(
            verdict,
            CaseVerdict::Failed(FailureKind::PipelineFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_pretest_commands_run_before_the_pipeline() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "seeded\n");

        let seed = temp.path().join("seed.txt");
        fs::write(&seed, "seeded\n").unwrap();
        let staged = temp.path().join("staged.txt");
        fs::write(
            example.join("pretest.txt"),
            format!(
                "# stage the fixture input\ncp {} {}\n",
                seed.display(),
                staged.display()
            ),
        )
        .unwrap();

        let pipeline = common::fake_pipeline(
            temp.path(),
            &format!(
                "cat '{}' > '{}'",
                staged.display(),
                example.join("result.txt").display()
            ),
        );
        let case = PluginCase::new(&plugins, "Echo");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert_eq!(verdict, CaseVerdict::Passed);
    }

    #[tokio::test]
    async fn test_every_baseline_in_the_set_must_hold() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Split");
        common::write_config(&example, "Split", "part");
        common::write_baseline(&example, "part1.txt", "one\n");
        common::write_baseline(&example, "part2.txt", "two\n");
        // Only the first declared artifact is produced.
        let pipeline = common::fake_pipeline(
            temp.path(),
            &format!("echo one > '{}'", example.join("part1.txt").display()),
        );
        let case = PluginCase::new(&plugins, "Split");

        let verdict = run_case(&case, &context(pipeline)).await;

        assert!(matches!(
            verdict,
            CaseVerdict::Failed(FailureKind::OutputNotProduced(_))
        ));
    }

    #[tokio::test]
    async fn test_reruns_on_an_unchanged_corpus_are_idempotent() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Echo");
        common::write_config(&example, "Echo", "result.txt");
        common::write_baseline(&example, "result.txt", "hello\n");
        let pipeline = common::fake_pipeline(
            temp.path(),
            &format!("echo hello > '{}'", example.join("result.txt").display()),
        );
        let case = PluginCase::new(&plugins, "Echo");
        let ctx = context(pipeline);

        let first = run_case(&case, &ctx).await;
        let second = run_case(&case, &ctx).await;

        assert_eq!(first, CaseVerdict::Passed);
        assert_eq!(second, CaseVerdict::Passed);
    }

    struct AlwaysEqual;

    impl CaseComparator for AlwaysEqual {
        fn compare(&self, _produced: &Path, _expected: &Path) -> anyhow::Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_registered_comparator_overrides_the_ladder() {
        let (temp, plugins) = common::corpus();
        let example = common::add_plugin(&plugins, "Binary");
        common::write_config(&example, "Binary", "result.bin");
        common::write_baseline(&example, "result.bin", "recorded");
        let pipeline = common::pipeline_writing(
            temp.path(),
            &example.join("result.bin"),
            "freshly-produced",
        );
        let case = PluginCase::new(&plugins, "Binary");

        let mut ctx = context(pipeline);
        ctx.comparators.register("Binary", Box::new(AlwaysEqual));

        let verdict = run_case(&case, &ctx).await;

        assert_eq!(verdict, CaseVerdict::Passed);
    }
}
