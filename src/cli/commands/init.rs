//! # Init Command Module / 初始化命令模块
//!
//! Scaffolds a ready-to-run example fixture for a plugin: the `example/`
//! directory, a well-formed `config.txt`, a sample input and a recorded
//! baseline, plus a starter exclusion-policy file next to the corpus.
//!
//! 为插件搭建一个可直接运行的示例夹具：`example/` 目录、
//! 格式正确的 `config.txt`、一个示例输入和一个记录的基线，
//! 以及语料旁边的排除策略起始文件。

use anyhow::{Context, Result};
use colored::*;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::fs;
use std::path::PathBuf;

use crate::core::policy::ExclusionPolicy;
use crate::infra::t;

const DEFAULT_NAME: &str = "MyPlugin";
const DEFAULT_OUTPUT: &str = "output.csv";
const SAMPLE_INPUT: &str = "id,value\na,1.0\nb,2.0\n";
const SAMPLE_BASELINE: &str = "id,value\na,1.0\nb,2.0\n";

/// Runs the scaffolding wizard. With `--non-interactive`, defaults are used
/// for every prompt and existing fixtures are left untouched.
///
/// 运行脚手架向导。使用 `--non-interactive` 时，每个提示都采用默认值，
/// 且不触碰已有夹具。
pub fn execute(name: Option<String>, plugins_dir: PathBuf, non_interactive: bool) -> Result<()> {
    let theme = ColorfulTheme::default();

    let name = match name {
        Some(name) => name,
        None if non_interactive => DEFAULT_NAME.to_string(),
        None => Input::with_theme(&theme)
            .with_prompt(t!("init.prompt_name").to_string())
            .default(DEFAULT_NAME.to_string())
            .interact_text()?,
    };

    let output = if non_interactive {
        DEFAULT_OUTPUT.to_string()
    } else {
        Input::with_theme(&theme)
            .with_prompt(t!("init.prompt_output", name = &name).to_string())
            .default(DEFAULT_OUTPUT.to_string())
            .interact_text()?
    };

    let example_dir = plugins_dir.join(&name).join("example");
    let config_path = example_dir.join("config.txt");

    if config_path.exists() {
        let overwrite = if non_interactive {
            false
        } else {
            Confirm::with_theme(&theme)
                .with_prompt(t!("init.prompt_overwrite", path = config_path.display()).to_string())
                .default(false)
                .interact()?
        };
        if !overwrite {
            println!("{}", t!("init.kept_existing", path = config_path.display()).yellow());
            return Ok(());
        }
    }

    fs::create_dir_all(&example_dir)
        .with_context(|| format!("failed to create {}", example_dir.display()))?;

    let config = format!("Plugin {} inputfile input.csv outputfile {}\n", name, output);
    fs::write(&config_path, config)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    fs::write(example_dir.join("input.csv"), SAMPLE_INPUT)
        .with_context(|| format!("failed to write sample input in {}", example_dir.display()))?;

    let baseline_path = example_dir.join(format!("{}.expected", output));
    fs::write(&baseline_path, SAMPLE_BASELINE)
        .with_context(|| format!("failed to write {}", baseline_path.display()))?;

    // A starter policy next to the corpus, written only once.
    // 语料旁边的策略起始文件，只写入一次。
    let policy_path = plugins_dir.join("exclusions.toml");
    if !policy_path.exists() {
        fs::write(&policy_path, ExclusionPolicy::starter_template())
            .with_context(|| format!("failed to write {}", policy_path.display()))?;
        println!(
            "{}",
            t!("init.policy_written", path = policy_path.display()).green()
        );
    }

    println!(
        "{}",
        t!("init.success", name = &name, path = example_dir.display()).green()
    );
    println!("{}", t!("init.next_steps", name = &name));

    Ok(())
}
