// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use std::{env, path::PathBuf};

use crate::infra::t;

pub mod commands;

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        if let Some(lang) = args.get(pos + 1) {
            return Some(lang.clone());
        }
    }
    None
}

fn build_cli(locale: &str) -> Command {
    Command::new("pluma-harness")
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli_about", locale = locale).to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli_lang", locale = locale).to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(
            Command::new("run")
                .about(t!("cmd_run_about", locale = locale).to_string())
                .arg(
                    Arg::new("plugin")
                        .help(t!("arg_plugin", locale = locale).to_string())
                        .value_name("PLUGIN")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("plugins-dir")
                        .long("plugins-dir")
                        .help(t!("arg_plugins_dir", locale = locale).to_string())
                        .value_name("PLUGINS_DIR")
                        .default_value("plugins")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("pipeline")
                        .short('p')
                        .long("pipeline")
                        .help(t!("arg_pipeline", locale = locale).to_string())
                        .value_name("PIPELINE")
                        .default_value("./pluma")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("exclusions")
                        .long("exclusions")
                        .help(t!("arg_exclusions", locale = locale).to_string())
                        .value_name("EXCLUSIONS")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .help(t!("arg_timeout", locale = locale).to_string())
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u64))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("capture-stderr")
                        .long("capture-stderr")
                        .help(t!("arg_capture_stderr", locale = locale).to_string())
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("html")
                        .long("html")
                        .help(t!("arg_html", locale = locale).to_string())
                        .value_name("HTML")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help(t!("arg_json", locale = locale).to_string())
                        .value_name("JSON")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                ),
        )
        .subcommand(
            Command::new("init")
                .about(t!("cmd_init_about", locale = locale).to_string())
                .arg(
                    Arg::new("name")
                        .help(t!("arg_init_name", locale = locale).to_string())
                        .value_name("NAME")
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("plugins-dir")
                        .long("plugins-dir")
                        .help(t!("arg_plugins_dir", locale = locale).to_string())
                        .value_name("PLUGINS_DIR")
                        .default_value("plugins")
                        .value_parser(clap::value_parser!(PathBuf))
                        .action(ArgAction::Set),
                )
                .arg(
                    Arg::new("non-interactive")
                        .long("non-interactive")
                        .help("Scaffold a default example fixture without launching the interactive wizard.")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub async fn run() -> Result<()> {
    // Honor an explicit --lang before the CLI itself is built; otherwise the
    // system locale picked by `init` stands.
    // 在构建 CLI 之前优先处理显式的 --lang；否则沿用 `init` 选择的系统语言。
    let language = match pre_parse_language() {
        Some(lang) => {
            rust_i18n::set_locale(&lang);
            lang
        }
        None => rust_i18n::locale().to_string(),
    };

    let matches = build_cli(&language).get_matches();

    match matches.subcommand() {
        Some(("run", run_matches)) => {
            let plugin = run_matches.get_one::<String>("plugin").cloned();
            let plugins_dir = run_matches
                .get_one::<PathBuf>("plugins-dir")
                .unwrap() // Has default
                .clone();
            let pipeline = run_matches
                .get_one::<PathBuf>("pipeline")
                .unwrap() // Has default
                .clone();
            let exclusions = run_matches.get_one::<PathBuf>("exclusions").cloned();
            let timeout = run_matches.get_one::<u64>("timeout").copied();
            let capture_stderr = run_matches.get_flag("capture-stderr");
            let html = run_matches.get_one::<PathBuf>("html").cloned();
            let json = run_matches.get_one::<PathBuf>("json").cloned();

            commands::run::execute(
                plugin,
                plugins_dir,
                pipeline,
                exclusions,
                timeout,
                capture_stderr,
                html,
                json,
            )
            .await?;
        }
        Some(("init", init_matches)) => {
            let name = init_matches.get_one::<String>("name").cloned();
            let plugins_dir = init_matches
                .get_one::<PathBuf>("plugins-dir")
                .unwrap() // Has default
                .clone();
            let non_interactive = init_matches.get_flag("non-interactive");

            commands::init::execute(name, plugins_dir, non_interactive)?;
        }
        _ => {
            // This case handles when no subcommand is given.
            // Clap will have already printed help info.
        }
    }
    Ok(())
}
