//! # PluMA Harness Library / PluMA 测试工具库
//!
//! This library provides the core functionality for the PluMA plugin harness,
//! a configuration-driven regression test runner for pipeline plugins. It
//! drives the external pipeline executable against every installed plugin's
//! example corpus and compares the produced output to recorded baselines.
//!
//! 此库为 PluMA 插件测试工具提供核心功能，
//! 这是一个配置驱动的流水线插件回归测试运行器。它针对每个已安装插件的
//! 示例语料驱动外部流水线可执行文件，并将产生的输出与记录的基线进行比较。
//!
//! ## Modules / 模块
//!
//! - `core` - Case discovery, classification, config interpretation, execution and comparison
//! - `infra` - Infrastructure services like subprocess control and file system operations
//! - `reporting` - Verdict reporting in console, HTML and JSON form
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 用例发现、分类、配置解析、执行与比较
//! - `infra` - 基础设施服务，如子进程控制和文件系统操作
//! - `reporting` - 以控制台、HTML 和 JSON 形式报告判定结果
//! - `cli` - 命令行接口和命令

pub mod core;
pub mod infra;
pub mod reporting;
pub mod cli;

// Re-export commonly used items
pub use crate::core::models;
pub use crate::core::comparator;
pub use crate::core::execution;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    // Detect system locale and set it for i18n.
    // Fallback to "en" if detection fails.
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale.as_str()) {
        &locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
