//! # Reporting Module / 报告模块
//!
//! This module handles the presentation of case verdicts in multiple formats.
//! It provides a streaming, colorized console reporter that owns the run
//! tally, plus standalone HTML and JSON report writers.
//!
//! 此模块负责以多种格式呈现用例判定结果。
//! 它提供一个持有运行计数的流式彩色控制台报告器，
//! 以及独立的 HTML 和 JSON 报告输出。

pub mod console;
pub mod html;
pub mod json;

// Re-export common reporting functions
pub use console::ConsoleReporter;
pub use html::generate_html_report;
pub use json::generate_json_report;
