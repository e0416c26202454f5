//! # Core Module / 核心模块
//!
//! This module contains the core functionality of the PluMA harness,
//! including case discovery, exclusion classification, example-config
//! interpretation, output comparison and per-case execution logic.
//!
//! 此模块包含 PluMA 测试工具的核心功能，
//! 包括用例发现、排除分类、示例配置解析、输出比较和单用例执行逻辑。

pub mod models;
pub mod registry;
pub mod policy;
pub mod config;
pub mod comparator;
pub mod execution;

// Re-exports
pub use models::{CaseVerdict, PluginCase, RunTally};
pub use policy::ExclusionPolicy;
pub use execution::run_case;
