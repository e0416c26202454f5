//! # Exclusion Policy / 排除策略
//!
//! Three disjoint name→reason tables deciding, before anything is executed,
//! whether a plugin participates in the run at all. The tables are external
//! configuration data loaded once at startup and never mutated during a run;
//! a built-in default policy applies when no file is given.
//!
//! 三个互不相交的“名称→原因”表，在执行任何内容之前决定插件是否参与本次运行。
//! 这些表是外部配置数据，在启动时加载一次，运行期间不再修改；
//! 未提供文件时使用内置的默认策略。

use crate::core::models::Classification;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The policy shipped with the harness: the plugin set that historically can
/// only run against locally licensed installations or private data.
/// 随工具发布的策略：历史上只能针对本地许可安装或私有数据运行的插件集合。
const DEFAULT_POLICY: &str = r#"# Plugins excluded from regression runs, with the reason shown in the report.
# 从回归运行中排除的插件，原因会显示在报告中。

[disabled]

[local-only]
CSV2PathwayTools = "requires a licensed local Pathway Tools installation"
EM = "depends on private local datasets"
FilterPathway = "requires a licensed local Pathway Tools installation"
PathwayFilter = "requires a licensed local Pathway Tools installation"
PhiLR = "depends on private local datasets"

[incompatible]
"#;

static BUILTIN: Lazy<ExclusionPolicy> = Lazy::new(|| {
    toml::from_str(DEFAULT_POLICY).expect("built-in exclusion policy must parse")
});

/// The startup-loaded classification tables. Lookup priority is fixed:
/// disabled, then local-only, then incompatible; anything unmatched is
/// active.
///
/// 启动时加载的分类表。查找优先级固定：
/// 先 disabled，再 local-only，最后 incompatible；未匹配到的都是 active。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusionPolicy {
    /// Plugins turned off entirely, e.g. because their output is
    /// non-deterministic.
    /// 被完全停用的插件，例如因为其输出不确定。
    #[serde(default)]
    pub disabled: BTreeMap<String, String>,
    /// Plugins that only run against local, unshareable resources.
    /// 仅能针对本地不可共享资源运行的插件。
    #[serde(default, rename = "local-only")]
    pub local_only: BTreeMap<String, String>,
    /// Plugins that cannot be driven in this environment at all.
    /// 完全无法在此环境中驱动的插件。
    #[serde(default)]
    pub incompatible: BTreeMap<String, String>,
}

impl ExclusionPolicy {
    /// Loads a policy file, or returns the built-in default when `path` is
    /// `None`.
    ///
    /// 加载策略文件；`path` 为 `None` 时返回内置默认策略。
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let contents = fs::read_to_string(path).with_context(|| {
                    format!("failed to read exclusion policy {}", path.display())
                })?;
                toml::from_str(&contents).with_context(|| {
                    format!("failed to parse exclusion policy {}", path.display())
                })
            }
            None => Ok(BUILTIN.clone()),
        }
    }

    /// Classifies one plugin name against the tables, in priority order.
    /// 按优先级顺序根据各表对一个插件名称进行分类。
    pub fn classify(&self, name: &str) -> Classification {
        if let Some(reason) = self.disabled.get(name) {
            Classification::Disabled(reason.clone())
        } else if let Some(reason) = self.local_only.get(name) {
            Classification::LocalOnly(reason.clone())
        } else if let Some(reason) = self.incompatible.get(name) {
            Classification::Incompatible(reason.clone())
        } else {
            Classification::Active
        }
    }

    /// The template written by `init` as a starting point for a corpus.
    pub fn starter_template() -> &'static str {
        DEFAULT_POLICY
    }
}
