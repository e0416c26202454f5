//! # Plugin Registry Scanner / 插件注册表扫描器
//!
//! Enumerates candidate plugin cases from the plugin root directory.
//! The scan is a pure directory listing: non-directories are skipped
//! silently, and the result is sorted by name so reports are deterministic.
//!
//! 从插件根目录枚举候选插件用例。
//! 扫描是纯目录列表：非目录条目被静默跳过，
//! 结果按名称排序，以使报告具有确定性。

use crate::core::models::PluginCase;
use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Scans the plugin root and returns one `PluginCase` per subdirectory,
/// sorted by name. With a filter, only the named case is returned; a filter
/// naming a missing directory yields an empty list and the caller reports it.
///
/// # Errors
/// Fails fatally when the root itself does not exist or cannot be read —
/// nothing has been processed at that point.
///
/// 扫描插件根目录，为每个子目录返回一个 `PluginCase`，按名称排序。
/// 带过滤器时仅返回指定名称的用例；过滤器指向不存在的目录时返回空列表，
/// 由调用方负责报告。
///
/// # Errors
/// 当根目录本身不存在或无法读取时立即失败——此时尚未处理任何用例。
pub fn scan(root: &Path, filter: Option<&str>) -> Result<Vec<PluginCase>> {
    if !root.is_dir() {
        bail!("plugin root {} does not exist", root.display());
    }

    if let Some(name) = filter {
        let directory = root.join(name);
        if directory.is_dir() {
            return Ok(vec![PluginCase::new(root, name)]);
        }
        return Ok(Vec::new());
    }

    let mut cases = Vec::new();
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to read plugin root {}", root.display()))?;
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        // Entries with non-UTF-8 names cannot be addressed by a config
        // directive and are skipped like any other non-case entry.
        // 名称不是 UTF-8 的条目无法被配置指令引用，与其他非用例条目一样被跳过。
        let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
            continue;
        };
        cases.push(PluginCase::new(root, &name));
    }

    cases.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(cases)
}
