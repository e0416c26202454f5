//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations used by the
//! comparator and the pipeline runner: baseline discovery, produced-path
//! derivation, stale-artifact removal and gzip-aware text reads.
//!
//! 此模块提供比较器和流水线运行器使用的文件系统操作：
//! 基线发现、产物路径推导、过期产物删除和支持 gzip 的文本读取。

use anyhow::{Context, Result};
use flate2::read::GzDecoder;
use glob::glob;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Suffix every baseline file carries.
/// 每个基线文件携带的后缀。
pub const BASELINE_SUFFIX: &str = ".expected";

/// Resolves the baseline set for a declared output: every
/// `<output>*.expected` file in the example directory, sorted by path.
/// The glob is anchored at the output name, so unrelated baselines such as
/// `screen.expected` never leak into the set.
///
/// 解析声明输出的基线集合：示例目录中的每个 `<output>*.expected` 文件，
/// 按路径排序。通配符锚定在输出名上，因此 `screen.expected` 等
/// 无关基线绝不会混入集合。
pub fn find_baselines(example_dir: &Path, output_name: &str) -> Result<Vec<PathBuf>> {
    let pattern = format!(
        "{}/{}*{}",
        glob::Pattern::escape(&example_dir.to_string_lossy()),
        glob::Pattern::escape(output_name),
        BASELINE_SUFFIX
    );
    let entries = glob(&pattern)
        .with_context(|| format!("invalid baseline pattern {}", pattern))?;

    let mut baselines: Vec<PathBuf> = entries.filter_map(|entry| entry.ok()).collect();
    baselines.sort();
    Ok(baselines)
}

/// Derives the produced-output path for a baseline by stripping the fixed
/// `.expected` suffix.
///
/// 通过去掉固定的 `.expected` 后缀，推导基线对应的产物路径。
pub fn produced_path(expected: &Path) -> PathBuf {
    let text = expected.to_string_lossy();
    match text.strip_suffix(BASELINE_SUFFIX) {
        Some(stripped) => PathBuf::from(stripped),
        None => expected.to_path_buf(),
    }
}

/// Removes a stale artifact left behind by an earlier run. A leftover file
/// must never survive into a fresh run, where it could masquerade as fresh
/// pipeline output.
///
/// 删除先前运行遗留的过期产物。遗留文件绝不能留到新一次运行中，
/// 否则它可能伪装成新的流水线输出。
pub fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            Err(e).with_context(|| format!("failed to remove stale output {}", path.display()))
        }
    }
}

/// Whether `path` names a gzip-compressed artifact, either directly (`.gz`)
/// or through its baseline (`.gz.expected`).
fn is_gzip(path: &Path) -> bool {
    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    name.ends_with(".gz") || name.ends_with(&format!(".gz{}", BASELINE_SUFFIX))
}

/// Reads a file as text, transparently decompressing gzip artifacts.
/// 以文本方式读取文件，对 gzip 产物透明解压。
pub fn read_text_auto(path: &Path) -> Result<String> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    if !is_gzip(path) {
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }

    let mut decoder = GzDecoder::new(&bytes[..]);
    let mut text = String::new();
    decoder
        .read_to_string(&mut text)
        .with_context(|| format!("failed to decompress {}", path.display()))?;
    Ok(text)
}

/// Byte-for-byte equality of two files.
/// 两个文件逐字节相等。
pub fn files_identical(a: &Path, b: &Path) -> Result<bool> {
    let left = fs::read(a).with_context(|| format!("failed to read {}", a.display()))?;
    let right = fs::read(b).with_context(|| format!("failed to read {}", b.display()))?;
    Ok(left == right)
}

/// Whether a file exists and is empty. Used to clean up an untouched stderr
/// capture after a pipeline run.
pub fn is_empty_file(path: &Path) -> Result<bool> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to stat {}", path.display()))?;
    Ok(metadata.len() == 0)
}
