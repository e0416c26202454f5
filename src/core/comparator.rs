//! # Output Comparator / 输出比较器
//!
//! Decides whether one produced artifact matches one recorded baseline.
//! The ladder is, in order and short-circuiting on success: existence check,
//! exact byte comparison, a registered per-case comparator (authoritative
//! when present), an order-insensitive line diff written to a scratch file,
//! and finally a numeric-tolerant comparison for the recognized textual
//! formats.
//!
//! 判定一个产物是否与一个记录的基线匹配。
//! 比较阶梯按顺序执行并在成功时短路：存在性检查、逐字节精确比较、
//! 已注册的用例级比较器（存在时具有决定权）、写入临时文件的
//! 顺序无关行差异，最后是对已识别文本格式的数值宽容比较。

use crate::core::models::ComparisonOutcome;
use crate::infra::fs::{files_identical, produced_path, read_text_auto, remove_stale};
use anyhow::Result;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Numeric tokens are equal iff their absolute difference is within this
/// epsilon.
/// 数值词元相等当且仅当其绝对差不超过此精度。
pub const EPS: f64 = 1e-8;

/// Token delimiter of the formats eligible for tolerant comparison.
/// 可进行宽容比较的格式的词元分隔符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `.csv`: fields separated by commas.
    Comma,
    /// `.noa`: space/tab-delimited node/edge attribute rows.
    Whitespace,
}

/// A per-case comparison routine registered with the harness. This is the
/// sole extension point for plugins whose output cannot be judged by the
/// built-in ladder; its boolean verdict is authoritative.
///
/// 向测试工具注册的用例级比较例程。这是唯一的扩展点，
/// 供内置阶梯无法判定其输出的插件使用；其布尔判定具有决定权。
pub trait CaseComparator: Send + Sync {
    fn compare(&self, produced: &Path, expected: &Path) -> Result<bool>;
}

/// Case-name → comparator mapping, populated by the embedding application
/// before the run starts.
/// “用例名 → 比较器”映射，由嵌入方在运行开始前填充。
#[derive(Default)]
pub struct ComparatorRegistry {
    inner: HashMap<String, Box<dyn CaseComparator>>,
}

impl ComparatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, case_name: impl Into<String>, comparator: Box<dyn CaseComparator>) {
        self.inner.insert(case_name.into(), comparator);
    }

    pub fn get(&self, case_name: &str) -> Option<&dyn CaseComparator> {
        self.inner.get(case_name).map(|b| b.as_ref())
    }
}

/// Compares one produced artifact against one baseline.
///
/// On any `Match` decided after the exact step, the scratch diff file is
/// removed; on `Mismatch` it is retained for manual inspection.
///
/// 将一个产物与一个基线进行比较。
///
/// 精确比较之后得出的任何 `Match` 都会删除临时 diff 文件；
/// `Mismatch` 时保留该文件以供人工检查。
pub fn compare_artifact(
    produced: &Path,
    expected: &Path,
    diff_path: &Path,
    custom: Option<&dyn CaseComparator>,
) -> Result<ComparisonOutcome> {
    if !produced.exists() {
        return Ok(ComparisonOutcome::MissingOutput);
    }

    if files_identical(produced, expected)? {
        return Ok(ComparisonOutcome::Match);
    }

    // A registered comparator replaces the diff and tolerant steps outright.
    // 已注册的比较器直接取代 diff 与宽容比较两个步骤。
    if let Some(comparator) = custom {
        return Ok(if comparator.compare(produced, expected)? {
            ComparisonOutcome::Match
        } else {
            ComparisonOutcome::Mismatch
        });
    }

    let left = read_text_auto(produced)?;
    let right = read_text_auto(expected)?;

    let mut left_sorted: Vec<&str> = left.lines().collect();
    let mut right_sorted: Vec<&str> = right.lines().collect();
    left_sorted.sort_unstable();
    right_sorted.sort_unstable();

    if left_sorted == right_sorted {
        remove_stale(diff_path)?;
        return Ok(ComparisonOutcome::Match);
    }

    write_diff(diff_path, &left_sorted, &right_sorted)?;

    if let Some(delimiter) = tolerant_delimiter(expected) {
        if tolerant_equal(&left, &right, delimiter) {
            remove_stale(diff_path)?;
            return Ok(ComparisonOutcome::Match);
        }
    }

    Ok(ComparisonOutcome::Mismatch)
}

/// Picks the tolerant-comparison delimiter for a baseline, or `None` when
/// the format is not recognized. The extension is taken from the produced
/// name, i.e. after stripping `.expected` and any trailing `.gz`.
///
/// 为基线选择宽容比较的分隔符；无法识别格式时返回 `None`。
/// 扩展名取自产物名称，即去掉 `.expected` 和末尾的 `.gz` 之后。
pub fn tolerant_delimiter(expected: &Path) -> Option<Delimiter> {
    let produced = produced_path(expected);
    let name = produced.file_name()?.to_string_lossy().into_owned();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    if name.ends_with(".csv") {
        Some(Delimiter::Comma)
    } else if name.ends_with(".noa") {
        Some(Delimiter::Whitespace)
    } else {
        None
    }
}

/// Order-insensitive, numeric-tolerant equality of two whole files.
///
/// Both sides are sorted line-wise and must have equal line counts. Line by
/// line, token counts must match, non-numeric tokens must be identical, and
/// numeric tokens must agree within [`EPS`]. Every line is evaluated — a
/// single conforming line is never taken as evidence for the whole file.
///
/// 两个完整文件的顺序无关、数值宽容相等性。
///
/// 两侧都按行排序且行数必须相等。逐行比较时词元数必须一致，
/// 非数值词元必须完全相同，数值词元之差必须在 [`EPS`] 之内。
/// 每一行都会被检查——绝不以单独一行合规作为整个文件合规的依据。
pub fn tolerant_equal(left: &str, right: &str, delimiter: Delimiter) -> bool {
    let mut left_sorted: Vec<&str> = left.lines().collect();
    let mut right_sorted: Vec<&str> = right.lines().collect();
    left_sorted.sort_unstable();
    right_sorted.sort_unstable();

    if left_sorted.len() != right_sorted.len() {
        return false;
    }

    left_sorted
        .iter()
        .zip(right_sorted.iter())
        .all(|(a, b)| tolerant_line_equal(a, b, delimiter))
}

fn tolerant_line_equal(left: &str, right: &str, delimiter: Delimiter) -> bool {
    let left_tokens = tokenize(left, delimiter);
    let right_tokens = tokenize(right, delimiter);

    if left_tokens.len() != right_tokens.len() {
        return false;
    }

    left_tokens.iter().zip(right_tokens.iter()).all(|(a, b)| {
        match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => (x - y).abs() <= EPS,
            _ => a == b,
        }
    })
}

fn tokenize(line: &str, delimiter: Delimiter) -> Vec<&str> {
    match delimiter {
        Delimiter::Comma => line.split(',').collect(),
        Delimiter::Whitespace => line.split_whitespace().collect(),
    }
}

/// Writes the multiset difference between two sorted line lists into the
/// scratch file: `<` rows exist only in the produced output, `>` rows only
/// in the baseline.
///
/// 将两个已排序行列表之间的多重集差异写入临时文件：
/// `<` 行仅存在于产物中，`>` 行仅存在于基线中。
fn write_diff(diff_path: &Path, left: &[&str], right: &[&str]) -> Result<()> {
    let mut report = String::new();
    let (mut i, mut j) = (0, 0);

    while i < left.len() || j < right.len() {
        match (left.get(i), right.get(j)) {
            (Some(l), Some(r)) if l == r => {
                i += 1;
                j += 1;
            }
            (Some(l), Some(r)) if l < r => {
                let _ = writeln!(report, "< {}", l);
                i += 1;
            }
            (Some(_), Some(r)) => {
                let _ = writeln!(report, "> {}", r);
                j += 1;
            }
            (Some(l), None) => {
                let _ = writeln!(report, "< {}", l);
                i += 1;
            }
            (None, Some(r)) => {
                let _ = writeln!(report, "> {}", r);
                j += 1;
            }
            (None, None) => break,
        }
    }

    fs::write(diff_path, report)
        .map_err(|e| anyhow::anyhow!("failed to write {}: {}", diff_path.display(), e))
}
