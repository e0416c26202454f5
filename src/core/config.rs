//! # Config Interpreter / 配置解析器
//!
//! Extracts the declared output artifact for a case from its example
//! configuration. The file is a sequence of whitespace-tokenized lines; the
//! interpreter turns the line addressed to the case into a typed directive
//! record instead of indexing tokens at every use site, and reports shape
//! violations as a distinct error kind.
//!
//! 从示例配置中提取用例声明的输出产物。文件是一系列按空白分词的行；
//! 解析器将指向该用例的行转换为类型化的指令记录，而不是在每个使用点
//! 对词元做下标访问，并将格式违规报告为独立的错误类型。

use crate::core::models::OutputTarget;
use std::fmt;

/// Keyword opening every plugin invocation line.
const DIRECTIVE: &str = "Plugin";
/// Keyword required at the fifth token of a well-formed invocation line.
const OUTPUT_KEYWORD: &str = "outputfile";
/// Output value selecting screen-output mode.
const SCREEN_SENTINEL: &str = "none";

/// A typed `Plugin` invocation line.
///
/// Line shape: `Plugin <name> inputfile <value> outputfile <value>`.
/// Only the name and the `outputfile` pair are semantically checked; the
/// input pair is retained verbatim.
///
/// 类型化的 `Plugin` 调用行。
///
/// 行的形状：`Plugin <name> inputfile <value> outputfile <value>`。
/// 仅名称和 `outputfile` 键值对被语义检查；输入键值对按原样保留。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginDirective {
    pub name: String,
    /// The `inputfile` value, when the line carries one.
    pub input: Option<String>,
    /// The `outputfile` value, trailing whitespace stripped.
    pub output: String,
}

impl PluginDirective {
    /// The comparison target this directive declares.
    pub fn target(&self) -> OutputTarget {
        if self.output == SCREEN_SENTINEL {
            OutputTarget::Screen
        } else {
            OutputTarget::File(self.output.clone())
        }
    }
}

/// A `Plugin` line addressed to the case that does not carry `outputfile`
/// at the expected position. A malformed declaration means the fixture
/// itself is broken, so this is a hard failure for the case, never a
/// warning.
///
/// 指向该用例但在预期位置未携带 `outputfile` 的 `Plugin` 行。
/// 格式错误的声明意味着夹具本身已损坏，因此这是该用例的硬性失败，
/// 而不是警告。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MalformedDirective {
    /// 1-based line number of the offending directive.
    pub line: usize,
}

impl fmt::Display for MalformedDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed Plugin directive on line {}", self.line)
    }
}

impl std::error::Error for MalformedDirective {}

/// Result of scanning a config file for one case.
/// 为一个用例扫描配置文件的结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// A well-formed directive for the case was found.
    Declared(PluginDirective),
    /// No line in the file addresses the case.
    NotDeclared,
}

/// Scans the whole config text for lines addressed to `case_name`.
///
/// A line belongs to the case iff its first token is the `Plugin` directive
/// and its second token equals the case name. When several lines match, the
/// last well-formed one wins. Any matching line with the wrong token at the
/// `outputfile` position fails the scan immediately.
///
/// 扫描整个配置文本，寻找指向 `case_name` 的行。
///
/// 当且仅当第一个词元是 `Plugin` 指令且第二个词元等于用例名时，该行属于
/// 此用例。多行匹配时，最后一条格式正确的生效。任何在 `outputfile`
/// 位置携带错误词元的匹配行都会使扫描立即失败。
pub fn interpret(contents: &str, case_name: &str) -> Result<Interpretation, MalformedDirective> {
    let mut found = None;

    for (idx, line) in contents.lines().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.first() != Some(&DIRECTIVE) || tokens.get(1) != Some(&case_name) {
            continue;
        }
        if tokens.get(4) != Some(&OUTPUT_KEYWORD) {
            return Err(MalformedDirective { line: idx + 1 });
        }
        let Some(output) = tokens.get(5) else {
            return Err(MalformedDirective { line: idx + 1 });
        };
        let input = (tokens.get(2) == Some(&"inputfile"))
            .then(|| tokens.get(3).map(|s| s.to_string()))
            .flatten();
        found = Some(PluginDirective {
            name: case_name.to_string(),
            input,
            output: output.to_string(),
        });
    }

    Ok(match found {
        Some(directive) => Interpretation::Declared(directive),
        None => Interpretation::NotDeclared,
    })
}
