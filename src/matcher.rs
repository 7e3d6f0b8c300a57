//! 测试点自动匹配
//!
//! 用两个正则分别筛选输入、输出文件，按捕获组的取值把它们配对。

use crate::pool::PoolFile;
use log::debug;
use regex::Regex;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_INPUT_PATTERN: &str = r"^(.+)\.in$";
pub const DEFAULT_OUTPUT_PATTERN: &str = r"^(.+)\.(?:out|ans)$";

const INPUT_EXTENSIONS: &[&str] = &[r"\.in", ".in"];
const OUTPUT_EXTENSIONS: &[&str] = &[
    r"\.(?:out|ans)",
    r"\.(?:ans|out)",
    r"\.(out|ans)",
    r"\.(ans|out)",
    r"\.out",
    r"\.ans",
    ".out",
    ".ans",
];
const INPUT_EXTENSION: &str = r"\.in";
const OUTPUT_EXTENSION: &str = r"\.(?:out|ans)";

const INPUT_TO_OUTPUT: &[(&str, &str)] = &[
    ("INPUT", "OUTPUT"),
    ("Input", "Output"),
    ("input", "output"),
    ("IN", "OUT"),
    ("in", "out"),
];
const OUTPUT_TO_INPUT: &[(&str, &str)] = &[
    ("OUTPUT", "INPUT"),
    ("Output", "Input"),
    ("output", "input"),
    ("OUT", "IN"),
    ("out", "in"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => write!(f, "输入"),
            Side::Output => write!(f, "输出"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("{side}文件的正则表达式 `{pattern}` 无效: {message}")]
    InvalidRegex {
        side: Side,
        pattern: String,
        message: String,
    },
    #[error("正则表达式没有捕获组，无法对应输入输出文件")]
    NoCaptureGroups,
    #[error("输入正则有 {input} 个捕获组，输出正则有 {output} 个，数量必须相同")]
    CaptureGroupMismatch { input: usize, output: usize },
}

/// 一侧使用的正则，以及它是否由另一侧推导而来
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
    pub derived: bool,
}

impl Pattern {
    fn user(source: &str) -> Self {
        Pattern {
            source: source.to_string(),
            derived: false,
        }
    }

    fn derived(source: String) -> Self {
        Pattern {
            source,
            derived: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPatterns {
    pub input: Pattern,
    pub output: Pattern,
}

/// 补全留空的一侧
pub fn resolve_patterns(input: &str, output: &str) -> MatchPatterns {
    let (input, output) = (input.trim(), output.trim());
    match (input.is_empty(), output.is_empty()) {
        (false, false) => MatchPatterns {
            input: Pattern::user(input),
            output: Pattern::user(output),
        },
        (false, true) => MatchPatterns {
            input: Pattern::user(input),
            output: Pattern::derived(derive_output_pattern(input)),
        },
        (true, false) => MatchPatterns {
            input: Pattern::derived(derive_input_pattern(output)),
            output: Pattern::user(output),
        },
        (true, true) => MatchPatterns {
            input: Pattern::derived(DEFAULT_INPUT_PATTERN.to_string()),
            output: Pattern::derived(DEFAULT_OUTPUT_PATTERN.to_string()),
        },
    }
}

/// 由输入正则推导输出正则
pub fn derive_output_pattern(input: &str) -> String {
    derive(
        input,
        INPUT_EXTENSIONS,
        OUTPUT_EXTENSION,
        INPUT_TO_OUTPUT,
        DEFAULT_OUTPUT_PATTERN,
    )
}

/// 由输出正则推导输入正则
pub fn derive_input_pattern(output: &str) -> String {
    derive(
        output,
        OUTPUT_EXTENSIONS,
        INPUT_EXTENSION,
        OUTPUT_TO_INPUT,
        DEFAULT_INPUT_PATTERN,
    )
}

fn derive(
    pattern: &str,
    extensions: &[&str],
    replacement: &str,
    tokens: &[(&str, &str)],
    fallback: &str,
) -> String {
    if let Some(derived) = replace_extension(pattern, extensions, replacement) {
        return derived;
    }
    let swapped = swap_tokens(pattern, tokens);
    if swapped == pattern {
        fallback.to_string()
    } else {
        swapped
    }
}

/// 替换末尾的扩展名（允许带 `$` 锚点）
fn replace_extension(pattern: &str, extensions: &[&str], replacement: &str) -> Option<String> {
    for &ext in extensions {
        for anchor in ["$", ""] {
            if let Some(stem) = pattern
                .strip_suffix(anchor)
                .and_then(|rest| rest.strip_suffix(ext))
            {
                return Some(format!("{stem}{replacement}{anchor}"));
            }
        }
    }
    None
}

/// 从左到右扫描一遍，按表中顺序优先替换较长的词
fn swap_tokens(pattern: &str, tokens: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(pattern.len() + 8);
    let mut rest = pattern;
    'scan: while let Some(c) = rest.chars().next() {
        for &(from, to) in tokens {
            if let Some(after) = rest.strip_prefix(from) {
                result.push_str(to);
                rest = after;
                continue 'scan;
            }
        }
        result.push(c);
        rest = &rest[c.len_utf8()..];
    }
    result
}

/// 一对匹配上的输入输出文件
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchedPair {
    pub input_filename: String,
    pub output_filename: String,
}

/// 编译一侧的正则；推导出的正则编译失败时视为没有匹配，不报错
fn compile(pattern: &Pattern, side: Side) -> Result<Option<Regex>, MatchError> {
    match Regex::new(&pattern.source) {
        Ok(regex) => Ok(Some(regex)),
        Err(e) if pattern.derived => {
            debug!("推导出的{side}正则 `{}` 无效，忽略: {e}", pattern.source);
            Ok(None)
        }
        Err(e) => Err(MatchError::InvalidRegex {
            side,
            pattern: pattern.source.clone(),
            message: e.to_string(),
        }),
    }
}

type Captured<'a> = (&'a str, Vec<Option<&'a str>>);

fn capture_all<'a>(pool: &'a [PoolFile], regex: &Regex) -> Vec<Captured<'a>> {
    pool.iter()
        .filter_map(|file| {
            let caps = regex.captures(&file.filename)?;
            let groups = caps.iter().skip(1).map(|m| m.map(|m| m.as_str())).collect();
            Some((file.filename.as_str(), groups))
        })
        .collect()
}

/// 自动匹配测试点
///
/// 输入、输出正则任一留空时由另一侧推导。每个输入文件按顺序取第一个捕获组完全相同的输出文件，
/// 没有配对的文件直接忽略。
pub fn match_testcases(
    pool: &[PoolFile],
    input: &str,
    output: &str,
) -> Result<Vec<MatchedPair>, MatchError> {
    let patterns = resolve_patterns(input, output);
    match_with_patterns(pool, &patterns)
}

pub fn match_with_patterns(
    pool: &[PoolFile],
    patterns: &MatchPatterns,
) -> Result<Vec<MatchedPair>, MatchError> {
    let input_regex = compile(&patterns.input, Side::Input)?;
    let output_regex = compile(&patterns.output, Side::Output)?;
    let (Some(input_regex), Some(output_regex)) = (input_regex, output_regex) else {
        return Ok(Vec::new());
    };

    // captures_len 包含整体匹配
    let input_groups = input_regex.captures_len() - 1;
    let output_groups = output_regex.captures_len() - 1;
    if input_groups != output_groups {
        return Err(MatchError::CaptureGroupMismatch {
            input: input_groups,
            output: output_groups,
        });
    }
    if input_groups == 0 {
        return Err(MatchError::NoCaptureGroups);
    }

    let inputs = capture_all(pool, &input_regex);
    let mut outputs = capture_all(pool, &output_regex);
    debug!(
        "输入正则匹配 {} 个文件，输出正则匹配 {} 个文件",
        inputs.len(),
        outputs.len()
    );

    let mut pairs = Vec::new();
    for (input_filename, groups) in inputs {
        match outputs.iter().position(|(_, other)| *other == groups) {
            Some(pos) => {
                let (output_filename, _) = outputs.remove(pos);
                pairs.push(MatchedPair {
                    input_filename: input_filename.to_string(),
                    output_filename: output_filename.to_string(),
                });
            }
            None => debug!("{input_filename} 没有对应的输出文件"),
        }
    }
    for (output_filename, _) in outputs {
        debug!("{output_filename} 没有对应的输入文件");
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(names: &[&str]) -> Vec<PoolFile> {
        names.iter().map(|n| PoolFile::new(*n, 1)).collect()
    }

    fn pair(input: &str, output: &str) -> MatchedPair {
        MatchedPair {
            input_filename: input.to_string(),
            output_filename: output.to_string(),
        }
    }

    #[test]
    fn derived_output_pairs_by_stem() {
        let files = pool(&["a1.in", "a2.in", "a1.out", "a2.out", "readme.md"]);
        let pairs = match_testcases(&files, r"^(.*)\.in$", "").unwrap();
        assert_eq!(
            pairs,
            vec![pair("a1.in", "a1.out"), pair("a2.in", "a2.out")]
        );
    }

    #[test]
    fn group_count_mismatch_yields_nothing() {
        let files = pool(&["1-1.in", "1-1.out"]);
        let err = match_testcases(&files, r"^(\d+)-\d+\.in$", r"^(\d+)-(\d+)\.out$").unwrap_err();
        assert_eq!(
            err,
            MatchError::CaptureGroupMismatch {
                input: 1,
                output: 2
            }
        );
    }

    #[test]
    fn zero_groups_is_an_error() {
        let files = pool(&["1.in", "1.out"]);
        assert_eq!(
            match_testcases(&files, r"\.in$", r"\.out$"),
            Err(MatchError::NoCaptureGroups)
        );
    }

    #[test]
    fn invalid_user_regex_is_reported() {
        let err = match_testcases(&pool(&["1.in"]), r"^(.*\.in$", "").unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidRegex {
                side: Side::Input,
                ..
            }
        ));
        let err = match_testcases(&pool(&["1.in"]), r"^(.*)\.in$", "((").unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidRegex {
                side: Side::Output,
                ..
            }
        ));
    }

    #[test]
    fn invalid_derived_regex_is_silent() {
        let patterns = MatchPatterns {
            input: Pattern::user(r"^(.*)\.in$"),
            output: Pattern::derived("((".to_string()),
        };
        assert_eq!(
            match_with_patterns(&pool(&["1.in", "1.out"]), &patterns),
            Ok(Vec::new())
        );
    }

    #[test]
    fn unmatched_files_are_dropped() {
        let files = pool(&["1.in", "2.in", "2.ans", "3.out"]);
        let pairs = match_testcases(&files, "", "").unwrap();
        assert_eq!(pairs, vec![pair("2.in", "2.ans")]);
    }

    #[test]
    fn each_output_is_used_once() {
        let files = pool(&["x1.in", "y1.in", "1.out"]);
        let pairs = match_testcases(&files, r"^[xy](\d+)\.in$", r"^(\d+)\.out$").unwrap();
        assert_eq!(pairs, vec![pair("x1.in", "1.out")]);
    }

    #[test]
    fn multiple_groups_must_all_agree() {
        let files = pool(&["t1-2.in", "t2-1.in", "t2-1.ans", "t1-2.ans"]);
        let pairs = match_testcases(&files, r"^t(\d+)-(\d+)\.in$", "").unwrap();
        assert_eq!(
            pairs,
            vec![pair("t1-2.in", "t1-2.ans"), pair("t2-1.in", "t2-1.ans")]
        );
    }

    #[test]
    fn derivation_rules() {
        assert_eq!(derive_output_pattern(r"^(.*)\.in$"), r"^(.*)\.(?:out|ans)$");
        assert_eq!(derive_output_pattern(r"(\d+)\.in"), r"(\d+)\.(?:out|ans)");
        assert_eq!(
            derive_output_pattern(r"^input(\d+)\.txt$"),
            r"^output(\d+)\.txt$"
        );
        assert_eq!(
            derive_output_pattern(r"^data/INPUT_(\d+)$"),
            r"^data/OUTPUT_(\d+)$"
        );
        assert_eq!(derive_output_pattern(r"^in(\d+)\.txt$"), r"^out(\d+)\.txt$");
        assert_eq!(derive_output_pattern(r"^IN_(\d+)$"), r"^OUT_(\d+)$");
        assert_eq!(derive_output_pattern(r"^(\d+)\.txt$"), DEFAULT_OUTPUT_PATTERN);

        assert_eq!(derive_input_pattern(r"^(.*)\.ans$"), r"^(.*)\.in$");
        assert_eq!(derive_input_pattern(r"^(.*)\.(?:out|ans)$"), r"^(.*)\.in$");
        assert_eq!(
            derive_input_pattern(r"^output(\d+)\.txt$"),
            r"^input(\d+)\.txt$"
        );
        assert_eq!(derive_input_pattern(r"^out(\d+)\.txt$"), r"^in(\d+)\.txt$");
        assert_eq!(derive_input_pattern(r"^OUT_(\d+)$"), r"^IN_(\d+)$");
        assert_eq!(derive_input_pattern(r"^(\d+)\.txt$"), DEFAULT_INPUT_PATTERN);
    }

    #[test]
    fn resolve_marks_derived_sides() {
        let p = resolve_patterns(r"^(.*)\.in$", "  ");
        assert!(!p.input.derived);
        assert!(p.output.derived);
        let p = resolve_patterns("", "");
        assert!(p.input.derived && p.output.derived);
        assert_eq!(p.input.source, DEFAULT_INPUT_PATTERN);
    }
}
