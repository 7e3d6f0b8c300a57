//! 宽松解析
//!
//! 每个字段单独检查类型和范围，不合法的字段回落到默认值，整体解析永远不会失败。

use super::judge::{
    Checker, CustomChecker, DEFAULT_CHECKER_INTERFACE, DEFAULT_CHECKER_LANGUAGE,
    DEFAULT_FLOAT_PRECISION, FileIo, JudgeInfo, ScoringType, Subtask, Testcase, Testcases,
};
use log::debug;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// 从任意 JSON 值构造评测配置，所有实体分配新的标识
pub fn parse(raw: &Value) -> JudgeInfo {
    let empty = Map::new();
    let obj = raw.as_object().unwrap_or_else(|| {
        if !raw.is_null() {
            debug!("评测配置不是对象，使用默认值");
        }
        &empty
    });

    JudgeInfo {
        time_limit: limit(obj, "timeLimit"),
        memory_limit: limit(obj, "memoryLimit"),
        file_io: file_io(obj.get("fileIo")),
        run_samples: flag(obj, "runSamples"),
        checker: checker(obj.get("checker")),
        testcases: testcases(obj.get("subtasks")),
    }
}

/// 非负整数，否则未设置
fn limit(obj: &Map<String, Value>, key: &str) -> Option<u32> {
    let value = obj.get(key)?;
    let parsed = value.as_u64().and_then(|v| u32::try_from(v).ok());
    if parsed.is_none() && !value.is_null() {
        debug!("忽略非法的 {key}: {value}");
    }
    parsed
}

fn percentage(obj: &Map<String, Value>) -> Option<u32> {
    limit(obj, "percentagePoints").filter(|&p| {
        let ok = p <= 100;
        if !ok {
            debug!("忽略超过 100 的 percentagePoints: {p}");
        }
        ok
    })
}

fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    obj.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

fn file_io(raw: Option<&Value>) -> Option<FileIo> {
    let obj = raw?.as_object()?;
    Some(FileIo {
        input_filename: string(obj, "inputFilename")?,
        output_filename: string(obj, "outputFilename")?,
    })
}

fn checker(raw: Option<&Value>) -> Checker {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return Checker::default();
    };

    match obj.get("type").and_then(Value::as_str) {
        Some("integers") => Checker::Integers,
        Some("floats") => Checker::Floats {
            precision: limit(obj, "precision")
                .filter(|&p| p > 0)
                .unwrap_or(DEFAULT_FLOAT_PRECISION),
        },
        Some("lines") => Checker::Lines {
            case_sensitive: flag(obj, "caseSensitive"),
        },
        Some("binary") => Checker::Binary,
        Some("custom") => Checker::Custom(CustomChecker {
            interface: string(obj, "interface")
                .unwrap_or_else(|| DEFAULT_CHECKER_INTERFACE.to_string()),
            language: string(obj, "language")
                .unwrap_or_else(|| DEFAULT_CHECKER_LANGUAGE.to_string()),
            language_options: obj
                .get("languageOptions")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
            filename: string(obj, "filename").unwrap_or_default(),
        }),
        other => {
            debug!("未知的 checker 类型 {other:?}，按逐行比较处理");
            Checker::default()
        }
    }
}

fn testcases(raw: Option<&Value>) -> Testcases {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Testcases::Auto;
    };
    if items.is_empty() {
        // 启用子任务时至少要有一个
        return Testcases::Manual(vec![Arc::new(Subtask::blank())]);
    }

    let count = items.len();
    Testcases::Manual(
        items
            .iter()
            .enumerate()
            .map(|(index, item)| Arc::new(subtask(item, index, count)))
            .collect(),
    )
}

/// 非对象的条目解析为空子任务，以保持其余子任务的位置不变
fn subtask(raw: &Value, index: usize, count: usize) -> Subtask {
    let Some(obj) = raw.as_object() else {
        debug!("子任务 {index} 不是对象，使用空子任务");
        return Subtask::blank();
    };

    let scoring_type = match obj.get("scoringType").and_then(Value::as_str) {
        Some(name) => name.parse::<ScoringType>().unwrap_or_else(|e| {
            debug!("{e}，按 Sum 处理");
            ScoringType::Sum
        }),
        None => ScoringType::Sum,
    };

    Subtask {
        time_limit: limit(obj, "timeLimit"),
        memory_limit: limit(obj, "memoryLimit"),
        scoring_type,
        percentage_points: percentage(obj),
        testcases: obj
            .get("testcases")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(testcase).map(Arc::new).collect())
            .unwrap_or_default(),
        dependencies: dependencies(obj.get("dependencies"), index, count),
        ..Subtask::blank()
    }
}

fn dependencies(raw: Option<&Value>, own: usize, count: usize) -> Vec<usize> {
    let Some(items) = raw.and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(|item| {
            let dep = item
                .as_u64()
                .and_then(|d| usize::try_from(d).ok())
                .filter(|&d| d < count && d != own && seen.insert(d));
            if dep.is_none() {
                debug!("子任务 {own} 丢弃依赖 {item}");
            }
            dep
        })
        .collect()
}

fn testcase(raw: &Value) -> Option<Testcase> {
    let Some(obj) = raw.as_object() else {
        debug!("跳过非对象的测试点: {raw}");
        return None;
    };

    Some(Testcase {
        time_limit: limit(obj, "timeLimit"),
        memory_limit: limit(obj, "memoryLimit"),
        percentage_points: percentage(obj),
        ..Testcase::new(
            string(obj, "inputFilename").unwrap_or_default(),
            string(obj, "outputFilename").unwrap_or_default(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_fields_fall_back() {
        let info = parse(&json!({
            "timeLimit": 1.5,
            "memoryLimit": -1,
            "fileIo": { "inputFilename": "a.in" },
            "runSamples": "yes",
            "checker": { "type": "fuzzy" },
        }));
        assert_eq!(info.time_limit, None);
        assert_eq!(info.memory_limit, None);
        assert_eq!(info.file_io, None);
        assert!(!info.run_samples);
        assert_eq!(
            info.checker,
            Checker::Lines {
                case_sensitive: false
            }
        );
        assert!(info.is_auto());
    }

    #[test]
    fn non_object_is_default() {
        let info = parse(&json!([1, 2, 3]));
        assert_eq!(info.time_limit, None);
        assert!(info.is_auto());
    }

    #[test]
    fn checker_variants() {
        assert_eq!(
            checker(Some(&json!({ "type": "floats", "precision": 0 }))),
            Checker::Floats {
                precision: DEFAULT_FLOAT_PRECISION
            }
        );
        assert_eq!(
            checker(Some(&json!({ "type": "floats", "precision": 6 }))),
            Checker::Floats { precision: 6 }
        );
        assert_eq!(
            checker(Some(&json!({ "type": "lines", "caseSensitive": true }))),
            Checker::Lines {
                case_sensitive: true
            }
        );
        let Checker::Custom(custom) = checker(Some(&json!({
            "type": "custom",
            "language": "python",
            "languageOptions": { "version": "3.11" },
        }))) else {
            panic!("expected custom checker");
        };
        assert_eq!(custom.interface, DEFAULT_CHECKER_INTERFACE);
        assert_eq!(custom.language, "python");
        assert_eq!(custom.language_options["version"], "3.11");
        assert_eq!(custom.filename, "");
    }

    #[test]
    fn dependencies_are_range_checked() {
        let info = parse(&json!({
            "subtasks": [
                { "scoringType": "Sum", "testcases": [] },
                { "scoringType": "GroupMin", "dependencies": [0, 1, 0, 5, "x"], "testcases": [] },
                { "scoringType": "Nope", "dependencies": [1, 0], "testcases": [] },
            ]
        }));
        let subtasks = info.subtasks();
        assert_eq!(subtasks[1].dependencies, vec![0]);
        assert_eq!(subtasks[1].scoring_type, ScoringType::GroupMin);
        assert_eq!(subtasks[2].dependencies, vec![1, 0]);
        assert_eq!(subtasks[2].scoring_type, ScoringType::Sum);
    }

    #[test]
    fn bad_subtask_entry_keeps_positions() {
        let info = parse(&json!({
            "subtasks": [
                "garbage",
                { "scoringType": "Sum", "dependencies": [0], "testcases": [] },
            ]
        }));
        assert_eq!(info.subtasks().len(), 2);
        assert!(info.subtasks()[0].testcases.is_empty());
        assert_eq!(info.subtasks()[1].dependencies, vec![0]);
    }

    #[test]
    fn empty_subtask_list_gets_one_subtask() {
        let info = parse(&json!({ "subtasks": [] }));
        assert_eq!(info.subtasks().len(), 1);
    }

    #[test]
    fn testcase_fields() {
        let info = parse(&json!({
            "subtasks": [{
                "scoringType": "Sum",
                "percentagePoints": 101,
                "testcases": [
                    { "inputFilename": "1.in", "outputFilename": "1.out", "percentagePoints": 30, "timeLimit": 2000 },
                    { "inputFilename": 3 },
                    42,
                ]
            }]
        }));
        let subtask = &info.subtasks()[0];
        assert_eq!(subtask.percentage_points, None);
        assert_eq!(subtask.testcases.len(), 2);
        assert_eq!(subtask.testcases[0].percentage_points, Some(30));
        assert_eq!(subtask.testcases[0].time_limit, Some(2000));
        assert_eq!(subtask.testcases[1].input_filename, "");
    }

    #[test]
    fn every_entity_gets_a_fresh_id() {
        let raw = json!({
            "subtasks": [{ "scoringType": "Sum", "testcases": [{ "inputFilename": "1.in", "outputFilename": "1.out" }] }]
        });
        let a = parse(&raw);
        let b = parse(&raw);
        assert_ne!(a.subtasks()[0].id, b.subtasks()[0].id);
        assert_ne!(
            a.subtasks()[0].testcases[0].id,
            b.subtasks()[0].testcases[0].id
        );
    }
}
