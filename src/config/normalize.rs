use super::judge::{Checker, JudgeInfo, Subtask, Testcase, Testcases};
use serde_json::{Map, Value, json};

/// 转为规范的外部表示
///
/// 去掉稳定标识，省略所有取默认值的字段（`false`、未设置的数值、空依赖列表）。
pub fn normalize(info: &JudgeInfo) -> Value {
    let mut obj = Map::new();
    insert_opt(&mut obj, "timeLimit", info.time_limit);
    insert_opt(&mut obj, "memoryLimit", info.memory_limit);
    if let Some(file_io) = &info.file_io {
        obj.insert(
            "fileIo".into(),
            json!({
                "inputFilename": file_io.input_filename,
                "outputFilename": file_io.output_filename,
            }),
        );
    }
    if info.run_samples {
        obj.insert("runSamples".into(), Value::Bool(true));
    }
    obj.insert("checker".into(), checker(&info.checker));
    if let Testcases::Manual(subtasks) = &info.testcases {
        obj.insert(
            "subtasks".into(),
            subtasks.iter().map(|s| subtask(s)).collect(),
        );
    }
    Value::Object(obj)
}

fn insert_opt(obj: &mut Map<String, Value>, key: &str, value: Option<u32>) {
    if let Some(value) = value {
        obj.insert(key.into(), value.into());
    }
}

fn checker(checker: &Checker) -> Value {
    match checker {
        Checker::Integers | Checker::Binary => json!({ "type": checker.type_name() }),
        Checker::Floats { precision } => json!({ "type": "floats", "precision": precision }),
        Checker::Lines { case_sensitive } => {
            json!({ "type": "lines", "caseSensitive": case_sensitive })
        }
        Checker::Custom(custom) => json!({
            "type": "custom",
            "interface": custom.interface,
            "language": custom.language,
            "languageOptions": custom.language_options,
            "filename": custom.filename,
        }),
    }
}

fn subtask(subtask: &Subtask) -> Value {
    let mut obj = Map::new();
    obj.insert("scoringType".into(), subtask.scoring_type.as_str().into());
    insert_opt(&mut obj, "percentagePoints", subtask.percentage_points);
    insert_opt(&mut obj, "timeLimit", subtask.time_limit);
    insert_opt(&mut obj, "memoryLimit", subtask.memory_limit);
    if !subtask.dependencies.is_empty() {
        obj.insert("dependencies".into(), json!(subtask.dependencies));
    }
    obj.insert(
        "testcases".into(),
        subtask.testcases.iter().map(|t| testcase(t)).collect(),
    );
    Value::Object(obj)
}

fn testcase(testcase: &Testcase) -> Value {
    let mut obj = Map::new();
    obj.insert("inputFilename".into(), testcase.input_filename.clone().into());
    obj.insert(
        "outputFilename".into(),
        testcase.output_filename.clone().into(),
    );
    insert_opt(&mut obj, "percentagePoints", testcase.percentage_points);
    insert_opt(&mut obj, "timeLimit", testcase.time_limit);
    insert_opt(&mut obj, "memoryLimit", testcase.memory_limit);
    Value::Object(obj)
}
