use crate::identity::Uid;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// 浮点比较默认精度（小数位数）
pub const DEFAULT_FLOAT_PRECISION: u32 = 4;
pub const DEFAULT_CHECKER_INTERFACE: &str = "testlib";
pub const DEFAULT_CHECKER_LANGUAGE: &str = "cpp";

/// 单个测试点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Testcase {
    pub id: Uid,
    pub input_filename: String,
    pub output_filename: String,
    /// 毫秒，`None` 时沿用子任务或全局设置
    pub time_limit: Option<u32>,
    /// MiB
    pub memory_limit: Option<u32>,
    pub percentage_points: Option<u32>,
}

impl Testcase {
    pub fn new(input_filename: impl Into<String>, output_filename: impl Into<String>) -> Self {
        Testcase {
            id: Uid::fresh(),
            input_filename: input_filename.into(),
            output_filename: output_filename.into(),
            time_limit: None,
            memory_limit: None,
            percentage_points: None,
        }
    }

    /// 复制内容，分配新的标识
    pub fn duplicate(&self) -> Self {
        Testcase {
            id: Uid::fresh(),
            ..self.clone()
        }
    }
}

/// 子任务得分的合并方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringType {
    /// 各测试点得分求和（默认）
    #[default]
    Sum,
    /// 取最低分
    GroupMin,
    /// 各测试点得分比例相乘
    GroupMul,
}

impl ScoringType {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoringType::Sum => "Sum",
            ScoringType::GroupMin => "GroupMin",
            ScoringType::GroupMul => "GroupMul",
        }
    }
}

impl fmt::Display for ScoringType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Sum" => Ok(ScoringType::Sum),
            "GroupMin" => Ok(ScoringType::GroupMin),
            "GroupMul" => Ok(ScoringType::GroupMul),
            other => Err(format!("未知的计分方式: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
    pub id: Uid,
    pub time_limit: Option<u32>,
    pub memory_limit: Option<u32>,
    pub scoring_type: ScoringType,
    pub percentage_points: Option<u32>,
    pub testcases: Vec<Arc<Testcase>>,
    /// 必须先通过的子任务位置，保持插入顺序且不重复
    pub dependencies: Vec<usize>,
}

impl Subtask {
    pub fn blank() -> Self {
        Subtask {
            id: Uid::fresh(),
            time_limit: None,
            memory_limit: None,
            scoring_type: ScoringType::Sum,
            percentage_points: None,
            testcases: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// 深复制，子任务和测试点都分配新的标识；依赖保持原下标，由调用方换算
    pub fn duplicate(&self) -> Self {
        Subtask {
            id: Uid::fresh(),
            testcases: self
                .testcases
                .iter()
                .map(|t| Arc::new(t.duplicate()))
                .collect(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomChecker {
    pub interface: String,
    pub language: String,
    pub language_options: Map<String, Value>,
    pub filename: String,
}

impl Default for CustomChecker {
    fn default() -> Self {
        CustomChecker {
            interface: DEFAULT_CHECKER_INTERFACE.to_string(),
            language: DEFAULT_CHECKER_LANGUAGE.to_string(),
            language_options: Map::new(),
            filename: String::new(),
        }
    }
}

/// 输出比较方式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Checker {
    Integers,
    Floats { precision: u32 },
    Lines { case_sensitive: bool },
    Binary,
    Custom(CustomChecker),
}

impl Default for Checker {
    fn default() -> Self {
        Checker::Lines {
            case_sensitive: false,
        }
    }
}

impl Checker {
    pub fn type_name(&self) -> &'static str {
        match self {
            Checker::Integers => "integers",
            Checker::Floats { .. } => "floats",
            Checker::Lines { .. } => "lines",
            Checker::Binary => "binary",
            Checker::Custom(_) => "custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIo {
    pub input_filename: String,
    pub output_filename: String,
}

/// 测试点来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Testcases {
    /// 不设子任务，评测时从数据文件中自动识别
    Auto,
    /// 显式的子任务列表，至少一项
    Manual(Vec<Arc<Subtask>>),
}

/// 题目评测配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeInfo {
    /// 毫秒
    pub time_limit: Option<u32>,
    /// MiB
    pub memory_limit: Option<u32>,
    pub file_io: Option<FileIo>,
    pub run_samples: bool,
    pub checker: Checker,
    pub testcases: Testcases,
}

impl Default for JudgeInfo {
    /// 新建题目时的配置
    fn default() -> Self {
        JudgeInfo {
            time_limit: Some(1000),
            memory_limit: Some(512),
            file_io: None,
            run_samples: true,
            checker: Checker::default(),
            testcases: Testcases::Auto,
        }
    }
}

impl JudgeInfo {
    /// 子任务列表，自动模式下为空
    pub fn subtasks(&self) -> &[Arc<Subtask>] {
        match &self.testcases {
            Testcases::Auto => &[],
            Testcases::Manual(subtasks) => subtasks,
        }
    }

    pub fn subtask(&self, index: usize) -> Option<&Subtask> {
        self.subtasks().get(index).map(Arc::as_ref)
    }

    pub fn is_auto(&self) -> bool {
        matches!(self.testcases, Testcases::Auto)
    }

    /// 替换子任务列表，其余字段沿用
    pub(crate) fn with_subtasks(&self, subtasks: Vec<Arc<Subtask>>) -> Self {
        JudgeInfo {
            testcases: Testcases::Manual(subtasks),
            ..self.clone()
        }
    }
}
