//! 提交前检查
//!
//! 编辑操作只保证结构合法（下标有效、无自环），依赖成环、分值超过 100
//! 之类的问题在这里统一报告。

use crate::config::JudgeInfo;
use crate::pool::FilePool;
use log::debug;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    /// 子任务依赖成环，按位置从小到大列出环上的子任务
    DependencyCycle { subtasks: Vec<usize> },
    /// 已指定的分值之和超过 100；`subtask` 为 `None` 时指子任务一级
    PercentageOverflow { subtask: Option<usize>, sum: u32 },
    EmptyFilename { subtask: usize, testcase: usize },
    MissingFile {
        subtask: usize,
        testcase: usize,
        filename: String,
    },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::DependencyCycle { subtasks } => {
                let list: Vec<String> = subtasks.iter().map(|i| (i + 1).to_string()).collect();
                write!(f, "子任务 {} 的依赖关系成环", list.join(", "))
            }
            Issue::PercentageOverflow { subtask: None, sum } => {
                write!(f, "子任务分值之和为 {sum}%，超过 100%")
            }
            Issue::PercentageOverflow {
                subtask: Some(s),
                sum,
            } => write!(f, "子任务 {} 中测试点分值之和为 {sum}%，超过 100%", s + 1),
            Issue::EmptyFilename { subtask, testcase } => write!(
                f,
                "子任务 {} 的测试点 {} 缺少文件名",
                subtask + 1,
                testcase + 1
            ),
            Issue::MissingFile {
                subtask,
                testcase,
                filename,
            } => write!(
                f,
                "子任务 {} 的测试点 {} 引用的文件 {filename} 不存在",
                subtask + 1,
                testcase + 1
            ),
        }
    }
}

fn explicit_sum(values: impl Iterator<Item = Option<u32>>) -> u32 {
    values.flatten().fold(0u32, u32::saturating_add)
}

pub fn validate(info: &JudgeInfo, pool: Option<&FilePool>) -> Vec<Issue> {
    let mut issues: Vec<Issue> = dependency_cycles(info)
        .into_iter()
        .map(|subtasks| Issue::DependencyCycle { subtasks })
        .collect();

    let subtasks = info.subtasks();
    let sum = explicit_sum(subtasks.iter().map(|s| s.percentage_points));
    if sum > 100 {
        issues.push(Issue::PercentageOverflow { subtask: None, sum });
    }

    for (i, subtask) in subtasks.iter().enumerate() {
        let sum = explicit_sum(subtask.testcases.iter().map(|t| t.percentage_points));
        if sum > 100 {
            issues.push(Issue::PercentageOverflow {
                subtask: Some(i),
                sum,
            });
        }
        for (j, testcase) in subtask.testcases.iter().enumerate() {
            if testcase.input_filename.is_empty() || testcase.output_filename.is_empty() {
                issues.push(Issue::EmptyFilename {
                    subtask: i,
                    testcase: j,
                });
            }
            let Some(pool) = pool else {
                continue;
            };
            for filename in [&testcase.input_filename, &testcase.output_filename] {
                if !filename.is_empty() && !pool.contains(filename) {
                    issues.push(Issue::MissingFile {
                        subtask: i,
                        testcase: j,
                        filename: filename.clone(),
                    });
                }
            }
        }
    }

    debug!("检查完成，发现 {} 个问题", issues.len());
    issues
}

struct Tarjan<'a> {
    graph: Vec<&'a [usize]>,
    index: Vec<Option<usize>>,
    low: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    next: usize,
    components: Vec<Vec<usize>>,
}

impl Tarjan<'_> {
    fn visit(&mut self, v: usize) {
        self.index[v] = Some(self.next);
        self.low[v] = self.next;
        self.next += 1;
        self.stack.push(v);
        self.on_stack[v] = true;

        for k in 0..self.graph[v].len() {
            let w = self.graph[v][k];
            match self.index[w] {
                None => {
                    self.visit(w);
                    self.low[v] = self.low[v].min(self.low[w]);
                }
                Some(index) if self.on_stack[w] => self.low[v] = self.low[v].min(index),
                Some(_) => {}
            }
        }

        if Some(self.low[v]) == self.index[v] {
            let mut component = Vec::new();
            while let Some(w) = self.stack.pop() {
                self.on_stack[w] = false;
                component.push(w);
                if w == v {
                    break;
                }
            }
            if component.len() > 1 {
                component.sort_unstable();
                self.components.push(component);
            }
        }
    }
}

/// 找出依赖图中所有的环（强连通分量），按最小位置排序
pub fn dependency_cycles(info: &JudgeInfo) -> Vec<Vec<usize>> {
    let subtasks = info.subtasks();
    let n = subtasks.len();
    let mut tarjan = Tarjan {
        graph: subtasks.iter().map(|s| s.dependencies.as_slice()).collect(),
        index: vec![None; n],
        low: vec![0; n],
        on_stack: vec![false; n],
        stack: Vec::new(),
        next: 0,
        components: Vec::new(),
    };
    for v in 0..n {
        if tarjan.index[v].is_none() {
            tarjan.visit(v);
        }
    }
    let mut cycles = tarjan.components;
    cycles.sort();
    cycles
}
