use super::{EditError, check_index, check_insert, check_percentage};
use crate::config::{JudgeInfo, Testcase};
use crate::matcher::MatchedPair;
use crate::remap::{Direction, IndexMutation};
use log::info;
use std::sync::Arc;

/// 自动匹配结果写入子任务的方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// 追加到已有测试点之后
    Append,
    /// 替换，仅在子任务还没有测试点时允许
    Replace,
    /// 替换已有测试点，调用方已经确认
    Overwrite,
}

/// 单个测试点的覆盖设置
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestcaseOverrides {
    pub time_limit: Option<u32>,
    pub memory_limit: Option<u32>,
    pub percentage_points: Option<u32>,
}

impl JudgeInfo {
    pub fn add_testcase(
        &self,
        subtask: usize,
        at: usize,
        testcase: Testcase,
    ) -> Result<Self, EditError> {
        check_percentage(testcase.percentage_points)?;
        self.edit_subtask(subtask, |s| {
            check_insert(at, s.testcases.len())?;
            s.testcases.insert(at, Arc::new(testcase));
            Ok(())
        })
    }

    pub fn delete_testcase(&self, subtask: usize, at: usize) -> Result<Self, EditError> {
        self.edit_subtask(subtask, |s| {
            check_index(at, s.testcases.len())?;
            s.testcases.remove(at);
            Ok(())
        })
    }

    pub fn move_testcase(
        &self,
        subtask: usize,
        at: usize,
        direction: Direction,
    ) -> Result<Self, EditError> {
        self.edit_subtask(subtask, |s| {
            let len = s.testcases.len();
            let mutation = IndexMutation::step(at, direction, len)
                .ok_or(EditError::OutOfRange { index: at, len })?;
            mutation.apply_to_vec(&mut s.testcases, None);
            Ok(())
        })
    }

    pub fn set_testcase_files(
        &self,
        subtask: usize,
        at: usize,
        input_filename: &str,
        output_filename: &str,
    ) -> Result<Self, EditError> {
        self.edit_subtask(subtask, |s| {
            check_index(at, s.testcases.len())?;
            let testcase = Arc::make_mut(&mut s.testcases[at]);
            testcase.input_filename = input_filename.to_string();
            testcase.output_filename = output_filename.to_string();
            Ok(())
        })
    }

    pub fn set_testcase_overrides(
        &self,
        subtask: usize,
        at: usize,
        overrides: TestcaseOverrides,
    ) -> Result<Self, EditError> {
        check_percentage(overrides.percentage_points)?;
        self.edit_subtask(subtask, |s| {
            check_index(at, s.testcases.len())?;
            let testcase = Arc::make_mut(&mut s.testcases[at]);
            testcase.time_limit = overrides.time_limit;
            testcase.memory_limit = overrides.memory_limit;
            testcase.percentage_points = overrides.percentage_points;
            Ok(())
        })
    }

    /// 把自动匹配得到的文件对写入子任务
    pub fn apply_matches(
        &self,
        subtask: usize,
        pairs: &[MatchedPair],
        mode: MergeMode,
    ) -> Result<Self, EditError> {
        let added = pairs
            .iter()
            .map(|p| Arc::new(Testcase::new(&p.input_filename, &p.output_filename)));
        self.edit_subtask(subtask, |s| {
            match mode {
                MergeMode::Append => {}
                MergeMode::Replace if !s.testcases.is_empty() => {
                    return Err(EditError::WouldDiscardTestcases {
                        subtask,
                        count: s.testcases.len(),
                    });
                }
                MergeMode::Replace | MergeMode::Overwrite => s.testcases.clear(),
            }
            s.testcases.extend(added);
            info!(
                "子任务 {subtask} 写入 {} 个测试点，现有 {} 个",
                pairs.len(),
                s.testcases.len()
            );
            Ok(())
        })
    }
}
