//! 子任务的增删移动，同时维护子任务之间的依赖下标

use super::{EditError, check_index, check_insert, check_percentage};
use crate::config::{JudgeInfo, ScoringType, Subtask, Testcases};
use crate::remap::{Direction, IndexMutation, remap_indices};
use log::debug;
use std::collections::HashSet;
use std::sync::Arc;

/// 新子任务的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewSubtask {
    /// 空白子任务，没有依赖
    Blank,
    /// 复制第 n 个子任务（按插入前的位置）
    CopyOf(usize),
}

/// 对所有子任务的依赖执行同一次下标变更，依赖没变的子任务不复制
fn remap_dependencies(subtasks: &mut [Arc<Subtask>], mutation: IndexMutation) {
    for subtask in subtasks.iter_mut() {
        if subtask.dependencies.is_empty() {
            continue;
        }
        let remapped = remap_indices(&subtask.dependencies, mutation);
        if remapped != subtask.dependencies {
            Arc::make_mut(subtask).dependencies = remapped;
        }
    }
}

impl JudgeInfo {
    fn manual_subtasks(&self) -> Result<&Vec<Arc<Subtask>>, EditError> {
        match &self.testcases {
            Testcases::Manual(subtasks) => Ok(subtasks),
            Testcases::Auto => Err(EditError::SubtasksDisabled),
        }
    }

    /// 修改单个子任务，其余子任务保持共享
    pub(crate) fn edit_subtask<F>(&self, at: usize, edit: F) -> Result<Self, EditError>
    where
        F: FnOnce(&mut Subtask) -> Result<(), EditError>,
    {
        let mut subtasks = self.manual_subtasks()?.clone();
        check_index(at, subtasks.len())?;
        edit(Arc::make_mut(&mut subtasks[at]))?;
        Ok(self.with_subtasks(subtasks))
    }

    /// 切换到子任务模式，带一个空白子任务；已是子任务模式时不变
    pub fn enable_subtasks(&self) -> Self {
        match self.testcases {
            Testcases::Manual(_) => self.clone(),
            Testcases::Auto => self.with_subtasks(vec![Arc::new(Subtask::blank())]),
        }
    }

    /// 切换到自动识别测试点模式，丢弃所有子任务
    pub fn disable_subtasks(&self) -> Self {
        JudgeInfo {
            testcases: Testcases::Auto,
            ..self.clone()
        }
    }

    /// 在 `at` 处插入子任务
    pub fn add_subtask(&self, at: usize, new: NewSubtask) -> Result<Self, EditError> {
        let mut subtasks = self.manual_subtasks()?.clone();
        check_insert(at, subtasks.len())?;
        let mutation = IndexMutation::Insert(at);

        let inserted = match new {
            NewSubtask::Blank => Subtask::blank(),
            NewSubtask::CopyOf(template) => {
                check_index(template, subtasks.len())?;
                let mut copy = subtasks[template].duplicate();
                copy.dependencies = remap_indices(&copy.dependencies, mutation);
                copy
            }
        };

        remap_dependencies(&mut subtasks, mutation);
        mutation.apply_to_vec(&mut subtasks, Some(Arc::new(inserted)));
        debug!("在位置 {at} 插入子任务，共 {} 个", subtasks.len());
        Ok(self.with_subtasks(subtasks))
    }

    /// 删除子任务，依赖它的子任务直接失去这条依赖
    ///
    /// 只剩一个子任务时改为清空它的测试点和依赖。
    pub fn delete_subtask(&self, at: usize) -> Result<Self, EditError> {
        let mut subtasks = self.manual_subtasks()?.clone();
        check_index(at, subtasks.len())?;

        if subtasks.len() == 1 {
            let only = Arc::make_mut(&mut subtasks[0]);
            only.testcases.clear();
            only.dependencies.clear();
            debug!("清空唯一的子任务");
            return Ok(self.with_subtasks(subtasks));
        }

        let mutation = IndexMutation::Delete(at);
        remap_dependencies(&mut subtasks, mutation);
        mutation.apply_to_vec(&mut subtasks, None);
        debug!("删除位置 {at} 的子任务，剩余 {} 个", subtasks.len());
        Ok(self.with_subtasks(subtasks))
    }

    /// 与相邻子任务交换位置
    pub fn move_subtask(&self, at: usize, direction: Direction) -> Result<Self, EditError> {
        let mut subtasks = self.manual_subtasks()?.clone();
        let len = subtasks.len();
        let mutation = IndexMutation::step(at, direction, len).ok_or(EditError::OutOfRange {
            index: at,
            len,
        })?;
        remap_dependencies(&mut subtasks, mutation);
        mutation.apply_to_vec(&mut subtasks, None);
        Ok(self.with_subtasks(subtasks))
    }

    /// 设置依赖，丢弃自身、越界和重复的下标
    ///
    /// 环不在这里检查，见 [`crate::validate`]。
    pub fn set_dependencies(&self, at: usize, dependencies: &[usize]) -> Result<Self, EditError> {
        let count = self.subtasks().len();
        let mut seen = HashSet::new();
        let dependencies: Vec<usize> = dependencies
            .iter()
            .copied()
            .filter(|&d| d < count && d != at && seen.insert(d))
            .collect();
        self.edit_subtask(at, |subtask| {
            subtask.dependencies = dependencies;
            Ok(())
        })
    }

    pub fn set_scoring_type(&self, at: usize, scoring_type: ScoringType) -> Result<Self, EditError> {
        self.edit_subtask(at, |subtask| {
            subtask.scoring_type = scoring_type;
            Ok(())
        })
    }

    pub fn set_subtask_percentage(
        &self,
        at: usize,
        percentage: Option<u32>,
    ) -> Result<Self, EditError> {
        check_percentage(percentage)?;
        self.edit_subtask(at, |subtask| {
            subtask.percentage_points = percentage;
            Ok(())
        })
    }

    pub fn set_subtask_limits(
        &self,
        at: usize,
        time_limit: Option<u32>,
        memory_limit: Option<u32>,
    ) -> Result<Self, EditError> {
        self.edit_subtask(at, |subtask| {
            subtask.time_limit = time_limit;
            subtask.memory_limit = memory_limit;
            Ok(())
        })
    }
}
