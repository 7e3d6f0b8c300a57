//! 默认分值
//!
//! 未填写分值的子任务或测试点平分剩余的百分比。结果只作为提示展示，
//! 只有调用 `accept_*` 时才写回配置。

use crate::config::{JudgeInfo, Subtask};
use crate::editor::EditError;
use log::info;
use std::sync::Arc;

/// 计算未指定项的默认分值
///
/// 已指定的分值之和超过 100，或没有未指定的项时返回 0。
pub fn default_share<I>(entries: I) -> u32
where
    I: IntoIterator<Item = Option<u32>>,
{
    let (sum, unspecified) = entries
        .into_iter()
        .fold((0u32, 0u32), |(sum, n), entry| match entry {
            Some(p) => (sum.saturating_add(p), n),
            None => (sum, n + 1),
        });
    if sum > 100 || unspecified == 0 {
        return 0;
    }
    // 四舍五入
    (2 * (100 - sum) + unspecified) / (2 * unspecified)
}

impl Subtask {
    pub fn testcase_default_share(&self) -> u32 {
        default_share(self.testcases.iter().map(|t| t.percentage_points))
    }
}

impl JudgeInfo {
    pub fn subtask_default_share(&self) -> u32 {
        default_share(self.subtasks().iter().map(|s| s.percentage_points))
    }

    /// 把默认分值写入所有未指定分值的子任务
    pub fn accept_subtask_shares(&self) -> Result<Self, EditError> {
        if self.is_auto() {
            return Err(EditError::SubtasksDisabled);
        }
        let share = self.subtask_default_share();
        let subtasks = self
            .subtasks()
            .iter()
            .map(|s| {
                if s.percentage_points.is_some() {
                    return Arc::clone(s);
                }
                let mut s = Arc::clone(s);
                Arc::make_mut(&mut s).percentage_points = Some(share);
                s
            })
            .collect();
        info!("未指定分值的子任务设为 {share}%");
        Ok(self.with_subtasks(subtasks))
    }

    /// 把默认分值写入某个子任务中所有未指定分值的测试点
    pub fn accept_testcase_shares(&self, subtask: usize) -> Result<Self, EditError> {
        self.edit_subtask(subtask, |s| {
            let share = s.testcase_default_share();
            for testcase in s.testcases.iter_mut() {
                if testcase.percentage_points.is_none() {
                    Arc::make_mut(testcase).percentage_points = Some(share);
                }
            }
            info!("子任务 {subtask} 中未指定分值的测试点设为 {share}%");
            Ok(())
        })
    }
}
