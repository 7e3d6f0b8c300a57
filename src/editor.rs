//! 结构编辑
//!
//! 所有操作都是 `&旧树 -> 新树` 的纯函数。未改动的子树通过 `Arc` 与旧快照共享，
//! 出错时旧树保持原样。

use thiserror::Error;

pub mod sample;
pub mod session;
pub mod subtask;
pub mod testcase;

pub use self::session::EditorSession;
pub use self::subtask::NewSubtask;
pub use self::testcase::{MergeMode, TestcaseOverrides};
pub use crate::remap::Direction;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("位置 {index} 超出范围（共 {len} 项）")]
    OutOfRange { index: usize, len: usize },
    #[error("当前为自动识别测试点模式，没有子任务")]
    SubtasksDisabled,
    #[error("百分比 {0} 超过 100")]
    PercentageOutOfRange(u32),
    #[error("子任务 {subtask} 已有 {count} 个测试点，替换前需要确认")]
    WouldDiscardTestcases { subtask: usize, count: usize },
    #[error("没有语言为 {0} 的题面")]
    UnknownLocale(String),
}

/// 访问已有元素的位置
pub(crate) fn check_index(index: usize, len: usize) -> Result<(), EditError> {
    if index < len {
        Ok(())
    } else {
        Err(EditError::OutOfRange { index, len })
    }
}

/// 插入位置，可以等于长度（追加到末尾）
pub(crate) fn check_insert(index: usize, len: usize) -> Result<(), EditError> {
    if index <= len {
        Ok(())
    } else {
        Err(EditError::OutOfRange { index, len })
    }
}

pub(crate) fn check_percentage(value: Option<u32>) -> Result<(), EditError> {
    match value {
        Some(p) if p > 100 => Err(EditError::PercentageOutOfRange(p)),
        _ => Ok(()),
    }
}
