//! 评测配置的结构编辑
//!
//! 在内存中维护题目的评测配置（时空限制、比较器、子任务和测试点）与题面样例，
//! 保证任意插入、删除、移动之后所有按位置的交叉引用依然有效。

pub mod config;
pub mod distribute;
pub mod editor;
pub mod identity;
pub mod matcher;
pub mod pool;
pub mod remap;
pub mod validate;

pub use crate::config::{JudgeInfo, ParseError, ProblemContent};
pub use crate::editor::{EditError, EditorSession};
pub use crate::identity::Uid;
pub use crate::matcher::{MatchError, MatchedPair, match_testcases};
pub use crate::remap::IndexMutation;
