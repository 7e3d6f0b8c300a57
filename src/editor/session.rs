use super::EditError;
use crate::config::{self, JudgeInfo, ParseError, ProblemContent};
use log::{debug, warn};

/// 一次编辑会话的当前快照
///
/// 每次编辑得到新树后整体替换，旧快照可以被其他持有者继续读取。
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    judge_info: JudgeInfo,
    content: ProblemContent,
}

impl EditorSession {
    pub fn new(judge_info: JudgeInfo, content: ProblemContent) -> Self {
        EditorSession {
            judge_info,
            content,
        }
    }

    pub fn judge_info(&self) -> &JudgeInfo {
        &self.judge_info
    }

    pub fn content(&self) -> &ProblemContent {
        &self.content
    }

    pub fn apply<F>(&mut self, edit: F) -> Result<(), EditError>
    where
        F: FnOnce(&JudgeInfo) -> Result<JudgeInfo, EditError>,
    {
        self.judge_info = edit(&self.judge_info)?;
        Ok(())
    }

    pub fn apply_content<F>(&mut self, edit: F) -> Result<(), EditError>
    where
        F: FnOnce(&ProblemContent) -> Result<ProblemContent, EditError>,
    {
        self.content = edit(&self.content)?;
        Ok(())
    }

    /// 用手写的 YAML 替换评测配置，解析失败时保留原配置
    pub fn load_raw(&mut self, text: &str) -> Result<(), ParseError> {
        match config::from_yaml_str(text) {
            Ok(info) => {
                debug!("已从原始文本载入评测配置");
                self.judge_info = info;
                Ok(())
            }
            Err(e) => {
                warn!("原始文本解析失败，保留原配置: {}", e);
                Err(e)
            }
        }
    }

    /// 当前配置的规范化 YAML
    pub fn raw(&self) -> Result<String, ParseError> {
        config::to_yaml_string(&self.judge_info)
    }
}
