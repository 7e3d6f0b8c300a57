use crate::identity::Uid;
use indexmap::IndexMap;
use std::sync::Arc;

/// 题面中的样例
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub id: Uid,
    pub input: String,
    pub output: String,
}

impl Sample {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Sample {
            id: Uid::fresh(),
            input: input.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Text,
    /// 展示第 n 个样例（按位置引用）
    Sample(usize),
}

/// 题面的一节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSection {
    pub id: Uid,
    pub title: String,
    /// 正文；样例节中是样例旁的说明
    pub text: String,
    pub kind: SectionKind,
}

impl ContentSection {
    pub fn text(title: impl Into<String>, text: impl Into<String>) -> Self {
        ContentSection {
            id: Uid::fresh(),
            title: title.into(),
            text: text.into(),
            kind: SectionKind::Text,
        }
    }

    pub fn sample(title: impl Into<String>, sample: usize, text: impl Into<String>) -> Self {
        ContentSection {
            id: Uid::fresh(),
            title: title.into(),
            text: text.into(),
            kind: SectionKind::Sample(sample),
        }
    }

    pub fn sample_index(&self) -> Option<usize> {
        match self.kind {
            SectionKind::Sample(index) => Some(index),
            SectionKind::Text => None,
        }
    }
}

/// 某一语言的题面
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedContent {
    pub title: String,
    pub sections: Vec<ContentSection>,
}

/// 题面和样例
///
/// 样例在各语言间共享，各语言题面通过位置引用样例。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemContent {
    pub samples: Vec<Arc<Sample>>,
    pub locales: IndexMap<String, Arc<LocalizedContent>>,
}

impl ProblemContent {
    pub fn locale(&self, locale: &str) -> Option<&LocalizedContent> {
        self.locales.get(locale).map(Arc::as_ref)
    }
}
