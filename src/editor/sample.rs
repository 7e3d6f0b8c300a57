use super::{EditError, check_index, check_insert};
use crate::config::{ContentSection, LocalizedContent, ProblemContent, Sample, SectionKind};
use crate::remap::{Direction, IndexMutation};
use log::debug;
use std::sync::Arc;

/// 样例序列变更后，换算所有语言题面中的样例引用
///
/// 引用的样例被删除时，该节退化为普通文本，原有说明文字保留。
fn remap_sections(content: &mut ProblemContent, mutation: IndexMutation) {
    for (locale, localized) in content.locales.iter_mut() {
        let affected = localized.sections.iter().any(|s| {
            s.sample_index()
                .is_some_and(|i| mutation.apply(i) != Some(i))
        });
        if !affected {
            continue;
        }
        for section in Arc::make_mut(localized).sections.iter_mut() {
            let SectionKind::Sample(index) = section.kind else {
                continue;
            };
            section.kind = match mutation.apply(index) {
                Some(index) => SectionKind::Sample(index),
                None => {
                    debug!("{locale} 题面的「{}」引用的样例已删除，转为文本", section.title);
                    SectionKind::Text
                }
            };
        }
    }
}

fn check_sample_refs(localized: &LocalizedContent, samples: usize) -> Result<(), EditError> {
    for section in &localized.sections {
        if let Some(index) = section.sample_index() {
            check_index(index, samples)?;
        }
    }
    Ok(())
}

impl ProblemContent {
    pub fn add_sample(&self, at: usize, sample: Sample) -> Result<Self, EditError> {
        check_insert(at, self.samples.len())?;
        let mut next = self.clone();
        let mutation = IndexMutation::Insert(at);
        mutation.apply_to_vec(&mut next.samples, Some(Arc::new(sample)));
        remap_sections(&mut next, mutation);
        Ok(next)
    }

    pub fn delete_sample(&self, at: usize) -> Result<Self, EditError> {
        check_index(at, self.samples.len())?;
        let mut next = self.clone();
        let mutation = IndexMutation::Delete(at);
        mutation.apply_to_vec(&mut next.samples, None);
        remap_sections(&mut next, mutation);
        Ok(next)
    }

    pub fn move_sample(&self, at: usize, direction: Direction) -> Result<Self, EditError> {
        let len = self.samples.len();
        let mutation = IndexMutation::step(at, direction, len)
            .ok_or(EditError::OutOfRange { index: at, len })?;
        let mut next = self.clone();
        mutation.apply_to_vec(&mut next.samples, None);
        remap_sections(&mut next, mutation);
        Ok(next)
    }

    pub fn set_sample(&self, at: usize, input: &str, output: &str) -> Result<Self, EditError> {
        check_index(at, self.samples.len())?;
        let mut next = self.clone();
        let sample = Arc::make_mut(&mut next.samples[at]);
        sample.input = input.to_string();
        sample.output = output.to_string();
        Ok(next)
    }

    /// 新增或替换某一语言的题面，样例引用必须有效
    pub fn set_locale(&self, locale: &str, localized: LocalizedContent) -> Result<Self, EditError> {
        check_sample_refs(&localized, self.samples.len())?;
        let mut next = self.clone();
        next.locales.insert(locale.to_string(), Arc::new(localized));
        Ok(next)
    }

    pub fn remove_locale(&self, locale: &str) -> Result<Self, EditError> {
        let mut next = self.clone();
        next.locales
            .shift_remove(locale)
            .ok_or_else(|| EditError::UnknownLocale(locale.to_string()))?;
        Ok(next)
    }

    fn edit_locale<F>(&self, locale: &str, f: F) -> Result<Self, EditError>
    where
        F: FnOnce(&mut LocalizedContent, usize) -> Result<(), EditError>,
    {
        let mut next = self.clone();
        let samples = next.samples.len();
        let localized = next
            .locales
            .get_mut(locale)
            .ok_or_else(|| EditError::UnknownLocale(locale.to_string()))?;
        f(Arc::make_mut(localized), samples)?;
        Ok(next)
    }

    pub fn add_section(
        &self,
        locale: &str,
        at: usize,
        section: ContentSection,
    ) -> Result<Self, EditError> {
        self.edit_locale(locale, |l, samples| {
            check_insert(at, l.sections.len())?;
            if let Some(index) = section.sample_index() {
                check_index(index, samples)?;
            }
            l.sections.insert(at, section);
            Ok(())
        })
    }

    pub fn delete_section(&self, locale: &str, at: usize) -> Result<Self, EditError> {
        self.edit_locale(locale, |l, _| {
            check_index(at, l.sections.len())?;
            l.sections.remove(at);
            Ok(())
        })
    }

    pub fn move_section(
        &self,
        locale: &str,
        at: usize,
        direction: Direction,
    ) -> Result<Self, EditError> {
        self.edit_locale(locale, |l, _| {
            let len = l.sections.len();
            let mutation = IndexMutation::step(at, direction, len)
                .ok_or(EditError::OutOfRange { index: at, len })?;
            mutation.apply_to_vec(&mut l.sections, None);
            Ok(())
        })
    }

    /// 设置一节引用的样例，`None` 表示改为普通文本
    pub fn set_section_sample(
        &self,
        locale: &str,
        at: usize,
        sample: Option<usize>,
    ) -> Result<Self, EditError> {
        self.edit_locale(locale, |l, samples| {
            check_index(at, l.sections.len())?;
            l.sections[at].kind = match sample {
                Some(index) => {
                    check_index(index, samples)?;
                    SectionKind::Sample(index)
                }
                None => SectionKind::Text,
            };
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> ProblemContent {
        let content = ProblemContent::default();
        let content = content.add_sample(0, Sample::new("1 2", "3")).unwrap();
        let content = content.add_sample(1, Sample::new("2 2", "4")).unwrap();
        let content = content.add_sample(2, Sample::new("5 5", "10")).unwrap();
        let zh = LocalizedContent {
            title: "加法".to_string(),
            sections: vec![
                ContentSection::text("题目描述", "求 a+b"),
                ContentSection::sample("样例一", 0, ""),
                ContentSection::sample("样例二", 1, "注意进位"),
                ContentSection::sample("样例三", 2, ""),
            ],
        };
        let en = LocalizedContent {
            title: "A+B".to_string(),
            sections: vec![ContentSection::sample("Sample", 2, "")],
        };
        content
            .set_locale("zh-cn", zh)
            .unwrap()
            .set_locale("en", en)
            .unwrap()
    }

    fn kinds(content: &ProblemContent, locale: &str) -> Vec<SectionKind> {
        content
            .locale(locale)
            .unwrap()
            .sections
            .iter()
            .map(|s| s.kind)
            .collect()
    }

    #[test]
    fn delete_sample_downgrades_section() {
        let content = content();
        let next = content.delete_sample(1).unwrap();
        assert_eq!(next.samples.len(), 2);
        assert_eq!(
            kinds(&next, "zh-cn"),
            vec![
                SectionKind::Text,
                SectionKind::Sample(0),
                SectionKind::Text,
                SectionKind::Sample(1)
            ]
        );
        let downgraded = &next.locale("zh-cn").unwrap().sections[2];
        assert_eq!(downgraded.text, "注意进位");
        assert_eq!(downgraded.id, content.locale("zh-cn").unwrap().sections[2].id);
        assert_eq!(kinds(&next, "en"), vec![SectionKind::Sample(1)]);
        // 旧快照不受影响
        assert_eq!(kinds(&content, "zh-cn")[2], SectionKind::Sample(1));
    }

    #[test]
    fn insert_and_move_follow_samples() {
        let content = content();
        let inserted = content.add_sample(0, Sample::new("0 0", "0")).unwrap();
        assert_eq!(kinds(&inserted, "en"), vec![SectionKind::Sample(3)]);
        assert_eq!(inserted.samples[3].input, "5 5");

        let moved = content.move_sample(2, Direction::Up).unwrap();
        assert_eq!(kinds(&moved, "en"), vec![SectionKind::Sample(1)]);
        assert_eq!(moved.samples[1].input, "5 5");
        assert_eq!(
            kinds(&moved, "zh-cn")[1..],
            [
                SectionKind::Sample(0),
                SectionKind::Sample(2),
                SectionKind::Sample(1)
            ]
        );
    }

    #[test]
    fn unaffected_locales_stay_shared() {
        let content = content();
        let next = content.delete_sample(0).unwrap();
        // en 只引用样例 2，也要换算
        assert!(!Arc::ptr_eq(&content.locales["en"], &next.locales["en"]));

        let appended = content.add_sample(3, Sample::new("", "")).unwrap();
        assert!(Arc::ptr_eq(&content.locales["en"], &appended.locales["en"]));
        assert!(Arc::ptr_eq(&content.locales["zh-cn"], &appended.locales["zh-cn"]));
    }

    #[test]
    fn section_edits() {
        let content = content();
        assert_eq!(
            content.add_section("ja", 0, ContentSection::text("", "")),
            Err(EditError::UnknownLocale("ja".to_string()))
        );
        assert!(
            content
                .add_section("en", 0, ContentSection::sample("", 3, ""))
                .is_err()
        );

        let next = content.delete_section("en", 0).unwrap();
        assert!(next.locale("en").unwrap().sections.is_empty());
        assert!(next.delete_section("en", 0).is_err());

        let next = content.move_section("zh-cn", 0, Direction::Down).unwrap();
        assert_eq!(next.locale("zh-cn").unwrap().sections[1].title, "题目描述");

        let next = content.set_section_sample("zh-cn", 0, Some(2)).unwrap();
        assert_eq!(kinds(&next, "zh-cn")[0], SectionKind::Sample(2));
        let next = next.set_section_sample("zh-cn", 0, None).unwrap();
        assert_eq!(kinds(&next, "zh-cn")[0], SectionKind::Text);
    }

    #[test]
    fn set_locale_rejects_dangling_refs() {
        let content = content();
        let bad = LocalizedContent {
            title: String::new(),
            sections: vec![ContentSection::sample("", 5, "")],
        };
        assert_eq!(
            content.set_locale("fr", bad),
            Err(EditError::OutOfRange { index: 5, len: 3 })
        );
        assert!(content.remove_locale("fr").is_err());
        let removed = content.remove_locale("en").unwrap();
        assert_eq!(removed.locales.keys().collect::<Vec<_>>(), vec!["zh-cn"]);
    }
}
