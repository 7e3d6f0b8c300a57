use log::{debug, warn};
use natord::compare;
use std::fs;
use std::io;
use std::path::Path;

/// 候选数据文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolFile {
    pub filename: String,
    pub size: u64,
}

impl PoolFile {
    pub fn new(filename: impl Into<String>, size: u64) -> Self {
        PoolFile {
            filename: filename.into(),
            size,
        }
    }
}

/// 只读的候选文件列表，顺序决定自动匹配的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePool {
    files: Vec<PoolFile>,
}

impl FilePool {
    pub fn new(files: Vec<PoolFile>) -> Self {
        FilePool { files }
    }

    /// 列出目录下的普通文件，按自然顺序排列（`2.in` 在 `10.in` 之前）
    pub fn from_dir(dir: &Path) -> io::Result<Self> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // 跟随符号链接，数据文件常链接到别处
            let metadata = match fs::metadata(entry.path()) {
                Ok(metadata) => metadata,
                Err(e) => {
                    warn!("跳过无法读取的 {}: {}", entry.path().display(), e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                debug!("跳过非 UTF-8 文件名: {:?}", entry.file_name());
                continue;
            };
            files.push(PoolFile::new(name, metadata.len()));
        }
        files.sort_by(|a, b| compare(&a.filename, &b.filename));
        debug!("{} 下共 {} 个候选文件", dir.display(), files.len());
        Ok(FilePool { files })
    }

    pub fn files(&self) -> &[PoolFile] {
        &self.files
    }

    pub fn contains(&self, filename: &str) -> bool {
        self.files.iter().any(|f| f.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FromIterator<PoolFile> for FilePool {
    fn from_iter<T: IntoIterator<Item = PoolFile>>(iter: T) -> Self {
        FilePool::new(iter.into_iter().collect())
    }
}
