use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod judge;
pub mod normalize;
pub mod parse;
pub mod problem;

pub use self::judge::*;
pub use self::normalize::normalize;
pub use self::parse::parse;
pub use self::problem::*;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("YAML 解析失败: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON 解析失败: {0}")]
    Json(#[from] serde_json::Error),
    #[error("无法读写 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置文件格式，按扩展名区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// 解析文本，格式错误时返回解码器的原始信息
pub fn from_str(text: &str, format: Format) -> Result<JudgeInfo, ParseError> {
    let raw: serde_json::Value = match format {
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    };
    Ok(parse(&raw))
}

pub fn from_yaml_str(text: &str) -> Result<JudgeInfo, ParseError> {
    from_str(text, Format::Yaml)
}

pub fn from_json_str(text: &str) -> Result<JudgeInfo, ParseError> {
    from_str(text, Format::Json)
}

pub fn to_string(info: &JudgeInfo, format: Format) -> Result<String, ParseError> {
    let value = normalize(info);
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(&value)?,
        Format::Json => serde_json::to_string_pretty(&value)?,
    })
}

pub fn to_yaml_string(info: &JudgeInfo) -> Result<String, ParseError> {
    to_string(info, Format::Yaml)
}

pub fn to_json_string(info: &JudgeInfo) -> Result<String, ParseError> {
    to_string(info, Format::Json)
}

/// 读取评测配置文件
pub fn load_judge_info(path: &Path) -> Result<JudgeInfo, ParseError> {
    debug!("读取评测配置: {}", path.display());
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&content, Format::from_path(path))
}

/// 以规范形式写回评测配置文件
pub fn save_judge_info(path: &Path, info: &JudgeInfo) -> Result<(), ParseError> {
    let content = to_string(info, Format::from_path(path))?;
    fs::write(path, content).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("已写入评测配置: {}", path.display());
    Ok(())
}
