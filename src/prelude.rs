#![allow(unused)]

pub use anyhow::{Context, Result, anyhow, bail};
pub use log::{debug, error, info, trace, warn};

pub use judge_editor::config::{self, Format, JudgeInfo};
pub use judge_editor::pool::FilePool;

pub use std::path::{Path, PathBuf};
