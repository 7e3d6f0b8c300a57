use crate::prelude::*;
use clap::Args;
use judge_editor::validate::validate;

#[derive(Args, Debug, Clone)]
#[command(version)]
pub struct CheckArgs {
    /// 评测配置文件
    #[arg(required = true)]
    config: PathBuf,
    /// 数据目录，给出时检查测试点文件是否存在
    #[arg(short, long)]
    data: Option<PathBuf>,
}

pub fn main(args: CheckArgs) -> Result<()> {
    let info = config::load_judge_info(&args.config)
        .with_context(|| format!("无法读取评测配置 {}", args.config.display()))?;

    let pool = match &args.data {
        Some(dir) => Some(
            FilePool::from_dir(dir)
                .with_context(|| format!("无法读取数据目录 {}", dir.display()))?,
        ),
        None => None,
    };

    let issues = validate(&info, pool.as_ref());
    if issues.is_empty() {
        println!("没有发现问题");
        return Ok(());
    }
    for issue in &issues {
        println!("{}", issue);
    }
    bail!("{} 中发现 {} 个问题", args.config.display(), issues.len());
}
