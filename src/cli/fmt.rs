use crate::prelude::*;
use clap::Args;

#[derive(Args, Debug, Clone)]
#[command(version)]
pub struct FmtArgs {
    /// 评测配置文件
    #[arg(required = true)]
    config: PathBuf,
    /// 以 JSON 输出
    #[arg(long)]
    json: bool,
    /// 直接写回配置文件
    #[arg(short, long)]
    write: bool,
}

pub fn main(args: FmtArgs) -> Result<()> {
    let info = config::load_judge_info(&args.config)
        .with_context(|| format!("无法读取评测配置 {}", args.config.display()))?;

    if args.write {
        config::save_judge_info(&args.config, &info)?;
        info!("已规范化 {}", args.config.display());
        return Ok(());
    }

    let format = if args.json {
        Format::Json
    } else {
        Format::Yaml
    };
    let text = config::to_string(&info, format)?;
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}
