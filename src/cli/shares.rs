use crate::prelude::*;
use clap::Args;

#[derive(Args, Debug, Clone)]
#[command(version)]
pub struct SharesArgs {
    /// 评测配置文件
    #[arg(required = true)]
    config: PathBuf,
    /// 把默认分值写入未指定分值的子任务和测试点
    #[arg(long)]
    accept: bool,
}

fn show(value: Option<u32>, default: u32) -> String {
    match value {
        Some(p) => format!("{}%", p),
        None => format!("（默认 {}%）", default),
    }
}

pub fn main(args: SharesArgs) -> Result<()> {
    let mut info = config::load_judge_info(&args.config)
        .with_context(|| format!("无法读取评测配置 {}", args.config.display()))?;

    if info.is_auto() {
        bail!("{} 没有子任务，分值由评测时识别的测试点平分", args.config.display());
    }

    if args.accept {
        info = info.accept_subtask_shares()?;
        for i in 0..info.subtasks().len() {
            info = info.accept_testcase_shares(i)?;
        }
        config::save_judge_info(&args.config, &info)?;
        info!("已写入默认分值");
    }

    let subtask_default = info.subtask_default_share();
    for (i, subtask) in info.subtasks().iter().enumerate() {
        println!(
            "子任务 {}: {}",
            i + 1,
            show(subtask.percentage_points, subtask_default)
        );
        let testcase_default = subtask.testcase_default_share();
        for (j, testcase) in subtask.testcases.iter().enumerate() {
            println!(
                "  测试点 {} ({}): {}",
                j + 1,
                testcase.input_filename,
                show(testcase.percentage_points, testcase_default)
            );
        }
    }
    Ok(())
}
