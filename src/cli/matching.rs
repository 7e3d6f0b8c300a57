use crate::prelude::*;
use clap::Args;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use judge_editor::editor::{EditError, MergeMode};
use judge_editor::matcher::match_testcases;

#[derive(Args, Debug, Clone)]
#[command(version)]
pub struct MatchArgs {
    /// 评测配置文件
    #[arg(required = true)]
    config: PathBuf,
    /// 数据目录
    #[arg(short, long, default_value = "data")]
    data: PathBuf,
    /// 输入文件名的正则表达式，留空时由输出推导
    #[arg(short, long, default_value = "")]
    input: String,
    /// 输出文件名的正则表达式，留空时由输入推导
    #[arg(short, long, default_value = "")]
    output: String,
    /// 写入第几个子任务
    #[arg(short, long, default_value_t = 1)]
    subtask: usize,
    /// 替换子任务中已有的测试点，默认追加
    #[arg(long)]
    replace: bool,
    /// 跳过确认提示
    #[arg(short = 'y')]
    confirm: bool,
    /// 只输出匹配结果，不写回
    #[arg(long)]
    dry_run: bool,
}

fn confirm_overwrite(count: usize) -> Result<bool> {
    let theme = ColorfulTheme::default();

    let items = vec!["No", "Yes"];

    let selection = Select::with_theme(&theme)
        .with_prompt(format!(
            "警告：这个操作将覆盖子任务中已有的 {} 个测试点。
是否确认继续（使用 -y 跳过提示）？",
            count
        ))
        .items(&items)
        .default(0)
        .interact()?;

    Ok(selection == 1)
}

pub fn main(args: MatchArgs) -> Result<()> {
    if args.subtask == 0 {
        bail!("子任务编号从 1 开始");
    }
    let subtask = args.subtask - 1;

    let mut info = config::load_judge_info(&args.config)
        .with_context(|| format!("无法读取评测配置 {}", args.config.display()))?;
    if info.is_auto() {
        info!("配置处于自动识别模式，切换为子任务模式");
        info = info.enable_subtasks();
    }
    if subtask >= info.subtasks().len() {
        bail!(
            "子任务 {} 不存在（共 {} 个）",
            args.subtask,
            info.subtasks().len()
        );
    }

    let pool = FilePool::from_dir(&args.data)
        .with_context(|| format!("无法读取数据目录 {}", args.data.display()))?;
    let pairs = match_testcases(pool.files(), &args.input, &args.output)?;
    if pairs.is_empty() {
        warn!("{} 中没有匹配到测试点", args.data.display());
        return Ok(());
    }
    for pair in &pairs {
        println!("{} -> {}", pair.input_filename, pair.output_filename);
    }
    if args.dry_run {
        return Ok(());
    }

    let mode = if args.replace {
        MergeMode::Replace
    } else {
        MergeMode::Append
    };
    let info = match info.apply_matches(subtask, &pairs, mode) {
        Err(EditError::WouldDiscardTestcases { count, .. }) => {
            if !args.confirm && !confirm_overwrite(count)? {
                return Ok(());
            }
            info.apply_matches(subtask, &pairs, MergeMode::Overwrite)?
        }
        result => result?,
    };

    config::save_judge_info(&args.config, &info)?;
    info!(
        "已向子任务 {} 写入 {} 个测试点",
        args.subtask,
        pairs.len()
    );
    Ok(())
}
