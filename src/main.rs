use crate::cli::check::CheckArgs;
use crate::cli::fmt::FmtArgs;
use crate::cli::matching::MatchArgs;
use crate::cli::shares::SharesArgs;
use crate::prelude::*;
use clap::ArgAction;
use clap::{Parser, Subcommand};

mod cli;
mod init;
mod prelude;

#[derive(Debug, Parser)]
#[command(version, about = "评测配置编辑工具", disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    #[arg(short, long, global = true, action = ArgAction::Count)]
    /// 详细模式
    verbose: u8,
}

#[derive(Subcommand, Debug)]
#[command(infer_subcommands = false)]
enum Commands {
    /// 输出规范化后的配置
    Fmt(FmtArgs),
    /// 从数据目录自动匹配测试点
    Match(MatchArgs),
    /// 查看默认分值
    Shares(SharesArgs),
    /// 提交前检查配置
    Check(CheckArgs),
}

fn judge_editor(cli: Cli) -> Result<()> {
    init::init(cli.verbose >= 1)?;
    info!("booting up");

    match cli.command {
        Commands::Fmt(args) => cli::fmt::main(args),
        Commands::Match(args) => cli::matching::main(args),
        Commands::Shares(args) => cli::shares::main(args),
        Commands::Check(args) => cli::check::main(args),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = judge_editor(cli);

    if cfg!(debug_assertions) {
        result?;
    } else if let Err(e) = result {
        if log::max_level() == log::LevelFilter::Off {
            eprintln!("程序执行出错: {:#}", e);
        } else {
            log::error!("程序执行出错: {:#}", e);
        }
        std::process::exit(1);
    }
    Ok(())
}
