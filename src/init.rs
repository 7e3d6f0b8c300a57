use crate::prelude::*;
use chrono::Local;
use colored::Colorize;
use log::LevelFilter;
use log4rs::append::console::Target;
use log4rs::{
    append::console::ConsoleAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
};
use std::panic::{self, PanicHookInfo};

#[cfg(debug_assertions)]
const DEBUG: bool = true;
#[cfg(not(debug_assertions))]
const DEBUG: bool = false;

fn custom_panic_handler(panic_info: &PanicHookInfo, verbose: bool) {
    let prefix = || "PANIC".bright_red().bold().on_black();

    macro_rules! panic_log {
        ($($arg:tt)*) => {
            if verbose {
                eprintln!("{} | {} | {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                prefix(), format!($($arg)*));
            } else {
                eprintln!("{} | {}", prefix(), format!($($arg)*));
            }
        };
    }

    panic_log!("程序发生了无法挽回的异常，即将退出");
    panic_log!("配置文件没有被写入，如需报告问题请保留以下信息:");

    if let Some(location) = panic_info.location() {
        panic_log!(
            "Panic 发生在: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    } else {
        panic_log!("无法获取 Panic 位置");
    }

    if let Some(message) = panic_info.payload().downcast_ref::<&str>() {
        panic_log!("Panic 信息: {}", message);
    } else if let Some(message) = panic_info.payload().downcast_ref::<String>() {
        panic_log!("Panic 信息: {}", message);
    } else {
        panic_log!("无法获取 Panic 信息");
    }
}

fn init_log(verbose: bool) -> Result<()> {
    let format = if DEBUG || verbose {
        "{d(%Y-%m-%d %H:%M:%S)} | {h({l})} | {t} | {m}{n}"
    } else {
        "{h({l})} | {m}{n}"
    };

    // 标准输出留给配置内容，日志一律写到标准错误
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(format)))
        .build();

    let loglevel = if DEBUG || verbose {
        LevelFilter::Trace
    } else {
        LevelFilter::Warn
    };

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(loglevel))?;

    log4rs::init_config(config).context("无法初始化日志")?;
    Ok(())
}

pub fn init(verbose: bool) -> Result<()> {
    init_log(verbose)?;
    if !DEBUG {
        panic::set_hook(Box::new(move |panic_info| {
            custom_panic_handler(panic_info, verbose);
        }));
    }
    Ok(())
}
