//! # speimap - SPEI 网格站点分配与导出工具
//!
//! 将一组关注的市镇分配到 SPEI 网格中最近的测量站点，
//! 并按中心市镇分目录导出每个市镇的 (日期, 指数) 序列。
//!
//! ## 子命令
//! - `export`  - 导出各市镇的最近站点序列
//! - `resolve` - 显示 市镇 -> 最近站点 的分配
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── sources/  (坐标目录、测量网格、关注索引)
//!   │     ├── parsers/  (单元格解析)
//!   │     ├── locator/  (最近站点查找)
//!   │     ├── export/   (表格导出)
//!   │     └── models/   (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod error;
mod export;
mod locator;
mod models;
mod parsers;
mod sources;
mod utils;

use clap::Parser;
use cli::Cli;
use std::error::Error;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&report(&e));
        std::process::exit(1);
    }
}

/// 错误信息连同其来源链
fn report(err: &error::SpeimapError) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(&format!("\n  caused by: {}", cause));
        source = cause.source();
    }
    msg
}
