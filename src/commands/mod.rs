//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `sources/`, `locator/`, `export/`, `utils/`
//! - 子模块: pipeline, export, resolve

pub mod export;
pub mod pipeline;
pub mod resolve;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Export(args) => export::execute(args),
        Commands::Resolve(args) => resolve::execute(args),
    }
}
