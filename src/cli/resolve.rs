//! # resolve 子命令 CLI 定义
//!
//! 计算并显示 市镇 -> 最近站点 的分配
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/resolve.rs`

use super::sources::SourceArgs;

use clap::Args;
use std::path::PathBuf;

/// resolve 子命令参数
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Save the assignment to a CSV file
    #[arg(long)]
    pub output_csv: Option<PathBuf>,

    /// Only warn about municipalities missing from the coordinate table
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}
