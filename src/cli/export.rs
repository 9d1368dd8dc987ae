//! # export 子命令 CLI 定义
//!
//! 为每个中心市镇创建子目录，并写出其自身与相邻市镇的序列表格
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`

use super::sources::SourceArgs;
use crate::export::SheetFormat;

use clap::Args;
use std::path::PathBuf;

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub sources: SourceArgs,

    /// Output root directory (one sub-directory per central municipality)
    #[arg(short, long, env = "SPEIMAP_OUTPUT", default_value = "Data")]
    pub output: PathBuf,

    /// Spreadsheet format of the exported series
    #[arg(short, long, value_enum, default_value_t = SheetFormat::Xlsx)]
    pub format: SheetFormat,

    /// Continue after per-file failures and report them at the end
    #[arg(long, default_value_t = false)]
    pub keep_going: bool,
}
