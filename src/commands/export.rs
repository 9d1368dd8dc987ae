//! # export 命令实现
//!
//! 为每个关注市镇导出最近站点的 SPEI 序列。
//!
//! ## 功能
//! - 加载输入并计算最近站点分配
//! - 按中心市镇创建子目录并写出表格
//! - 汇总报告失败文件
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的参数
//! - 使用 `commands/pipeline.rs`
//! - 使用 `export/` 写出文件
//! - 使用 `utils/output.rs`

use super::pipeline;
use crate::cli::export::ExportArgs;
use crate::error::{Result, SpeimapError};
use crate::export::{export, ExportOptions};
use crate::utils::output;

/// 执行 export 命令
pub fn execute(args: ExportArgs) -> Result<()> {
    output::print_header("Exporting SPEI Series");

    let prepared = pipeline::prepare(&args.sources, args.keep_going)?;

    output::print_info(&format!(
        "Writing {} {} files under '{}'",
        prepared.index.export_count(),
        args.format,
        args.output.display()
    ));

    let options = ExportOptions {
        format: args.format,
        keep_going: args.keep_going,
        show_progress: true,
    };

    let summary = export(
        &prepared.index,
        &prepared.grid,
        &prepared.assignment,
        &args.output,
        &options,
    )?;

    // 打印统计
    output::print_separator();
    output::print_success(&format!(
        "Export complete: {} written, {} failed",
        summary.written, summary.failed
    ));

    if !summary.failures.is_empty() {
        output::print_warning("Failed files:");
        for (path, err) in summary.failures.iter().take(10) {
            output::print_error(&format!("  {}: {}", path, err));
        }
        if summary.failures.len() > 10 {
            output::print_warning(&format!(
                "  ... and {} more",
                summary.failures.len() - 10
            ));
        }

        return Err(SpeimapError::ExportFailed {
            failed: summary.failed,
            total: summary.total(),
        });
    }

    output::print_done(&format!(
        "{} groups exported to '{}'",
        prepared.index.groups().len(),
        args.output.display()
    ));

    Ok(())
}
