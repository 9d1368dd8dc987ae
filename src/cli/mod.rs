//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `export`: 为每个关注市镇导出最近站点的 SPEI 序列
//! - `resolve`: 仅计算并报告 市镇 -> 最近站点 的分配
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: sources, export, resolve

pub mod export;
pub mod resolve;
pub mod sources;

use clap::{Parser, Subcommand};

/// speimap - SPEI 网格站点分配与导出工具
#[derive(Parser)]
#[command(name = "speimap")]
#[command(version)]
#[command(
    about = "Assign municipalities to their nearest SPEI grid station and export per-city series",
    long_about = None
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Export the nearest-station series of every municipality of interest
    Export(export::ExportArgs),

    /// Print the municipality -> nearest station assignment
    Resolve(resolve::ResolveArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::SheetFormat;
    use crate::parsers::DateOrder;

    #[test]
    fn test_parse_export_defaults() {
        let cli = Cli::try_parse_from(["speimap", "export"]).unwrap();
        match cli.command {
            Commands::Export(args) => {
                assert_eq!(args.sources.region_prefix, "31");
                assert_eq!(args.sources.grid_delimiter, ';');
                assert_eq!(args.sources.date_column, "Dates");
                assert_eq!(args.format, SheetFormat::Xlsx);
                assert_eq!(args.sources.date_order, DateOrder::MonthFirst);
                assert!(!args.keep_going);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_parse_export_csv_format() {
        let cli = Cli::try_parse_from(["speimap", "export", "--format", "csv"]).unwrap();
        match cli.command {
            Commands::Export(args) => assert_eq!(args.format, SheetFormat::Csv),
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_parse_resolve_options() {
        let cli = Cli::try_parse_from([
            "speimap",
            "resolve",
            "--grid",
            "grid.csv",
            "--region-prefix",
            "3106",
            "--output-csv",
            "assignment.csv",
            "--date-order",
            "day-first",
        ])
        .unwrap();
        match cli.command {
            Commands::Resolve(args) => {
                assert_eq!(args.sources.grid.to_str(), Some("grid.csv"));
                assert_eq!(args.sources.region_prefix, "3106");
                assert!(args.output_csv.is_some());
                assert_eq!(args.sources.grid_options().date_order, DateOrder::DayFirst);
            }
            _ => panic!("expected resolve"),
        }
    }
}
