//! # 导出模块
//!
//! 将各市镇的最近站点序列写成按中心市镇分组的表格文件。
//!
//! ## 依赖关系
//! - 被 `commands/export.rs` 调用
//! - 使用 `sources/`, `locator/`, `models/`
//! - 子模块: exporter, writer

pub mod exporter;
pub mod writer;

pub use exporter::{export, ExportOptions};
pub use writer::SheetFormat;
