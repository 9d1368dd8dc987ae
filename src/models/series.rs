//! # 时间序列数据模型
//!
//! 单个站点的 (日期, 指数值) 序列。
//!
//! ## 依赖关系
//! - 被 `sources/measurement_grid.rs` 生成
//! - 被 `export/writer.rs` 写出

use super::Coordinate;
use chrono::NaiveDate;

/// 导出文件中数值列的列名
pub const SERIES_COLUMN: &str = "Series 1";

/// 序列中的一行
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// 缺测为 None
    pub value: Option<f64>,
}

/// 某站点的测量序列
#[derive(Debug, Clone, PartialEq)]
pub struct MeasurementSeries {
    /// 所属站点坐标
    pub station: Coordinate,

    pub points: Vec<SeriesPoint>,
}
