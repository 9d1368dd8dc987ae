//! # 数据模型模块
//!
//! 定义坐标、市镇和测量序列的数据模型。
//!
//! ## 依赖关系
//! - 被 `sources/`, `locator/`, `export/` 使用
//! - 子模块: coordinate, location, series

pub mod coordinate;
pub mod location;
pub mod series;

pub use coordinate::Coordinate;
pub use location::{canonical_name, Location};
pub use series::{MeasurementSeries, SeriesPoint, SERIES_COLUMN};
