//! # 输入数据源模块
//!
//! 三个相互独立加载的输入：市镇坐标目录、SPEI 测量网格、关注市镇索引。
//!
//! ## 依赖关系
//! - 被 `commands/`, `export/` 使用
//! - 使用 `parsers/`, `models/`
//! - 子模块: city_directory, measurement_grid, interest_index

pub mod city_directory;
pub mod interest_index;
pub mod measurement_grid;

pub use city_directory::CoordinateDirectory;
pub use interest_index::InterestIndex;
pub use measurement_grid::{GridOptions, MeasurementGrid};
