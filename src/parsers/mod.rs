//! # 解析器模块
//!
//! 输入表格中单元格级别的解析：站点列名、区域小数格式、日期。
//!
//! ## 依赖关系
//! - 被 `sources/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: station_header, decimal, date

pub mod date;
pub mod decimal;
pub mod station_header;

pub use date::{parse_date, DateOrder, OUTPUT_DATE_FORMAT};
pub use decimal::{parse_coordinate_value, parse_locale_decimal};
pub use station_header::parse_station_header;

use crate::error::{Result, SpeimapError};

/// 将 CLI 传入的分隔符字符转换为 `csv` 所需的字节
pub fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(SpeimapError::InvalidArgument(format!(
            "delimiter '{}' must be an ASCII character",
            delimiter
        )))
    }
}

/// 在表头中查找列位置
pub fn find_column(headers: &csv::StringRecord, column: &str, path: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == column)
        .ok_or_else(|| SpeimapError::MissingColumn {
            path: path.to_string(),
            column: column.to_string(),
        })
}
