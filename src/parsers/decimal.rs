//! # 区域小数格式解析
//!
//! 将使用逗号（或其他字符）作小数点的数值规范化为 `f64`。
//!
//! ## 依赖关系
//! - 被 `sources/measurement_grid.rs`, `sources/city_directory.rs` 使用
//! - 无外部模块依赖

/// 视为缺测的单元格内容（不区分大小写）
const MISSING_TOKENS: &[&str] = &["", "na", "nan", "n/a", "null", "-"];

/// 解析单元格数值
///
/// 返回 `Ok(None)` 表示缺测；无法解析的内容返回错误。
pub fn parse_locale_decimal(cell: &str, decimal: char) -> Result<Option<f64>, String> {
    let trimmed = cell.trim();
    if MISSING_TOKENS
        .iter()
        .any(|token| trimmed.eq_ignore_ascii_case(token))
    {
        return Ok(None);
    }

    let normalized = if decimal == '.' {
        trimmed.to_string()
    } else {
        trimmed.replace(decimal, ".")
    };

    let value: f64 = normalized
        .parse()
        .map_err(|_| format!("'{}' is not a number", trimmed))?;

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(format!("'{}' is not a finite number", trimmed))
    }
}

/// 解析必填坐标值，同时接受 `.` 与 `,` 作小数点
pub fn parse_coordinate_value(cell: &str) -> Result<f64, String> {
    parse_locale_decimal(cell, ',')?.ok_or_else(|| "empty coordinate value".to_string())
}
