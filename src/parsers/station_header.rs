//! # 站点列名解析器
//!
//! 解析网格列名 `X,<经度>,<纬度>`，不做任何舍入。
//!
//! ## 依赖关系
//! - 被 `sources/measurement_grid.rs` 使用
//! - 使用 `regex` crate

use crate::models::Coordinate;

use regex::Regex;
use std::sync::OnceLock;

fn header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^X,\s*([^,\s]+)\s*,\s*([^,\s]+)$").unwrap())
}

/// 解析站点列名为坐标
///
/// 非数字或非有限值（`nan`, `inf`）一律报错，不会生成 NaN 站点。
pub fn parse_station_header(header: &str) -> Result<Coordinate, String> {
    let header = header.trim();
    let caps = header_pattern()
        .captures(header)
        .ok_or_else(|| format!("'{}' is not of the form 'X,<lon>,<lat>'", header))?;

    let longitude = parse_component(&caps[1], header)?;
    let latitude = parse_component(&caps[2], header)?;

    Ok(Coordinate::new(longitude, latitude))
}

fn parse_component(text: &str, header: &str) -> Result<f64, String> {
    let value: f64 = text
        .parse()
        .map_err(|_| format!("invalid number '{}' in station header '{}'", text, header))?;
    if !value.is_finite() {
        return Err(format!(
            "non-finite number '{}' in station header '{}'",
            text, header
        ));
    }
    Ok(value)
}
