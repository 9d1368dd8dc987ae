//! # 市镇数据模型
//!
//! ## 依赖关系
//! - 被 `sources/city_directory.rs`, `locator/` 使用
//! - 使用 `models/coordinate.rs`

use super::Coordinate;

/// 市镇（以大写名称为标识）
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    /// 区域编码的规范文本形式（如 IBGE 市镇编码）
    pub region_code: String,

    /// 大写名称
    pub name: String,

    pub coordinate: Coordinate,
}

impl Location {
    pub fn new(region_code: impl Into<String>, name: &str, coordinate: Coordinate) -> Self {
        Location {
            region_code: region_code.into(),
            name: canonical_name(name),
            coordinate,
        }
    }
}

/// 名称规范化：去除首尾空白并转为大写
pub fn canonical_name(name: &str) -> String {
    name.trim().to_uppercase()
}
