//! # 日期解析
//!
//! 网格日期列支持的格式：完整日期、带时间的日期、以及仅到月份的日期
//! （按当月 1 日处理）。
//!
//! ## 依赖关系
//! - 被 `sources/measurement_grid.rs` 使用
//! - 使用 `chrono` crate

use chrono::{NaiveDate, NaiveDateTime};
use clap::ValueEnum;

/// 导出时使用的日期格式
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// 年份在前的格式，没有歧义
const YEAR_FIRST_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y%m%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

const MONTH_FIRST_FORMATS: &[&str] = &["%m/%d/%Y", "%m-%d-%Y", "%m/%d/%Y %H:%M"];

const DAY_FIRST_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d/%m/%Y %H:%M"];

/// 月份格式，解析前补上日 "01"
const MONTH_FORMATS: &[(&str, &str)] = &[
    ("%Y-%m-%d", "-01"),
    ("%Y/%m/%d", "/01"),
    ("%m/%Y/%d", "/01"),
    ("%b%Y%d", "01"),
    ("%b %Y%d", "01"),
];

/// 年份在后的日期（如 `01/02/1981`）的日月顺序
///
/// 优先按所选顺序解析，失败时再尝试另一种顺序。
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum DateOrder {
    /// 01/02/1981 is January 2nd
    #[default]
    MonthFirst,
    /// 01/02/1981 is February 1st
    DayFirst,
}

impl DateOrder {
    fn formats(&self) -> [&'static [&'static str]; 2] {
        match self {
            DateOrder::MonthFirst => [MONTH_FIRST_FORMATS, DAY_FIRST_FORMATS],
            DateOrder::DayFirst => [DAY_FIRST_FORMATS, MONTH_FIRST_FORMATS],
        }
    }
}

/// 解析日期单元格
pub fn parse_date(cell: &str, order: DateOrder) -> Result<NaiveDate, String> {
    let text = cell.trim();

    let [preferred, fallback] = order.formats();
    let formats = YEAR_FIRST_FORMATS.iter().chain(preferred).chain(fallback);

    for fmt in formats {
        if let Some(date) = parse_with(text, fmt) {
            return Ok(date);
        }
    }

    for (fmt, day_suffix) in MONTH_FORMATS {
        let padded = format!("{}{}", text, day_suffix);
        if let Ok(date) = NaiveDate::parse_from_str(&padded, fmt) {
            return Ok(date);
        }
    }

    Err(format!("'{}' is not a recognised date", text))
}

/// 按单个格式解析，格式带时间时只保留日期部分
fn parse_with(text: &str, fmt: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, fmt)
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, fmt).ok().map(|dt| dt.date()))
}
