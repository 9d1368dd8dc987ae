//! # SPEI 测量网格
//!
//! 宽表：每行一个日期，每列一个站点（列名 `X,<经度>,<纬度>`）。
//! 提供候选站点坐标，并按坐标切出单站序列。
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs`, `export/exporter.rs` 使用
//! - 使用 `parsers/` 解析列名、数值与日期
//! - 使用 `csv` crate 读取表格

use crate::error::{Result, SpeimapError};
use crate::models::{Coordinate, MeasurementSeries, SeriesPoint};
use crate::parsers::{
    delimiter_byte, find_column, parse_date, parse_locale_decimal, parse_station_header,
    DateOrder,
};

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 网格表格读取选项
#[derive(Debug, Clone)]
pub struct GridOptions {
    /// 字段分隔符
    pub delimiter: char,
    /// 数值小数点字符
    pub decimal: char,
    /// 日期列名
    pub date_column: String,
    /// 年份在后的日期的日月顺序
    pub date_order: DateOrder,
}

impl Default for GridOptions {
    fn default() -> Self {
        GridOptions {
            delimiter: ';',
            decimal: ',',
            date_column: "Dates".to_string(),
            date_order: DateOrder::MonthFirst,
        }
    }
}

/// 网格中的一列（一个站点）
#[derive(Debug, Clone, PartialEq)]
pub struct StationColumn {
    /// 原始列名
    pub header: String,
    pub coordinate: Coordinate,
}

/// 测量网格
#[derive(Debug, Clone)]
pub struct MeasurementGrid {
    dates: Vec<NaiveDate>,
    stations: Vec<StationColumn>,
    /// 按站点（列）存储的数值
    values: Vec<Vec<Option<f64>>>,
    /// 规范列名 -> 站点下标
    index: HashMap<String, usize>,
}

impl MeasurementGrid {
    /// 从文件加载
    pub fn load(path: &Path, options: &GridOptions) -> Result<Self> {
        if !path.exists() {
            return Err(SpeimapError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| SpeimapError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_reader(file, options, &path.display().to_string())
    }

    /// 从任意读取器加载，`origin` 仅用于错误信息
    pub fn from_reader<R: Read>(reader: R, options: &GridOptions, origin: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter_byte(options.delimiter)?)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| SpeimapError::parse("CSV", origin, e.to_string()))?
            .clone();

        let date_idx = find_column(&headers, &options.date_column, origin)?;

        // 解析站点列名
        let mut stations = Vec::new();
        let mut columns = Vec::new();
        let mut index = HashMap::new();

        for (col, header) in headers.iter().enumerate() {
            if col == date_idx {
                continue;
            }

            let coordinate = parse_station_header(header)
                .map_err(|reason| SpeimapError::parse("CSV", origin, reason))?;

            let key = coordinate.station_header();
            if let Some(&existing) = index.get(&key) {
                let first: &StationColumn = &stations[existing];
                return Err(SpeimapError::DuplicateStation {
                    first: first.header.clone(),
                    second: header.to_string(),
                });
            }

            index.insert(key, stations.len());
            stations.push(StationColumn {
                header: header.to_string(),
                coordinate,
            });
            columns.push(col);
        }

        let mut dates = Vec::new();
        let mut values: Vec<Vec<Option<f64>>> = vec![Vec::new(); stations.len()];

        for (row, record) in rdr.records().enumerate() {
            let record = record.map_err(|e| SpeimapError::parse("CSV", origin, e.to_string()))?;
            let line = row + 2;

            let date = parse_date(record.get(date_idx).unwrap_or(""), options.date_order).map_err(|reason| {
                SpeimapError::parse("CSV", origin, format!("line {}: {}", line, reason))
            })?;
            dates.push(date);

            for (station_idx, &col) in columns.iter().enumerate() {
                let cell = record.get(col).unwrap_or("");
                let value = parse_locale_decimal(cell, options.decimal).map_err(|reason| {
                    SpeimapError::parse(
                        "CSV",
                        origin,
                        format!(
                            "line {}, column '{}': {}",
                            line, stations[station_idx].header, reason
                        ),
                    )
                })?;
                values[station_idx].push(value);
            }
        }

        Ok(MeasurementGrid {
            dates,
            stations,
            values,
            index,
        })
    }

    /// 全部站点坐标，按列顺序
    pub fn station_coordinates(&self) -> Vec<Coordinate> {
        self.stations.iter().map(|s| s.coordinate).collect()
    }

    /// 按坐标切出单站序列
    pub fn series_for_station(&self, coordinate: &Coordinate) -> Result<MeasurementSeries> {
        let header = coordinate.station_header();
        let station_idx = *self
            .index
            .get(&header)
            .ok_or(SpeimapError::StationNotFound { header })?;

        let points = self
            .dates
            .iter()
            .zip(&self.values[station_idx])
            .map(|(&date, &value)| SeriesPoint { date, value })
            .collect();

        Ok(MeasurementSeries {
            station: self.stations[station_idx].coordinate,
            points,
        })
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 最早与最晚日期
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = *self.dates.iter().min()?;
        let last = *self.dates.iter().max()?;
        Some((first, last))
    }
}
