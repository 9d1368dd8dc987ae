//! # 序列表格写出
//!
//! 将单站序列写为两列表格：日期列与 "Series 1" 数值列。
//!
//! ## 支持格式
//! - XLSX: Excel 工作簿，日期列为 Excel 日期并按 `yyyy-mm-dd` 显示
//! - CSV: 逗号分隔
//! - TSV: 制表符分隔
//!
//! ## 依赖关系
//! - 被 `export/exporter.rs` 调用
//! - 使用 `models/series.rs` 的 MeasurementSeries
//! - 使用 `rust_xlsxwriter` 写工作簿，`csv` 写分隔文本

use crate::error::{Result, SpeimapError};
use crate::models::{MeasurementSeries, SERIES_COLUMN};
use crate::parsers::OUTPUT_DATE_FORMAT;

use chrono::Datelike;
use clap::ValueEnum;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::io::Write;
use std::path::Path;

/// 导出表头中日期列的列名
pub const DATE_COLUMN: &str = "Dates";

/// 工作簿日期单元格的显示格式
const XLSX_DATE_FORMAT: &str = "yyyy-mm-dd";

/// 表格输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum SheetFormat {
    /// Excel workbook
    #[default]
    Xlsx,
    /// Comma-separated values
    Csv,
    /// Tab-separated values
    Tsv,
}

impl SheetFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
            SheetFormat::Tsv => "tsv",
        }
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// 写出序列到文件
pub fn write_series(
    series: &MeasurementSeries,
    output_path: &Path,
    format: SheetFormat,
) -> Result<()> {
    let delimiter = match format {
        SheetFormat::Xlsx => return write_workbook(series, output_path),
        SheetFormat::Csv => b',',
        SheetFormat::Tsv => b'\t',
    };

    let file = std::fs::File::create(output_path).map_err(|e| SpeimapError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    write_delimited(series, file, delimiter)
}

/// 写出工作簿，缺失值留空
fn write_workbook(series: &MeasurementSeries, output_path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(XLSX_DATE_FORMAT);

    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, DATE_COLUMN)?;
    worksheet.write_string(0, 1, SERIES_COLUMN)?;
    worksheet.set_column_width(0, 12)?;

    for (i, point) in series.points.iter().enumerate() {
        let row = i as u32 + 1;
        let date = ExcelDateTime::from_ymd(
            point.date.year() as u16,
            point.date.month() as u8,
            point.date.day() as u8,
        )?;
        worksheet.write_datetime_with_format(row, 0, &date, &date_format)?;

        if let Some(value) = point.value {
            worksheet.write_number(row, 1, value)?;
        }
    }

    workbook.save(output_path)?;

    Ok(())
}

/// 写出分隔文本到任意写入器
fn write_delimited<W: Write>(series: &MeasurementSeries, writer: W, delimiter: u8) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    wtr.write_record([DATE_COLUMN, SERIES_COLUMN])?;

    for point in &series.points {
        let value = point.value.map(|v| v.to_string()).unwrap_or_default();
        wtr.write_record([point.date.format(OUTPUT_DATE_FORMAT).to_string(), value])?;
    }

    wtr.flush().map_err(csv::Error::from)?;

    Ok(())
}
