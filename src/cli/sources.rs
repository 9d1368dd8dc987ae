//! # 输入数据源参数
//!
//! `export` 与 `resolve` 共用的输入文件与格式参数，均可通过环境变量配置。
//!
//! ## 依赖关系
//! - 被 `cli/export.rs`, `cli/resolve.rs` 展开 (flatten)
//! - 参数传递给 `commands/pipeline.rs`

use crate::parsers::DateOrder;
use crate::sources::GridOptions;

use clap::Args;
use std::path::PathBuf;

/// 输入数据源参数
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// SPEI grid table (date rows x 'X,<lon>,<lat>' station columns)
    #[arg(long, env = "SPEIMAP_GRID", default_value = "speiAll_final.csv")]
    pub grid: PathBuf,

    /// Municipality coordinate table (delimited text, or .xlsx/.xls/.ods workbook)
    #[arg(long, env = "SPEIMAP_CITIES", default_value = "CoordenadasMunicipios.csv")]
    pub cities: PathBuf,

    /// JSON grouping of central -> bordering municipalities
    #[arg(long, env = "SPEIMAP_INDEX", default_value = "cidades.json")]
    pub index: PathBuf,

    /// Keep only municipalities whose region code starts with this prefix
    #[arg(long, env = "SPEIMAP_REGION_PREFIX", default_value = "31")]
    pub region_prefix: String,

    /// Field delimiter of the grid table
    #[arg(long, default_value_t = ';')]
    pub grid_delimiter: char,

    /// Decimal separator used by grid values
    #[arg(long, default_value_t = ',')]
    pub decimal: char,

    /// Name of the date column in the grid table
    #[arg(long, default_value = "Dates")]
    pub date_column: String,

    /// Day/month order of grid dates written with the year last (e.g. 01/02/1981)
    #[arg(long, value_enum, default_value_t = DateOrder::MonthFirst)]
    pub date_order: DateOrder,

    /// Field delimiter of the municipality table (ignored for workbooks)
    #[arg(long, default_value_t = ',')]
    pub cities_delimiter: char,
}

impl SourceArgs {
    /// 网格读取选项
    pub fn grid_options(&self) -> GridOptions {
        GridOptions {
            delimiter: self.grid_delimiter,
            decimal: self.decimal,
            date_column: self.date_column.clone(),
            date_order: self.date_order,
        }
    }
}
