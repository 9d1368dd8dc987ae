//! # 统一错误处理模块
//!
//! 定义 speimap 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// speimap 统一错误类型
#[derive(Error, Debug)]
pub enum SpeimapError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to create output directory: {path}")]
    DirectoryCreationError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ─────────────────────────────────────────────────────────────
    // 加载错误（输入表格 / JSON）
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Missing required column '{column}' in {path}")]
    MissingColumn { path: String, column: String },

    #[error("Location '{name}' appears more than once in {path}")]
    DuplicateLocation { name: String, path: String },

    #[error("Columns '{first}' and '{second}' denote the same station")]
    DuplicateStation { first: String, second: String },

    // ─────────────────────────────────────────────────────────────
    // 查找错误
    // ─────────────────────────────────────────────────────────────
    #[error("Location not found: {name}")]
    LocationNotFound { name: String },

    #[error("Location '{name}' is ambiguous ({count} entries); filter by region first")]
    AmbiguousLocation { name: String, count: usize },

    #[error("No grid column matches station header '{header}'")]
    StationNotFound { header: String },

    #[error("Cannot resolve nearest station: the grid has no station columns")]
    EmptyCandidateSet,

    // ─────────────────────────────────────────────────────────────
    // 导出错误
    // ─────────────────────────────────────────────────────────────
    #[error("Export finished with {failed} of {total} files failed")]
    ExportFailed { failed: usize, total: usize },

    #[error("Municipality name '{name}' cannot be used as a file or directory name")]
    InvalidFileName { name: String },

    #[error("'{first}' and '{second}' would both be written as '{stem}'")]
    FileNameCollision {
        first: String,
        second: String,
        stem: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 工作簿错误
    // ─────────────────────────────────────────────────────────────
    #[error("XLSX error: {0}")]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
}

impl SpeimapError {
    /// 构造解析错误
    pub fn parse(format: &str, path: &str, reason: impl Into<String>) -> Self {
        SpeimapError::ParseError {
            format: format.to_string(),
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SpeimapError>;
