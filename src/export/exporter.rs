//! # 分组导出器
//!
//! 按关注索引的分组写出目录树：每个中心市镇一个子目录，目录中包含
//! 中心市镇自身的序列文件以及每个相邻市镇的序列文件。
//!
//! ## 功能
//! - 每组目录只创建一次，创建失败时该组不写任何文件
//! - 名称转换为文件名后不得逃出输出目录，也不得互相覆盖
//! - 默认遇错即停；`keep_going` 模式下收集失败并汇总报告
//! - 进度条显示
//!
//! ## 依赖关系
//! - 被 `commands/export.rs` 调用
//! - 使用 `sources/` 的 InterestIndex 与 MeasurementGrid
//! - 使用 `locator/` 的 Assignment
//! - 使用 `export/writer.rs` 写出文件

use super::writer::{write_series, SheetFormat};
use crate::error::{Result, SpeimapError};
use crate::locator::Assignment;
use crate::sources::{InterestIndex, MeasurementGrid};
use crate::utils::{output, progress};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// 导出选项
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    pub format: SheetFormat,
    /// 出错后继续处理其余文件
    pub keep_going: bool,
    /// 显示进度条
    pub show_progress: bool,
}

/// 单个文件的导出结果
#[derive(Debug, Clone)]
pub enum ProcessResult {
    /// 写出成功
    Written(PathBuf),
    /// 写出失败
    Failed(String, String), // (文件路径, 错误信息)
}

/// 导出结果统计
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// 成功数量
    pub written: usize,
    /// 失败数量
    pub failed: usize,
    /// 已写出的文件
    pub files: Vec<PathBuf>,
    /// 失败详情
    pub failures: Vec<(String, String)>,
}

impl ExportSummary {
    /// 合并处理结果
    pub fn merge(&mut self, result: ProcessResult) {
        match result {
            ProcessResult::Written(path) => {
                self.written += 1;
                self.files.push(path);
            }
            ProcessResult::Failed(path, err) => {
                self.failed += 1;
                self.failures.push((path, err));
            }
        }
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.written + self.failed
    }
}

/// 按分组导出全部市镇序列
pub fn export(
    index: &InterestIndex,
    grid: &MeasurementGrid,
    assignment: &Assignment,
    output_root: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary> {
    let pb = progress::progress_bar_if(
        options.show_progress,
        index.export_count() as u64,
        "Exporting",
    );

    let mut summary = ExportSummary::default();
    let mut group_stems = HashMap::new();

    for central in index.central_names() {
        let bordering = index.bordering_names(central).iter().map(String::as_str);
        let names: Vec<&str> = std::iter::once(central).chain(bordering).collect();

        let group_dir = claim_stem(central, &mut group_stems).and_then(|stem| {
            let dir = output_root.join(stem);
            create_group_dir(&dir)?;
            Ok(dir)
        });

        let group_dir = match group_dir {
            Ok(dir) => dir,
            Err(e) => {
                if !options.keep_going {
                    pb.finish_and_clear();
                    return Err(e);
                }

                let reason = e.to_string();
                pb.suspend(|| output::print_warning(&reason));
                for name in names {
                    let label = sheet_label(&output_root.join(central), name, options.format);
                    summary.merge(ProcessResult::Failed(label, reason.clone()));
                    pb.inc(1);
                }
                continue;
            }
        };

        let mut sheet_stems = HashMap::new();

        for name in names {
            pb.set_message(format!("{}/{}", central, name));

            let written = claim_stem(name, &mut sheet_stems).and_then(|stem| {
                let path = group_dir.join(format!("{}.{}", stem, options.format.extension()));
                export_location(name, grid, assignment, &path, options.format)?;
                Ok(path)
            });

            match written {
                Ok(path) => summary.merge(ProcessResult::Written(path)),
                Err(e) => {
                    if !options.keep_going {
                        pb.finish_and_clear();
                        return Err(e);
                    }
                    let reason = format!("{}: {}", name, e);
                    pb.suspend(|| output::print_warning(&reason));
                    let label = sheet_label(&group_dir, name, options.format);
                    summary.merge(ProcessResult::Failed(label, reason));
                }
            }

            pb.inc(1);
        }
    }

    pb.finish_and_clear();

    Ok(summary)
}

/// 写出单个市镇的序列
fn export_location(
    name: &str,
    grid: &MeasurementGrid,
    assignment: &Assignment,
    path: &Path,
    format: SheetFormat,
) -> Result<()> {
    let station = assignment.station_for(name)?;
    let series = grid.series_for_station(&station)?;
    write_series(&series, path, format)
}

/// 创建分组目录（已存在的目录视为成功）
fn create_group_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| SpeimapError::DirectoryCreationError {
        path: dir.display().to_string(),
        source: e,
    })
}

/// 失败报告中使用的文件名（未经转换）
fn sheet_label(dir: &Path, name: &str, format: SheetFormat) -> String {
    dir.join(format!("{}.{}", name, format.extension()))
        .display()
        .to_string()
}

/// 为名称占用一个文件名，同一目录内两个名称不能映射到同一文件名
fn claim_stem<'a>(name: &'a str, claimed: &mut HashMap<String, &'a str>) -> Result<String> {
    let stem = file_stem(name)?;

    match claimed.get(&stem) {
        Some(&first) if first != name => Err(SpeimapError::FileNameCollision {
            first: first.to_string(),
            second: name.to_string(),
            stem,
        }),
        _ => {
            claimed.insert(stem.clone(), name);
            Ok(stem)
        }
    }
}

/// 名称中的路径分隔符替换为 '_'
///
/// 空名称以及只由 '.' 组成的名称（如 `..`）无法安全地作为路径组件。
fn file_stem(name: &str) -> Result<String> {
    let stem = name.trim().replace(['/', '\\'], "_");

    if stem.chars().all(|c| c == '.') {
        return Err(SpeimapError::InvalidFileName {
            name: name.to_string(),
        });
    }

    Ok(stem)
}
