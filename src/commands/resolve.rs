//! # resolve 命令实现
//!
//! 计算 市镇 -> 最近站点 的分配，以表格显示，并可保存为 CSV。
//!
//! ## 依赖关系
//! - 使用 `cli/resolve.rs` 定义的参数
//! - 使用 `commands/pipeline.rs`
//! - 使用 `utils/output.rs`

use super::pipeline::{self, Prepared};
use crate::cli::resolve::ResolveArgs;
use crate::error::{Result, SpeimapError};
use crate::utils::output;

use serde::Serialize;
use std::path::Path;
use tabled::{Table, Tabled};

/// 分配结果行
#[derive(Debug, Clone, Tabled)]
struct AssignmentRow {
    #[tabled(rename = "Municipality")]
    location: String,
    #[tabled(rename = "Lon")]
    longitude: String,
    #[tabled(rename = "Lat")]
    latitude: String,
    #[tabled(rename = "Station")]
    station: String,
    #[tabled(rename = "Distance (°)")]
    distance: String,
}

/// CSV 输出记录
#[derive(Debug, Serialize)]
struct AssignmentRecord<'a> {
    location: &'a str,
    longitude: f64,
    latitude: f64,
    station: String,
    distance: f64,
}

/// 执行 resolve 命令
pub fn execute(args: ResolveArgs) -> Result<()> {
    output::print_header("Resolving Nearest Stations");

    let prepared = pipeline::prepare(&args.sources, args.keep_going)?;

    let rows = assignment_rows(&prepared)?;
    if rows.is_empty() {
        output::print_warning("No municipalities were assigned.");
        return Ok(());
    }

    let table = Table::new(&rows);
    println!("{}", table);

    if let Some(ref path) = args.output_csv {
        save_assignment_csv(&prepared, path)?;
        output::print_success(&format!("Assignment saved to '{}'", path.display()));
    }

    Ok(())
}

fn assignment_rows(prepared: &Prepared) -> Result<Vec<AssignmentRow>> {
    prepared
        .assignment
        .iter()
        .map(|(name, found)| {
            let coord = prepared.directory.lookup(name)?;
            Ok(AssignmentRow {
                location: name.clone(),
                longitude: format!("{:.4}", coord.longitude),
                latitude: format!("{:.4}", coord.latitude),
                station: found.station.station_header(),
                distance: format!("{:.4}", found.distance),
            })
        })
        .collect()
}

/// 保存分配结果到 CSV
fn save_assignment_csv(prepared: &Prepared, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (name, found) in prepared.assignment.iter() {
        let coord = prepared.directory.lookup(name)?;
        wtr.serialize(AssignmentRecord {
            location: name,
            longitude: coord.longitude,
            latitude: coord.latitude,
            station: found.station.station_header(),
            distance: found.distance,
        })?;
    }

    wtr.flush().map_err(|e| SpeimapError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
