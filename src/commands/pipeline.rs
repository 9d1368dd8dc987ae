//! # 运行编排
//!
//! 加载三个输入、缩小坐标目录、计算最近站点分配。
//! 各组件只持有自己的状态，由这里一次性串联。
//!
//! ## 流程
//! 1. 独立加载关注索引、坐标目录、测量网格
//! 2. 坐标目录按区域前缀过滤，再按关注名称集合过滤，关注名称必须唯一
//! 3. 检查关注市镇是否都在目录中
//! 4. 最近站点分配
//!
//! ## 依赖关系
//! - 被 `commands/export.rs`, `commands/resolve.rs` 调用
//! - 使用 `sources/`, `locator/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::sources::SourceArgs;
use crate::error::{Result, SpeimapError};
use crate::locator::{self, Assignment};
use crate::sources::{CoordinateDirectory, InterestIndex, MeasurementGrid};
use crate::utils::{output, progress};

/// 准备完毕的运行状态
pub struct Prepared {
    pub index: InterestIndex,
    pub directory: CoordinateDirectory,
    pub grid: MeasurementGrid,
    pub assignment: Assignment,
}

/// 加载输入并计算分配
///
/// `keep_going` 为 false 时，任何关注市镇缺失都会在写文件前终止运行。
pub fn prepare(sources: &SourceArgs, keep_going: bool) -> Result<Prepared> {
    let spinner = progress::create_spinner("Loading input tables...");
    let loaded = load_sources(sources);
    spinner.finish_and_clear();
    let (index, mut directory, grid) = loaded?;

    output::print_info("Inputs loaded");
    output::print_field("Interest groups", &index.groups().len().to_string());
    output::print_field("Municipalities", &directory.len().to_string());
    output::print_field("Grid stations", &grid.station_count().to_string());
    if let Some((first, last)) = grid.date_range() {
        output::print_field(
            "Grid dates",
            &format!("{} .. {} ({} rows)", first, last, grid.dates().len()),
        );
    }

    if index.is_empty() {
        output::print_warning(&format!(
            "No municipalities of interest in '{}'",
            sources.index.display()
        ));
    }

    // 缩小坐标目录
    directory.filter_by_region_prefix(&sources.region_prefix);
    let names = index.all_location_names();
    directory.filter_by_name_set(&names);
    directory.ensure_unique_names()?;

    output::print_info(&format!(
        "{} of {} municipalities of interest found with region prefix '{}'",
        directory.len(),
        names.len(),
        sources.region_prefix
    ));

    let missing = directory.missing_names(&names);
    if !missing.is_empty() {
        for name in &missing {
            output::print_warning(&format!(
                "Municipality not found in '{}': {}",
                sources.cities.display(),
                name
            ));
        }
        if !keep_going {
            return Err(SpeimapError::LocationNotFound {
                name: missing[0].clone(),
            });
        }
    }

    let assignment = locator::resolve(directory.locations(), &grid.station_coordinates())?;
    output::print_success(&format!(
        "Assigned {} municipalities to their nearest station",
        assignment.len()
    ));

    Ok(Prepared {
        index,
        directory,
        grid,
        assignment,
    })
}

fn load_sources(
    sources: &SourceArgs,
) -> Result<(InterestIndex, CoordinateDirectory, MeasurementGrid)> {
    let index = InterestIndex::load(&sources.index)?;
    let directory = CoordinateDirectory::load(&sources.cities, sources.cities_delimiter)?;
    let grid = MeasurementGrid::load(&sources.grid, &sources.grid_options())?;
    Ok((index, directory, grid))
}
