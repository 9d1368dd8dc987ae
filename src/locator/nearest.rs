//! # 最近站点查找
//!
//! 对每个市镇穷举全部候选站点，取平面欧氏距离最小者。
//! 严格小于才替换当前最优，因此距离相等时保留候选序列中靠前的站点。
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 调用
//! - 使用 `models/` 的 Coordinate 与 Location

use crate::error::{Result, SpeimapError};
use crate::models::{canonical_name, Coordinate, Location};

use std::collections::BTreeMap;

/// 单个市镇的匹配结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationMatch {
    /// 最近站点坐标（必为候选集合中的元素）
    pub station: Coordinate,
    /// 平面欧氏距离（度）
    pub distance: f64,
}

/// 市镇 -> 最近站点 的映射
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    matches: BTreeMap<String, StationMatch>,
}

impl Assignment {
    /// 查询某市镇分配到的站点坐标
    pub fn station_for(&self, name: &str) -> Result<Coordinate> {
        let name = canonical_name(name);
        self.matches
            .get(&name)
            .map(|m| m.station)
            .ok_or(SpeimapError::LocationNotFound { name })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StationMatch)> {
        self.matches.iter()
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }
}

/// 查找离 `target` 最近的站点
pub fn nearest_station(target: &Coordinate, stations: &[Coordinate]) -> Result<StationMatch> {
    let (first, rest) = stations
        .split_first()
        .ok_or(SpeimapError::EmptyCandidateSet)?;

    let mut best = StationMatch {
        station: *first,
        distance: target.planar_distance(first),
    };

    for station in rest {
        let distance = target.planar_distance(station);
        if distance < best.distance {
            best = StationMatch {
                station: *station,
                distance,
            };
        }
    }

    Ok(best)
}

/// 为每个市镇分配最近站点
pub fn resolve(locations: &[Location], stations: &[Coordinate]) -> Result<Assignment> {
    if stations.is_empty() {
        return Err(SpeimapError::EmptyCandidateSet);
    }

    let mut matches = BTreeMap::new();
    for location in locations {
        let found = nearest_station(&location.coordinate, stations)?;
        matches.insert(location.name.clone(), found);
    }

    Ok(Assignment { matches })
}
