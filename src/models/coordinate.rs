//! # 坐标数据模型
//!
//! 经纬度坐标，以及网格站点列名 `X,<经度>,<纬度>` 的规范化格式。
//!
//! ## 依赖关系
//! - 被 `sources/`, `locator/`, `export/` 使用
//! - 无外部模块依赖

/// 站点列名前缀
pub const STATION_HEADER_PREFIX: &str = "X,";

/// 地理坐标（度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Coordinate {
            longitude,
            latitude,
        }
    }

    /// 平面欧氏距离，按 (纬度, 经度) 成对比较
    pub fn planar_distance(&self, other: &Coordinate) -> f64 {
        let d_lat = self.latitude - other.latitude;
        let d_lon = self.longitude - other.longitude;
        (d_lat * d_lat + d_lon * d_lon).sqrt()
    }

    /// 重建规范化的站点列名
    ///
    /// `f64` 的 `Display` 输出最短可往返表示，因此由列名解析出的坐标
    /// 再格式化后总能得到同一个键。网格按此键索引各列。
    pub fn station_header(&self) -> String {
        format!(
            "{}{},{}",
            STATION_HEADER_PREFIX, self.longitude, self.latitude
        )
    }
}
