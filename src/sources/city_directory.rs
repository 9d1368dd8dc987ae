//! # 市镇坐标目录
//!
//! 读取全部已知市镇（区域编码、名称、经度、纬度），先按区域编码前缀
//! 缩小范围，再按关注的名称集合缩小，最后提供 名称 → 坐标 的查询。
//!
//! ## 支持格式
//! - 分隔文本（CSV 等，分隔符可配置）
//! - 工作簿（`.xlsx` / `.xlsm` / `.xls` / `.ods`，读取第一个工作表）
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 使用
//! - 使用 `parsers/` 解析坐标值
//! - 使用 `csv` crate 读取文本表格，`calamine` crate 读取工作簿

use crate::error::{Result, SpeimapError};
use crate::models::{canonical_name, Coordinate, Location};
use crate::parsers::{delimiter_byte, find_column, parse_coordinate_value};

use calamine::{open_workbook_auto, Data, Reader};
use csv::StringRecord;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 区域编码列
pub const CODE_COLUMN: &str = "GEOCODIGO_MUNICIPIO";
/// 市镇名称列
pub const NAME_COLUMN: &str = "NOME_MUNICIPIO";
pub const LONGITUDE_COLUMN: &str = "LONGITUDE";
pub const LATITUDE_COLUMN: &str = "LATITUDE";

/// 按工作簿读取的文件扩展名
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];

/// 市镇坐标目录
#[derive(Debug, Clone)]
pub struct CoordinateDirectory {
    /// 来源（文件路径），用于错误信息
    origin: String,
    locations: Vec<Location>,
}

impl CoordinateDirectory {
    /// 从文件加载
    pub fn load(path: &Path, delimiter: char) -> Result<Self> {
        if !path.exists() {
            return Err(SpeimapError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        if is_workbook(path) {
            return Self::from_workbook(path);
        }

        let file = File::open(path).map_err(|e| SpeimapError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_reader(file, delimiter, &path.display().to_string())
    }

    /// 从任意读取器加载，`origin` 仅用于错误信息
    pub fn from_reader<R: Read>(reader: R, delimiter: char, origin: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(delimiter_byte(delimiter)?)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| SpeimapError::parse("CSV", origin, e.to_string()))?
            .clone();

        let records = rdr
            .into_records()
            .map(|record| record.map_err(|e| SpeimapError::parse("CSV", origin, e.to_string())));

        Self::from_records(&headers, records, "CSV", origin)
    }

    /// 从工作簿的第一个工作表加载
    pub fn from_workbook(path: &Path) -> Result<Self> {
        let origin = path.display().to_string();

        let mut workbook = open_workbook_auto(path)
            .map_err(|e| SpeimapError::parse("XLSX", &origin, e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SpeimapError::parse("XLSX", &origin, "workbook has no worksheets"))?
            .map_err(|e| SpeimapError::parse("XLSX", &origin, e.to_string()))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_text).collect::<StringRecord>());

        let headers = rows
            .next()
            .ok_or_else(|| SpeimapError::parse("XLSX", &origin, "worksheet is empty"))?;

        Self::from_records(&headers, rows.map(Ok), "XLSX", &origin)
    }

    /// 由表头与数据行构造，文本表格与工作簿共用
    fn from_records<I>(
        headers: &StringRecord,
        records: I,
        format: &str,
        origin: &str,
    ) -> Result<Self>
    where
        I: Iterator<Item = Result<StringRecord>>,
    {
        let code_idx = find_column(headers, CODE_COLUMN, origin)?;
        let name_idx = find_column(headers, NAME_COLUMN, origin)?;
        let lon_idx = find_column(headers, LONGITUDE_COLUMN, origin)?;
        let lat_idx = find_column(headers, LATITUDE_COLUMN, origin)?;

        let mut locations = Vec::new();

        for (row, record) in records.enumerate() {
            let record = record?;
            // 表头占第 1 行
            let line = row + 2;
            let field = |idx: usize| record.get(idx).unwrap_or("");

            let name = field(name_idx);
            if name.is_empty() {
                return Err(SpeimapError::parse(
                    format,
                    origin,
                    format!("line {}: empty {}", line, NAME_COLUMN),
                ));
            }

            let longitude = parse_coordinate_value(field(lon_idx)).map_err(|reason| {
                SpeimapError::parse(format, origin, format!("line {}: {}", line, reason))
            })?;
            let latitude = parse_coordinate_value(field(lat_idx)).map_err(|reason| {
                SpeimapError::parse(format, origin, format!("line {}: {}", line, reason))
            })?;

            locations.push(Location::new(
                canonical_region_code(field(code_idx)),
                name,
                Coordinate::new(longitude, latitude),
            ));
        }

        Ok(Self::from_locations(locations, origin))
    }

    /// 由已有市镇列表构造
    pub fn from_locations(locations: Vec<Location>, origin: &str) -> Self {
        CoordinateDirectory {
            origin: origin.to_string(),
            locations,
        }
    }

    /// 只保留区域编码以 `prefix` 开头的市镇
    ///
    /// 没有匹配项不是错误。区域内的重名不在此检查，
    /// 只有关注的名称需要唯一，见 [`ensure_unique_names`](Self::ensure_unique_names)。
    pub fn filter_by_region_prefix(&mut self, prefix: &str) {
        self.locations
            .retain(|loc| loc.region_code.starts_with(prefix));
    }

    /// 只保留名称在集合中的市镇
    pub fn filter_by_name_set(&mut self, names: &BTreeSet<String>) {
        self.locations.retain(|loc| names.contains(&loc.name));
    }

    /// 检查剩余市镇的名称是否唯一
    pub fn ensure_unique_names(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for loc in &self.locations {
            if !seen.insert(loc.name.as_str()) {
                return Err(SpeimapError::DuplicateLocation {
                    name: loc.name.clone(),
                    path: self.origin.clone(),
                });
            }
        }

        Ok(())
    }

    /// 按名称查询坐标
    pub fn lookup(&self, name: &str) -> Result<Coordinate> {
        let name = canonical_name(name);
        let mut matches = self.locations.iter().filter(|loc| loc.name == name);

        let first = matches
            .next()
            .ok_or_else(|| SpeimapError::LocationNotFound { name: name.clone() })?;

        let extra = matches.count();
        if extra > 0 {
            return Err(SpeimapError::AmbiguousLocation {
                name,
                count: extra + 1,
            });
        }

        Ok(first.coordinate)
    }

    /// 返回集合中不在目录里的名称
    pub fn missing_names(&self, names: &BTreeSet<String>) -> Vec<String> {
        names
            .iter()
            .filter(|name| !self.locations.iter().any(|loc| &loc.name == *name))
            .cloned()
            .collect()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// 是否按工作簿读取
fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
        .unwrap_or(false)
}

/// 工作簿单元格的文本形式
///
/// 数值单元格按 `f64` 最短形式输出，整数编码 `3106200.0` 写作 `3106200`。
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => format!("{:?}", other),
    }
}

/// 区域编码的规范文本形式
///
/// 表格导出工具常把整数编码写成 `3106200.0`，这里还原为 `3106200`。
pub fn canonical_region_code(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.contains('.') {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
                return format!("{}", value as i64);
            }
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE,LATITUDE
310010,Abadia dos Dourados,-47.3916,-18.4831
310020,Abaeté,-45.4444,-19.1551
320020,Afonso Cláudio,-41.1261,-20.0778
3106200.0,Belo Horizonte,-43.9378,-19.9167
";

    fn sample() -> CoordinateDirectory {
        CoordinateDirectory::from_reader(SAMPLE.as_bytes(), ',', "sample.csv").unwrap()
    }

    fn names(dir: &CoordinateDirectory) -> Vec<&str> {
        dir.locations().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_load_uppercases_and_canonicalises() {
        let dir = sample();
        assert_eq!(dir.len(), 4);
        assert_eq!(dir.locations()[1].name, "ABAETÉ");
        assert_eq!(dir.locations()[3].region_code, "3106200");
        assert_eq!(
            dir.lookup("belo horizonte").unwrap(),
            Coordinate::new(-43.9378, -19.9167)
        );
    }

    #[test]
    fn test_filter_by_region_prefix() {
        let csv = "\
GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE,LATITUDE
310010,A,-44.0,-15.0
320020,B,-40.0,-20.0
";
        let mut dir = CoordinateDirectory::from_reader(csv.as_bytes(), ',', "t.csv").unwrap();
        dir.filter_by_region_prefix("31");
        assert_eq!(names(&dir), vec!["A"]);
    }

    #[test]
    fn test_filter_by_region_prefix_no_match_is_empty() {
        let mut dir = sample();
        dir.filter_by_region_prefix("99");
        assert!(dir.is_empty());
    }

    #[test]
    fn test_filter_by_name_set() {
        let mut dir = sample();
        dir.filter_by_region_prefix("31");

        let wanted: BTreeSet<String> = ["ABAETÉ", "BELO HORIZONTE", "AFONSO CLÁUDIO"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        dir.filter_by_name_set(&wanted);

        // AFONSO CLÁUDIO 已被区域过滤掉
        assert_eq!(names(&dir), vec!["ABAETÉ", "BELO HORIZONTE"]);
        assert_eq!(dir.missing_names(&wanted), vec!["AFONSO CLÁUDIO".to_string()]);
    }

    #[test]
    fn test_lookup_missing() {
        let dir = sample();
        assert!(matches!(
            dir.lookup("Contagem"),
            Err(SpeimapError::LocationNotFound { name }) if name == "CONTAGEM"
        ));
    }

    #[test]
    fn test_duplicate_names_across_regions() {
        let csv = "\
GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE,LATITUDE
310010,Bonito,-44.0,-15.0
500020,Bonito,-56.4,-21.1
";
        let mut dir = CoordinateDirectory::from_reader(csv.as_bytes(), ',', "t.csv").unwrap();
        assert!(matches!(
            dir.lookup("BONITO"),
            Err(SpeimapError::AmbiguousLocation { count: 2, .. })
        ));

        dir.filter_by_region_prefix("31");
        assert_eq!(dir.lookup("BONITO").unwrap(), Coordinate::new(-44.0, -15.0));
    }

    #[test]
    fn test_duplicate_names_within_region() {
        let csv = "\
GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE,LATITUDE
310010,Bonito,-44.0,-15.0
310020,BONITO,-44.5,-15.5
";
        let mut dir = CoordinateDirectory::from_reader(csv.as_bytes(), ',', "t.csv").unwrap();
        dir.filter_by_region_prefix("31");
        dir.filter_by_name_set(&["BONITO".to_string()].into_iter().collect());
        assert!(matches!(
            dir.ensure_unique_names(),
            Err(SpeimapError::DuplicateLocation { name, .. }) if name == "BONITO"
        ));
    }

    #[test]
    fn test_unrelated_duplicate_passes_region_filter() {
        let csv = "\
GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE,LATITUDE
310010,A,-44.0,-15.0
310020,Bonito,-44.5,-15.5
350020,Bonito,-47.1,-22.3
";
        let mut dir = CoordinateDirectory::from_reader(csv.as_bytes(), ',', "t.csv").unwrap();
        dir.filter_by_region_prefix("3");
        assert_eq!(dir.len(), 3);

        dir.filter_by_name_set(&["A".to_string()].into_iter().collect());
        dir.ensure_unique_names().unwrap();
        assert_eq!(dir.lookup("A").unwrap(), Coordinate::new(-44.0, -15.0));
    }

    #[test]
    fn test_missing_column() {
        let csv = "GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE\n310010,A,-44.0\n";
        let result = CoordinateDirectory::from_reader(csv.as_bytes(), ',', "t.csv");
        assert!(matches!(
            result,
            Err(SpeimapError::MissingColumn { column, .. }) if column == LATITUDE_COLUMN
        ));
    }

    #[test]
    fn test_malformed_coordinate() {
        let csv = "GEOCODIGO_MUNICIPIO,NOME_MUNICIPIO,LONGITUDE,LATITUDE\n310010,A,west,-15.0\n";
        let result = CoordinateDirectory::from_reader(csv.as_bytes(), ',', "t.csv");
        assert!(matches!(result, Err(SpeimapError::ParseError { .. })));
    }

    #[test]
    fn test_semicolon_with_comma_decimals() {
        let csv = "GEOCODIGO_MUNICIPIO;NOME_MUNICIPIO;LONGITUDE;LATITUDE\n310010;A;-44,5;-15,25\n";
        let dir = CoordinateDirectory::from_reader(csv.as_bytes(), ';', "t.csv").unwrap();
        assert_eq!(dir.lookup("A").unwrap(), Coordinate::new(-44.5, -15.25));
    }

    #[test]
    fn test_load_missing_file() {
        let result = CoordinateDirectory::load(Path::new("/nonexistent/cities.csv"), ',');
        assert!(matches!(result, Err(SpeimapError::FileNotFound { .. })));
    }

    #[test]
    fn test_load_workbook() {
        use rust_xlsxwriter::Workbook;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("CoordenadasMunicipios.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in [CODE_COLUMN, NAME_COLUMN, LONGITUDE_COLUMN, LATITUDE_COLUMN]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        sheet.write_number(1, 0, 3106200.0).unwrap();
        sheet.write_string(1, 1, "Belo Horizonte").unwrap();
        sheet.write_number(1, 2, -43.9378).unwrap();
        sheet.write_number(1, 3, -19.9167).unwrap();
        sheet.write_number(2, 0, 3550308.0).unwrap();
        sheet.write_string(2, 1, "São Paulo").unwrap();
        sheet.write_number(2, 2, -46.6333).unwrap();
        sheet.write_number(2, 3, -23.5505).unwrap();
        workbook.save(&path).unwrap();

        // 分隔符参数对工作簿无效
        let mut dir = CoordinateDirectory::load(&path, ';').unwrap();
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.locations()[0].region_code, "3106200");
        assert_eq!(dir.locations()[1].name, "SÃO PAULO");

        dir.filter_by_region_prefix("31");
        assert_eq!(
            dir.lookup("Belo Horizonte").unwrap(),
            Coordinate::new(-43.9378, -19.9167)
        );
    }

    #[test]
    fn test_workbook_missing_column() {
        use rust_xlsxwriter::Workbook;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cities.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, CODE_COLUMN).unwrap();
        sheet.write_string(0, 1, NAME_COLUMN).unwrap();
        workbook.save(&path).unwrap();

        assert!(matches!(
            CoordinateDirectory::load(&path, ','),
            Err(SpeimapError::MissingColumn { column, .. }) if column == LONGITUDE_COLUMN
        ));
    }

    #[test]
    fn test_is_workbook() {
        assert!(is_workbook(Path::new("CoordenadasMunicipios.xlsx")));
        assert!(is_workbook(Path::new("cities.XLS")));
        assert!(!is_workbook(Path::new("cities.csv")));
        assert!(!is_workbook(Path::new("cities")));
    }

    #[test]
    fn test_canonical_region_code() {
        assert_eq!(canonical_region_code("3106200.0"), "3106200");
        assert_eq!(canonical_region_code(" 310010 "), "310010");
        assert_eq!(canonical_region_code("31.5"), "31.5");
    }
}
