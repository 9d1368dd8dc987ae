//! # 关注市镇索引
//!
//! 读取 JSON 分组文件 `{ "中心市镇": ["相邻市镇", ...] }`，所有名称转为大写。
//! 分组决定导出目录结构，名称并集用于缩小坐标目录。
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs`, `export/exporter.rs` 使用
//! - 使用 `serde_json` 读取 JSON

use crate::error::{Result, SpeimapError};
use crate::models::canonical_name;

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// 一个中心市镇及其相邻市镇
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterestGroup {
    pub central: String,
    /// 去重后的相邻市镇，保持文件中的顺序
    pub bordering: Vec<String>,
}

/// 关注市镇索引
#[derive(Debug, Clone, Default)]
pub struct InterestIndex {
    groups: Vec<InterestGroup>,
}

impl InterestIndex {
    /// 从 JSON 文件加载
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SpeimapError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path).map_err(|e| SpeimapError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_reader(BufReader::new(file), &path.display().to_string())
    }

    /// 从任意读取器加载，`origin` 仅用于错误信息
    pub fn from_reader<R: Read>(reader: R, origin: &str) -> Result<Self> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_reader(reader)
            .map_err(|e| SpeimapError::parse("JSON", origin, e.to_string()))?;

        Ok(Self::from_mapping(raw))
    }

    /// 由 中心 -> 相邻 映射构造
    ///
    /// 大写后相同的中心名合并；组内重复项以及与中心同名的相邻项被丢弃。
    pub fn from_mapping<I, S>(mapping: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<S>)>,
        S: AsRef<str>,
    {
        let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (central, bordering) in mapping {
            let central = canonical_name(central.as_ref());
            let entry = merged.entry(central.clone()).or_default();

            for name in bordering {
                let name = canonical_name(name.as_ref());
                if name != central && !entry.contains(&name) {
                    entry.push(name);
                }
            }
        }

        let groups = merged
            .into_iter()
            .map(|(central, bordering)| InterestGroup { central, bordering })
            .collect();

        InterestIndex { groups }
    }

    /// 中心与相邻市镇名称的并集
    pub fn all_location_names(&self) -> BTreeSet<String> {
        self.groups
            .iter()
            .flat_map(|g| std::iter::once(&g.central).chain(g.bordering.iter()))
            .cloned()
            .collect()
    }

    /// 中心市镇名称（自然顺序）
    pub fn central_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.central.as_str()).collect()
    }

    /// 某中心市镇的相邻市镇；未知中心返回空
    pub fn bordering_names(&self, central: &str) -> &[String] {
        let central = canonical_name(central);
        self.groups
            .iter()
            .find(|g| g.central == central)
            .map(|g| g.bordering.as_slice())
            .unwrap_or(&[])
    }

    pub fn groups(&self) -> &[InterestGroup] {
        &self.groups
    }

    /// 导出文件总数（每组一个中心文件加相邻文件）
    pub fn export_count(&self) -> usize {
        self.groups.iter().map(|g| 1 + g.bordering.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "Belo Horizonte": ["Contagem", "Sabará", "Nova Lima"],
        "Uberlândia": ["Araguari", "Contagem"]
    }"#;

    fn sample() -> InterestIndex {
        InterestIndex::from_reader(SAMPLE.as_bytes(), "cidades.json").unwrap()
    }

    #[test]
    fn test_load_uppercases() {
        let index = sample();
        assert_eq!(index.central_names(), vec!["BELO HORIZONTE", "UBERLÂNDIA"]);
        assert_eq!(
            index.bordering_names("BELO HORIZONTE"),
            &["CONTAGEM", "SABARÁ", "NOVA LIMA"]
        );
    }

    #[test]
    fn test_all_location_names() {
        let names = sample().all_location_names();
        let expected: BTreeSet<String> = [
            "BELO HORIZONTE",
            "CONTAGEM",
            "SABARÁ",
            "NOVA LIMA",
            "UBERLÂNDIA",
            "ARAGUARI",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_bordering_shared_across_groups() {
        let index = sample();
        assert!(index
            .bordering_names("Uberlândia")
            .contains(&"CONTAGEM".to_string()));
        assert!(index
            .bordering_names("BELO HORIZONTE")
            .contains(&"CONTAGEM".to_string()));
        assert_eq!(index.export_count(), 7);
    }

    #[test]
    fn test_unknown_central_is_empty() {
        assert!(sample().bordering_names("OURO PRETO").is_empty());
    }

    #[test]
    fn test_duplicates_and_case_merging() {
        let index = InterestIndex::from_mapping(vec![
            ("a", vec!["b", "B", "c", "a"]),
            ("A", vec!["d", "c"]),
        ]);
        assert_eq!(index.central_names(), vec!["A"]);
        assert_eq!(index.bordering_names("A"), &["B", "C", "D"]);
        assert_eq!(index.export_count(), 4);
    }

    #[test]
    fn test_group_without_bordering() {
        let index = InterestIndex::from_reader(r#"{"A": []}"#.as_bytes(), "t.json").unwrap();
        assert_eq!(index.central_names(), vec!["A"]);
        assert_eq!(index.export_count(), 1);
    }

    #[test]
    fn test_malformed_json() {
        let result = InterestIndex::from_reader(r#"{"A": "B"}"#.as_bytes(), "t.json");
        assert!(matches!(result, Err(SpeimapError::ParseError { .. })));
    }
}
