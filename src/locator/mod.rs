//! # 站点定位模块
//!
//! 为每个关注市镇找到网格中最近的测量站点。
//!
//! ## 依赖关系
//! - 被 `commands/pipeline.rs` 使用
//! - 使用 `models/`
//! - 子模块: nearest

pub mod nearest;

pub use nearest::{resolve, Assignment};
