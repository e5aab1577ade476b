//! # 数据模型模块
//!
//! 定义统一的属性包和分子数据模型。
//!
//! ## 依赖关系
//! - 被 `extract/`, `render/` 和 `commands/` 使用
//! - 子模块: attributes, molecule

pub mod attributes;
pub mod molecule;

pub use attributes::{AttrValue, AttributeBag};
pub use molecule::Molecule;
