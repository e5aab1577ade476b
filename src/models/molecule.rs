//! # 分子报告数据模型
//!
//! 单个输入文件对应一个 `Molecule`：持有提取到的属性包和来源文件标识，
//! 派生文本块（坐标块 / 结构块）按需从属性包计算。
//!
//! ## 依赖关系
//! - 被 `render/`, `delivery/`, `commands/` 使用
//! - 使用 `models/attributes.rs`, `formats/`

use crate::formats::{pdb, xyz};
use crate::models::AttributeBag;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// 单个输入文件的提取结果
#[derive(Debug, Clone)]
pub struct Molecule {
    /// 显示名称（文件主干名）
    pub name: String,

    /// 带扩展名的文件名，伴随结构文件以此命名
    pub basename: String,

    /// 来源文件路径
    pub path: PathBuf,

    /// 提取到的属性包，构造后不再修改
    bag: AttributeBag,
}

impl Molecule {
    pub fn new(path: impl Into<PathBuf>, bag: AttributeBag) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();
        let basename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        Molecule {
            name,
            basename,
            path,
            bag,
        }
    }

    pub fn attributes(&self) -> &AttributeBag {
        &self.bag
    }

    /// 原子数（原子符号序列可用时）
    pub fn num_atoms(&self) -> Option<usize> {
        self.bag.atoms().map(|a| a.len())
    }

    /// 计算化学式
    pub fn formula(&self) -> Option<String> {
        let atoms = self.bag.atoms()?;
        if atoms.is_empty() {
            return None;
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for element in atoms {
            *counts.entry(element.as_str()).or_insert(0) += 1;
        }

        Some(
            counts
                .into_iter()
                .map(|(el, count)| {
                    if count == 1 {
                        el.to_string()
                    } else {
                        format!("{}{}", el, count)
                    }
                })
                .collect::<Vec<_>>()
                .join(""),
        )
    }

    /// 纯文本三维坐标块；原子或坐标不可用时为 None
    pub fn coordinate_block(&self) -> Option<String> {
        let atoms = self.bag.atoms()?;
        let coords = self.bag.coordinates()?;
        Some(xyz::to_xyz_block(atoms, coords))
    }

    /// 固定列宽结构文件文本块；原子或坐标不可用时为 None
    pub fn structure_block(&self) -> Option<String> {
        let atoms = self.bag.atoms()?;
        let coords = self.bag.coordinates()?;
        Some(pdb::to_pdb_block(atoms, coords))
    }

    /// 伴随结构文件的文件名
    pub fn structure_filename(&self) -> String {
        format!("{}.pdb", self.basename)
    }
}

#[cfg(test)]
impl Molecule {
    /// 测试用：仅凭名字和属性包构造（无真实文件路径）
    pub fn from_parts(name: impl Into<String>, bag: AttributeBag) -> Self {
        let name = name.into();
        let basename = name.clone();
        Molecule {
            name,
            basename,
            path: PathBuf::new(),
            bag,
        }
    }
}
