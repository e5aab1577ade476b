//! # 文本格式转换模块
//!
//! 把原子符号序列和笛卡尔坐标渲染成报告用的文本块：
//! - `xyz`: 纯文本坐标块（无原子数头两行，直接逐原子一行）
//! - `pdb`: 固定列宽的结构文件块，可作为伴随文件单独保存
//!
//! 两个转换器都要求符号与坐标一一对应，遵循 zip 语义截断多余项。
//!
//! ## 依赖关系
//! - 被 `models/molecule.rs` 和 `commands/` 使用

pub mod pdb;
pub mod xyz;

pub use pdb::to_pdb_block;
pub use xyz::to_xyz_block;
