//! # convert 子命令 CLI 定义
//!
//! 批量把量化计算输出的几何数据转换成坐标文本 (.xyz/.pdb)
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/convert.rs`

use crate::extract::DEFAULT_PARSE_COMMAND;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 支持的输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain-text cartesian coordinates
    Xyz,
    /// Fixed-column structure file
    Pdb,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Xyz => write!(f, "xyz"),
            OutputFormat::Pdb => write!(f, "pdb"),
        }
    }
}

/// convert 子命令参数
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input file or directory containing QM output files
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for converted files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Target output format
    #[arg(short, long, value_enum)]
    pub target: OutputFormat,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Glob pattern for input files (defaults to all supported extensions)
    #[arg(short = 'g', long)]
    pub pattern: Option<String>,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,

    /// External parser command printing a JSON attribute dump
    #[arg(long, default_value = DEFAULT_PARSE_COMMAND)]
    pub parser: String,
}
