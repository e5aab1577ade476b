//! # report 子命令 CLI 定义
//!
//! 批量生成支持信息报告：提取、渲染、组合输出
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/report.rs`

use crate::extract::DEFAULT_PARSE_COMMAND;
use clap::Args;
use std::path::PathBuf;

/// report 子命令参数
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Input files or directories containing QM output files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Report template: built-in name, path to a template file, or literal template text
    #[arg(short, long, default_value = "default.md")]
    pub template: String,

    /// Write the combined report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Archive inputs and results as a new session under this uploads root
    #[arg(long, conflicts_with_all = ["output", "csv", "json", "pdb"])]
    pub store: Option<PathBuf>,

    /// Convert the rendered Markdown to HTML
    #[arg(long, default_value_t = false)]
    pub html: bool,

    /// Sentinel shown for missing data fields
    #[arg(long, default_value = "N/A")]
    pub missing: String,

    /// Render missing fields as empty instead of the sentinel
    #[arg(long, default_value_t = false)]
    pub hide_missing: bool,

    /// Render a 3D image per molecule (requires 'pymol' in PATH)
    #[arg(long, default_value_t = false)]
    pub render: bool,

    /// Write a companion .pdb structure file next to each input
    #[arg(long, default_value_t = false)]
    pub pdb: bool,

    /// External parser command printing a JSON attribute dump
    #[arg(long, default_value = DEFAULT_PARSE_COMMAND)]
    pub parser: String,

    /// Glob pattern for directory inputs (defaults to all supported extensions)
    #[arg(short = 'g', long)]
    pub pattern: Option<String>,

    /// Recurse into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Number of parallel jobs (0 = auto)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Write a per-molecule summary CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write the extracted attribute dumps as a JSON file
    #[arg(long)]
    pub json: Option<PathBuf>,
}
