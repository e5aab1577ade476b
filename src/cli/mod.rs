//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `report`: 从量化计算输出生成支持信息报告
//! - `convert`: 几何数据转换为坐标/结构文本
//! - `templates`: 列出或查看内置报告模板
//! - `clean`: 清理过期上传会话
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: report, convert, templates, clean

pub mod clean;
pub mod convert;
pub mod report;
pub mod templates;

use clap::{Parser, Subcommand};

/// sigen - 量子化学支持信息生成器
#[derive(Parser)]
#[command(name = "sigen")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Supporting information generator for quantum chemistry publications", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Generate supporting-information reports from QM output files
    Report(report::ReportArgs),

    /// Convert parsed geometries to coordinate blocks (.xyz, .pdb)
    Convert(convert::ConvertArgs),

    /// List built-in report templates
    Templates(templates::TemplatesArgs),

    /// Remove expired upload sessions
    Clean(clean::CleanArgs),
}
