//! # templates 子命令 CLI 定义
//!
//! 列出内置报告模板，或查看单个模板的源码
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/templates.rs`

use clap::Args;

/// templates 子命令参数
#[derive(Args, Debug)]
pub struct TemplatesArgs {
    /// Print the body of one built-in template instead of listing all names
    #[arg(short, long)]
    pub show: Option<String>,
}
