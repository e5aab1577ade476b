//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `extract/`, `render/`, `delivery/`, `utils/`
//! - 子模块: report, convert, templates, clean

pub mod clean;
pub mod convert;
pub mod report;
pub mod templates;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Report(args) => report::execute(args),
        Commands::Convert(args) => convert::execute(args),
        Commands::Templates(args) => templates::execute(args),
        Commands::Clean(args) => clean::execute(args),
    }
}
