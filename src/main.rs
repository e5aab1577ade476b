//! # sigen - 量子化学支持信息生成器
//!
//! 解析量子化学计算输出，提取分子与能量数据，经模板渲染成
//! 论文级支持信息文档（Markdown/HTML，可选 3D 分子图像）。
//!
//! ## 子命令
//! - `report`    - 批量生成支持信息报告
//! - `convert`   - 几何数据转换 (.xyz, .pdb)
//! - `templates` - 列出或查看内置报告模板
//! - `clean`     - 清理过期上传会话
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── extract/   (属性提取)
//!   │     ├── render/    (报告渲染)
//!   │     ├── formats/   (坐标/结构文本块)
//!   │     └── delivery/  (上传会话与清理)
//!   ├── batch/      (批量收集与并行执行)
//!   ├── models/     (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod delivery;
mod error;
mod extract;
mod formats;
mod models;
mod render;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
