//! # templates 命令实现
//!
//! 列出内置报告模板；`--show <name>` 打印单个模板源码，
//! 方便以它为底稿定制。
//!
//! ## 依赖关系
//! - 使用 `cli/templates.rs` 定义的参数
//! - 使用 `render/templates.rs`

use crate::cli::templates::TemplatesArgs;
use crate::error::{Result, SigenError};
use crate::render::templates;
use crate::utils::output;

/// 执行 templates 命令
pub fn execute(args: TemplatesArgs) -> Result<()> {
    if let Some(ref name) = args.show {
        let source = templates::builtin(name).ok_or_else(|| {
            SigenError::InvalidArgument(format!(
                "Unknown template '{}'. Available: {}",
                name,
                templates::names().join(", ")
            ))
        })?;
        print!("{}", source);
        return Ok(());
    }

    output::print_header("Built-in Report Templates");
    for name in templates::names() {
        println!("  {}", name);
    }
    println!();
    output::print_info("Use --show <name> to print a template body");
    Ok(())
}
