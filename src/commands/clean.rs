//! # clean 命令实现
//!
//! 清理上传根目录下的过期会话。单次扫描后退出；`--watch` 模式
//! 驻留前台，按固定间隔反复扫描，对应网页部署里的后台清理任务。
//!
//! ## 依赖关系
//! - 使用 `cli/clean.rs` 定义的参数
//! - 使用 `delivery/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::cli::clean::CleanArgs;
use crate::delivery::SessionStore;
use crate::error::{Result, SigenError};
use crate::utils::{output, progress};

use std::time::Duration;

/// 执行 clean 命令
pub fn execute(args: CleanArgs) -> Result<()> {
    if !args.uploads.is_dir() {
        return Err(SigenError::DirectoryNotFound {
            path: args.uploads.display().to_string(),
        });
    }

    let max_age = Duration::from_secs(args.max_age_hours * 60 * 60);
    let store = SessionStore::with_max_age(&args.uploads, max_age);

    if !args.watch {
        let removed = store.sweep()?;
        output::print_done(&format!(
            "Removed {} expired session(s) from '{}'",
            removed,
            args.uploads.display()
        ));
        return Ok(());
    }

    // 驻留模式：先扫一轮，之后按间隔循环
    let interval = Duration::from_secs(args.interval_hours * 60 * 60);
    output::print_info(&format!(
        "Watching '{}' (max age {}h, sweeping every {}h)",
        args.uploads.display(),
        args.max_age_hours,
        args.interval_hours
    ));

    loop {
        match store.sweep() {
            Ok(0) => {}
            Ok(removed) => {
                output::print_success(&format!("Removed {} expired session(s)", removed));
            }
            Err(e) => {
                output::print_error(&format!("Sweep failed: {}", e));
            }
        }

        let spinner = progress::create_spinner("Waiting for next sweep");
        std::thread::sleep(interval);
        spinner.finish_and_clear();
    }
}
