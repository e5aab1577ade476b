//! # clean 子命令 CLI 定义
//!
//! 清理上传根目录下的过期会话目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/clean.rs`

use crate::delivery::{DEFAULT_MAX_AGE, DEFAULT_SWEEP_INTERVAL};
use clap::Args;
use std::path::PathBuf;

/// clean 子命令参数
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Uploads root directory holding session folders
    #[arg(short, long, default_value = "uploads")]
    pub uploads: PathBuf,

    /// Delete sessions older than this many hours
    #[arg(long, default_value_t = DEFAULT_MAX_AGE.as_secs() / 3600)]
    pub max_age_hours: u64,

    /// Keep running and sweep at a fixed interval
    #[arg(long, default_value_t = false)]
    pub watch: bool,

    /// Sweep interval in hours when watching
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL.as_secs() / 3600)]
    pub interval_hours: u64,
}
