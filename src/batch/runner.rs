//! # 批量执行器
//!
//! 并行执行批量报告任务，保留每个文件的类型化结果。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果顺序与输入顺序一致
//! - 进度条显示
//! - 成功/失败统计与失败详情汇总
//!
//! ## 依赖关系
//! - 被 `commands/report.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行计算

use crate::error::Result;
use crate::utils::progress;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// 成功数量
    pub success: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情 (文件路径, 错误信息)
    pub failures: Vec<(String, String)>,
}

impl BatchSummary {
    /// 从带类型结果列表汇总
    pub fn from_results<T>(results: &[(PathBuf, Result<T>)]) -> Self {
        let mut summary = BatchSummary::default();
        for (path, result) in results {
            match result {
                Ok(_) => summary.success += 1,
                Err(e) => {
                    summary.failed += 1;
                    summary
                        .failures
                        .push((path.display().to_string(), e.to_string()));
                }
            }
        }
        summary
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.success + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器，`jobs == 0` 表示用全部 CPU
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    /// 并行处理文件列表
    ///
    /// 返回值与输入文件一一对应且顺序一致，组合文档按输入顺序
    /// 拼接时依赖这一点。
    pub fn run<T, F>(&self, files: Vec<PathBuf>, label: &str, processor: F) -> Vec<(PathBuf, Result<T>)>
    where
        T: Send,
        F: Fn(&Path) -> Result<T> + Sync + Send,
    {
        let pb = progress::create_progress_bar(files.len() as u64, label);

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .unwrap();

        let results: Vec<(PathBuf, Result<T>)> = pool.install(|| {
            files
                .into_par_iter()
                .map(|file| {
                    let result = processor(&file);
                    pb.inc(1);
                    (file, result)
                })
                .collect()
        });

        pb.finish_and_clear();
        results
    }
}
