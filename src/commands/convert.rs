//! # convert 命令实现
//!
//! 批量把量化计算输出的几何数据转换成坐标文本。
//!
//! ## 功能
//! - 提取输入文件的原子符号和坐标
//! - 转换为 .xyz（纯文本坐标块）或 .pdb（固定列宽结构块）
//! - 支持并行处理
//! - 已存在的输出默认跳过
//!
//! ## 依赖关系
//! - 使用 `cli/convert.rs` 定义的参数
//! - 使用 `batch/`, `extract/`, `formats/`
//! - 使用 `utils/output.rs`, `utils/progress.rs`

use crate::batch::FileCollector;
use crate::cli::convert::{ConvertArgs, OutputFormat};
use crate::error::{Result, SigenError};
use crate::extract;
use crate::formats;
use crate::utils::{output, progress};

use rayon::prelude::*;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 执行 convert 命令
pub fn execute(args: ConvertArgs) -> Result<()> {
    output::print_header(&format!("Converting to {} format", args.target));

    // 验证输入
    if !args.input.exists() {
        return Err(SigenError::InputNotFound {
            path: args.input.display().to_string(),
        });
    }

    // 创建输出目录
    fs::create_dir_all(&args.output).map_err(|e| SigenError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    // 收集输入文件
    let mut collector = FileCollector::new(args.input.clone()).recursive(args.recursive);
    if let Some(ref pattern) = args.pattern {
        collector = collector.with_pattern(pattern);
    }
    let files = collector.collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No convertible files found under {}",
            args.input.display()
        ));
        return Ok(());
    }

    output::print_info(&format!("Found {} files to convert", files.len()));

    // 设置并行度
    let num_threads = if args.jobs == 0 {
        num_cpus::get()
    } else {
        args.jobs
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok();

    let pb = progress::create_progress_bar(files.len() as u64, "Converting");
    let success_count = AtomicUsize::new(0);
    let skip_count = AtomicUsize::new(0);

    // 并行处理
    files.par_iter().for_each(|input_path| {
        let result = convert_one(
            input_path,
            &args.output,
            args.target,
            args.overwrite,
            &args.parser,
        );

        match result {
            Ok(ConvertStatus::Success) => {
                success_count.fetch_add(1, Ordering::SeqCst);
            }
            Ok(ConvertStatus::Skipped) => {
                skip_count.fetch_add(1, Ordering::SeqCst);
                pb.suspend(|| {
                    output::print_skip(&format!("{} (output exists)", input_path.display()));
                });
            }
            Err(e) => {
                pb.suspend(|| {
                    output::print_error(&format!("{}: {}", input_path.display(), e));
                });
            }
        }
        pb.inc(1);
    });

    pb.finish_with_message("Done");

    output::print_done(&format!(
        "Converted {} file(s) to '{}' in '{}' ({} skipped)",
        success_count.load(Ordering::SeqCst),
        args.target,
        args.output.display(),
        skip_count.load(Ordering::SeqCst)
    ));

    Ok(())
}

enum ConvertStatus {
    Success,
    Skipped,
}

/// 转换单个文件
fn convert_one(
    input_path: &Path,
    output_dir: &Path,
    target: OutputFormat,
    overwrite: bool,
    parse_command: &str,
) -> Result<ConvertStatus> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("molecule");

    let output_path = match target {
        OutputFormat::Xyz => output_dir.join(format!("{}.xyz", stem)),
        OutputFormat::Pdb => output_dir.join(format!("{}.pdb", stem)),
    };

    // 检查是否需要跳过
    if output_path.exists() && !overwrite {
        return Ok(ConvertStatus::Skipped);
    }

    // 提取属性包
    let bag = extract::extract_file(input_path, parse_command)?;
    let (atoms, coordinates) = match (bag.atoms(), bag.coordinates()) {
        (Some(atoms), Some(coordinates)) => (atoms, coordinates),
        _ => {
            return Err(SigenError::ParseError {
                format: "geometry".to_string(),
                path: input_path.display().to_string(),
                reason: "no atoms/coordinates in extracted data".to_string(),
            })
        }
    };

    // 转换为目标格式
    let content = match target {
        OutputFormat::Xyz => formats::to_xyz_block(atoms, coordinates),
        OutputFormat::Pdb => formats::to_pdb_block(atoms, coordinates),
    };

    // 写入文件
    fs::write(&output_path, content).map_err(|e| SigenError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(ConvertStatus::Success)
}
