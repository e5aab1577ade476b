//! # 属性提取模块
//!
//! 把量子化学输入文件变成属性包。提取器是黑盒协作方：核心只关心
//! `Extract` 契约，不做格式嗅探，也不做内容恢复。
//!
//! 按扩展名分发到两种适配器：
//! - `json` / `cjson`: 属性转储文件，直接反序列化（见 `dump`）
//! - `out` / `log` / `qfi`: 计算程序日志，交给外部解析命令（见 `command`）
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `delivery/` 使用
//! - 使用 `models/` 数据模型
//! - 子模块: dump, command

pub mod command;
pub mod dump;

use crate::error::{Result, SigenError};
use crate::models::{AttributeBag, Molecule};
use std::path::Path;

pub use command::ExternalParser;
pub use dump::DumpReader;

/// 外部解析命令的默认名称
pub const DEFAULT_PARSE_COMMAND: &str = "ccdump";

/// 属性转储文件扩展名
pub const DUMP_EXTENSIONS: [&str; 2] = ["json", "cjson"];

/// 计算程序日志扩展名
pub const LOG_EXTENSIONS: [&str; 3] = ["out", "log", "qfi"];

/// 提取器契约：给定文件路径，产出属性包
pub trait Extract {
    fn extract(&self, path: &Path) -> Result<AttributeBag>;
}

/// 判断扩展名是否受支持（收集输入文件时用）
pub fn is_supported(path: &Path) -> bool {
    let ext = lowercase_extension(path);
    DUMP_EXTENSIONS.contains(&ext.as_str()) || LOG_EXTENSIONS.contains(&ext.as_str())
}

/// 从文件路径推断格式并提取属性包
///
/// 仅两种情况致命：文件不存在、扩展名无法识别。其余失败
/// （命令出错、转储损坏）原样向上传播。
pub fn extract_file(path: &Path, parse_command: &str) -> Result<AttributeBag> {
    if !path.is_file() {
        return Err(SigenError::InputNotFound {
            path: path.display().to_string(),
        });
    }

    let ext = lowercase_extension(path);
    if DUMP_EXTENSIONS.contains(&ext.as_str()) {
        DumpReader.extract(path)
    } else if LOG_EXTENSIONS.contains(&ext.as_str()) {
        ExternalParser::new(parse_command).extract(path)
    } else {
        Err(SigenError::UnrecognizedFormat {
            path: path.display().to_string(),
        })
    }
}

/// 提取并打包成分子模型
pub fn extract_molecule(path: &Path, parse_command: &str) -> Result<Molecule> {
    let bag = extract_file(path, parse_command)?;
    Ok(Molecule::new(path, bag))
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default()
}
