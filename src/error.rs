//! # 统一错误处理模块
//!
//! 定义 sigen 的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 错误分级
//! - 致命：输入文件不存在、提取器无法识别/解析文件
//! - 内部恢复（不出现在此枚举中）：模板名解析失败回退为字面模板文本、
//!   数据字段缺失由哨兵值替换
//! - 透传：模板语法错误、外部命令失败、I/O 错误
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// sigen 统一错误类型
#[derive(Error, Debug)]
pub enum SigenError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 提取错误
    // ─────────────────────────────────────────────────────────────
    #[error("Cannot recognize input format: {path}")]
    UnrecognizedFormat { path: String },

    #[error("Failed to parse {format} data from: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 渲染错误
    // ─────────────────────────────────────────────────────────────
    #[error("Template error: {0}")]
    TemplateError(#[from] minijinja::Error),

    // ─────────────────────────────────────────────────────────────
    // 外部命令错误
    // ─────────────────────────────────────────────────────────────
    #[error("External command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    #[error("External command failed: {command}\n{stderr}")]
    CommandFailed { command: String, stderr: String },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 序列化错误
    // ─────────────────────────────────────────────────────────────
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("No matching files found with pattern: {pattern}")]
    NoFilesFound { pattern: String },

    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SigenError>;
