//! # 外部解析命令适配器
//!
//! 计算程序日志的解析交给外部命令完成：`<command> <path>` 在标准输出
//! 打印 JSON 属性转储。命令本身可通过 CLI `--parser` 覆盖，便于接入
//! 不同的解析工具链。

use crate::error::{Result, SigenError};
use crate::extract::Extract;
use crate::models::AttributeBag;
use std::path::Path;
use std::process::Command;

/// 调用外部解析命令的提取器
pub struct ExternalParser {
    command: String,
}

impl ExternalParser {
    pub fn new(command: impl Into<String>) -> Self {
        ExternalParser {
            command: command.into(),
        }
    }
}

impl Extract for ExternalParser {
    fn extract(&self, path: &Path) -> Result<AttributeBag> {
        let result = Command::new(&self.command).arg(path).output();

        match result {
            Ok(output) if output.status.success() => {
                let text = String::from_utf8_lossy(&output.stdout);
                serde_json::from_str(&text).map_err(|e| SigenError::ParseError {
                    format: "attribute dump".to_string(),
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
            Ok(output) => Err(SigenError::CommandFailed {
                command: format!("{} {}", self.command, path.display()),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
            Err(_) => Err(SigenError::CommandNotFound {
                command: self.command.clone(),
            }),
        }
    }
}
