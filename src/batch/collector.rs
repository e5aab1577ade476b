//! # 输入文件收集器
//!
//! 根据输入路径和模式收集待处理的计算输出文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - glob 模式匹配，默认匹配全部受支持的输入扩展名
//! - 递归目录搜索
//! - 结果按路径排序，保证批量报告顺序稳定
//!
//! ## 依赖关系
//! - 被 `commands/report.rs` 和 `commands/convert.rs` 调用
//! - 使用 `walkdir` 遍历目录，`glob` 做模式匹配

use crate::error::{Result, SigenError};
use crate::extract::{DUMP_EXTENSIONS, LOG_EXTENSIONS};
use std::path::PathBuf;
use walkdir::WalkDir;

/// 输入文件收集器
pub struct FileCollector {
    /// 输入路径（文件或目录）
    input: PathBuf,
    /// 匹配模式列表
    patterns: Vec<String>,
    /// 是否递归
    recursive: bool,
}

impl FileCollector {
    /// 创建收集器，默认匹配全部受支持的输入扩展名
    pub fn new(input: PathBuf) -> Self {
        let patterns = LOG_EXTENSIONS
            .iter()
            .chain(DUMP_EXTENSIONS.iter())
            .map(|ext| format!("*.{}", ext))
            .collect();
        Self {
            input,
            patterns,
            recursive: false,
        }
    }

    /// 覆盖匹配模式（逗号分隔的多模式）
    pub fn with_pattern(mut self, pattern: &str) -> Self {
        let patterns: Vec<String> = pattern
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if !patterns.is_empty() {
            self.patterns = patterns;
        }
        self
    }

    /// 设置是否递归搜索
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// 收集所有匹配的文件，按路径排序
    ///
    /// 单文件输入原样返回，不做模式检查：用户点名的文件交给
    /// 提取器去判断格式。
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        if self.input.is_file() {
            return Ok(vec![self.input.clone()]);
        }

        if !self.input.is_dir() {
            return Err(SigenError::InputNotFound {
                path: self.input.display().to_string(),
            });
        }

        let mut matchers = Vec::new();
        for pattern in &self.patterns {
            let matcher = glob::Pattern::new(pattern).map_err(|e| {
                SigenError::InvalidArgument(format!("Invalid pattern '{}': {}", pattern, e))
            })?;
            matchers.push(matcher);
        }

        let max_depth = if self.recursive { usize::MAX } else { 1 };
        let mut files: Vec<PathBuf> = WalkDir::new(&self.input)
            .max_depth(max_depth)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_str()
                    .map(|name| matchers.iter().any(|m| m.matches(name)))
                    .unwrap_or(false)
            })
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(dir: &std::path::Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_single_file_passes_through() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("anything.xyz");
        fs::write(&path, "").unwrap();

        let files = FileCollector::new(path.clone()).collect().unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn test_default_patterns_cover_supported_inputs() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "a.out");
        touch(dir.path(), "b.qfi");
        touch(dir.path(), "c.log");
        touch(dir.path(), "d.json");
        touch(dir.path(), "e.cjson");
        touch(dir.path(), "skip.txt");

        let files = FileCollector::new(dir.path().to_path_buf())
            .collect()
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.out", "b.qfi", "c.log", "d.json", "e.cjson"]);
    }

    #[test]
    fn test_custom_pattern_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "water.out");
        touch(dir.path(), "water.json");

        let files = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("*.json")
            .collect()
            .unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("water.json"));
    }

    #[test]
    fn test_recursive_search() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("batch1");
        fs::create_dir(&nested).unwrap();
        touch(dir.path(), "top.out");
        touch(&nested, "deep.out");

        let flat = FileCollector::new(dir.path().to_path_buf())
            .collect()
            .unwrap();
        assert_eq!(flat.len(), 1);

        let deep = FileCollector::new(dir.path().to_path_buf())
            .recursive(true)
            .collect()
            .unwrap();
        assert_eq!(deep.len(), 2);
    }

    #[test]
    fn test_missing_input_fails() {
        let err = FileCollector::new(PathBuf::from("/no/such/dir"))
            .collect()
            .expect_err("missing input must fail");
        assert!(matches!(err, SigenError::InputNotFound { .. }));
    }

    #[test]
    fn test_bad_pattern_is_invalid_argument() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileCollector::new(dir.path().to_path_buf())
            .with_pattern("[")
            .collect()
            .expect_err("bad pattern must fail");
        assert!(matches!(err, SigenError::InvalidArgument(_)));
    }
}
