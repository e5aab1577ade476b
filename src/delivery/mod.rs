//! # 交付层模块
//!
//! 管理上传会话的全生命周期：会话目录的创建与命名、上传文件落盘、
//! 输入收集、报告与伴随结构文件的持久化、过期会话的定期清理。
//! 会话身份和保存策略都归这里管，核心渲染流程不感知目录布局。
//!
//! 会话目录以 UUID 命名。清理只碰名字符合 UUID 形状的子目录，
//! 上传根目录与他人共享时不会误删无关文件。
//!
//! ## 依赖关系
//! - 被 `cli/` 和 `commands/` 使用
//! - 使用 `extract/`, `render/`, `models/`

use crate::error::{Result, SigenError};
use crate::extract;
use crate::models::Molecule;
use crate::render::{self, RenderImage, RenderedReport, ReportOptions};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

/// 会话目录的默认保留时长
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// 清理扫描的默认间隔
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(6 * 60 * 60);

/// 交付层接受的上传扩展名
pub const UPLOAD_EXTENSIONS: [&str; 2] = ["out", "qfi"];

/// 组合报告的主干文件名
pub const REPORT_BASENAME: &str = "supporting";

/// 会话目录名的 UUID 形状
const SESSION_ID_SHAPE: &str =
    "^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

// ─────────────────────────────────────────────────────────────
// 会话仓库
// ─────────────────────────────────────────────────────────────

/// 上传根目录下的会话仓库
#[derive(Debug, Clone)]
pub struct SessionStore {
    root: PathBuf,
    max_age: Duration,
}

impl SessionStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        SessionStore {
            root: root.into(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_max_age(root: impl Into<PathBuf>, max_age: Duration) -> Self {
        SessionStore {
            root: root.into(),
            max_age,
        }
    }

    /// 新建会话：生成 UUID 并占住目录
    ///
    /// 目录已存在时换一个 UUID 重试；其余创建失败（权限、磁盘满）
    /// 不与撞名混为一谈，原样上报。
    pub fn create_session(&self) -> Result<Session> {
        loop {
            let id = Uuid::new_v4().to_string();
            let dir = self.root.join(&id);
            match fs::create_dir(&dir) {
                Ok(()) => return Ok(Session { id, dir }),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(SigenError::FileWriteError {
                        path: dir.display().to_string(),
                        source: e,
                    })
                }
            }
        }
    }

    /// 清理过期会话，返回删掉的目录数
    ///
    /// 只删名字符合 UUID 形状且修改时间超过保留时长的子目录。
    /// 单个目录删除失败跳过，不中断整轮扫描；修改时间在未来的
    /// 目录视为未过期。
    pub fn sweep(&self) -> Result<usize> {
        let entries = fs::read_dir(&self.root).map_err(|e| SigenError::FileReadError {
            path: self.root.display().to_string(),
            source: e,
        })?;

        let id_shape = Regex::new(SESSION_ID_SHAPE).unwrap();
        let mut removed = 0;

        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            if !id_shape.is_match(&name) {
                continue;
            }

            let expired = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|mtime| mtime.elapsed().ok())
                .map(|age| age > self.max_age)
                .unwrap_or(false);

            if expired && fs::remove_dir_all(&path).is_ok() {
                removed += 1;
            }
        }

        Ok(removed)
    }
}

// ─────────────────────────────────────────────────────────────
// 单个会话
// ─────────────────────────────────────────────────────────────

/// 一次上传批次对应的会话目录
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub dir: PathBuf,
}

impl Session {
    /// 保存一个上传文件
    ///
    /// 文件名只取最后一个路径分量，上传方给的目录前缀全部丢弃，
    /// 写入位置永远在会话目录内。
    pub fn save_upload(&self, name: &str, content: &[u8]) -> Result<PathBuf> {
        let filename = Path::new(name)
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SigenError::InvalidArgument(format!("Unusable upload filename: {}", name))
            })?;

        let destination = self.dir.join(filename);
        fs::write(&destination, content).map_err(|e| SigenError::FileWriteError {
            path: destination.display().to_string(),
            source: e,
        })?;
        Ok(destination)
    }

    /// 收集会话内的输入文件，按文件名排序
    pub fn collect_inputs(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| SigenError::FileReadError {
            path: self.dir.display().to_string(),
            source: e,
        })?;

        let mut inputs: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file()
                    && path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| UPLOAD_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                        .unwrap_or(false)
            })
            .collect();
        inputs.sort();
        Ok(inputs)
    }

    /// 持久化组合报告，按正文格式定扩展名
    pub fn persist_report(&self, body: &str, html: bool) -> Result<PathBuf> {
        let extension = if html { "html" } else { "md" };
        let path = self.dir.join(format!("{}.{}", REPORT_BASENAME, extension));
        fs::write(&path, body).map_err(|e| SigenError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(path)
    }

    /// 持久化伴随结构文件 `<basename>.pdb`；几何缺失时跳过
    pub fn persist_structure(&self, molecule: &Molecule) -> Result<Option<PathBuf>> {
        let block = match molecule.structure_block() {
            Some(block) => block,
            None => return Ok(None),
        };

        let path = self.dir.join(molecule.structure_filename());
        fs::write(&path, block).map_err(|e| SigenError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Some(path))
    }
}

// ─────────────────────────────────────────────────────────────
// 会话级报告流程
// ─────────────────────────────────────────────────────────────

/// 处理整个会话：提取、渲染、持久化
///
/// 任何一个输入失败都立刻终止本会话的处理。成功时组合报告和
/// 伴随结构文件均已写入会话目录。
pub fn process_session(
    session: &Session,
    options: &ReportOptions,
    parse_command: &str,
    imager: &dyn RenderImage,
) -> Result<Vec<(Molecule, RenderedReport)>> {
    let mut results = Vec::new();
    for path in session.collect_inputs()? {
        let molecule = extract::extract_molecule(&path, parse_command)?;
        let report = render::render_report(&molecule, options, imager)?;
        results.push((molecule, report));
    }

    let combined = results
        .iter()
        .map(|(_, report)| report.body.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");
    session.persist_report(&combined, options.html)?;

    for (molecule, _) in &results {
        session.persist_structure(molecule)?;
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullImageRenderer;

    fn store(dir: &Path) -> SessionStore {
        SessionStore::new(dir)
    }

    #[test]
    fn test_create_session_claims_uuid_directory() {
        let root = tempfile::tempdir().unwrap();
        let session = store(root.path()).create_session().unwrap();

        assert!(session.dir.is_dir());
        let shape = Regex::new(SESSION_ID_SHAPE).unwrap();
        assert!(shape.is_match(&session.id), "id {} has uuid shape", session.id);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let root = tempfile::tempdir().unwrap();
        let store = store(root.path());
        let first = store.create_session().unwrap();
        let second = store.create_session().unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_save_upload_strips_directory_components() {
        let root = tempfile::tempdir().unwrap();
        let session = store(root.path()).create_session().unwrap();

        let saved = session
            .save_upload("../../outside/../evil.out", b"contents")
            .unwrap();
        assert_eq!(saved, session.dir.join("evil.out"));
        assert!(saved.is_file());
    }

    #[test]
    fn test_collect_inputs_filters_and_sorts() {
        let root = tempfile::tempdir().unwrap();
        let session = store(root.path()).create_session().unwrap();
        session.save_upload("b.qfi", b"{}").unwrap();
        session.save_upload("a.out", b"{}").unwrap();
        session.save_upload("notes.txt", b"skip me").unwrap();
        session.save_upload("README", b"skip me too").unwrap();

        let inputs = session.collect_inputs().unwrap();
        let names: Vec<_> = inputs
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, ["a.out", "b.qfi"]);
    }

    #[test]
    fn test_persist_report_extension_tracks_format() {
        let root = tempfile::tempdir().unwrap();
        let session = store(root.path()).create_session().unwrap();

        let md = session.persist_report("# report", false).unwrap();
        assert_eq!(md.file_name().unwrap(), "supporting.md");
        let html = session.persist_report("<h1>report</h1>", true).unwrap();
        assert_eq!(html.file_name().unwrap(), "supporting.html");
    }

    #[test]
    fn test_sweep_removes_expired_sessions() {
        let root = tempfile::tempdir().unwrap();
        let expiring = SessionStore::with_max_age(root.path(), Duration::ZERO);
        let session = expiring.create_session().unwrap();

        let removed = expiring.sweep().unwrap();
        assert_eq!(removed, 1);
        assert!(!session.dir.exists());
    }

    #[test]
    fn test_sweep_keeps_fresh_sessions() {
        let root = tempfile::tempdir().unwrap();
        let store = store(root.path());
        let session = store.create_session().unwrap();

        let removed = store.sweep().unwrap();
        assert_eq!(removed, 0);
        assert!(session.dir.is_dir());
    }

    #[test]
    fn test_sweep_ignores_foreign_directories() {
        // 上传根目录可能与他人共享，非 UUID 目录一律不碰
        let root = tempfile::tempdir().unwrap();
        let foreign = root.path().join("keep-me");
        fs::create_dir(&foreign).unwrap();

        let expiring = SessionStore::with_max_age(root.path(), Duration::ZERO);
        let session = expiring.create_session().unwrap();
        let removed = expiring.sweep().unwrap();

        assert_eq!(removed, 1);
        assert!(!session.dir.exists());
        assert!(foreign.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_session_end_to_end() {
        let root = tempfile::tempdir().unwrap();
        let session = store(root.path()).create_session().unwrap();
        session
            .save_upload(
                "methane.out",
                br#"{
                    "atoms": ["C", "H", "H", "H", "H"],
                    "coordinates": [[0.0, 0.0, 0.0], [0.629, 0.629, 0.629],
                                    [-0.629, -0.629, 0.629], [-0.629, 0.629, -0.629],
                                    [0.629, -0.629, -0.629]],
                    "charge": 0
                }"#,
            )
            .unwrap();

        let options = ReportOptions::default();
        let results = process_session(&session, &options, "cat", &NullImageRenderer).unwrap();
        assert_eq!(results.len(), 1);

        let report = fs::read_to_string(session.dir.join("supporting.md")).unwrap();
        assert!(report.contains("# methane"));
        assert!(report.contains("| Charge | 0 |"));

        let pdb = fs::read_to_string(session.dir.join("methane.out.pdb")).unwrap();
        assert!(pdb.starts_with("TITLE unknown"));
        assert!(pdb.contains("ATOM      1  C1  UNK"));
    }

    #[test]
    fn test_process_session_fails_fast_on_bad_input() {
        let root = tempfile::tempdir().unwrap();
        let session = store(root.path()).create_session().unwrap();
        session.save_upload("broken.qfi", b"not json").unwrap();

        let err = process_session(
            &session,
            &ReportOptions::default(),
            "cat",
            &NullImageRenderer,
        )
        .expect_err("bad input must fail the session");
        // cat 在 unix 下回显损坏内容触发解析错误；无 cat 的平台上命令缺失
        assert!(matches!(
            err,
            SigenError::ParseError { .. } | SigenError::CommandNotFound { .. }
        ));
    }
}
