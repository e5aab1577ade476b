//! # 分子图像渲染
//!
//! 图像渲染是外部协作方：报告模板引用 `image` 占位符且开启预览时，
//! 渲染器通过本契约取得图像路径。默认实现调用 PyMOL 命令行，
//! 测试和禁用预览的场景用空实现。

use crate::error::{Result, SigenError};
use crate::models::Molecule;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

/// 图像渲染契约：成功但无图可渲染时返回 `Ok(None)`
pub trait RenderImage {
    fn render_image(&self, molecule: &Molecule) -> Result<Option<PathBuf>>;
}

/// 永不渲染图像的空实现
pub struct NullImageRenderer;

impl RenderImage for NullImageRenderer {
    fn render_image(&self, _molecule: &Molecule) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

/// 调用 PyMOL 无头模式渲染 PNG
///
/// 结构块写入临时文件，`pymol -cq <pdb> -g <png>` 输出到目标目录。
/// 几何数据缺失时没有可渲染的结构，返回 `Ok(None)`。
pub struct PymolRenderer {
    /// PNG 输出目录
    pub directory: PathBuf,
}

impl PymolRenderer {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        PymolRenderer {
            directory: directory.into(),
        }
    }
}

impl RenderImage for PymolRenderer {
    fn render_image(&self, molecule: &Molecule) -> Result<Option<PathBuf>> {
        let block = match molecule.structure_block() {
            Some(block) => block,
            None => return Ok(None),
        };

        let temp_pdb = std::env::temp_dir().join(format!("{}.pdb", molecule.name));
        fs::write(&temp_pdb, &block).map_err(|e| SigenError::FileWriteError {
            path: temp_pdb.display().to_string(),
            source: e,
        })?;

        let png_path = self.directory.join(format!("{}.png", molecule.name));
        let result = Command::new("pymol")
            .args(["-cq"])
            .arg(&temp_pdb)
            .arg("-g")
            .arg(&png_path)
            .output();

        // 清理临时文件
        let _ = fs::remove_file(&temp_pdb);

        match result {
            Ok(output) if output.status.success() => Ok(Some(png_path)),
            Ok(output) => Err(SigenError::CommandFailed {
                command: "pymol".to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
            Err(_) => Err(SigenError::CommandNotFound {
                command: "pymol".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttributeBag;

    #[test]
    fn test_null_renderer_renders_nothing() {
        let mol = Molecule::from_parts("x", AttributeBag::new());
        assert!(NullImageRenderer.render_image(&mol).unwrap().is_none());
    }

    #[test]
    fn test_pymol_skips_molecule_without_geometry() {
        // 无几何数据时不应尝试调用外部命令
        let mut bag = AttributeBag::new();
        bag.insert("charge", 0i64);
        let mol = Molecule::from_parts("bare", bag);

        let rendered = PymolRenderer::new("/tmp").render_image(&mol).unwrap();
        assert!(rendered.is_none());
    }
}
