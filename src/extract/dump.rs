//! # 属性转储读取器
//!
//! 读取已序列化的属性转储文件（JSON 对象，键为属性名）。用于两个场景：
//! 离线保存的提取结果直接复用，以及测试夹具。

use crate::error::{Result, SigenError};
use crate::extract::Extract;
use crate::models::AttributeBag;
use std::fs;
use std::path::Path;

/// 把 JSON 属性转储反序列化为属性包
pub struct DumpReader;

impl Extract for DumpReader {
    fn extract(&self, path: &Path) -> Result<AttributeBag> {
        let content = fs::read_to_string(path).map_err(|e| SigenError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        serde_json::from_str(&content).map_err(|e| SigenError::ParseError {
            format: "attribute dump".to_string(),
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttrValue;
    use std::fs;

    #[test]
    fn test_reads_scalars_and_sequences() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ethane.json");
        fs::write(
            &path,
            r##"{
                "charge": 0,
                "mult": 1,
                "electronic_energy": -79.830,
                "route": "#p opt freq b3lyp/6-31g(d)",
                "atoms": ["C", "C"],
                "coordinates": [[0.0, 0.0, 0.765], [0.0, 0.0, -0.765]],
                "enthalpy": null
            }"##,
        )
        .unwrap();

        let bag = DumpReader.extract(&path).unwrap();
        assert_eq!(bag.get("charge"), Some(&AttrValue::Int(0)));
        assert_eq!(
            bag.atoms().map(|a| a.len()),
            Some(2),
            "atom symbols survive the round trip"
        );
        assert_eq!(bag.coordinates().unwrap()[0][2], 0.765);
        // 显式 null 保留为空标记
        assert!(bag.is_missing("enthalpy"));
        assert_eq!(bag.get("enthalpy"), Some(&AttrValue::Null));
    }

    #[test]
    fn test_malformed_dump_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not valid json").unwrap();

        let err = DumpReader.extract(&path).expect_err("must reject bad json");
        assert!(matches!(err, SigenError::ParseError { .. }));
    }

    #[test]
    fn test_unreadable_path_is_read_error() {
        let err = DumpReader
            .extract(Path::new("/no/such/dump.json"))
            .expect_err("must reject missing file");
        assert!(matches!(err, SigenError::FileReadError { .. }));
    }
}
