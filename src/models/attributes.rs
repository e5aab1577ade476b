//! # 属性包数据模型
//!
//! 外部提取器对单个计算日志文件的解析结果：属性名到属性值的有序映射。
//! 值的形态是封闭集合：标量、标量序列、或坐标三元组序列；缺失字段用显式的
//! `Null` 标记表示，与键不存在同义（渲染器对两者一视同仁）。
//!
//! serde 采用 untagged 表示，因此属性包的 JSON 序列化形态就是外部解析库
//! 输出的属性转储格式本身。
//!
//! ## 依赖关系
//! - 被 `extract/`, `render/`, `models/molecule.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 单个属性值
///
/// untagged 反序列化按变体声明顺序尝试，`Null` 必须排在最前，
/// 整数排在浮点数之前以保留整型字面量。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    /// 显式缺失标记（JSON null）
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// 坐标序列，每项为 (x, y, z)
    Coords(Vec<[f64; 3]>),
    FloatList(Vec<f64>),
    TextList(Vec<String>),
}

impl AttrValue {
    /// 是否为显式缺失标记
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<Vec<f64>> for AttrValue {
    fn from(v: Vec<f64>) -> Self {
        AttrValue::FloatList(v)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(v: Vec<String>) -> Self {
        AttrValue::TextList(v)
    }
}

impl From<Vec<[f64; 3]>> for AttrValue {
    fn from(v: Vec<[f64; 3]>) -> Self {
        AttrValue::Coords(v)
    }
}

/// 属性包：属性名到属性值的有序映射
///
/// 使用 `BTreeMap` 保证遍历顺序稳定，渲染结果因此可复现。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag {
    attrs: BTreeMap<String, AttrValue>,
}

impl AttributeBag {
    pub fn new() -> Self {
        AttributeBag {
            attrs: BTreeMap::new(),
        }
    }

    /// 写入一个属性（仅在构造阶段使用，构造完成后不再修改）
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    /// 字段是否"不可用"：键不存在，或值为显式 Null
    pub fn is_missing(&self, name: &str) -> bool {
        match self.attrs.get(name) {
            None => true,
            Some(v) => v.is_null(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AttrValue)> {
        self.attrs.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.attrs.keys()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// 原子元素符号序列（格式转换器的必需输入之一）
    pub fn atoms(&self) -> Option<&[String]> {
        match self.attrs.get("atoms") {
            Some(AttrValue::TextList(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    /// 笛卡尔坐标序列（格式转换器的必需输入之一）
    pub fn coordinates(&self) -> Option<&[[f64; 3]]> {
        match self.attrs.get("coordinates") {
            Some(AttrValue::Coords(v)) => Some(v.as_slice()),
            _ => None,
        }
    }
}

impl FromIterator<(String, AttrValue)> for AttributeBag {
    fn from_iter<T: IntoIterator<Item = (String, AttrValue)>>(iter: T) -> Self {
        AttributeBag {
            attrs: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_scalar_kinds() {
        let json = r#"{
            "charge": 0,
            "electronic_energy": -40.5,
            "point_group": "C1",
            "optdone": true,
            "dipole_moment": null
        }"#;
        let bag: AttributeBag = serde_json::from_str(json).unwrap();

        assert_eq!(bag.get("charge"), Some(&AttrValue::Int(0)));
        assert_eq!(
            bag.get("electronic_energy"),
            Some(&AttrValue::Float(-40.5))
        );
        assert_eq!(
            bag.get("point_group"),
            Some(&AttrValue::Text("C1".to_string()))
        );
        assert_eq!(bag.get("optdone"), Some(&AttrValue::Bool(true)));
        assert_eq!(bag.get("dipole_moment"), Some(&AttrValue::Null));
    }

    #[test]
    fn test_deserialize_sequences() {
        let json = r#"{
            "atoms": ["C", "H", "H", "H", "H"],
            "coordinates": [[0.0, 0.0, 0.0], [0.6, 0.6, 0.6]],
            "vibrational_freqs": [123.4, 456.7]
        }"#;
        let bag: AttributeBag = serde_json::from_str(json).unwrap();

        assert_eq!(bag.atoms().unwrap().len(), 5);
        assert_eq!(bag.coordinates().unwrap(), &[[0.0, 0.0, 0.0], [0.6, 0.6, 0.6]]);
        assert_eq!(
            bag.get("vibrational_freqs"),
            Some(&AttrValue::FloatList(vec![123.4, 456.7]))
        );
    }

    #[test]
    fn test_missing_covers_null_and_absent() {
        let mut bag = AttributeBag::new();
        bag.insert("enthalpy", AttrValue::Null);
        bag.insert("charge", 0i64);

        assert!(bag.is_missing("enthalpy"));
        assert!(bag.is_missing("never_extracted"));
        assert!(!bag.is_missing("charge"));
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut bag = AttributeBag::new();
        bag.insert("atoms", vec!["O".to_string(), "H".to_string()]);
        bag.insert("coordinates", vec![[0.0, 0.0, 0.0], [0.96, 0.0, 0.0]]);
        bag.insert("electronic_energy", -76.4);
        bag.insert("dipole_moment", AttrValue::Null);

        let json = serde_json::to_string(&bag).unwrap();
        let back: AttributeBag = serde_json::from_str(&json).unwrap();
        assert_eq!(bag, back);
    }

    #[test]
    fn test_typed_accessors_reject_wrong_shape() {
        let mut bag = AttributeBag::new();
        bag.insert("atoms", -1.0);
        bag.insert("coordinates", vec![1.0, 2.0, 3.0]);

        assert!(bag.atoms().is_none());
        assert!(bag.coordinates().is_none());
    }

    #[test]
    fn test_iteration_order_is_sorted() {
        let mut bag = AttributeBag::new();
        bag.insert("zpve", 0.03);
        bag.insert("atoms", vec!["C".to_string()]);
        bag.insert("mult", 1i64);

        let keys: Vec<&String> = bag.keys().collect();
        assert_eq!(keys, ["atoms", "mult", "zpve"]);
    }
}
