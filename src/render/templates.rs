//! # 内置模板集
//!
//! 三个编译期内嵌的报告模板：
//! - `default.md`: 表格化能量汇总加坐标块，适合论文附录
//! - `simple.md`: 仅标题和坐标块
//! - `checks.md`: 计算完成性自查清单
//!
//! 名字查找失败不报错，由调用方回退为字面模板文本。

/// 模板名到模板源码的映射
pub const BUILTIN_TEMPLATES: [(&str, &str); 3] = [
    ("default.md", include_str!("templates/default.md")),
    ("simple.md", include_str!("templates/simple.md")),
    ("checks.md", include_str!("templates/checks.md")),
];

/// 按名字取内置模板源码
pub fn builtin(name: &str) -> Option<&'static str> {
    BUILTIN_TEMPLATES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, source)| *source)
}

/// 全部内置模板名
pub fn names() -> Vec<&'static str> {
    BUILTIN_TEMPLATES.iter().map(|(n, _)| *n).collect()
}
