//! # 固定列宽结构文件块
//!
//! 输出最小可用的单模型结构文件：`TITLE`/`MODEL` 头、逐原子记录行、
//! `ENDMDL`/`END` 尾。记录行按列号对齐，坐标占 8 列、3 位小数。
//!
//! 原子记录分两类：六种常见有机元素（C、H、O、N、P、S，不区分大小写，
//! 按完整符号精确匹配）写 `ATOM`，其余一律 `HETATM`。

/// 写 `ATOM` 记录的元素符号全集
const ORGANIC_ELEMENTS: [&str; 6] = ["C", "H", "O", "N", "P", "S"];

fn record_field(element: &str) -> &'static str {
    let organic = ORGANIC_ELEMENTS
        .iter()
        .any(|known| element.eq_ignore_ascii_case(known));
    if organic {
        "ATOM"
    } else {
        "HETATM"
    }
}

/// 把符号序列和坐标渲染成结构文件文本块
///
/// 序号从 1 起跨全部原子连续编号；原子名为元素符号加该元素的出现次序
/// （C1、H1、H2 …），居中占 4 列。残基名固定 `UNK`、残基号固定 1、
/// 占有率 1.00、温度因子 0.00。返回值以换行符结尾。
pub fn to_pdb_block(atoms: &[String], coordinates: &[[f64; 3]]) -> String {
    let mut lines = vec!["TITLE unknown".to_string(), "MODEL 1".to_string()];
    let mut counters: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();

    for (index, (element, &[x, y, z])) in atoms.iter().zip(coordinates.iter()).enumerate() {
        let count = counters.entry(element.as_str()).or_insert(0);
        *count += 1;
        let atom_name = format!("{}{}", element, count);

        lines.push(format!(
            "{:<6}{:>5} {:^4}{:<1}{:<3} {:<1}{:>4}{:<1}   \
             {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}{:>2}",
            record_field(element),
            index + 1,
            atom_name,
            "",    // 可选位置指示符
            "UNK", // 残基名
            "",    // 链标识
            1,     // 残基号
            "",    // 插入码
            x,
            y,
            z,
            1.0, // 占有率
            0.0, // 温度因子
            element,
            "", // 电荷
        ));
    }

    lines.push("ENDMDL\nEND\n".to_string());
    lines.join("\n")
}
