//! # 纯文本坐标块
//!
//! 每个原子一行：左对齐 6 列的元素符号加三个 10 列宽、6 位小数的坐标。
//! 正数在符号位留一个空格，保证正负混排时小数点对齐。

/// 非负数在符号位补空格后右对齐到固定宽度
///
/// 列宽不足以容纳数值时字段自然变宽，符号位空格仍然保留，
/// 因此超宽行的正负值也保持对齐。
fn signed_fixed(value: f64, width: usize, precision: usize) -> String {
    let body = if value.is_sign_negative() {
        format!("{:.*}", precision, value)
    } else {
        format!(" {:.*}", precision, value)
    };
    format!("{:>width$}", body)
}

/// 把符号序列和坐标渲染成坐标块文本
///
/// 行间以 `\n` 连接，末尾无换行；输入为空时返回空字符串。
pub fn to_xyz_block(atoms: &[String], coordinates: &[[f64; 3]]) -> String {
    atoms
        .iter()
        .zip(coordinates.iter())
        .map(|(element, &[x, y, z])| {
            format!(
                "{:<6} {} {} {}",
                element,
                signed_fixed(x, 10, 6),
                signed_fixed(y, 10, 6),
                signed_fixed(z, 10, 6),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(symbols: &[&str]) -> Vec<String> {
        symbols.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_atom_line_layout() {
        let block = to_xyz_block(&labels(&["C"]), &[[0.0, 0.0, 0.0]]);
        assert_eq!(block, "C        0.000000   0.000000   0.000000");
    }

    #[test]
    fn test_negative_values_keep_columns_aligned() {
        let block = to_xyz_block(
            &labels(&["H", "H"]),
            &[[0.629, 0.629, 0.629], [-0.629, -0.629, 0.629]],
        );
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines[0], "H        0.629000   0.629000   0.629000");
        assert_eq!(lines[1], "H       -0.629000  -0.629000   0.629000");
        // 两行等宽，小数点落在同一列
        assert_eq!(lines[0].len(), lines[1].len());
        assert_eq!(lines[0].find('.'), lines[1].find('.'));
    }

    #[test]
    fn test_overwide_value_keeps_sign_column() {
        let block = to_xyz_block(
            &labels(&["Fe", "Fe"]),
            &[[1234.567890, 0.0, 0.0], [-1234.567890, 0.0, 0.0]],
        );
        let lines: Vec<&str> = block.lines().collect();
        // 字段超宽后正数靠符号位空格与负数保持同宽
        assert_eq!(lines[0], "Fe      1234.567890   0.000000   0.000000");
        assert_eq!(lines[1], "Fe     -1234.567890   0.000000   0.000000");
        assert_eq!(lines[0].len(), lines[1].len());
    }

    #[test]
    fn test_no_trailing_newline() {
        let block = to_xyz_block(&labels(&["N"]), &[[1.0, 2.0, 3.0]]);
        assert!(!block.ends_with('\n'));
        assert_eq!(block, "N        1.000000   2.000000   3.000000");
    }

    #[test]
    fn test_empty_input_gives_empty_block() {
        assert_eq!(to_xyz_block(&[], &[]), "");
    }

    #[test]
    fn test_extra_coordinates_truncated() {
        let block = to_xyz_block(&labels(&["O"]), &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]]);
        assert_eq!(block.lines().count(), 1);
    }
}
