//! # Markdown 转 HTML
//!
//! 用 `pulldown-cmark` 把渲染完的报告文本转成 HTML 片段。
//! 报告模板依赖表格语法，这里显式开启；围栏代码块属于
//! CommonMark 核心，无需额外选项。

use pulldown_cmark::{html, Options, Parser};

/// 把 Markdown 文本转换成 HTML 片段
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
