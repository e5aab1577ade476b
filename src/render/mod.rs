//! # 报告渲染模块
//!
//! 把分子模型和模板变成报告文档。渲染对缺失数据是全函数：
//! 模板引用了属性包里没有的键时，按配置替换为哨兵值或空串，
//! 绝不报错。量化输出文件的字段随计算类型差异很大，缺字段是
//! 常态而不是异常。
//!
//! 渲染流程：
//! 1. 解析模板来源：内置名 → 内置源码；否则整个字符串就是模板文本
//! 2. 静态分析模板，求出固定上下文覆盖不到的自由变量集
//! 3. 自由变量含 `image` 且开启预览时调用图像渲染协作方
//! 4. 绑定上下文并渲染
//! 5. 需要时把 Markdown 转成 HTML
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `delivery/` 使用
//! - 使用 `models/`, `formats/`（经由 Molecule 派生块）
//! - 子模块: templates, markdown, image

pub mod image;
pub mod markdown;
pub mod templates;

use crate::error::Result;
use crate::models::Molecule;
use minijinja::{Environment, UndefinedBehavior, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub use image::{NullImageRenderer, PymolRenderer, RenderImage};

/// 渲染后原样保留的查看器占位符
///
/// 两段替换契约：渲染器自己的替换不吞掉这个记号，外部展示层
/// （网页嵌入 3D 查看器时）再做第二次替换。
pub const VIEWER3D_TOKEN: &str = "{{ viewer3d }}";

/// 渲染器自行绑定的固定上下文名
///
/// 静态分析时从自由变量集里扣除，不参与哨兵替换。
pub const FIXED_CONTEXT: [&str; 6] = [
    "viewer3d",
    "name",
    "basename",
    "cartesians",
    "web",
    "show_nas",
];

/// 模板引用的图像占位符名
pub const IMAGE_PLACEHOLDER: &str = "image";

// ─────────────────────────────────────────────────────────────
// 配置与结果类型
// ─────────────────────────────────────────────────────────────

/// 渲染配置
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// 模板：内置名或字面模板文本
    pub template: String,

    /// 缺失数据的哨兵值
    pub missing: String,

    /// 缺失键替换为哨兵值；关闭时渲染为空
    pub show_missing: bool,

    /// 模板引用 `image` 时调用图像渲染协作方
    pub render_image: bool,

    /// 渲染完成后把 Markdown 转成 HTML
    pub html: bool,

    /// 网页上下文（启用查看器占位符等网页专用片段）
    pub web: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            template: "default.md".to_string(),
            missing: "N/A".to_string(),
            show_missing: true,
            render_image: false,
            html: false,
            web: false,
        }
    }
}

/// 模板解析结果的来源标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOrigin {
    /// 按名字命中内置模板
    Builtin,
    /// 字符串本身作为模板文本
    Literal,
}

/// 渲染产物
#[derive(Debug, Clone)]
pub struct RenderedReport {
    /// 文档正文（Markdown 或转换后的 HTML）
    pub body: String,

    /// 模板来源
    pub origin: TemplateOrigin,

    /// 正文是否已经是 HTML
    pub html: bool,

    /// 渲染出的图像路径（有的话）
    pub image: Option<PathBuf>,
}

// ─────────────────────────────────────────────────────────────
// 渲染流程
// ─────────────────────────────────────────────────────────────

/// 解析模板来源
///
/// 两步解析是全函数：内置名查不到就把字符串当模板文本，任何
/// 情况都不报错。真正的模板语法错误留到编译阶段向上传播。
pub fn resolve_template(template: &str) -> (&str, TemplateOrigin) {
    match templates::builtin(template) {
        Some(source) => (source, TemplateOrigin::Builtin),
        None => (template, TemplateOrigin::Literal),
    }
}

/// 渲染一份报告
///
/// 仅两类错误向上传播：模板语法/求值错误、图像渲染失败。
/// 模板名解析失败和数据缺失都在内部恢复。
pub fn render_report(
    molecule: &Molecule,
    options: &ReportOptions,
    imager: &dyn RenderImage,
) -> Result<RenderedReport> {
    let (source, origin) = resolve_template(&options.template);

    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env.add_global("viewer3d", VIEWER3D_TOKEN);

    let template = env.template_from_str(source)?;

    // 干跑分析：只收集名字，不执行模板
    let undeclared = template.undeclared_variables(false);
    let free: BTreeSet<&str> = undeclared
        .iter()
        .map(|s| s.as_str())
        .filter(|n| !FIXED_CONTEXT.contains(n))
        .collect();

    let image = if options.render_image && free.contains(IMAGE_PLACEHOLDER) {
        imager.render_image(molecule)?
    } else {
        None
    };

    let context = build_context(molecule, options, &free, image.as_deref());
    let body = template.render(&context)?;

    let body = if options.html {
        markdown::to_html(&body)
    } else {
        body
    };

    Ok(RenderedReport {
        body,
        origin,
        html: options.html,
        image,
    })
}

/// 组装渲染上下文
///
/// 绑定顺序决定覆盖关系：属性包先进，固定绑定后进并覆盖同名键，
/// 最后给剩余自由变量补哨兵值。显式 null 和完全缺席的键走同一条
/// 缺失路径；不绑定的名字经宽松未定义语义渲染为空。
fn build_context(
    molecule: &Molecule,
    options: &ReportOptions,
    free: &BTreeSet<&str>,
    image: Option<&std::path::Path>,
) -> BTreeMap<String, Value> {
    let mut context: BTreeMap<String, Value> = BTreeMap::new();

    for (key, value) in molecule.attributes().iter() {
        if value.is_null() {
            if options.show_missing {
                context.insert(key.clone(), Value::from(options.missing.as_str()));
            }
        } else {
            context.insert(key.clone(), Value::from_serialize(value));
        }
    }

    context.insert("name".to_string(), Value::from(molecule.name.as_str()));
    context.insert(
        "basename".to_string(),
        Value::from(molecule.basename.as_str()),
    );
    context.insert("web".to_string(), Value::from(options.web));
    context.insert("show_nas".to_string(), Value::from(options.show_missing));

    if let Some(block) = molecule.coordinate_block() {
        context.insert("cartesians".to_string(), Value::from(block));
    }
    if let Some(path) = image {
        context.insert(
            IMAGE_PLACEHOLDER.to_string(),
            Value::from(path.display().to_string()),
        );
    }

    if options.show_missing {
        for free_name in free {
            // 图像占位符走预览逻辑，缺省渲染为空而不是哨兵值
            if *free_name == IMAGE_PLACEHOLDER {
                continue;
            }
            context
                .entry((*free_name).to_string())
                .or_insert_with(|| Value::from(options.missing.as_str()));
        }
    }

    context
}

// ─────────────────────────────────────────────────────────────
// 测试
// ─────────────────────────────────────────────────────────────
