//! # report 命令实现
//!
//! 支持信息报告的批量生成流水线：收集输入、并行提取渲染、
//! 组合文档输出，外加伴随结构文件、属性转储和汇总表。
//!
//! ## 流程
//! 1. 模板参数解析：现存文件路径读内容，其余交给渲染器按
//!    内置名/字面文本解析
//! 2. 收集并去重输入文件
//! 3. 并行提取 + 渲染，结果保持输入顺序
//! 4. 组合文档写目标文件或标准输出
//! 5. 可选产物：`.pdb` 伴随文件、JSON 属性转储、CSV 汇总
//!
//! `--store` 切换到会话模式：输入先入仓成一个新会话，再走
//! `delivery/` 的会话流程（失败即终止，产物落在会话目录）。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 调用
//! - 使用 `batch/`, `extract/`, `render/`, `delivery/`, `models/`, `utils/`

use crate::batch::{BatchRunner, BatchSummary, FileCollector};
use crate::cli::report::ReportArgs;
use crate::delivery::{self, SessionStore, UPLOAD_EXTENSIONS};
use crate::error::{Result, SigenError};
use crate::extract;
use crate::models::{AttrValue, AttributeBag, Molecule};
use crate::render::{self, NullImageRenderer, PymolRenderer, RenderedReport, ReportOptions};
use crate::utils::output;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 汇总表行
#[derive(Debug, Clone, Tabled)]
struct ReportRow {
    #[tabled(rename = "Molecule")]
    molecule: String,
    #[tabled(rename = "Formula")]
    formula: String,
    #[tabled(rename = "Atoms")]
    atoms: String,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
}

/// 执行 report 命令
pub fn execute(args: ReportArgs) -> Result<()> {
    output::print_header("Generating Supporting Information");

    let template = resolve_template_arg(&args.template)?;
    let files = collect_inputs(&args)?;
    output::print_info(&format!("Found {} input file(s)", files.len()));

    let options = ReportOptions {
        template,
        missing: args.missing.clone(),
        show_missing: !args.hide_missing,
        render_image: args.render,
        html: args.html,
        web: false,
    };

    if let Some(ref store_root) = args.store {
        return execute_session(store_root, files, &options, &args);
    }

    // 并行提取 + 渲染
    let parser = args.parser.clone();
    let render_images = args.render;
    let results = BatchRunner::new(args.jobs).run(files, "Rendering", |path| {
        let molecule = extract::extract_molecule(path, &parser)?;
        let report = if render_images {
            let image_dir = path.parent().unwrap_or_else(|| Path::new("."));
            render::render_report(&molecule, &options, &PymolRenderer::new(image_dir))
        } else {
            render::render_report(&molecule, &options, &NullImageRenderer)
        }?;
        Ok((molecule, report))
    });

    let summary = BatchSummary::from_results(&results);
    for (path, reason) in &summary.failures {
        output::print_error(&format!("{}: {}", path, reason));
    }

    let successes: Vec<(PathBuf, Molecule, RenderedReport)> = results
        .into_iter()
        .filter_map(|(path, result)| result.ok().map(|(m, r)| (path, m, r)))
        .collect();

    if successes.is_empty() {
        return Err(SigenError::Other(
            "No report could be generated from the given inputs".to_string(),
        ));
    }

    // 组合文档，按输入顺序拼接
    let combined = successes
        .iter()
        .map(|(_, _, report)| report.body.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    match &args.output {
        Some(path) => {
            fs::write(path, &combined).map_err(|e| SigenError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_artifact("report", &path.display().to_string());
        }
        None => println!("{}", combined),
    }

    if args.pdb {
        write_structure_companions(&successes)?;
    }
    if let Some(ref json_path) = args.json {
        write_attribute_dumps(&successes, json_path)?;
    }
    if let Some(ref csv_path) = args.csv {
        save_summary_csv(&successes, csv_path)?;
        output::print_success(&format!("Summary saved to '{}'", csv_path.display()));
    }

    // 文档走文件时终端上展示汇总表
    if args.output.is_some() {
        let rows: Vec<ReportRow> = successes
            .iter()
            .map(|(_, molecule, _)| ReportRow {
                molecule: molecule.name.clone(),
                formula: molecule.formula().unwrap_or_else(|| "-".to_string()),
                atoms: molecule
                    .num_atoms()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                energy: match molecule.attributes().get("electronic_energy") {
                    Some(AttrValue::Float(v)) => format!("{:.4}", v),
                    Some(AttrValue::Int(v)) => v.to_string(),
                    _ => "-".to_string(),
                },
            })
            .collect();
        let table = Table::new(&rows);
        println!("{}", table);
    }

    output::print_done(&format!(
        "Generated {} report(s) ({} failed)",
        summary.success, summary.failed
    ));
    Ok(())
}

/// 会话模式：在上传根目录下开新会话，入仓后按会话流程处理
///
/// 与批量模式不同，会话内任何一个输入失败都终止整个会话，
/// 组合报告和伴随结构文件都落在会话目录里。
fn execute_session(
    store_root: &Path,
    files: Vec<PathBuf>,
    options: &ReportOptions,
    args: &ReportArgs,
) -> Result<()> {
    fs::create_dir_all(store_root).map_err(|e| SigenError::FileWriteError {
        path: store_root.display().to_string(),
        source: e,
    })?;
    let session = SessionStore::new(store_root).create_session()?;

    let mut saved = 0usize;
    for file in &files {
        let allowed = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| UPLOAD_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);
        if !allowed {
            output::print_warning(&format!(
                "{}: extension not accepted for upload, skipped",
                file.display()
            ));
            continue;
        }

        let content = fs::read(file).map_err(|e| SigenError::FileReadError {
            path: file.display().to_string(),
            source: e,
        })?;
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload");
        session.save_upload(name, &content)?;
        saved += 1;
    }

    if saved == 0 {
        return Err(SigenError::NoFilesFound {
            pattern: UPLOAD_EXTENSIONS
                .map(|ext| format!("*.{}", ext))
                .join(", "),
        });
    }

    let results = if args.render {
        delivery::process_session(
            &session,
            options,
            &args.parser,
            &PymolRenderer::new(&session.dir),
        )
    } else {
        delivery::process_session(&session, options, &args.parser, &NullImageRenderer)
    }?;

    output::print_artifact("session", &session.dir.display().to_string());
    output::print_done(&format!(
        "Stored session {} with {} report(s)",
        session.id,
        results.len()
    ));
    Ok(())
}

/// 模板参数预解析：指向现存文件时读取其内容作字面模板
fn resolve_template_arg(template: &str) -> Result<String> {
    let path = Path::new(template);
    if path.is_file() {
        return fs::read_to_string(path).map_err(|e| SigenError::FileReadError {
            path: path.display().to_string(),
            source: e,
        });
    }
    Ok(template.to_string())
}

/// 收集全部输入并去重
fn collect_inputs(args: &ReportArgs) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in &args.inputs {
        let mut collector = FileCollector::new(input.clone()).recursive(args.recursive);
        if let Some(ref pattern) = args.pattern {
            collector = collector.with_pattern(pattern);
        }
        files.extend(collector.collect()?);
    }
    files.sort();
    files.dedup();

    if files.is_empty() {
        return Err(SigenError::NoFilesFound {
            pattern: args
                .pattern
                .clone()
                .unwrap_or_else(|| "supported input extensions".to_string()),
        });
    }
    Ok(files)
}

/// 给每个成功的分子写 `<basename>.pdb` 伴随文件
fn write_structure_companions(successes: &[(PathBuf, Molecule, RenderedReport)]) -> Result<()> {
    for (path, molecule, _) in successes {
        match molecule.structure_block() {
            Some(block) => {
                let companion = path.with_file_name(molecule.structure_filename());
                fs::write(&companion, block).map_err(|e| SigenError::FileWriteError {
                    path: companion.display().to_string(),
                    source: e,
                })?;
                output::print_artifact("structure", &companion.display().to_string());
            }
            None => {
                output::print_warning(&format!(
                    "{}: no geometry available, structure file skipped",
                    molecule.name
                ));
            }
        }
    }
    Ok(())
}

/// 把提取到的属性包写成 JSON 转储，键为来源路径
fn write_attribute_dumps(
    successes: &[(PathBuf, Molecule, RenderedReport)],
    json_path: &Path,
) -> Result<()> {
    let dumps: BTreeMap<String, &AttributeBag> = successes
        .iter()
        .map(|(path, molecule, _)| (path.display().to_string(), molecule.attributes()))
        .collect();

    let content = serde_json::to_string_pretty(&dumps)?;
    fs::write(json_path, content).map_err(|e| SigenError::FileWriteError {
        path: json_path.display().to_string(),
        source: e,
    })?;
    output::print_artifact("attributes", &json_path.display().to_string());
    Ok(())
}

/// 保存分子汇总 CSV
fn save_summary_csv(
    successes: &[(PathBuf, Molecule, RenderedReport)],
    output_path: &Path,
) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path).map_err(SigenError::CsvError)?;

    wtr.write_record(["molecule", "formula", "atoms", "electronic_energy", "source"])
        .map_err(SigenError::CsvError)?;

    for (path, molecule, _) in successes {
        let energy = match molecule.attributes().get("electronic_energy") {
            Some(AttrValue::Float(v)) => v.to_string(),
            Some(AttrValue::Int(v)) => v.to_string(),
            _ => String::new(),
        };
        wtr.write_record([
            molecule.name.clone(),
            molecule.formula().unwrap_or_default(),
            molecule
                .num_atoms()
                .map(|n| n.to_string())
                .unwrap_or_default(),
            energy,
            path.display().to_string(),
        ])
        .map_err(SigenError::CsvError)?;
    }

    wtr.flush().map_err(|e| SigenError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;
    Ok(())
}
