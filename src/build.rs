//! Chart rendering orchestration.
//!
//! ```text
//! build_charts()
//!     │
//!     ├── collect_datasets() ──► *.json under [build.data]
//!     ├── prepare_output()   ──► create (or clean) [build.output]
//!     └── render_dataset()   ──► parallel, one chart per dataset
//!             │
//!             ├── Dataset → HierarchyInput → ChartComposer → <svg>
//!             ├── wrap as HTML page / prepend XML declaration
//!             └── write_if_changed()
//! ```

use crate::{
    chart::{ChartComposer, Dataset},
    config::{OutputFormat, SurveyConfig},
    entities::EntityDirectory,
    log,
    logger::Progress,
    utils::{
        minify::minify_html,
        page::{PageOptions, wrap_page},
        xml::{create_xml_writer, into_string},
    },
};
use anyhow::{Context, Result, anyhow};
use quick_xml::events::{BytesDecl, Event};
use rayon::prelude::*;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};
use walkdir::WalkDir;

/// Outcome of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub written: usize,
    pub unchanged: usize,
}

/// Render every dataset under `[build.data]` into `[build.output]`.
///
/// `entities` resolves leaf labels to display names when given. The first
/// failing dataset is logged and fails the build.
pub fn build_charts(
    config: &SurveyConfig,
    entities: Option<&EntityDirectory>,
) -> Result<BuildReport> {
    let data = &config.build.data;
    let output = &config.build.output;

    let datasets = collect_datasets(data, &config.build.entities);
    if datasets.is_empty() {
        log!("warn"; "no datasets found in {}", data.display());
    }
    prepare_output(output, config.build.clean)?;

    log!("render"; "{} datasets", datasets.len());
    let progress = Progress::for_items("render", datasets.len());
    let has_error = AtomicBool::new(false);
    let written = AtomicUsize::new(0);

    let result = datasets.par_iter().try_for_each(|path| {
        if has_error.load(Ordering::Relaxed) {
            return Err(anyhow!("Aborted"));
        }
        match render_dataset(path, config, entities) {
            Ok(changed) => {
                if changed {
                    written.fetch_add(1, Ordering::Relaxed);
                }
                if let Some(progress) = &progress {
                    progress.inc();
                }
                Ok(())
            }
            Err(e) => {
                if !has_error.swap(true, Ordering::Relaxed) {
                    log!("error"; "{}: {:#}", path.display(), e);
                }
                Err(anyhow!("Build failed"))
            }
        }
    });

    if let Some(progress) = &progress {
        progress.finish();
    }
    result?;

    let written = written.into_inner();
    let report = BuildReport {
        written,
        unchanged: datasets.len() - written,
    };
    log!(
        "render"; "done: {} written, {} unchanged",
        report.written, report.unchanged
    );
    Ok(report)
}

/// Dataset files under `data`, sorted; `data` may also be a single file.
fn collect_datasets(data: &Path, entities: &Path) -> Vec<PathBuf> {
    if data.is_file() {
        return vec![data.to_path_buf()];
    }
    let mut files: Vec<_> = WalkDir::new(data)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "json"))
        .map(walkdir::DirEntry::into_path)
        .filter(|path| path != entities)
        .collect();
    files.sort();
    files
}

/// Create the output directory, emptying it first when `clean`.
fn prepare_output(output: &Path, clean: bool) -> Result<()> {
    if clean && output.exists() {
        fs::remove_dir_all(output).with_context(|| {
            format!("Failed to clear output directory: {}", output.display())
        })?;
    }
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))
}

/// Render one dataset; returns whether the output file changed.
fn render_dataset(
    path: &Path,
    config: &SurveyConfig,
    entities: Option<&EntityDirectory>,
) -> Result<bool> {
    let root = Dataset::from_path(path)?.into_hierarchy();
    let format = config.build.format;
    let minify = config.build.minify;

    let chart = ChartComposer::new(&config.theme, &config.chart)
        .interactive(format == OutputFormat::Html && config.chart.interactive)
        .compact(minify)
        .with_entities(entities)
        .compose(&root)?;

    let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    log!("render"; "{name}: {} nodes, {} leaves", chart.nodes, chart.leaves);
    for issue in &chart.issues {
        log!("warn"; "{name}: {issue}");
    }

    let document = match format {
        OutputFormat::Svg => svg_document(&chart.svg, minify)?.into_bytes(),
        OutputFormat::Html => {
            let page = wrap_page(
                &chart.svg,
                &PageOptions {
                    title: name,
                    theme: &config.theme,
                    interactive: config.chart.interactive,
                },
            )?;
            minify_html(page.as_bytes(), minify).into_owned()
        }
    };

    let target = output_path(&config.build.data, path, &config.build.output, format);
    write_if_changed(&target, &document)
}

/// Standalone SVG file content: XML declaration, then the chart.
fn svg_document(svg: &str, compact: bool) -> Result<String> {
    let mut writer = create_xml_writer(true);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    if !compact {
        writer.get_mut().write_all(b"\n")?;
    }
    writer.get_mut().write_all(svg.as_bytes())?;
    into_string(writer)
}

/// Output file for a dataset, mirroring its path below the data directory.
fn output_path(data: &Path, dataset: &Path, output: &Path, format: OutputFormat) -> PathBuf {
    let relative = match dataset.strip_prefix(data) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => dataset.file_name().map(Path::new).unwrap_or(dataset),
    };
    output.join(relative).with_extension(format.extension())
}

/// Write `content` unless the file already holds the same bytes.
fn write_if_changed(path: &Path, content: &[u8]) -> Result<bool> {
    if let Ok(existing) = fs::read(path)
        && blake3::hash(&existing) == blake3::hash(content)
    {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}
